//! OpenShift Route customizer

use super::replace_labels;
use crate::constants;
use crate::crds::{AppsodyApplication, Route, RoutePort};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use tracing::debug;

pub fn customize_route(mut route: Route, app: &AppsodyApplication) -> Route {
    replace_labels(&mut route.metadata, app);

    let target = &mut route.spec.to;
    target.kind = constants::route::TARGET_KIND.to_string();
    target.name = app.app_name();
    target.weight = Some(constants::route::TARGET_WEIGHT);

    let target_port = IntOrString::Int(app.spec.service.port);
    match route.spec.port.as_mut() {
        Some(port) => port.target_port = target_port,
        None => route.spec.port = Some(RoutePort { target_port }),
    }

    debug!("Customized Route for AppsodyApplication {}", app.app_name());
    route
}
