//! Service customizer. Only port 0 is managed; extra ports are left alone.

use super::replace_labels;
use crate::crds::AppsodyApplication;
use crate::labels::selector_labels;
use k8s_openapi::api::core::v1::{Service, ServicePort};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use tracing::debug;

pub fn customize_service(mut service: Service, app: &AppsodyApplication) -> Service {
    replace_labels(&mut service.metadata, app);

    let port = app.spec.service.port;
    let spec = service.spec.get_or_insert_with(Default::default);

    let ports = spec.ports.get_or_insert_with(Vec::new);
    if ports.is_empty() {
        ports.push(ServicePort::default());
    }
    ports[0].port = port;
    ports[0].target_port = Some(IntOrString::Int(port));

    spec.type_ = app.spec.service.type_.clone();
    spec.selector = Some(selector_labels(app));

    debug!("Customized Service for AppsodyApplication {} on port {}", app.app_name(), port);
    service
}
