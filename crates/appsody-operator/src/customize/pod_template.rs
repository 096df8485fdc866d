//! # Pod Template Customizer
//!
//! Shapes the pod template shared by the Deployment and StatefulSet
//! workloads. The application always runs in container 0, named `app`.

use super::replace_labels;
use crate::affinity::compile_affinity;
use crate::constants::pod;
use crate::crds::AppsodyApplication;
use k8s_openapi::api::core::v1::{Container, ContainerPort, PodTemplateSpec};
use tracing::debug;

pub fn customize_pod_template(mut template: PodTemplateSpec, app: &AppsodyApplication) -> PodTemplateSpec {
    let spec = &app.spec;

    replace_labels(template.metadata.get_or_insert_with(Default::default), app);
    let pod_spec = template.spec.get_or_insert_with(Default::default);

    if pod_spec.containers.is_empty() {
        pod_spec.containers.push(Container::default());
    }
    let container = &mut pod_spec.containers[0];
    container.name = pod::CONTAINER_NAME.to_string();

    let ports = container.ports.get_or_insert_with(Vec::new);
    if ports.is_empty() {
        ports.push(ContainerPort::default());
    }
    ports[0].container_port = spec.service.port;

    container.image = Some(spec.application_image.clone());
    container.resources = spec.resource_constraints.clone();
    container.readiness_probe = spec.readiness_probe.clone();
    container.liveness_probe = spec.liveness_probe.clone();
    container.volume_mounts = spec.volume_mounts.clone();
    container.image_pull_policy = spec.pull_policy.clone();
    container.env = spec.env.clone();
    container.env_from = spec.env_from.clone();

    pod_spec.volumes = spec.volumes.clone();
    pod_spec.service_account_name = Some(app.service_account_name());
    pod_spec.restart_policy = Some(pod::RESTART_POLICY.to_string());
    pod_spec.dns_policy = Some(pod::DNS_POLICY.to_string());

    // An empty list leaves whatever affinity the template already carries.
    match compile_affinity(&spec.architecture) {
        Some(affinity) => pod_spec.affinity = Some(affinity),
        None => debug!("AppsodyApplication {} sets no architecture, affinity untouched", app.app_name()),
    }

    debug!("Customized pod template for AppsodyApplication {}", app.app_name());
    template
}
