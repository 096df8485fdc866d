//! # HorizontalPodAutoscaler Customizer
//!
//! The scale target kind follows [`WorkloadKind::for_application`]. Callers
//! that create the workload by other means must make the same choice, or
//! the autoscaler will point at an object that does not exist.

use super::replace_labels;
use crate::constants::workload;
use crate::crds::AppsodyApplication;
use crate::error::{ConfigError, Result};
use crate::workload::WorkloadKind;
use k8s_openapi::api::autoscaling::v1::{CrossVersionObjectReference, HorizontalPodAutoscaler};
use tracing::debug;

pub fn customize_autoscaler(
    mut autoscaler: HorizontalPodAutoscaler,
    app: &AppsodyApplication,
) -> Result<HorizontalPodAutoscaler> {
    let name = app.app_name();
    let autoscaling = app
        .spec
        .autoscaling
        .as_ref()
        .ok_or_else(|| ConfigError::MissingAutoscaling { name: name.clone() })?;
    let max_replicas = autoscaling
        .max_replicas
        .ok_or_else(|| ConfigError::MissingMaxReplicas { name: name.clone() })?;

    replace_labels(&mut autoscaler.metadata, app);

    let kind = WorkloadKind::for_application(app);
    let spec = autoscaler.spec.get_or_insert_with(Default::default);
    spec.max_replicas = max_replicas;
    spec.min_replicas = autoscaling.min_replicas;
    spec.target_cpu_utilization_percentage = autoscaling.target_cpu_utilization_percentage;
    spec.scale_target_ref = CrossVersionObjectReference {
        api_version: Some(workload::API_VERSION.to_string()),
        kind: kind.to_string(),
        name,
    };

    debug!("Customized HorizontalPodAutoscaler for AppsodyApplication {} targeting {}", app.app_name(), kind);
    Ok(autoscaler)
}
