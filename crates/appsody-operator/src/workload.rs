//! # Workloads
//!
//! An application with storage runs as a StatefulSet, any other as a
//! Deployment. The same decision picks the autoscaler's scale target.

use crate::constants::workload;
use crate::crds::AppsodyApplication;
use crate::customize::{apply_persistence, customize_pod_template, replace_labels};
use crate::error::Result;
use crate::labels::selector_labels;
use k8s_openapi::api::apps::v1::{Deployment, StatefulSet};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use std::fmt;
use tracing::debug;

/// Kind of workload running an application's pods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkloadKind {
    Deployment,
    StatefulSet,
}

impl WorkloadKind {
    pub fn for_application(app: &AppsodyApplication) -> Self {
        if app.spec.storage.is_some() {
            WorkloadKind::StatefulSet
        } else {
            WorkloadKind::Deployment
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkloadKind::Deployment => workload::DEPLOYMENT,
            WorkloadKind::StatefulSet => workload::STATEFUL_SET,
        }
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Replica count to write, or `None` to leave the current one to the autoscaler
fn managed_replicas(app: &AppsodyApplication) -> Option<i32> {
    if app.spec.autoscaling.is_some() {
        None
    } else {
        app.spec.replicas
    }
}

fn pod_selector(app: &AppsodyApplication) -> LabelSelector {
    LabelSelector {
        match_labels: Some(selector_labels(app)),
        ..Default::default()
    }
}

pub fn customize_deployment(mut deployment: Deployment, app: &AppsodyApplication) -> Deployment {
    replace_labels(&mut deployment.metadata, app);

    let spec = deployment.spec.get_or_insert_with(Default::default);
    if let Some(replicas) = managed_replicas(app) {
        spec.replicas = Some(replicas);
    }
    spec.selector = pod_selector(app);
    spec.template = customize_pod_template(std::mem::take(&mut spec.template), app);

    debug!("Customized Deployment for AppsodyApplication {}", app.app_name());
    deployment
}

/// Fails only when the storage the StatefulSet needs is missing or invalid
pub fn customize_stateful_set(mut stateful_set: StatefulSet, app: &AppsodyApplication) -> Result<StatefulSet> {
    apply_persistence(&mut stateful_set, app)?;
    replace_labels(&mut stateful_set.metadata, app);

    let spec = stateful_set.spec.get_or_insert_with(Default::default);
    if let Some(replicas) = managed_replicas(app) {
        spec.replicas = Some(replicas);
    }
    spec.selector = pod_selector(app);
    spec.template = customize_pod_template(std::mem::take(&mut spec.template), app);

    debug!("Customized StatefulSet for AppsodyApplication {}", app.app_name());
    Ok(stateful_set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crds::{AutoscalingSpec, StorageSpec};
    use crate::customize::fixtures;
    use crate::error::ConfigError;
    use k8s_openapi::api::apps::v1::DeploymentSpec;

    fn with_storage(mut app: AppsodyApplication, size: &str) -> AppsodyApplication {
        app.spec.storage = Some(StorageSpec {
            size: size.to_string(),
            volume_claim_template: None,
        });
        app
    }

    #[test]
    fn test_workload_kind_selection() {
        let app = fixtures::application("example-app");
        assert_eq!(WorkloadKind::for_application(&app), WorkloadKind::Deployment);

        let app = with_storage(app, "1Gi");
        assert_eq!(WorkloadKind::for_application(&app), WorkloadKind::StatefulSet);
        assert_eq!(WorkloadKind::StatefulSet.to_string(), "StatefulSet");
    }

    #[test]
    fn test_deployment() {
        let mut app = fixtures::application("example-app");
        app.spec.replicas = Some(3);

        let spec = customize_deployment(Deployment::default(), &app).spec.unwrap();

        assert_eq!(spec.replicas, Some(3));
        assert_eq!(spec.selector.match_labels, Some(selector_labels(&app)));
        let pod_spec = spec.template.spec.unwrap();
        assert_eq!(pod_spec.containers[0].name, "app");
        assert_eq!(pod_spec.service_account_name.as_deref(), Some("example-app"));
    }

    #[test]
    fn test_autoscaled_replicas_left_alone() {
        let mut app = fixtures::application("example-app");
        app.spec.replicas = Some(3);
        app.spec.autoscaling = Some(AutoscalingSpec {
            max_replicas: Some(10),
            ..Default::default()
        });
        let existing = Deployment {
            spec: Some(DeploymentSpec {
                replicas: Some(7),
                ..Default::default()
            }),
            ..Default::default()
        };

        let spec = customize_deployment(existing, &app).spec.unwrap();

        assert_eq!(spec.replicas, Some(7));
    }

    #[test]
    fn test_stateful_set() {
        let app = with_storage(fixtures::application("example-app"), "2Gi");

        let spec = customize_stateful_set(StatefulSet::default(), &app).unwrap().spec.unwrap();

        assert_eq!(spec.volume_claim_templates.unwrap().len(), 1);
        assert_eq!(spec.template.spec.unwrap().containers[0].image.as_deref(), Some("appsody:v1"));
    }

    #[test]
    fn test_stateful_set_with_bad_size() {
        let app = with_storage(fixtures::application("example-app"), "lots");

        let result = customize_stateful_set(StatefulSet::default(), &app);

        assert!(matches!(result, Err(ConfigError::MalformedQuantity { .. })));
    }

    #[test]
    fn test_idempotent() {
        let app = with_storage(fixtures::application("example-app"), "2Gi");

        let deployment = customize_deployment(Deployment::default(), &app);
        assert_eq!(customize_deployment(deployment.clone(), &app), deployment);

        let stateful_set = customize_stateful_set(StatefulSet::default(), &app).unwrap();
        assert_eq!(customize_stateful_set(stateful_set.clone(), &app).unwrap(), stateful_set);
    }
}
