//! # Appsody Kubernetes Operator
//!
//! Desired-state customizers for AppsodyApplication resources. Given an
//! application and the objects already in the cluster, produces the Service,
//! ServiceAccount, workload, autoscaler and Route specs the application
//! needs. Watching, applying and retrying are left to the host controller.

pub mod affinity;
pub mod constants;
pub mod crds;
pub mod customize;
pub mod error;
pub mod labels;
pub mod quantity;
pub mod render;
pub mod workload;

pub use affinity::{compile_affinity, compile_node_affinity};
pub use crds::*;
pub use customize::{
    apply_persistence, customize_autoscaler, customize_persistence, customize_pod_template,
    customize_route, customize_service, customize_service_account,
};
pub use error::{is_no_matches_for_kind, ConfigError};
pub use labels::{application_labels, selector_labels};
pub use quantity::parse_quantity;
pub use render::{DesiredState, ObservedState, Renderer, StaleObject, Workload};
pub use workload::{customize_deployment, customize_stateful_set, WorkloadKind};

/// Operator configuration
#[derive(Debug, Clone)]
pub struct OperatorConfig {
    /// Namespace for applications whose metadata carries none
    pub namespace: String,

    /// Whether applications that leave `expose` unset get a Route
    pub create_route: bool,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            namespace: "default".to_string(),
            create_route: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_config_default() {
        let config = OperatorConfig::default();
        assert_eq!(config.namespace, "default");
        assert!(!config.create_route);
    }
}
