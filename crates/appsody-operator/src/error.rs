//! Error types for the Appsody operator customizers

use thiserror::Error;

pub type Result<T, E = ConfigError> = std::result::Result<T, E>;

/// Configuration errors found while applying an AppsodyApplication
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A storage size that is not a Kubernetes quantity
    #[error("Malformed quantity {value:?}: {reason}")]
    MalformedQuantity { value: String, reason: String },

    /// Persistence was requested for an application without storage
    #[error("AppsodyApplication {name} does not declare storage")]
    MissingStorage { name: String },

    /// An autoscaler was requested for an application without autoscaling
    #[error("AppsodyApplication {name} does not declare autoscaling")]
    MissingAutoscaling { name: String },

    /// Autoscaling is declared but has no upper bound
    #[error("AppsodyApplication {name} autoscaling has no maxReplicas")]
    MissingMaxReplicas { name: String },
}

/// Whether an API error reports that `kind` in `version` is not served by
/// the cluster, e.g. a Route on a cluster without the OpenShift API.
pub fn is_no_matches_for_kind(err: &dyn std::fmt::Display, kind: &str, version: &str) -> bool {
    err.to_string()
        .starts_with(&format!("no matches for kind \"{}\" in version \"{}\"", kind, version))
}
