//! # Operator Constants
//!
//! Values the operator owns on every object it manages. None of these are
//! configurable through the AppsodyApplication resource.

/// The operator identifier written to `app.kubernetes.io/managed-by`
pub const OPERATOR_NAME: &str = "appsody-operator";

/// Standard Kubernetes label keys
pub mod labels {
    /// Name of the application, always the AppsodyApplication name
    pub const NAME: &str = "app.kubernetes.io/name";

    /// Tool managing the object
    pub const MANAGED_BY: &str = "app.kubernetes.io/managed-by";
}

/// Pod template invariants
pub mod pod {
    /// Name of the single application container
    pub const CONTAINER_NAME: &str = "app";

    pub const RESTART_POLICY: &str = "Always";

    pub const DNS_POLICY: &str = "ClusterFirst";
}

/// Node scheduling
pub mod scheduling {
    /// Node label holding the CPU architecture
    pub const ARCH_LABEL: &str = "beta.kubernetes.io/arch";

    /// Node selector operator used for every architecture requirement
    pub const OPERATOR_IN: &str = "In";
}

/// Persistent storage defaults for synthesized claims
pub mod storage {
    /// Name of the synthesized volume claim template
    pub const CLAIM_NAME: &str = "pvc";

    pub const ACCESS_MODE: &str = "ReadWriteOnce";

    /// Resource name of the storage request
    pub const RESOURCE: &str = "storage";
}

/// Workload kinds an autoscaler can target
pub mod workload {
    pub const API_VERSION: &str = "apps/v1";

    pub const DEPLOYMENT: &str = "Deployment";

    pub const STATEFUL_SET: &str = "StatefulSet";
}

/// OpenShift Route backend
pub mod route {
    pub const TARGET_KIND: &str = "Service";

    /// Weight given to the single Route backend
    pub const TARGET_WEIGHT: i32 = 100;
}
