//! # Custom Resource Definitions
//!
//! The AppsodyApplication resource and the OpenShift Route type the operator
//! customizes.

use k8s_openapi::api::core::v1::{
    EnvFromSource, EnvVar, PersistentVolumeClaim, Probe, ResourceRequirements, Volume,
    VolumeMount,
};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use kube::{CustomResource, ResourceExt};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// AppsodyApplication CRD - desired state of one application
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[kube(
    group = "appsody.example.com",
    version = "v1alpha1",
    kind = "AppsodyApplication",
    plural = "appsodyapplications",
    shortname = "app",
    derive = "Default",
    derive = "PartialEq",
    namespaced
)]
#[kube(status = "AppsodyApplicationStatus")]
#[serde(rename_all = "camelCase")]
pub struct AppsodyApplicationSpec {
    /// Container image of the application
    pub application_image: String,

    /// Number of pods when autoscaling is not configured
    pub replicas: Option<i32>,

    /// Service exposing the application port
    #[serde(default)]
    pub service: AppsodyService,

    /// Compute resources for the application container
    pub resource_constraints: Option<ResourceRequirements>,

    pub readiness_probe: Option<Probe>,

    pub liveness_probe: Option<Probe>,

    pub volume_mounts: Option<Vec<VolumeMount>>,

    /// Image pull policy (Always, IfNotPresent, Never)
    pub pull_policy: Option<String>,

    pub env: Option<Vec<EnvVar>>,

    pub env_from: Option<Vec<EnvFromSource>>,

    pub volumes: Option<Vec<Volume>>,

    /// Service account for the pods; defaults to the application name
    pub service_account_name: Option<String>,

    /// Acceptable CPU architectures, most preferred first
    #[serde(default)]
    pub architecture: Vec<String>,

    /// Persistent storage; when set the application runs as a StatefulSet
    pub storage: Option<StorageSpec>,

    /// Image pull secret attached to the application's service account
    pub pull_secret: Option<String>,

    pub autoscaling: Option<AutoscalingSpec>,

    /// Create an OpenShift Route for the service
    pub expose: Option<bool>,
}

/// Application service
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppsodyService {
    /// Port the application listens on
    pub port: i32,

    /// Service type (ClusterIP, NodePort, LoadBalancer)
    #[serde(rename = "type")]
    pub type_: Option<String>,
}

/// Persistent storage
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StorageSpec {
    /// Storage size as a Kubernetes quantity (e.g. "1Gi")
    #[serde(default)]
    pub size: String,

    /// Claim template used verbatim instead of one built from `size`
    pub volume_claim_template: Option<PersistentVolumeClaim>,
}

/// Horizontal pod autoscaling
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AutoscalingSpec {
    pub min_replicas: Option<i32>,

    pub max_replicas: Option<i32>,

    #[serde(rename = "targetCPUUtilizationPercentage")]
    pub target_cpu_utilization_percentage: Option<i32>,
}

/// Application status
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppsodyApplicationStatus {
    #[serde(default)]
    pub conditions: Vec<StatusCondition>,
}

/// Status condition
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusCondition {
    #[serde(rename = "type")]
    pub type_: String,

    pub status: String,

    pub reason: Option<String>,

    pub message: Option<String>,
}

impl AppsodyApplication {
    /// Name of the application, used for every owned object
    pub fn app_name(&self) -> String {
        self.name_any()
    }

    /// Service account the pods run as
    pub fn service_account_name(&self) -> String {
        match self.spec.service_account_name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.app_name(),
        }
    }

    /// Whether a Route should exist, falling back to `default` when unset
    pub fn exposed(&self, default: bool) -> bool {
        self.spec.expose.unwrap_or(default)
    }
}

/// OpenShift Route
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[kube(
    group = "route.openshift.io",
    version = "v1",
    kind = "Route",
    plural = "routes",
    derive = "Default",
    derive = "PartialEq",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct RouteSpec {
    pub host: Option<String>,

    pub path: Option<String>,

    /// Backend the route points at
    #[serde(default)]
    pub to: RouteTargetReference,

    pub port: Option<RoutePort>,

    pub tls: Option<TlsConfig>,
}

/// Route backend reference
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteTargetReference {
    pub kind: String,

    pub name: String,

    pub weight: Option<i32>,
}

/// Route port selection
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoutePort {
    pub target_port: IntOrString,
}

/// Route TLS termination
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TlsConfig {
    /// edge, passthrough or reencrypt
    pub termination: String,

    pub insecure_edge_termination_policy: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::Resource;

    #[test]
    fn test_application_spec_serialization() {
        let json = serde_json::json!({
            "applicationImage": "appsody:v1",
            "replicas": 3,
            "service": { "port": 8000, "type": "NodePort" },
            "architecture": ["amd64", "s390x"],
            "storage": { "size": "1Gi" },
            "autoscaling": { "maxReplicas": 5, "targetCPUUtilizationPercentage": 50 }
        });

        let spec: AppsodyApplicationSpec = serde_json::from_value(json).unwrap();

        assert_eq!(spec.application_image, "appsody:v1");
        assert_eq!(spec.replicas, Some(3));
        assert_eq!(spec.service.port, 8000);
        assert_eq!(spec.service.type_.as_deref(), Some("NodePort"));
        assert_eq!(spec.architecture, vec!["amd64", "s390x"]);
        assert_eq!(spec.storage.unwrap().size, "1Gi");

        let autoscaling = spec.autoscaling.unwrap();
        assert_eq!(autoscaling.max_replicas, Some(5));
        assert_eq!(autoscaling.min_replicas, None);
        assert_eq!(autoscaling.target_cpu_utilization_percentage, Some(50));
    }

    #[test]
    fn test_minimal_spec_defaults() {
        let spec: AppsodyApplicationSpec =
            serde_json::from_value(serde_json::json!({ "applicationImage": "appsody:v1" })).unwrap();

        assert!(spec.architecture.is_empty());
        assert!(spec.storage.is_none());
        assert_eq!(spec.service.port, 0);
    }

    #[test]
    fn test_service_account_name_resolution() {
        let mut app = AppsodyApplication::new("example-app", AppsodyApplicationSpec::default());
        assert_eq!(app.service_account_name(), "example-app");

        app.spec.service_account_name = Some(String::new());
        assert_eq!(app.service_account_name(), "example-app");

        app.spec.service_account_name = Some("builder".to_string());
        assert_eq!(app.service_account_name(), "builder");
    }

    #[test]
    fn test_exposed_fallback() {
        let mut app = AppsodyApplication::new("example-app", AppsodyApplicationSpec::default());
        assert!(!app.exposed(false));
        assert!(app.exposed(true));

        app.spec.expose = Some(false);
        assert!(!app.exposed(true));
    }

    #[test]
    fn test_route_spec_wire_format() {
        let spec = RouteSpec {
            to: RouteTargetReference {
                kind: "Service".to_string(),
                name: "example-app".to_string(),
                weight: Some(100),
            },
            port: Some(RoutePort {
                target_port: IntOrString::Int(8000),
            }),
            ..Default::default()
        };

        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["to"]["kind"], "Service");
        assert_eq!(value["port"]["targetPort"], 8000);
    }

    #[test]
    fn test_application_api_version() {
        assert_eq!(AppsodyApplication::api_version(&()), "appsody.example.com/v1alpha1");
        assert_eq!(AppsodyApplication::kind(&()), "AppsodyApplication");
    }
}
