//! # Object Customizers
//!
//! Each customizer takes an object (fetched from the cluster or freshly
//! defaulted) and returns it with the AppsodyApplication's intent applied.
//! Applying a customizer to its own output is a no-op, so they can run on
//! every reconcile against live state.
//!
//! Labels are owned by the operator: every customizer replaces the label map
//! outright instead of merging into it.

pub mod autoscaler;
pub mod persistence;
pub mod pod_template;
pub mod route;
pub mod service;
pub mod service_account;

pub use autoscaler::customize_autoscaler;
pub use persistence::{apply_persistence, customize_persistence};
pub use pod_template::customize_pod_template;
pub use route::customize_route;
pub use service::customize_service;
pub use service_account::customize_service_account;

use crate::crds::AppsodyApplication;
use crate::labels::application_labels;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

pub(crate) fn replace_labels(metadata: &mut ObjectMeta, app: &AppsodyApplication) {
    metadata.labels = Some(application_labels(app));
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_labels_discards_existing() {
        let app = fixtures::application("example-app");
        let mut metadata = ObjectMeta {
            labels: Some(fixtures::foreign_labels()),
            ..Default::default()
        };

        replace_labels(&mut metadata, &app);

        assert_eq!(metadata.labels, Some(application_labels(&app)));
    }
}
