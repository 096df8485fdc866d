//! Identity labels for objects owned by an AppsodyApplication

use crate::constants::{labels, OPERATOR_NAME};
use crate::crds::AppsodyApplication;
use std::collections::BTreeMap;

/// Labels applied to every owned object
pub fn application_labels(app: &AppsodyApplication) -> BTreeMap<String, String> {
    BTreeMap::from([
        (labels::NAME.to_string(), app.app_name()),
        (labels::MANAGED_BY.to_string(), OPERATOR_NAME.to_string()),
    ])
}

/// Labels selecting the application's pods
pub fn selector_labels(app: &AppsodyApplication) -> BTreeMap<String, String> {
    BTreeMap::from([(labels::NAME.to_string(), app.app_name())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crds::AppsodyApplicationSpec;

    #[test]
    fn test_application_labels() {
        let app = AppsodyApplication::new("example-app", AppsodyApplicationSpec::default());
        let labels = application_labels(&app);

        assert_eq!(labels.len(), 2);
        assert_eq!(labels.get("app.kubernetes.io/name"), Some(&"example-app".to_string()));
        assert_eq!(labels.get("app.kubernetes.io/managed-by"), Some(&"appsody-operator".to_string()));
    }

    #[test]
    fn test_selector_is_subset_of_labels() {
        let app = AppsodyApplication::new("example-app", AppsodyApplicationSpec::default());
        let labels = application_labels(&app);

        for (key, value) in selector_labels(&app) {
            assert_eq!(labels.get(&key), Some(&value));
        }
    }
}
