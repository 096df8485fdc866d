//! Service account customizer. The account carries exactly one image pull
//! secret, the one named by the application.

use super::replace_labels;
use crate::crds::AppsodyApplication;
use k8s_openapi::api::core::v1::{LocalObjectReference, ServiceAccount};
use tracing::debug;

pub fn customize_service_account(mut account: ServiceAccount, app: &AppsodyApplication) -> ServiceAccount {
    replace_labels(&mut account.metadata, app);

    let secrets = account.image_pull_secrets.get_or_insert_with(Vec::new);
    secrets.truncate(1);
    match secrets.first_mut() {
        Some(secret) => secret.name = app.spec.pull_secret.clone(),
        None => secrets.push(LocalObjectReference {
            name: app.spec.pull_secret.clone(),
        }),
    }

    debug!("Customized ServiceAccount for AppsodyApplication {}", app.app_name());
    account
}
