//! # Persistence Customizer
//!
//! Adds the volume claim template of a stateful application. A StatefulSet
//! that already has claim templates is never modified, since the API server
//! rejects changes to them; a later change of the storage size therefore has
//! no effect on an existing StatefulSet.

use crate::constants::storage;
use crate::crds::{AppsodyApplication, StorageSpec};
use crate::error::{ConfigError, Result};
use crate::labels::application_labels;
use crate::quantity::parse_quantity;
use k8s_openapi::api::apps::v1::StatefulSet;
use k8s_openapi::api::core::v1::{PersistentVolumeClaim, PersistentVolumeClaimSpec, ResourceRequirements};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::ResourceExt;
use std::collections::BTreeMap;
use tracing::{debug, warn};

pub fn customize_persistence(mut stateful_set: StatefulSet, app: &AppsodyApplication) -> Result<StatefulSet> {
    apply_persistence(&mut stateful_set, app)?;
    Ok(stateful_set)
}

/// Adds the claim template to `stateful_set` in place. On error the
/// StatefulSet is left exactly as it was.
pub fn apply_persistence(stateful_set: &mut StatefulSet, app: &AppsodyApplication) -> Result<()> {
    let storage = app.spec.storage.as_ref().ok_or_else(|| ConfigError::MissingStorage {
        name: app.app_name(),
    })?;

    let has_claims = stateful_set
        .spec
        .as_ref()
        .and_then(|spec| spec.volume_claim_templates.as_ref())
        .map_or(false, |claims| !claims.is_empty());
    if has_claims {
        debug!(
            "StatefulSet for AppsodyApplication {} already has volume claim templates",
            app.app_name()
        );
        return Ok(());
    }

    let claim = volume_claim(storage, app).map_err(|e| {
        warn!("Invalid storage for AppsodyApplication {}: {}", app.app_name(), e);
        e
    })?;

    stateful_set
        .spec
        .get_or_insert_with(Default::default)
        .volume_claim_templates
        .get_or_insert_with(Vec::new)
        .push(claim);

    debug!("Added volume claim template for AppsodyApplication {}", app.app_name());
    Ok(())
}

fn volume_claim(storage: &StorageSpec, app: &AppsodyApplication) -> Result<PersistentVolumeClaim> {
    if let Some(template) = &storage.volume_claim_template {
        return Ok(template.clone());
    }

    let size = parse_quantity(&storage.size)?;

    Ok(PersistentVolumeClaim {
        metadata: ObjectMeta {
            name: Some(storage::CLAIM_NAME.to_string()),
            namespace: app.namespace(),
            labels: Some(application_labels(app)),
            ..Default::default()
        },
        spec: Some(PersistentVolumeClaimSpec {
            access_modes: Some(vec![storage::ACCESS_MODE.to_string()]),
            resources: Some(ResourceRequirements {
                requests: Some(BTreeMap::from([(storage::RESOURCE.to_string(), size)])),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    })
}
