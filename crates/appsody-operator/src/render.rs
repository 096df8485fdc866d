//! # Desired State Rendering
//!
//! Builds every object an AppsodyApplication needs from the objects the
//! host controller observed in the cluster. Nothing here talks to the API
//! server: the host fetches `ObservedState`, renders, and applies the
//! result, deleting whatever `DesiredState::stale` lists.

use crate::crds::{AppsodyApplication, Route, RouteSpec};
use crate::customize::{
    customize_autoscaler, customize_route, customize_service, customize_service_account,
};
use crate::error::Result;
use crate::workload::{customize_deployment, customize_stateful_set, WorkloadKind};
use crate::OperatorConfig;
use k8s_openapi::api::apps::v1::{Deployment, StatefulSet};
use k8s_openapi::api::autoscaling::v1::HorizontalPodAutoscaler;
use k8s_openapi::api::core::v1::{Service, ServiceAccount};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::{Resource, ResourceExt};
use std::borrow::Cow;
use tracing::{debug, info};

/// Objects of one application as currently found in the cluster
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservedState {
    pub service: Option<Service>,
    pub service_account: Option<ServiceAccount>,
    pub deployment: Option<Deployment>,
    pub stateful_set: Option<StatefulSet>,
    pub autoscaler: Option<HorizontalPodAutoscaler>,
    pub route: Option<Route>,
}

/// The workload running the application's pods
#[derive(Debug, Clone, PartialEq)]
pub enum Workload {
    Deployment(Deployment),
    StatefulSet(StatefulSet),
}

impl Workload {
    pub fn kind(&self) -> WorkloadKind {
        match self {
            Workload::Deployment(_) => WorkloadKind::Deployment,
            Workload::StatefulSet(_) => WorkloadKind::StatefulSet,
        }
    }
}

/// Observed object the application no longer needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleObject {
    pub kind: &'static str,
    pub name: String,
}

/// Every object the application needs, customized
#[derive(Debug, Clone, PartialEq)]
pub struct DesiredState {
    pub service: Service,
    /// `None` when the application names its own service account
    pub service_account: Option<ServiceAccount>,
    pub workload: Workload,
    pub autoscaler: Option<HorizontalPodAutoscaler>,
    pub route: Option<Route>,
    pub stale: Vec<StaleObject>,
}

impl DesiredState {
    /// The state the cluster holds once this one has been applied
    pub fn into_observed(self) -> ObservedState {
        let (deployment, stateful_set) = match self.workload {
            Workload::Deployment(deployment) => (Some(deployment), None),
            Workload::StatefulSet(stateful_set) => (None, Some(stateful_set)),
        };

        ObservedState {
            service: Some(self.service),
            service_account: self.service_account,
            deployment,
            stateful_set,
            autoscaler: self.autoscaler,
            route: self.route,
        }
    }
}

/// Renderer for AppsodyApplication resources
pub struct Renderer {
    config: OperatorConfig,
}

impl Renderer {
    pub fn new(config: OperatorConfig) -> Self {
        Self { config }
    }

    /// Render the desired state of `app` on top of `observed`
    pub fn render(&self, app: &AppsodyApplication, observed: ObservedState) -> Result<DesiredState> {
        let app = self.scoped(app);
        let app = app.as_ref();
        info!(
            "Rendering AppsodyApplication {}/{}",
            app.namespace().unwrap_or_default(),
            app.app_name()
        );

        let mut stale = Vec::new();

        let service = customize_service(
            observed.service.unwrap_or_else(|| Service {
                metadata: self.object_meta(app),
                ..Default::default()
            }),
            app,
        );

        let service_account = if owns_service_account(app) {
            Some(customize_service_account(
                observed.service_account.unwrap_or_else(|| ServiceAccount {
                    metadata: self.object_meta(app),
                    ..Default::default()
                }),
                app,
            ))
        } else {
            let in_use = app.service_account_name();
            stale.extend(
                observed
                    .service_account
                    .filter(|sa| sa.metadata.name.as_deref() != Some(in_use.as_str()))
                    .map(|sa| stale_object("ServiceAccount", &sa.metadata)),
            );
            None
        };

        let workload = match WorkloadKind::for_application(app) {
            WorkloadKind::Deployment => {
                stale.extend(observed.stateful_set.map(|sts| stale_object("StatefulSet", &sts.metadata)));
                Workload::Deployment(customize_deployment(
                    observed.deployment.unwrap_or_else(|| Deployment {
                        metadata: self.object_meta(app),
                        ..Default::default()
                    }),
                    app,
                ))
            }
            WorkloadKind::StatefulSet => {
                stale.extend(observed.deployment.map(|d| stale_object("Deployment", &d.metadata)));
                Workload::StatefulSet(customize_stateful_set(
                    observed.stateful_set.unwrap_or_else(|| StatefulSet {
                        metadata: self.object_meta(app),
                        ..Default::default()
                    }),
                    app,
                )?)
            }
        };

        let autoscaler = if app.spec.autoscaling.is_some() {
            Some(customize_autoscaler(
                observed.autoscaler.unwrap_or_else(|| HorizontalPodAutoscaler {
                    metadata: self.object_meta(app),
                    ..Default::default()
                }),
                app,
            )?)
        } else {
            stale.extend(observed.autoscaler.map(|hpa| stale_object("HorizontalPodAutoscaler", &hpa.metadata)));
            None
        };

        let route = if app.exposed(self.config.create_route) {
            Some(customize_route(
                observed.route.unwrap_or_else(|| Route {
                    metadata: self.object_meta(app),
                    spec: RouteSpec::default(),
                }),
                app,
            ))
        } else {
            stale.extend(observed.route.map(|route| stale_object("Route", &route.metadata)));
            None
        };

        for object in &stale {
            debug!("{} {} is no longer needed by {}", object.kind, object.name, app.app_name());
        }

        Ok(DesiredState {
            service,
            service_account,
            workload,
            autoscaler,
            route,
            stale,
        })
    }

    /// `app` with the configured namespace filled in when its metadata has none
    fn scoped<'a>(&self, app: &'a AppsodyApplication) -> Cow<'a, AppsodyApplication> {
        if app.metadata.namespace.is_some() {
            return Cow::Borrowed(app);
        }
        let mut scoped = app.clone();
        scoped.metadata.namespace = Some(self.config.namespace.clone());
        Cow::Owned(scoped)
    }

    /// Metadata for an object created on behalf of `app`
    fn object_meta(&self, app: &AppsodyApplication) -> ObjectMeta {
        ObjectMeta {
            name: Some(app.app_name()),
            namespace: app.namespace(),
            owner_references: app.controller_owner_ref(&()).map(|owner| vec![owner]),
            ..Default::default()
        }
    }
}

/// The operator owns the service account named after the application, whether
/// that name is implied or requested explicitly
fn owns_service_account(app: &AppsodyApplication) -> bool {
    app.service_account_name() == app.app_name()
}

fn stale_object(kind: &'static str, metadata: &ObjectMeta) -> StaleObject {
    StaleObject {
        kind,
        name: metadata.name.clone().unwrap_or_default(),
    }
}
