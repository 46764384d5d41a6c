//! End-to-end computation of the Secrets an Ingress needs in gateway namespaces

use k8s_openapi::api::core::v1::Secret;
use kube::ResourceExt;
use tracing::info;

use super::{categorize_secrets, get_secrets, make_secrets, make_wildcard_secrets, SecretLister};
use crate::config::GatewayTopology;
use crate::crd::Ingress;
use crate::error::{Error, Result};

/// Gateway Secrets derived from one Ingress
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SyncPlan {
    /// Per-Ingress copies of non-wildcard certificates
    pub secrets: Vec<Secret>,
    /// Shared copies of wildcard certificates
    pub wildcard_secrets: Vec<Secret>,
}

impl SyncPlan {
    /// All target Secrets, per-Ingress copies first.
    pub fn all(&self) -> impl Iterator<Item = &Secret> {
        self.secrets.iter().chain(self.wildcard_secrets.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty() && self.wildcard_secrets.is_empty()
    }
}

/// Resolve, classify and project the TLS Secrets of `ingress`.
///
/// Fails without a partial plan if the Ingress spec is invalid, a Secret is missing,
/// a certificate cannot be read, or the gateway namespaces are unknown.
pub fn plan_secrets(
    ingress: &Ingress,
    lister: &dyn SecretLister,
    topology: &GatewayTopology,
) -> Result<SyncPlan> {
    ingress.spec.validate().map_err(|errors| {
        Error::ValidationError(
            errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; "),
        )
    })?;

    let origin = get_secrets(ingress, lister)?;
    let classified = categorize_secrets(&origin)?;

    let plan = SyncPlan {
        secrets: make_secrets(&classified.non_wildcard, ingress, topology)?,
        wildcard_secrets: make_wildcard_secrets(&classified.wildcard, topology)?,
    };
    info!(
        ingress = %ingress.name_any(),
        secrets = plan.secrets.len(),
        wildcard_secrets = plan.wildcard_secrets.len(),
        "Planned gateway secrets"
    );
    Ok(plan)
}
