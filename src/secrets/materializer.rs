//! Projection of origin Secrets into gateway namespaces
//!
//! Two naming schemes exist. Secrets referenced by a single Ingress are
//! copied as `ingress-<origin uid>` and labelled with their origin. Wildcard
//! certificates are shared between Ingresses, so their copies are named from
//! a digest of the origin identity and carry no origin labels.

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::ResourceExt;
use sha2::{Digest, Sha256};
use tracing::{debug, instrument};

use super::{
    SecretKey, SecretMap, ORIGIN_SECRET_NAMESPACE_LABEL_KEY, ORIGIN_SECRET_NAME_LABEL_KEY,
};
use crate::config::GatewayTopology;
use crate::crd::Ingress;
use crate::error::{Error, Result};

const TARGET_SECRET_PREFIX: &str = "ingress";
const WILDCARD_SECRET_PREFIX: &str = "wildcard";

/// Name of the per-Ingress copy of a Secret with the given UID.
pub fn target_secret_name(origin_uid: &str) -> String {
    format!("{TARGET_SECRET_PREFIX}-{origin_uid}")
}

/// Name of the shared copy of a wildcard certificate Secret.
///
/// Derived from a SHA-256 digest over the length-prefixed namespace and name,
/// so it is stable across restarts and distinct inputs cannot be confused by
/// where one field ends and the next begins.
pub fn target_wildcard_secret_name(origin_name: &str, origin_namespace: &str) -> String {
    let mut hasher = Sha256::new();
    for field in [origin_namespace, origin_name] {
        hasher.update((field.len() as u64).to_be_bytes());
        hasher.update(field.as_bytes());
    }
    let digest = hasher.finalize();
    format!("{WILDCARD_SECRET_PREFIX}-{}", hex::encode(&digest[..16]))
}

/// Labels recording which Secret a per-Ingress copy came from.
pub fn make_target_secret_labels(
    origin_name: &str,
    origin_namespace: &str,
) -> BTreeMap<String, String> {
    BTreeMap::from([
        (ORIGIN_SECRET_NAME_LABEL_KEY.to_string(), origin_name.to_string()),
        (
            ORIGIN_SECRET_NAMESPACE_LABEL_KEY.to_string(),
            origin_namespace.to_string(),
        ),
    ])
}

/// Copies of the Ingress's Secrets for every gateway namespace.
///
/// A Secret already living in a gateway namespace is not copied there. The
/// copy is named after the origin only, so Ingresses sharing an origin share
/// the copy and none of them owns it.
#[instrument(skip_all, fields(name = %ingress.name_any(), secrets = origin_secrets.len()))]
pub fn make_secrets(
    origin_secrets: &SecretMap,
    ingress: &Ingress,
    topology: &GatewayTopology,
) -> Result<Vec<Secret>> {
    project(origin_secrets, topology, |key, origin, namespace| {
        let uid = origin
            .uid()
            .ok_or_else(|| Error::InvalidSecret(format!("secret {key} has no uid")))?;
        Ok(make_secret(
            origin,
            target_secret_name(&uid),
            namespace,
            make_target_secret_labels(&key.name, &key.namespace),
        ))
    })
}

/// Shared copies of wildcard certificate Secrets for every gateway namespace.
#[instrument(skip_all, fields(secrets = origin_secrets.len()))]
pub fn make_wildcard_secrets(
    origin_secrets: &SecretMap,
    topology: &GatewayTopology,
) -> Result<Vec<Secret>> {
    project(origin_secrets, topology, |key, origin, namespace| {
        Ok(make_secret(
            origin,
            target_wildcard_secret_name(&key.name, &key.namespace),
            namespace,
            BTreeMap::new(),
        ))
    })
}

fn project<F>(
    origin_secrets: &SecretMap,
    topology: &GatewayTopology,
    build: F,
) -> Result<Vec<Secret>>
where
    F: Fn(&SecretKey, &Secret, &str) -> Result<Secret>,
{
    let namespaces = topology.target_namespaces()?;

    let mut secrets = Vec::new();
    for (key, origin) in origin_secrets {
        for namespace in &namespaces {
            if *namespace == key.namespace {
                debug!(secret = %key, "Secret already in gateway namespace, not copying");
                continue;
            }
            let secret = build(key, origin, namespace)?;
            debug!(
                secret = %key,
                target = %SecretKey::of(&secret),
                "Prepared gateway secret"
            );
            secrets.push(secret);
        }
    }
    Ok(secrets)
}

fn make_secret(
    origin: &Secret,
    name: String,
    namespace: &str,
    labels: BTreeMap<String, String>,
) -> Secret {
    Secret {
        metadata: ObjectMeta {
            name: Some(name),
            namespace: Some(namespace.to_string()),
            labels: Some(labels),
            ..Default::default()
        },
        data: origin.data.clone(),
        type_: origin.type_.clone(),
        ..Default::default()
    }
}
