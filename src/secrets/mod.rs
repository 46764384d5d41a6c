//! TLS secret synchronization for Ingress gateways
//!
//! Resolves the Secrets referenced by an [`Ingress`](crate::crd::Ingress),
//! classifies them as wildcard or non-wildcard certificates, and projects them
//! into the namespaces of the gateways that terminate TLS.
//!
//! Every operation here is synchronous and side-effect free. Writing the
//! produced Secrets back to the cluster is left to the caller.

mod classifier;
mod inspector;
mod materializer;
mod plan;
mod resolver;

#[cfg(test)]
mod test_util;

use std::collections::BTreeMap;
use std::fmt;

use k8s_openapi::api::core::v1::Secret;
use kube::runtime::reflector::{ObjectRef, Store};
use kube::ResourceExt;

pub use classifier::{categorize_secrets, Classified};
pub use inspector::{get_hosts_from_cert_secret, is_wildcard_host, WILDCARD_PREFIX};
pub use materializer::{
    make_secrets, make_target_secret_labels, make_wildcard_secrets, target_secret_name,
    target_wildcard_secret_name,
};
pub use plan::{plan_secrets, SyncPlan};
pub use resolver::get_secrets;

/// Secret data key holding the PEM certificate chain
pub const TLS_CERT_KEY: &str = "tls.crt";

/// Label recording the name of the Secret a target Secret was copied from
pub const ORIGIN_SECRET_NAME_LABEL_KEY: &str = "networking.internal.knative.dev/originSecretName";

/// Label recording the namespace of the Secret a target Secret was copied from
pub const ORIGIN_SECRET_NAMESPACE_LABEL_KEY: &str =
    "networking.internal.knative.dev/originSecretNamespace";

/// Identity of a Secret within the cluster.
///
/// Ordering is by namespace, then name. The `namespace/name` form produced by
/// `Display` is for logs only and never used as a map key.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SecretKey {
    pub namespace: String,
    pub name: String,
}

impl SecretKey {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Key of an existing Secret object.
    pub fn of(secret: &Secret) -> Self {
        Self::new(secret.namespace().unwrap_or_default(), secret.name_any())
    }
}

impl fmt::Display for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Resolved Secrets keyed by identity
pub type SecretMap = BTreeMap<SecretKey, Secret>;

/// Read access to Secrets by namespace and name.
///
/// Implementations must be safe to share between reconcile workers.
pub trait SecretLister: Send + Sync {
    /// Returns the Secret, or `None` when it does not exist.
    fn get_secret(&self, namespace: &str, name: &str) -> Option<Secret>;
}

impl SecretLister for Store<Secret> {
    fn get_secret(&self, namespace: &str, name: &str) -> Option<Secret> {
        self.get(&ObjectRef::new(name).within(namespace))
            .map(|secret| Secret::clone(&secret))
    }
}

/// In-memory Secret lookup
#[derive(Clone, Debug, Default)]
pub struct SecretCache {
    secrets: SecretMap,
}

impl SecretCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a Secret, keyed by its own metadata.
    pub fn insert(&mut self, secret: Secret) {
        self.secrets.insert(SecretKey::of(&secret), secret);
    }

    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }
}

impl FromIterator<Secret> for SecretCache {
    fn from_iter<I: IntoIterator<Item = Secret>>(iter: I) -> Self {
        let mut cache = Self::new();
        for secret in iter {
            cache.insert(secret);
        }
        cache
    }
}

impl SecretLister for SecretCache {
    fn get_secret(&self, namespace: &str, name: &str) -> Option<Secret> {
        self.secrets.get(&SecretKey::new(namespace, name)).cloned()
    }
}
