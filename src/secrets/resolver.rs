//! Resolution of the Secrets referenced by an Ingress

use kube::ResourceExt;
use tracing::{debug, instrument};

use super::{SecretLister, SecretMap};
use crate::crd::Ingress;
use crate::error::{Error, Result};

/// Fetch every Secret referenced by the Ingress TLS declarations.
///
/// Declarations sharing a Secret resolve to a single entry. The first missing
/// Secret fails the whole call with [`Error::NotFound`].
#[instrument(skip(ingress, lister), fields(name = %ingress.name_any(), namespace = %ingress.namespace().unwrap_or_default()))]
pub fn get_secrets(ingress: &Ingress, lister: &dyn SecretLister) -> Result<SecretMap> {
    let mut secrets = SecretMap::new();
    for tls in &ingress.spec.tls {
        let key = tls.secret_key();
        if secrets.contains_key(&key) {
            continue;
        }
        let secret = lister
            .get_secret(&key.namespace, &key.name)
            .ok_or_else(|| Error::NotFound {
                namespace: key.namespace.clone(),
                name: key.name.clone(),
            })?;
        debug!(secret = %key, "Resolved TLS secret");
        secrets.insert(key, secret);
    }
    Ok(secrets)
}
