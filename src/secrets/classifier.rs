//! Wildcard / non-wildcard classification of certificate Secrets

use tracing::debug;

use super::inspector::{get_hosts_from_cert_secret, is_wildcard_host};
use super::SecretMap;
use crate::error::Result;

/// Secrets partitioned by the kind of certificate they hold.
///
/// The two maps are disjoint and together hold exactly the classified input.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Classified {
    pub non_wildcard: SecretMap,
    pub wildcard: SecretMap,
}

/// Split Secrets into non-wildcard and wildcard certificates.
///
/// A Secret whose certificate names any `*.` host goes to the wildcard bucket
/// as a whole. If any certificate cannot be read the whole call fails.
pub fn categorize_secrets(secrets: &SecretMap) -> Result<Classified> {
    let mut classified = Classified::default();
    for (key, secret) in secrets {
        let hosts = get_hosts_from_cert_secret(secret)?;
        let wildcard = hosts.iter().any(|h| is_wildcard_host(h));
        debug!(secret = %key, wildcard, "Classified certificate secret");

        let bucket = if wildcard {
            &mut classified.wildcard
        } else {
            &mut classified.non_wildcard
        };
        bucket.insert(key.clone(), secret.clone());
    }
    Ok(classified)
}
