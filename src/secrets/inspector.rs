//! Certificate inspection
//!
//! Reads the leaf certificate out of a TLS Secret and reports the hostnames
//! it secures.

use k8s_openapi::api::core::v1::Secret;
use x509_parser::certificate::X509Certificate;
use x509_parser::extensions::GeneralName;
use x509_parser::pem::parse_x509_pem;

use super::{SecretKey, TLS_CERT_KEY};
use crate::error::{Error, Result};

/// Prefix marking a wildcard hostname
pub const WILDCARD_PREFIX: &str = "*.";

/// Whether `host` is a wildcard pattern such as `*.example.com`.
pub fn is_wildcard_host(host: &str) -> bool {
    host.starts_with(WILDCARD_PREFIX)
}

/// Returns the hostnames secured by the certificate in `tls.crt`.
///
/// The DNS Subject Alternative Names are returned in certificate order. When
/// the certificate carries none, the subject Common Name is used instead.
/// For a chain, only the first (leaf) certificate is inspected.
pub fn get_hosts_from_cert_secret(secret: &Secret) -> Result<Vec<String>> {
    let key = SecretKey::of(secret);
    let invalid = |reason: String| Error::InvalidCertificate {
        secret: key.clone(),
        reason,
    };

    let payload = secret
        .data
        .as_ref()
        .and_then(|data| data.get(TLS_CERT_KEY))
        .ok_or_else(|| invalid(format!("missing {TLS_CERT_KEY}")))?;

    let (_, pem) = parse_x509_pem(&payload.0)
        .map_err(|e| invalid(format!("failed to decode PEM data: {e}")))?;
    let cert = pem
        .parse_x509()
        .map_err(|e| invalid(format!("failed to parse certificate: {e}")))?;

    let hosts = hosts_of(&cert).map_err(invalid)?;
    if hosts.is_empty() {
        return Err(invalid("certificate does not name any host".to_string()));
    }
    Ok(hosts)
}

fn hosts_of(cert: &X509Certificate<'_>) -> std::result::Result<Vec<String>, String> {
    let san = cert
        .subject_alternative_name()
        .map_err(|e| format!("malformed subjectAltName: {e}"))?;

    let dns_names: Vec<String> = san
        .map(|ext| {
            ext.value
                .general_names
                .iter()
                .filter_map(|name| match name {
                    GeneralName::DNSName(dns) => Some(dns.to_string()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();
    if !dns_names.is_empty() {
        return Ok(dns_names);
    }

    cert.subject()
        .iter_common_name()
        .map(|cn| {
            cn.as_str()
                .map(str::to_string)
                .map_err(|e| format!("unreadable common name: {e}"))
        })
        .collect()
}
