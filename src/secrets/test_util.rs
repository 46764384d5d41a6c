//! Secret and certificate fixtures shared by the unit tests

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::ByteString;
use rcgen::{CertificateParams, DnType, KeyPair};

use super::TLS_CERT_KEY;

/// Build a Secret with the given data.
pub fn secret(namespace: &str, name: &str, data: &[(&str, &[u8])]) -> Secret {
    Secret {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        data: Some(
            data.iter()
                .map(|(k, v)| (k.to_string(), ByteString(v.to_vec())))
                .collect::<BTreeMap<_, _>>(),
        ),
        ..Default::default()
    }
}

/// Same as [`secret`] with a UID set.
pub fn secret_with_uid(namespace: &str, name: &str, uid: &str, data: &[(&str, &[u8])]) -> Secret {
    let mut s = secret(namespace, name, data);
    s.metadata.uid = Some(uid.to_string());
    s
}

/// Self-signed PEM certificate with the given SANs and Common Name.
pub fn certificate_pem(sans: &[&str], common_name: &str) -> String {
    let mut params = CertificateParams::new(
        sans.iter().map(|s| s.to_string()).collect::<Vec<String>>(),
    )
    .expect("valid certificate params");
    params
        .distinguished_name
        .push(DnType::CommonName, common_name);
    let key = KeyPair::generate().expect("key generation");
    params.self_signed(&key).expect("self-signed certificate").pem()
}

/// A `kubernetes.io/tls` style Secret whose certificate secures `host`.
pub fn cert_secret(host: &str, name: &str, namespace: &str) -> Secret {
    let key = KeyPair::generate().expect("key generation");
    let mut params =
        CertificateParams::new(vec![host.to_string()]).expect("valid certificate params");
    params.distinguished_name.push(DnType::CommonName, host);
    let cert = params.self_signed(&key).expect("self-signed certificate");

    let mut s = secret(
        namespace,
        name,
        &[
            (TLS_CERT_KEY, cert.pem().as_bytes()),
            ("tls.key", key.serialize_pem().as_bytes()),
        ],
    );
    s.type_ = Some("kubernetes.io/tls".to_string());
    s
}
