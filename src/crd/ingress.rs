//! Ingress Custom Resource Definition
//!
//! The Knative `Ingress` is the routing resource whose TLS declarations drive
//! secret synchronization. Only the parts of the Ingress spec this crate reads are
//! modelled here.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::secrets::SecretKey;

/// Structured validation error for `IngressSpec`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpecValidationError {
    pub field: String,
    pub message: String,
    pub how_to_fix: String,
}

impl SpecValidationError {
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
        how_to_fix: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            how_to_fix: how_to_fix.into(),
        }
    }
}

impl std::fmt::Display for SpecValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({})", self.field, self.message, self.how_to_fix)
    }
}

#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "networking.internal.knative.dev",
    version = "v1alpha1",
    kind = "Ingress",
    namespaced,
    shortname = "kingress",
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct IngressSpec {
    /// TLS settings, one entry per certificate served by the gateways
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tls: Vec<IngressTls>,
}

/// A single TLS declaration binding hosts to a certificate Secret
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IngressTls {
    /// Hosts covered by the certificate
    #[serde(default)]
    pub hosts: Vec<String>,

    /// Name of the Secret holding `tls.crt` / `tls.key`
    pub secret_name: String,

    /// Namespace of the Secret
    pub secret_namespace: String,
}

impl IngressTls {
    /// Key of the Secret this declaration references.
    pub fn secret_key(&self) -> SecretKey {
        SecretKey::new(&self.secret_namespace, &self.secret_name)
    }
}

impl IngressSpec {
    /// Validate the TLS declarations.
    ///
    /// Returns every problem found rather than stopping at the first one.
    pub fn validate(&self) -> Result<(), Vec<SpecValidationError>> {
        let mut errors: Vec<SpecValidationError> = Vec::new();

        for (i, tls) in self.tls.iter().enumerate() {
            if tls.hosts.is_empty() {
                errors.push(SpecValidationError::new(
                    format!("spec.tls[{i}].hosts"),
                    "at least one host is required",
                    "List the hostnames served with this certificate.",
                ));
            }
            if tls.hosts.iter().any(|h| h.trim().is_empty()) {
                errors.push(SpecValidationError::new(
                    format!("spec.tls[{i}].hosts"),
                    "hosts must not be empty strings",
                    "Remove blank entries from the host list.",
                ));
            }
            if tls.secret_name.is_empty() {
                errors.push(SpecValidationError::new(
                    format!("spec.tls[{i}].secretName"),
                    "secretName is required",
                    "Set secretName to the Secret holding the certificate.",
                ));
            }
            if tls.secret_namespace.is_empty() {
                errors.push(SpecValidationError::new(
                    format!("spec.tls[{i}].secretNamespace"),
                    "secretNamespace is required",
                    "Set secretNamespace to the namespace of the certificate Secret.",
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
