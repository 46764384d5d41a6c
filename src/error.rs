//! Error types for secret synchronization

use thiserror::Error;

use crate::secrets::SecretKey;

#[derive(Error, Debug)]
pub enum Error {
    /// A TLS declaration references a Secret that does not exist
    #[error("secret {namespace}/{name} not found")]
    NotFound { namespace: String, name: String },

    /// The Secret payload is not a usable X.509 certificate
    #[error("secret {secret} does not hold a valid certificate: {reason}")]
    InvalidCertificate { secret: SecretKey, reason: String },

    /// The Secret is missing metadata required to derive a target
    #[error("invalid secret: {0}")]
    InvalidSecret(String),

    /// The set of gateway namespaces cannot be determined
    #[error("gateway topology unavailable: {0}")]
    TopologyUnavailable(String),

    /// Ingress spec validation failure
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Kubernetes API error
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_yaml::Error),
}

impl Error {
    /// Whether the caller should requeue the Ingress and try again later.
    ///
    /// Missing Secrets and gateway configuration can appear after the fact;
    /// a malformed certificate or spec will not fix itself.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::NotFound { .. } | Error::TopologyUnavailable(_) | Error::KubeError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
