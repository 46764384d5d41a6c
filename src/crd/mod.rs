//! Custom Resource Definitions read by the secret synchronizer
//!
//! This module defines the Knative networking `Ingress` CRD.

mod ingress;

#[cfg(test)]
mod tests;

pub use ingress::{Ingress, IngressSpec, IngressTls, SpecValidationError};
