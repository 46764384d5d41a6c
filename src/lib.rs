//! Ingress Secret Sync: TLS secret propagation for Knative Ingress gateways
//!
//! This crate resolves the certificate Secrets referenced by Knative
//! `Ingress` resources, classifies them as wildcard or non-wildcard, and
//! produces the copies that have to exist in the gateway namespaces.

pub mod config;
pub mod crd;
pub mod error;
pub mod secrets;

pub use crate::error::{Error, Result};
