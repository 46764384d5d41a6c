//! Gateway topology configuration
//!
//! Gateways are configured in the `config-istio` ConfigMap as
//! `gateway.<name>: <service>.<namespace>.svc.<cluster-domain>`. The
//! namespaces of those services are where TLS Secrets have to be synchronized.

use std::collections::BTreeSet;

use k8s_openapi::api::core::v1::ConfigMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

/// Default name of the ConfigMap holding the gateway configuration
pub const DEFAULT_CONFIG_MAP_NAME: &str = "config-istio";

/// Default namespace of the gateway ConfigMap
pub const DEFAULT_CONFIG_NAMESPACE: &str = "knative-serving";

const GATEWAY_KEY_PREFIX: &str = "gateway.";

/// An ingress gateway and the Service fronting it
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Gateway {
    pub name: String,
    pub service_url: String,
}

impl Gateway {
    pub fn new(name: impl Into<String>, service_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            service_url: service_url.into(),
        }
    }

    /// Namespace of the gateway Service, taken from `<service>.<namespace>...`.
    pub fn service_namespace(&self) -> Result<&str> {
        let mut parts = self.service_url.splitn(3, '.');
        match (parts.next(), parts.next()) {
            (Some(svc), Some(ns)) if !svc.is_empty() && !ns.is_empty() => Ok(ns),
            _ => Err(Error::TopologyUnavailable(format!(
                "gateway {}: unexpected service URL form {:?}",
                self.name, self.service_url
            ))),
        }
    }
}

/// The set of ingress gateways serving TLS
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GatewayTopology {
    #[serde(default)]
    pub gateways: Vec<Gateway>,
}

impl GatewayTopology {
    pub fn new(gateways: Vec<Gateway>) -> Self {
        Self { gateways }
    }

    /// Build the topology from `config-istio` ConfigMap data.
    ///
    /// Keys without the `gateway.` prefix are ignored.
    pub fn from_config_map(config_map: &ConfigMap) -> Self {
        let gateways = config_map
            .data
            .iter()
            .flatten()
            .filter_map(|(key, value)| {
                let name = key.strip_prefix(GATEWAY_KEY_PREFIX)?;
                if name.is_empty() {
                    warn!(key = %key, "Ignoring gateway entry without a name");
                    return None;
                }
                Some(Gateway::new(name, value.trim()))
            })
            .collect();
        Self { gateways }
    }

    /// Namespaces of all gateway Services, duplicates collapsed.
    ///
    /// Fails when no gateway is configured or any service URL is malformed.
    pub fn target_namespaces(&self) -> Result<BTreeSet<String>> {
        if self.gateways.is_empty() {
            return Err(Error::TopologyUnavailable(
                "no ingress gateways configured".to_string(),
            ));
        }
        self.gateways
            .iter()
            .map(|gw| gw.service_namespace().map(str::to_string))
            .collect()
    }
}
