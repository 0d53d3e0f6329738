//! Network profile declarations.

use std::fmt;

use serde::Serialize;

use crate::provider::ProviderFactory;
use crate::types::NetworkId;
use crate::utils;

/// Direct connection to a local node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalProfile {
    /// Node host e.g. "127.0.0.1"
    pub host: String,
    /// Node JSON-RPC port
    pub port: u16,
    /// Accepted network identifier
    pub network_id: NetworkId,
}

impl LocalProfile {
    pub fn new(host: &str, port: u16, network_id: NetworkId) -> Self {
        Self {
            host: host.to_string(),
            port,
            network_id,
        }
    }

    /// JSON-RPC url of the local node e.g. "http://127.0.0.1:9545".
    pub fn rpc_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Remote network reached through the hosted gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteProfile {
    /// Network name, used as the gateway subdomain e.g. "ropsten"
    pub network: String,
    /// Declared chain identifier
    pub chain_id: u64,
    /// Gateway host e.g. "infura.io"
    pub gateway_host: String,
    /// Secrets field holding this network's credential list
    pub credentials_field: String,
    /// Secrets field holding the gateway API key
    pub api_key_field: String,
}

impl RemoteProfile {
    pub fn new(
        network: &str,
        chain_id: u64,
        gateway_host: &str,
        credentials_field: &str,
        api_key_field: &str,
    ) -> Self {
        Self {
            network: network.to_string(),
            chain_id,
            gateway_host: gateway_host.to_string(),
            credentials_field: credentials_field.to_string(),
            api_key_field: api_key_field.to_string(),
        }
    }

    /// Gateway endpoint for this network with `api_key` substituted.
    pub fn endpoint(&self, api_key: &str) -> String {
        utils::gateway_endpoint(&self.network, &self.gateway_host, api_key)
    }

    /// Secrets fields the provider factory reads.
    pub fn required_secrets(&self) -> [&str; 2] {
        [self.credentials_field.as_str(), self.api_key_field.as_str()]
    }
}

/// Either a literal descriptor or a deferred provider construction.
#[derive(Clone)]
pub enum ProfileKind {
    Static(LocalProfile),
    Deferred {
        remote: RemoteProfile,
        factory: ProviderFactory,
    },
}

impl fmt::Debug for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileKind::Static(local) => f.debug_tuple("Static").field(local).finish(),
            ProfileKind::Deferred { remote, .. } => {
                f.debug_struct("Deferred").field("remote", remote).finish_non_exhaustive()
            }
        }
    }
}

/// Named network target.
#[derive(Debug, Clone)]
pub struct NetworkProfile {
    pub name: String,
    pub kind: ProfileKind,
}

impl NetworkProfile {
    pub fn local(name: &str, local: LocalProfile) -> Self {
        Self {
            name: name.to_string(),
            kind: ProfileKind::Static(local),
        }
    }

    /// Remote profile built with the default HD wallet provider factory.
    pub fn remote(name: &str, remote: RemoteProfile) -> Self {
        Self::remote_with_factory(name, remote, ProviderFactory::hd_wallet())
    }

    pub fn remote_with_factory(
        name: &str,
        remote: RemoteProfile,
        factory: ProviderFactory,
    ) -> Self {
        Self {
            name: name.to_string(),
            kind: ProfileKind::Deferred { remote, factory },
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self.kind, ProfileKind::Deferred { .. })
    }

    /// Secrets fields needed to resolve this profile, empty for local ones.
    pub fn required_secrets(&self) -> Vec<&str> {
        match &self.kind {
            ProfileKind::Static(_) => vec![],
            ProfileKind::Deferred { remote, .. } => remote.required_secrets().to_vec(),
        }
    }

    /// Declared network id of the profile.
    pub fn network_id(&self) -> NetworkId {
        match &self.kind {
            ProfileKind::Static(local) => local.network_id.clone(),
            ProfileKind::Deferred { remote, .. } => NetworkId::Id(remote.chain_id),
        }
    }
}
