//! Network profile resolution.

use std::path::PathBuf;

use serde_json::{json, Value};
use tracing::{debug, info};

use crate::constants;
use crate::errors::Result;
use crate::profile::{LocalProfile, ProfileKind};
use crate::provider::{ProviderFactory, ProviderRequest, RemoteProvider};
use crate::registry::{ProfileRegistry, SecretGap};
use crate::secrets::{SecretsLoading, SecretsSource, SecretsStore};
use crate::types::NetworkId;

/// Fully resolved connection for the active profile.
#[derive(Debug, Clone)]
pub enum ConnectionDescriptor {
    /// Local node, returned verbatim from the declaration
    Direct(LocalProfile),
    /// Remote network behind a signing provider
    Provider {
        network_id: NetworkId,
        provider: RemoteProvider,
    },
}

impl ConnectionDescriptor {
    pub fn network_id(&self) -> NetworkId {
        match self {
            ConnectionDescriptor::Direct(local) => local.network_id.clone(),
            ConnectionDescriptor::Provider { network_id, .. } => network_id.clone(),
        }
    }

    pub fn as_local(&self) -> Option<&LocalProfile> {
        match self {
            ConnectionDescriptor::Direct(local) => Some(local),
            ConnectionDescriptor::Provider { .. } => None,
        }
    }

    pub fn as_provider(&self) -> Option<&RemoteProvider> {
        match self {
            ConnectionDescriptor::Direct(_) => None,
            ConnectionDescriptor::Provider { provider, .. } => Some(provider),
        }
    }

    /// Display-safe json summary, API key masked and credentials counted.
    pub fn summary(&self) -> Value {
        match self {
            ConnectionDescriptor::Direct(local) => json!({
                "kind": "local",
                "host": local.host,
                "port": local.port,
                "network_id": local.network_id,
            }),
            ConnectionDescriptor::Provider {
                network_id,
                provider,
            } => json!({
                "kind": "remote",
                "endpoint": provider.redacted_endpoint(),
                "network_id": network_id,
                "accounts": provider.credentials().len(),
            }),
        }
    }
}

/// Builder for [`NetworkProfileResolver`].
#[derive(Debug, Default)]
pub struct ResolverBuilder {
    secrets_path: Option<PathBuf>,
    secrets: Option<SecretsStore>,
    loading: SecretsLoading,
    registry: Option<ProfileRegistry>,
    factory: Option<ProviderFactory>,
}

impl ResolverBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Secrets file to read, defaults to `.secrets.json`.
    pub fn secrets_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.secrets_path = Some(path.into());
        self
    }

    /// Use an in-memory store instead of reading a file.
    pub fn secrets(mut self, secrets: SecretsStore) -> Self {
        self.secrets = Some(secrets);
        self
    }

    pub fn loading(mut self, loading: SecretsLoading) -> Self {
        self.loading = loading;
        self
    }

    /// Profiles to resolve against, defaults to the declared ones.
    pub fn registry(mut self, registry: ProfileRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Override the provider construction of every remote profile.
    pub fn provider_factory(mut self, factory: ProviderFactory) -> Self {
        self.factory = Some(factory);
        self
    }

    /// Build the resolver. In eager mode the secrets file is read here and any
    /// read or parse failure aborts before a profile becomes available.
    pub fn build(self) -> Result<NetworkProfileResolver> {
        let mut registry = self.registry.unwrap_or_else(ProfileRegistry::declared);
        if let Some(factory) = self.factory {
            registry.set_provider_factory(factory);
        }

        let secrets = match self.secrets {
            Some(store) => SecretsSource::Loaded(store),
            None => {
                let path = self
                    .secrets_path
                    .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_SECRETS_FILE_NAME));
                match self.loading {
                    SecretsLoading::Eager => SecretsSource::Loaded(SecretsStore::load(&path)?),
                    SecretsLoading::Deferred => {
                        debug!(path = %path.display(), "deferring secrets load");
                        SecretsSource::deferred(path)
                    }
                }
            }
        };

        info!(profiles = registry.len(), "network profile resolver ready");
        Ok(NetworkProfileResolver { registry, secrets })
    }
}

/// Resolves profile names into connection descriptors.
#[derive(Debug)]
pub struct NetworkProfileResolver {
    registry: ProfileRegistry,
    secrets: SecretsSource,
}

impl NetworkProfileResolver {
    /// Resolver over the declared profiles, reading the secrets file at `path` now.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        ResolverBuilder::new().secrets_path(path).build()
    }

    /// Resolver over the declared profiles with an in-memory secrets store.
    pub fn from_secrets(secrets: SecretsStore) -> Self {
        NetworkProfileResolver {
            registry: ProfileRegistry::declared(),
            secrets: SecretsSource::Loaded(secrets),
        }
    }

    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::new()
    }

    pub fn registry(&self) -> &ProfileRegistry {
        &self.registry
    }

    /// Check if the secrets store has been read.
    pub fn secrets_loaded(&self) -> bool {
        self.secrets.is_loaded()
    }

    /// The secrets store, reading it first in deferred mode.
    pub fn secrets(&self) -> Result<&SecretsStore> {
        self.secrets.store()
    }

    /// Resolve `name` into a connection descriptor.
    ///
    /// Local profiles come back as declared and never touch the secrets store.
    /// Remote profiles run their provider factory, so credential problems
    /// surface here and only for the selected profile.
    pub fn resolve(&self, name: &str) -> Result<ConnectionDescriptor> {
        let profile = self.registry.get(name)?;
        debug!(profile = name, "resolving network profile");
        match &profile.kind {
            ProfileKind::Static(local) => Ok(ConnectionDescriptor::Direct(local.clone())),
            ProfileKind::Deferred { remote, factory } => {
                let secrets = self.secrets.store()?;
                let provider = factory.build(&ProviderRequest {
                    profile: &profile.name,
                    remote,
                    secrets,
                })?;
                Ok(ConnectionDescriptor::Provider {
                    network_id: NetworkId::Id(remote.chain_id),
                    provider,
                })
            }
        }
    }

    /// Report declared secret fields missing from the store.
    pub fn validate_secrets(&self) -> Result<Vec<SecretGap>> {
        Ok(self.registry.validate_secrets(self.secrets.store()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ProfileError;
    use serde_json::json;

    fn resolver(secrets: Value) -> NetworkProfileResolver {
        NetworkProfileResolver::from_secrets(SecretsStore::from_value(secrets).unwrap())
    }

    #[test]
    fn local_profiles_resolve_verbatim() {
        let r = resolver(json!({}));
        let dev = r.resolve("development").unwrap();
        assert_eq!(
            dev.as_local(),
            Some(&LocalProfile::new("127.0.0.1", 9545, NetworkId::Wildcard))
        );
        let ganache = r.resolve("ganachina").unwrap();
        assert_eq!(
            ganache.as_local(),
            Some(&LocalProfile::new(
                "127.0.0.1",
                7545,
                NetworkId::Text("5777".to_string())
            ))
        );
        assert!(r.secrets().unwrap().accessed_fields().is_empty());
    }

    #[test]
    fn remote_profile_resolves_to_provider() {
        let r = resolver(json!({"infuraKey": "K", "privateKeysRopsten": ["0xabc"]}));
        let descriptor = r.resolve("ropsten").unwrap();
        let provider = descriptor.as_provider().unwrap();
        assert_eq!(provider.endpoint(), "https://ropsten.infura.io/v3/K");
        assert_eq!(provider.credentials(), &["0xabc".to_string()]);
        assert_eq!(descriptor.network_id(), NetworkId::Id(3));
    }

    #[test]
    fn unknown_profile_error() {
        let r = resolver(json!({}));
        assert!(matches!(
            r.resolve("mainnet"),
            Err(ProfileError::UnknownProfile(_))
        ));
    }

    #[test]
    fn summary_masks_key() {
        let r = resolver(json!({"infuraKey": "K", "privateKeysKovan": ["0x1", "0x2"]}));
        let summary = r.resolve("kovan").unwrap().summary();
        assert_eq!(
            summary,
            json!({
                "kind": "remote",
                "endpoint": "https://kovan.infura.io/v3/***",
                "network_id": 42,
                "accounts": 2,
            })
        );
        assert_eq!(
            r.resolve("development").unwrap().summary(),
            json!({"kind": "local", "host": "127.0.0.1", "port": 9545, "network_id": "*"})
        );
        assert_eq!(
            r.resolve("ganachina").unwrap().summary(),
            json!({"kind": "local", "host": "127.0.0.1", "port": 7545, "network_id": "5777"})
        );
    }
}
