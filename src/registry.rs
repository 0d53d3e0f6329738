//! Registry of declared network profiles, keyed by name.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::warn;

use crate::constants;
use crate::errors::{ProfileError, Result};
use crate::profile::{LocalProfile, NetworkProfile, ProfileKind, RemoteProfile};
use crate::provider::ProviderFactory;
use crate::secrets::SecretsStore;
use crate::types::NetworkId;

/// Secrets field a declared profile needs but the store lacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecretGap {
    pub profile: String,
    pub field: String,
}

/// Ordered set of profiles with unique names.
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    profiles: Vec<NetworkProfile>,
}

impl ProfileRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The toolchain's declared profiles: two local nodes and three remote
    /// networks behind the gateway.
    pub fn declared() -> Self {
        let remote = |network: &str, chain_id: u64, field: &str| {
            NetworkProfile::remote(
                network,
                RemoteProfile::new(
                    network,
                    chain_id,
                    constants::GATEWAY_HOST,
                    field,
                    constants::API_KEY_FIELD,
                ),
            )
        };
        Self {
            profiles: vec![
                NetworkProfile::local(
                    constants::DEVELOPMENT_PROFILE,
                    LocalProfile::new(
                        constants::LOCAL_HOST,
                        constants::DEVELOPMENT_PORT,
                        NetworkId::Wildcard,
                    ),
                ),
                NetworkProfile::local(
                    constants::GANACHINA_PROFILE,
                    LocalProfile::new(
                        constants::LOCAL_HOST,
                        constants::GANACHINA_PORT,
                        NetworkId::Text(constants::GANACHINA_NETWORK_ID.to_string()),
                    ),
                ),
                remote(
                    constants::ROPSTEN_PROFILE,
                    constants::ROPSTEN_CHAIN_ID,
                    constants::ROPSTEN_KEYS_FIELD,
                ),
                remote(
                    constants::RINKEBY_PROFILE,
                    constants::RINKEBY_CHAIN_ID,
                    constants::RINKEBY_KEYS_FIELD,
                ),
                remote(
                    constants::KOVAN_PROFILE,
                    constants::KOVAN_CHAIN_ID,
                    constants::KOVAN_KEYS_FIELD,
                ),
            ],
        }
    }

    /// Add a profile, names must be unique.
    pub fn register(&mut self, profile: NetworkProfile) -> Result<()> {
        if self.contains(&profile.name) {
            return Err(ProfileError::DuplicateProfile(profile.name));
        }
        self.profiles.push(profile);
        Ok(())
    }

    pub fn with_profile(mut self, profile: NetworkProfile) -> Result<Self> {
        self.register(profile)?;
        Ok(self)
    }

    /// Replace the construction routine of every remote profile.
    pub fn set_provider_factory(&mut self, factory: ProviderFactory) {
        for profile in self.profiles.iter_mut() {
            if let ProfileKind::Deferred { factory: f, .. } = &mut profile.kind {
                *f = factory.clone();
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.profiles.iter().any(|p| p.name == name)
    }

    /// Look up a profile by name.
    pub fn get(&self, name: &str) -> Result<&NetworkProfile> {
        self.profiles
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| ProfileError::UnknownProfile(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &NetworkProfile> {
        self.profiles.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Union of the secrets fields all profiles depend on.
    pub fn required_secrets(&self) -> BTreeSet<&str> {
        self.profiles
            .iter()
            .flat_map(|p| p.required_secrets())
            .collect()
    }

    /// Check every declared secret dependency against `secrets` without
    /// running any provider factory. Field values are not read.
    pub fn validate_secrets(&self, secrets: &SecretsStore) -> Vec<SecretGap> {
        let gaps: Vec<SecretGap> = self
            .profiles
            .iter()
            .flat_map(|p| {
                p.required_secrets()
                    .into_iter()
                    .filter(|field| !secrets.contains(field))
                    .map(|field| SecretGap {
                        profile: p.name.clone(),
                        field: field.to_string(),
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        for gap in gaps.iter() {
            warn!(profile = %gap.profile, field = %gap.field, "secret field missing");
        }
        gaps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn declares_five_profiles_in_order() {
        let registry = ProfileRegistry::declared();
        assert_eq!(
            registry.names(),
            vec!["development", "ganachina", "ropsten", "rinkeby", "kovan"]
        );
        assert_eq!(registry.iter().filter(|p| p.is_remote()).count(), 3);
    }

    #[test]
    fn unknown_profile_is_distinct_error() {
        let registry = ProfileRegistry::declared();
        assert!(matches!(
            registry.get("mainnet"),
            Err(ProfileError::UnknownProfile(name)) if name == "mainnet"
        ));
    }

    #[test]
    fn rejects_duplicate_names() {
        let mut registry = ProfileRegistry::declared();
        let dup = NetworkProfile::local(
            "development",
            LocalProfile::new("127.0.0.1", 1, NetworkId::Wildcard),
        );
        assert!(matches!(
            registry.register(dup),
            Err(ProfileError::DuplicateProfile(_))
        ));
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn required_secrets_cover_all_remote_fields() {
        let registry = ProfileRegistry::declared();
        let fields: Vec<&str> = registry
            .required_secrets()
            .into_iter()
            .collect();
        assert_eq!(
            fields,
            vec![
                "infuraKey",
                "privateKeysKovan",
                "privateKeysRinkeby",
                "privateKeysRopsten"
            ]
        );
    }

    #[test]
    fn validate_secrets_reports_gaps_without_reading_values() {
        let secrets = SecretsStore::from_value(json!({
            "infuraKey": "K",
            "privateKeysRopsten": ["0xabc"],
            "privateKeysKovan": ["0xdef"],
        }))
        .unwrap();
        let gaps = ProfileRegistry::declared().validate_secrets(&secrets);
        assert_eq!(
            gaps,
            vec![SecretGap {
                profile: "rinkeby".to_string(),
                field: "privateKeysRinkeby".to_string(),
            }]
        );
        assert!(secrets.accessed_fields().is_empty());
    }
}
