//! Toolchain project configuration: networks, compiler and test runner.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::compiler::CompilerSpec;
use crate::profile::{NetworkProfile, ProfileKind};
use crate::registry::ProfileRegistry;
use crate::runner::TestRunnerOptions;

/// Compilers block, keyed by compiler name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompilersConfig {
    pub solc: CompilerSpec,
}

#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub networks: ProfileRegistry,
    pub compilers: CompilersConfig,
    pub test_runner: TestRunnerOptions,
}

impl ProjectConfig {
    /// Declared networks, pinned solc and an empty test runner block.
    pub fn declared() -> Self {
        Self {
            networks: ProfileRegistry::declared(),
            compilers: CompilersConfig::default(),
            test_runner: TestRunnerOptions::default(),
        }
    }

    /// Export for external tools. Remote profiles show the endpoint template
    /// and secret field names, never secret values. Test runner options go
    /// under `mocha`, the block name the external runner reads.
    pub fn to_json(&self) -> Value {
        let networks: Map<String, Value> = self
            .networks
            .iter()
            .map(|p| (p.name.clone(), describe_profile(p)))
            .collect();
        json!({
            "networks": networks,
            "mocha": self.test_runner,
            "compilers": self.compilers,
        })
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self::declared()
    }
}

fn describe_profile(profile: &NetworkProfile) -> Value {
    match &profile.kind {
        ProfileKind::Static(local) => json!({
            "host": local.host,
            "port": local.port,
            "network_id": local.network_id,
        }),
        ProfileKind::Deferred { remote, .. } => json!({
            "provider": {
                "endpoint": remote.endpoint(&format!("{{{}}}", remote.api_key_field)),
                "credentials": remote.credentials_field,
            },
            "network_id": remote.chain_id,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exports_declared_configuration() {
        let exported = ProjectConfig::declared().to_json();
        assert_eq!(
            exported["networks"]["development"],
            json!({"host": "127.0.0.1", "port": 9545, "network_id": "*"})
        );
        assert_eq!(
            exported["networks"]["ganachina"],
            json!({"host": "127.0.0.1", "port": 7545, "network_id": "5777"})
        );
        assert_eq!(
            exported["networks"]["rinkeby"],
            json!({
                "provider": {
                    "endpoint": "https://rinkeby.infura.io/v3/{infuraKey}",
                    "credentials": "privateKeysRinkeby",
                },
                "network_id": 4,
            })
        );
        assert_eq!(exported["compilers"], json!({"solc": {"version": "0.7.3"}}));
        assert_eq!(exported["mocha"], json!({}));
        assert!(exported.get("testRunner").is_none());
    }

    #[test]
    fn default_is_the_declared_configuration() {
        let config = ProjectConfig::default();
        assert_eq!(
            config.networks.names(),
            vec!["development", "ganachina", "ropsten", "rinkeby", "kovan"]
        );
        assert_eq!(config.to_json(), ProjectConfig::declared().to_json());
    }
}
