//! Remote providers bound to a gateway endpoint and a credential list.

use std::fmt;
use std::sync::Arc;

use ethers::prelude::*;
use tracing::info;

use crate::eoa::ProfileAccount;
use crate::errors::{ProfileError, Result};
use crate::profile::RemoteProfile;
use crate::secrets::SecretsStore;
use crate::types::EthRpcClient;
use crate::utils;

/// Everything a provider factory may read when its profile is selected.
pub struct ProviderRequest<'a> {
    /// Selected profile name
    pub profile: &'a str,
    /// Remote network declaration
    pub remote: &'a RemoteProfile,
    /// Secrets store
    pub secrets: &'a SecretsStore,
}

type FactoryFn = dyn Fn(&ProviderRequest<'_>) -> Result<RemoteProvider> + Send + Sync;

/// Construction routine for a remote profile's provider, only run on selection.
#[derive(Clone)]
pub struct ProviderFactory(Arc<FactoryFn>);

impl ProviderFactory {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&ProviderRequest<'_>) -> Result<RemoteProvider> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Default factory, an HD wallet style provider over the gateway endpoint.
    pub fn hd_wallet() -> Self {
        Self::new(hd_wallet_provider)
    }

    pub fn build(&self, request: &ProviderRequest<'_>) -> Result<RemoteProvider> {
        (self.0)(request)
    }
}

impl fmt::Debug for ProviderFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ProviderFactory")
    }
}

/// Read the network's credential list and the shared API key, then bind a
/// provider to the gateway endpoint.
pub fn hd_wallet_provider(request: &ProviderRequest<'_>) -> Result<RemoteProvider> {
    let remote = request.remote;
    let credentials = request
        .secrets
        .credentials(request.profile, &remote.credentials_field)?;
    let api_key = request.secrets.string(request.profile, &remote.api_key_field)?;
    RemoteProvider::new(
        request.profile,
        remote.endpoint(&api_key),
        remote.chain_id,
        credentials,
    )
}

/// Transport and signer set for a remote profile.
#[derive(Clone)]
pub struct RemoteProvider {
    profile: String,
    endpoint: String,
    chain_id: u64,
    credentials: Vec<String>,
    provider: Provider<Http>,
}

impl RemoteProvider {
    /// Bind an HTTP provider to `endpoint`. Credentials are not validated here,
    /// malformed keys surface once signers are requested.
    pub fn new(
        profile: &str,
        endpoint: String,
        chain_id: u64,
        credentials: Vec<String>,
    ) -> Result<Self> {
        let provider = Provider::<Http>::try_from(endpoint.as_str())
            .map_err(|e| ProfileError::FailedToCreateProvider(e.to_string()))?;
        info!(
            profile,
            endpoint = %utils::redact_endpoint(&endpoint),
            chain_id,
            accounts = credentials.len(),
            "constructed remote provider"
        );
        Ok(Self {
            profile: profile.to_string(),
            endpoint,
            chain_id,
            credentials,
            provider,
        })
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Full endpoint url, including the API key.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Endpoint url with the API key masked, safe to display.
    pub fn redacted_endpoint(&self) -> String {
        utils::redact_endpoint(&self.endpoint)
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn credentials(&self) -> &[String] {
        &self.credentials
    }

    /// Underlying HTTP transport.
    pub fn provider(&self) -> &Provider<Http> {
        &self.provider
    }

    /// Parse every credential into a signer account.
    pub fn accounts(&self) -> Result<Vec<ProfileAccount>> {
        self.credentials
            .iter()
            .enumerate()
            .map(|(index, key)| ProfileAccount::from_private_key(index, key))
            .collect()
    }

    /// Account for the credential at `index`.
    pub fn account(&self, index: usize) -> Result<ProfileAccount> {
        let key = self
            .credentials
            .get(index)
            .ok_or(ProfileError::NoCredentialAtIndex {
                index,
                len: self.credentials.len(),
            })?;
        ProfileAccount::from_private_key(index, key)
    }

    /// Instantiate RPC client with the account at `index` as signer.
    pub fn signer_client(&self, index: usize) -> Result<EthRpcClient> {
        let wallet = self.account(index)?.wallet(self.chain_id)?;
        Ok(SignerMiddleware::new(self.provider.clone(), wallet))
    }

    /// RPC client signing with the first credential.
    pub fn default_client(&self) -> Result<EthRpcClient> {
        self.signer_client(0)
    }

    /// Query the endpoint's chain id and compare it with the declared one.
    pub async fn verify_chain_id(&self) -> Result<u64> {
        let reported = self
            .provider
            .get_chainid()
            .await
            .map_err(|e| ProfileError::RpcCallError(e.to_string()))?;
        let actual = u64::try_from(reported).map_err(|_| {
            ProfileError::RpcCallError(format!("chain id {} out of range", reported))
        })?;
        if actual != self.chain_id {
            return Err(ProfileError::ChainIdMismatch {
                expected: self.chain_id,
                actual,
            });
        }
        Ok(actual)
    }
}

impl fmt::Debug for RemoteProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteProvider")
            .field("profile", &self.profile)
            .field("endpoint", &self.redacted_endpoint())
            .field("chain_id", &self.chain_id)
            .field("accounts", &self.credentials.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const HARDHAT_KEY_0: &str =
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn ropsten() -> RemoteProfile {
        RemoteProfile::new("ropsten", 3, "infura.io", "privateKeysRopsten", "infuraKey")
    }

    fn build(secrets: serde_json::Value) -> Result<RemoteProvider> {
        let secrets = SecretsStore::from_value(secrets).unwrap();
        let remote = ropsten();
        ProviderFactory::hd_wallet().build(&ProviderRequest {
            profile: "ropsten",
            remote: &remote,
            secrets: &secrets,
        })
    }

    #[test]
    fn hd_wallet_binds_endpoint_and_credentials() {
        let provider = build(json!({"infuraKey": "K", "privateKeysRopsten": ["0xabc"]})).unwrap();
        assert_eq!(provider.endpoint(), "https://ropsten.infura.io/v3/K");
        assert_eq!(provider.credentials(), &["0xabc".to_string()]);
        assert_eq!(provider.chain_id(), 3);
        assert_eq!(provider.redacted_endpoint(), "https://ropsten.infura.io/v3/***");
    }

    #[test]
    fn hd_wallet_requires_api_key() {
        let err = build(json!({"privateKeysRopsten": ["0xabc"]})).unwrap_err();
        match err {
            ProfileError::MissingSecret { profile, field } => {
                assert_eq!(profile, "ropsten");
                assert_eq!(field, "infuraKey");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn invalid_key_surfaces_only_when_signing() {
        let provider = build(json!({"infuraKey": "K", "privateKeysRopsten": ["0xabc"]})).unwrap();
        assert!(matches!(
            provider.default_client(),
            Err(ProfileError::InvalidPrivateKey { index: 0, .. })
        ));
        assert!(matches!(
            provider.signer_client(3),
            Err(ProfileError::NoCredentialAtIndex { index: 3, len: 1 })
        ));
    }

    #[test]
    fn signer_client_uses_declared_chain_id() {
        let provider =
            build(json!({"infuraKey": "K", "privateKeysRopsten": [HARDHAT_KEY_0]})).unwrap();
        let client = provider.default_client().unwrap();
        assert_eq!(client.signer().chain_id(), 3);
        assert_eq!(
            client.address(),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse::<Address>().unwrap()
        );
    }

    #[test]
    fn debug_output_hides_key_and_credentials() {
        let provider = build(json!({
            "infuraKey": "topsecret",
            "privateKeysRopsten": [HARDHAT_KEY_0],
        }))
        .unwrap();
        let printed = format!("{:?}", provider);
        assert!(!printed.contains("topsecret"));
        assert!(!printed.contains(&HARDHAT_KEY_0[2..]));
    }
}
