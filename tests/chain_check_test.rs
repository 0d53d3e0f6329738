//!

use network_profiles::{ProfileError, RemoteProvider};

const HARDHAT_KEY_0: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

#[tokio::test]
async fn unreachable_endpoint_reports_rpc_error() {
    // nothing listens on port 1
    let provider = RemoteProvider::new(
        "unreachable",
        "http://127.0.0.1:1".to_string(),
        3,
        vec![HARDHAT_KEY_0.to_string()],
    )
    .unwrap();

    assert!(matches!(
        provider.verify_chain_id().await,
        Err(ProfileError::RpcCallError(_))
    ));
}

#[tokio::test]
async fn signer_client_is_built_without_contacting_endpoint() {
    let provider = RemoteProvider::new(
        "unreachable",
        "http://127.0.0.1:1".to_string(),
        42,
        vec![HARDHAT_KEY_0.to_string()],
    )
    .unwrap();

    let accounts = provider.accounts().unwrap();
    assert_eq!(accounts.len(), 1);
    let client = provider.default_client().unwrap();
    assert_eq!(client.address(), accounts[0].address());
}

#[test]
fn malformed_endpoint_fails_provider_construction() {
    assert!(matches!(
        RemoteProvider::new("bad", "not a url".to_string(), 3, vec![]),
        Err(ProfileError::FailedToCreateProvider(_))
    ));
}
