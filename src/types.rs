//!

use std::fmt;

use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Provider};
use ethers::signers::LocalWallet;
use serde::{Serialize, Serializer};

pub type EthRpcClient = SignerMiddleware<Provider<Http>, LocalWallet>;

/// Network identifier a profile accepts, `*` matches any network.
///
/// Ids declared as strings (e.g. `"5777"`) stay strings so they serialize
/// back in their declared form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkId {
    Wildcard,
    Id(u64),
    Text(String),
}

impl NetworkId {
    /// Check if a concrete network id is accepted.
    pub fn matches(&self, network_id: u64) -> bool {
        match self {
            NetworkId::Wildcard => true,
            NetworkId::Id(id) => *id == network_id,
            NetworkId::Text(id) => id.parse::<u64>() == Ok(network_id),
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkId::Wildcard => write!(f, "*"),
            NetworkId::Id(id) => write!(f, "{}", id),
            NetworkId::Text(id) => f.write_str(id),
        }
    }
}

impl Serialize for NetworkId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NetworkId::Wildcard => serializer.serialize_str("*"),
            NetworkId::Id(id) => serializer.serialize_u64(*id),
            NetworkId::Text(id) => serializer.serialize_str(id),
        }
    }
}
