//! Fixed values declared for the toolchain networks, compiler and secrets file.

/// File name of the secrets store, relative to the working directory.
pub const DEFAULT_SECRETS_FILE_NAME: &'static str = ".secrets.json";

/// Host used by both local development profiles.
pub const LOCAL_HOST: &'static str = "127.0.0.1";

/// Name of the default local development profile.
pub const DEVELOPMENT_PROFILE: &'static str = "development";
/// Port of the default local development node.
pub const DEVELOPMENT_PORT: u16 = 9545;

/// Name of the secondary local profile (ganache).
pub const GANACHINA_PROFILE: &'static str = "ganachina";
/// Port of the secondary local node.
pub const GANACHINA_PORT: u16 = 7545;
/// Network identifier of the secondary local node.
pub const GANACHINA_NETWORK_ID: &'static str = "5777";

/// Hosted gateway brokering access to remote networks.
pub const GATEWAY_HOST: &'static str = "infura.io";
/// Secrets field holding the shared gateway API key.
pub const API_KEY_FIELD: &'static str = "infuraKey";

/// Ropsten remote network.
pub const ROPSTEN_PROFILE: &'static str = "ropsten";
pub const ROPSTEN_CHAIN_ID: u64 = 3;
pub const ROPSTEN_KEYS_FIELD: &'static str = "privateKeysRopsten";

/// Rinkeby remote network.
pub const RINKEBY_PROFILE: &'static str = "rinkeby";
pub const RINKEBY_CHAIN_ID: u64 = 4;
pub const RINKEBY_KEYS_FIELD: &'static str = "privateKeysRinkeby";

/// Kovan remote network.
pub const KOVAN_PROFILE: &'static str = "kovan";
pub const KOVAN_CHAIN_ID: u64 = 42;
pub const KOVAN_KEYS_FIELD: &'static str = "privateKeysKovan";

/// Pinned solc version handed to the external compiler.
pub const SOLC_VERSION: &'static str = "0.7.3";
