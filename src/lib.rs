//! Network profile resolution for a smart-contract toolchain.
//!
//! Profiles are either local nodes (host, port, network id) returned verbatim,
//! or remote networks reached through a hosted gateway whose signing provider
//! is only constructed once the profile is selected.
//!
//! ```no_run
//! use network_profiles::NetworkProfileResolver;
//!
//! let resolver = NetworkProfileResolver::load(".secrets.json")?;
//! let descriptor = resolver.resolve("ropsten")?;
//! println!("{}", descriptor.summary());
//! # Ok::<(), network_profiles::ProfileError>(())
//! ```

pub mod compiler;
pub mod config;
pub mod constants;
pub mod eoa;
pub mod errors;
pub mod network;
pub mod profile;
pub mod provider;
pub mod registry;
pub mod runner;
pub mod secrets;
pub mod types;
pub mod utils;

pub use crate::compiler::{CompilerSpec, EvmVersion, OptimizerSettings};
pub use crate::config::ProjectConfig;
pub use crate::eoa::ProfileAccount;
pub use crate::errors::{ProfileError, Result};
pub use crate::network::{ConnectionDescriptor, NetworkProfileResolver, ResolverBuilder};
pub use crate::profile::{LocalProfile, NetworkProfile, ProfileKind, RemoteProfile};
pub use crate::provider::{ProviderFactory, ProviderRequest, RemoteProvider};
pub use crate::registry::{ProfileRegistry, SecretGap};
pub use crate::runner::TestRunnerOptions;
pub use crate::secrets::{SecretsLoading, SecretsStore};
pub use crate::types::{EthRpcClient, NetworkId};
