//! Error types for network profile resolution

use std::path::PathBuf;

/// Crate result alias.
pub type Result<T, E = ProfileError> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum ProfileError {
    #[error("failed to read secrets file {path}: {source}")]
    SecretsFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("secrets file {path} is not valid json: {source}")]
    SecretsFileParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("secrets document must be a json object")]
    SecretsNotAnObject,
    #[error("unknown network profile: {0}")]
    UnknownProfile(String),
    #[error("network profile already declared: {0}")]
    DuplicateProfile(String),
    #[error("secret field '{field}' required by profile '{profile}' is missing")]
    MissingSecret { profile: String, field: String },
    #[error("secret field '{field}' required by profile '{profile}' is malformed: {reason}")]
    MalformedSecret {
        profile: String,
        field: String,
        reason: String,
    },
    #[error("failed to instantiate provider: {0}")]
    FailedToCreateProvider(String),
    #[error("invalid private key at index {index}: {reason}")]
    InvalidPrivateKey { index: usize, reason: String },
    #[error("no credential at index {index}, provider holds {len}")]
    NoCredentialAtIndex { index: usize, len: usize },
    #[error("rpc call failed: {0}")]
    RpcCallError(String),
    #[error("chain id mismatch, declared {expected} but endpoint reports {actual}")]
    ChainIdMismatch { expected: u64, actual: u64 },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid compiler version '{0}', expected MAJOR.MINOR.PATCH")]
    InvalidCompilerVersion(String),
}
