//! Contract compiler selection handed to the external solc toolchain.
//!
//! Optional settings are kept as `Option` all the way through serialization:
//! an absent optimizer block means "use the compiler's defaults", which is not
//! the same as an explicit `enabled: false`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants;
use crate::errors::{ProfileError, Result};

static VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\d+\.\d+$").expect("version pattern is valid"));

/// Target EVM version passed to solc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EvmVersion {
    Homestead,
    TangerineWhistle,
    SpuriousDragon,
    Byzantium,
    Constantinople,
    Petersburg,
    Istanbul,
    Berlin,
    London,
    Paris,
    Shanghai,
    Cancun,
    Prague,
}

/// Optimizer block, each field falls back to solc's default when absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizerSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runs: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimizer: Option<OptimizerSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evm_version: Option<EvmVersion>,
}

/// Pinned compiler version plus optional settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerSpec {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<CompilerSettings>,
}

impl CompilerSpec {
    /// Compiler spec with no settings, `version` must be `MAJOR.MINOR.PATCH`.
    pub fn new(version: &str) -> Result<Self> {
        let spec = Self {
            version: version.to_string(),
            docker: None,
            settings: None,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// The toolchain's pinned solc.
    pub fn solc() -> Self {
        Self {
            version: constants::SOLC_VERSION.to_string(),
            docker: None,
            settings: None,
        }
    }

    /// Parse from json, validating the version string.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let spec: Self = serde_json::from_str(raw)
            .map_err(|e| ProfileError::InvalidConfig(e.to_string()))?;
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> Result<()> {
        if VERSION_RE.is_match(&self.version) {
            Ok(())
        } else {
            Err(ProfileError::InvalidCompilerVersion(self.version.clone()))
        }
    }

    pub fn with_optimizer(mut self, enabled: bool, runs: u32) -> Self {
        self.settings.get_or_insert_with(Default::default).optimizer = Some(OptimizerSettings {
            enabled: Some(enabled),
            runs: Some(runs),
        });
        self
    }

    /// Toggle the optimizer, leaving `runs` to the compiler default.
    pub fn with_optimizer_enabled(mut self, enabled: bool) -> Self {
        self.settings
            .get_or_insert_with(Default::default)
            .optimizer
            .get_or_insert_with(Default::default)
            .enabled = Some(enabled);
        self
    }

    pub fn with_evm_version(mut self, evm_version: EvmVersion) -> Self {
        self.settings.get_or_insert_with(Default::default).evm_version = Some(evm_version);
        self
    }

    pub fn with_docker(mut self, docker: bool) -> Self {
        self.docker = Some(docker);
        self
    }

    pub fn optimizer(&self) -> Option<&OptimizerSettings> {
        self.settings.as_ref().and_then(|s| s.optimizer.as_ref())
    }

    pub fn evm_version(&self) -> Option<EvmVersion> {
        self.settings.as_ref().and_then(|s| s.evm_version)
    }
}

impl Default for CompilerSpec {
    fn default() -> Self {
        Self::solc()
    }
}
