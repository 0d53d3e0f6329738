//! Secrets store holding gateway API keys and per-network credential lists.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use once_cell::sync::OnceCell;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::errors::{ProfileError, Result};

/// Parsed secrets document, read-only once loaded.
///
/// Every field lookup made on behalf of a profile is recorded, so callers can
/// observe which credentials a resolution actually touched.
pub struct SecretsStore {
    values: Map<String, Value>,
    accessed: Mutex<BTreeSet<String>>,
}

impl SecretsStore {
    /// Read and parse the secrets file at `path`.
    ///
    /// Surrounding whitespace is trimmed before parsing. A missing file or a
    /// document that is not a json object is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading secrets file");
        let raw = fs::read_to_string(path).map_err(|source| ProfileError::SecretsFileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw, path)
    }

    /// Parse secrets from an in-memory json document.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Self::parse(raw, Path::new("<inline>"))
    }

    /// Build a store from an already parsed json value, must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(values) => Ok(Self::from_map(values)),
            _ => Err(ProfileError::SecretsNotAnObject),
        }
    }

    pub fn from_map(values: Map<String, Value>) -> Self {
        Self {
            values,
            accessed: Mutex::new(BTreeSet::new()),
        }
    }

    fn parse(raw: &str, path: &Path) -> Result<Self> {
        let value: Value =
            serde_json::from_str(raw.trim()).map_err(|source| ProfileError::SecretsFileParse {
                path: path.to_path_buf(),
                source,
            })?;
        let store = Self::from_value(value)?;
        debug!(fields = store.values.len(), "parsed secrets document");
        Ok(store)
    }

    /// Check presence of a field without recording an access.
    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Names of all fields in the store.
    pub fn field_names(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    /// Fields read so far through [`SecretsStore::get`], sorted by name.
    pub fn accessed_fields(&self) -> Vec<String> {
        match self.accessed.lock() {
            Ok(accessed) => accessed.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }

    /// Look up a raw field value, recording the access.
    pub fn get(&self, field: &str) -> Option<&Value> {
        match self.accessed.lock() {
            Ok(mut accessed) => {
                accessed.insert(field.to_string());
            }
            Err(poisoned) => {
                poisoned.into_inner().insert(field.to_string());
            }
        }
        self.values.get(field)
    }

    /// Read a non-empty string secret (e.g. a gateway API key) for `profile`.
    pub fn string(&self, profile: &str, field: &str) -> Result<String> {
        match self.get(field) {
            None | Some(Value::Null) => Err(missing(profile, field)),
            Some(Value::String(s)) if s.is_empty() => {
                Err(malformed(profile, field, "empty string"))
            }
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(malformed(
                profile,
                field,
                &format!("expected string, found {}", json_kind(other)),
            )),
        }
    }

    /// Read a credential list for `profile`.
    ///
    /// A single string is accepted as a one-element list. An empty list or
    /// any non-string element is malformed.
    pub fn credentials(&self, profile: &str, field: &str) -> Result<Vec<String>> {
        match self.get(field) {
            None | Some(Value::Null) => Err(missing(profile, field)),
            Some(Value::String(s)) if s.is_empty() => {
                Err(malformed(profile, field, "empty string"))
            }
            Some(Value::String(s)) => Ok(vec![s.clone()]),
            Some(Value::Array(items)) if items.is_empty() => {
                Err(malformed(profile, field, "credential list is empty"))
            }
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(malformed(
                        profile,
                        field,
                        &format!("element {} is {}, expected string", i, json_kind(other)),
                    )),
                })
                .collect(),
            Some(other) => Err(malformed(
                profile,
                field,
                &format!("expected string list, found {}", json_kind(other)),
            )),
        }
    }
}

impl fmt::Debug for SecretsStore {
    // values are never printed
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretsStore")
            .field("fields", &self.values.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn missing(profile: &str, field: &str) -> ProfileError {
    ProfileError::MissingSecret {
        profile: profile.to_string(),
        field: field.to_string(),
    }
}

fn malformed(profile: &str, field: &str, reason: &str) -> ProfileError {
    ProfileError::MalformedSecret {
        profile: profile.to_string(),
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// When the secrets file is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SecretsLoading {
    /// Read at resolver construction, failing fast before any profile is usable.
    #[default]
    Eager,
    /// Read on the first remote resolution and memoized afterwards.
    Deferred,
}

/// Where the resolver gets its secrets from.
#[derive(Debug)]
pub enum SecretsSource {
    Loaded(SecretsStore),
    Deferred {
        path: PathBuf,
        cell: OnceCell<SecretsStore>,
    },
}

impl SecretsSource {
    pub fn deferred(path: impl Into<PathBuf>) -> Self {
        SecretsSource::Deferred {
            path: path.into(),
            cell: OnceCell::new(),
        }
    }

    /// Get the store, reading the file on first use in deferred mode.
    pub fn store(&self) -> Result<&SecretsStore> {
        match self {
            SecretsSource::Loaded(store) => Ok(store),
            SecretsSource::Deferred { path, cell } => {
                cell.get_or_try_init(|| SecretsStore::load(path))
            }
        }
    }

    /// Check if the store has been read.
    pub fn is_loaded(&self) -> bool {
        match self {
            SecretsSource::Loaded(_) => true,
            SecretsSource::Deferred { cell, .. } => cell.get().is_some(),
        }
    }
}
