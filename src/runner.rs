//! Test runner options, passed through to the external runner unmodified.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{ProfileError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestRunnerOptions(Map<String, Value>);

impl TestRunnerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| ProfileError::InvalidConfig(e.to_string()))
    }

    /// Set an option, replacing any previous value.
    pub fn set(mut self, key: &str, value: Value) -> Self {
        self.0.insert(key.to_string(), value);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        let millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self.set("timeout", Value::from(millis))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Timeout override in milliseconds, if set to a number.
    pub fn timeout(&self) -> Option<Duration> {
        self.0
            .get("timeout")
            .and_then(Value::as_u64)
            .map(Duration::from_millis)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw option block as handed to the runner.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_block_is_empty() {
        let options = TestRunnerOptions::default();
        assert!(options.is_empty());
        assert!(options.timeout().is_none());
        assert_eq!(serde_json::to_value(&options).unwrap(), json!({}));
    }

    #[test]
    fn unknown_options_pass_through_verbatim() {
        let raw = concat!(
            r#"{"timeout":100000,"reporter":"eth-gas-reporter","#,
            r#""reporterOptions":{"currency":"USD"}}"#
        );
        let options = TestRunnerOptions::from_json_str(raw).unwrap();
        assert_eq!(options.timeout(), Some(Duration::from_millis(100000)));
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            serde_json::from_str::<Value>(raw).unwrap()
        );
    }

    #[test]
    fn with_timeout_sets_milliseconds() {
        let options = TestRunnerOptions::new().with_timeout(Duration::from_secs(2));
        assert_eq!(options.get("timeout"), Some(&json!(2000)));
    }
}
