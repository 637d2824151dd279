//! Settings for remediation operations: per-operation timeouts and waiter tuning.
//!
//! Settings are JSON. Durations are whole seconds and omitted fields take their
//! defaults, so `{}` is a valid settings document.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{RemediationError, RemediationResult};
use crate::waiter::WaiterConfig;

/// Per-operation time budgets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    #[serde(with = "duration_secs")]
    pub create: Duration,
    #[serde(with = "duration_secs")]
    pub read: Duration,
    #[serde(with = "duration_secs")]
    pub update: Duration,
    #[serde(with = "duration_secs")]
    pub delete: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            create: Duration::from_secs(30 * 60),
            read: Duration::from_secs(5 * 60),
            update: Duration::from_secs(30 * 60),
            delete: Duration::from_secs(30 * 60),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RemediationSettings {
    pub timeouts: Timeouts,
    pub waiter: WaiterConfig,
}

impl RemediationSettings {
    pub fn from_json_str(json: &str) -> RemediationResult<Self> {
        let settings: Self = serde_json::from_str(json)
            .map_err(|e| RemediationError::config(format!("Failed to parse settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_path(path: impl AsRef<Path>) -> RemediationResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RemediationError::config(format!(
                "Failed to read settings file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json_str(&content)
    }

    fn validate(&self) -> RemediationResult<()> {
        self.waiter.validate()
    }
}

pub(crate) mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_settings_use_defaults() {
        let settings = RemediationSettings::from_json_str("{}").unwrap();
        assert_eq!(settings, RemediationSettings::default());
        assert_eq!(settings.timeouts.read, Duration::from_secs(300));
        assert_eq!(settings.timeouts.delete, Duration::from_secs(1800));
        assert_eq!(settings.waiter.poll_interval, Duration::from_secs(10));
    }

    #[test]
    fn test_partial_settings_override_only_given_fields() {
        let settings = RemediationSettings::from_json_str(
            r#"{"timeouts": {"delete": 120}, "waiter": {"poll_interval": 2, "failure_states": ["Failed"]}}"#,
        )
        .unwrap();
        assert_eq!(settings.timeouts.delete, Duration::from_secs(120));
        assert_eq!(settings.timeouts.create, Duration::from_secs(1800));
        assert_eq!(settings.waiter.poll_interval, Duration::from_secs(2));
        assert_eq!(settings.waiter.failure_states, vec!["Failed"]);
        assert!(settings.waiter.target_states.contains(&"Canceled".to_string()));
    }

    #[test]
    fn test_zero_poll_interval_is_rejected() {
        let err = RemediationSettings::from_json_str(r#"{"waiter": {"poll_interval": 0}}"#)
            .unwrap_err();
        assert!(matches!(err, RemediationError::Config(_)));
    }

    #[test]
    fn test_empty_target_states_are_rejected() {
        let err = RemediationSettings::from_json_str(r#"{"waiter": {"target_states": []}}"#)
            .unwrap_err();
        assert!(err.to_string().contains("target_states"));
    }

    #[test]
    fn test_malformed_json_is_a_config_error() {
        let err = RemediationSettings::from_json_str("{not json").unwrap_err();
        assert!(err.to_string().starts_with("invalid settings: Failed to parse settings"));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"timeouts": {{"read": 30}}}}"#).unwrap();

        let settings = RemediationSettings::from_path(file.path()).unwrap();
        assert_eq!(settings.timeouts.read, Duration::from_secs(30));
    }

    #[test]
    fn test_from_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = RemediationSettings::from_path(dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read settings file"));
    }
}
