//! Engine configuration.

use crate::settings::{JsonFileSettingsStore, MemorySettingsStore};
use homescreen_core::{ConfigError, SettingsStore, StoreError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

/// Configuration of a [`HomeScreen`](crate::dispatch::HomeScreen).
///
/// Every field has a default, so a partial (or empty) JSON document is a
/// valid configuration:
///
/// ```json
/// { "section_timeout_ms": 2500, "settings_path": "/var/lib/homescreen/settings.json" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeScreenConfig {
    /// Upper bound for one section's result computation.
    pub section_timeout_ms: u64,
    /// Sections computed at the same time while building a dashboard.
    pub max_concurrent_sections: usize,
    /// JSON settings document; settings are kept in memory when unset.
    pub settings_path: Option<PathBuf>,
}

impl Default for HomeScreenConfig {
    fn default() -> Self {
        Self {
            section_timeout_ms: 10_000,
            max_concurrent_sections: 4,
            settings_path: None,
        }
    }
}

impl HomeScreenConfig {
    /// Set the per-section timeout.
    pub fn with_section_timeout(mut self, timeout: Duration) -> Self {
        self.section_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the dashboard concurrency.
    pub fn with_max_concurrent_sections(mut self, max: usize) -> Self {
        self.max_concurrent_sections = max;
        self
    }

    /// Persist settings to a JSON document.
    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = Some(path.into());
        self
    }

    /// Parse and validate a JSON configuration.
    ///
    /// The document must be a JSON object.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let document: Value = serde_json::from_str(json)?;
        if !document.is_object() {
            return Err(ConfigError::Invalid(
                "configuration must be a JSON object".into(),
            ));
        }
        let config: Self = serde_json::from_value(document)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    /// Reject out-of-range values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrent_sections == 0 {
            return Err(ConfigError::Invalid(
                "max_concurrent_sections must be at least 1".into(),
            ));
        }
        if self.section_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "section_timeout_ms must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// The per-section timeout.
    pub fn section_timeout(&self) -> Duration {
        Duration::from_millis(self.section_timeout_ms)
    }

    /// Open the configured settings store.
    pub fn open_store(&self) -> Result<Arc<dyn SettingsStore>, StoreError> {
        Ok(match &self.settings_path {
            Some(path) => Arc::new(JsonFileSettingsStore::open(path)?),
            None => Arc::new(MemorySettingsStore::new()),
        })
    }
}
