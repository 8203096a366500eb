//! Per-user home screen settings and the store contract.

use crate::{
    error::{StoreError, ValidationError},
    payload::UserId,
};
use serde::{Deserialize, Serialize};

/// Which sections a user sees, and whether the home screen is on at all.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UserSettings {
    /// Whether the customizable home screen is enabled.
    pub feature_enabled: bool,
    /// Keys of the enabled sections. Unknown keys are tolerated.
    pub enabled_sections: Vec<String>,
}

impl UserSettings {
    /// Settings with the feature off and no sections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the feature flag.
    pub fn with_feature_enabled(mut self, enabled: bool) -> Self {
        self.feature_enabled = enabled;
        self
    }

    /// Enable a section.
    pub fn with_section(mut self, key: impl Into<String>) -> Self {
        self.enabled_sections.push(key.into());
        self
    }

    /// Whether the section is enabled.
    pub fn is_section_enabled(&self, key: &str) -> bool {
        self.enabled_sections.iter().any(|k| k == key)
    }

    /// Reject settings that must never reach a store.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.enabled_sections.iter().position(|k| k.trim().is_empty()) {
            Some(index) => Err(ValidationError::EmptySectionKey { index }),
            None => Ok(()),
        }
    }
}

/// Reject the nil user id.
pub fn validate_user(user_id: UserId) -> Result<(), ValidationError> {
    if user_id.is_nil() {
        Err(ValidationError::NilUser)
    } else {
        Ok(())
    }
}

/// A key-value store of [`UserSettings`].
///
/// Writes for the same user are serialized by the store; a write is never
/// partially applied.
pub trait SettingsStore: Send + Sync {
    /// Read a user's record; `Ok(None)` if it was never written.
    fn load(&self, user_id: UserId) -> Result<Option<UserSettings>, StoreError>;

    /// Replace a user's record.
    fn store(&self, user_id: UserId, settings: UserSettings) -> Result<(), StoreError>;

    /// Read-modify-write a user's record, starting from the default record
    /// when absent. Returns the record as written.
    fn modify(
        &self,
        user_id: UserId,
        update: &mut dyn FnMut(&mut UserSettings),
    ) -> Result<UserSettings, StoreError>;

    /// Persist buffered state. Called at shutdown.
    fn flush(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
