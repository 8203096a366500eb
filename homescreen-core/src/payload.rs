//! Request payload handed to sections.

use std::collections::BTreeMap;
use uuid::Uuid;

/// Opaque unique user identifier.
pub type UserId = Uuid;

/// Input to a section's result computation.
///
/// Everything beyond the user id is interpreted by the section alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionPayload {
    /// The user the results are for.
    pub user_id: UserId,
    /// Discriminator carried from the section instance (e.g. a library type).
    pub additional_data: Option<String>,
    /// Free-form request parameters.
    pub params: BTreeMap<String, String>,
}

impl SectionPayload {
    /// Create a payload for a user with no extra data.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            additional_data: None,
            params: BTreeMap::new(),
        }
    }

    /// Set the discriminator.
    pub fn with_additional_data(mut self, data: impl Into<String>) -> Self {
        self.additional_data = Some(data.into());
        self
    }

    /// Add a request parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Look up a request parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}
