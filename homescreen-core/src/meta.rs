//! Section metadata and its serializable projection.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Display metadata of a section instance.
///
/// An immutable value: the `with_*` builders consume and return a new value,
/// which is how a provider produces a differentiated variant of itself.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SectionMeta {
    key: String,
    display_text: Option<String>,
    limit: Option<u32>,
    route: Option<String>,
    additional_data: Option<String>,
    original_payload: Option<Value>,
}

impl SectionMeta {
    /// Create metadata for the given section key.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Set the label shown by the frontend.
    pub fn with_display_text(mut self, text: impl Into<String>) -> Self {
        self.display_text = Some(text.into());
        self
    }

    /// Set how many instances of this section one user may see.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the navigation target of the section header.
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    /// Set the opaque discriminator passed back in payloads.
    pub fn with_additional_data(mut self, data: impl Into<String>) -> Self {
        self.additional_data = Some(data.into());
        self
    }

    /// Attach the host's native payload for this section.
    pub fn with_original_payload(mut self, payload: Value) -> Self {
        self.original_payload = Some(payload);
        self
    }

    /// Section identifier.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Label shown by the frontend.
    pub fn display_text(&self) -> Option<&str> {
        self.display_text.as_deref()
    }

    /// Declared instance limit, if any.
    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    /// Instance limit with the default of one applied.
    pub fn effective_limit(&self) -> u32 {
        self.limit.unwrap_or(1)
    }

    /// Navigation target of the section header.
    pub fn route(&self) -> Option<&str> {
        self.route.as_deref()
    }

    /// Opaque extra data.
    pub fn additional_data(&self) -> Option<&str> {
        self.additional_data.as_deref()
    }

    /// The host's native payload, never interpreted here.
    pub fn original_payload(&self) -> Option<&Value> {
        self.original_payload.as_ref()
    }

    /// Check the metadata can be registered.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.key.trim().is_empty() {
            return Err(ValidationError::EmptyKey);
        }
        if self.limit == Some(0) {
            return Err(ValidationError::ZeroLimit {
                key: self.key.clone(),
            });
        }
        Ok(())
    }

    /// Whether two instances would be indistinguishable to a user.
    ///
    /// The original payload is not part of the identity.
    pub fn same_identity(&self, other: &SectionMeta) -> bool {
        self.key == other.key
            && self.display_text == other.display_text
            && self.route == other.route
            && self.additional_data == other.additional_data
    }

    /// Project into a descriptor.
    pub fn descriptor(&self) -> SectionDescriptor {
        SectionDescriptor::from(self)
    }
}

/// Read-only snapshot of a section's metadata, as listed to the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SectionDescriptor {
    /// Section identifier.
    #[serde(rename = "Section")]
    pub key: String,
    /// Label shown by the frontend.
    pub display_text: Option<String>,
    /// Instance limit, defaulted to one.
    pub limit: u32,
    /// Navigation target.
    pub route: Option<String>,
    /// Opaque extra data.
    pub additional_data: Option<String>,
    /// The host's native payload.
    pub original_payload: Option<Value>,
}

impl From<&SectionMeta> for SectionDescriptor {
    fn from(meta: &SectionMeta) -> Self {
        Self {
            key: meta.key.clone(),
            display_text: meta.display_text.clone(),
            limit: meta.effective_limit(),
            route: meta.route.clone(),
            additional_data: meta.additional_data.clone(),
            original_payload: meta.original_payload.clone(),
        }
    }
}
