//! # homescreen-core
//!
//! Core contracts for the homescreen section registry.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! crates that only provide sections and don't need the registry or the
//! dispatch engine from `homescreen-std`.
//!
//! # Contracts
//!
//! - [`Section`] / [`DynSection`] - content-producing providers
//! - [`SectionMeta`] / [`SectionDescriptor`] - display metadata and its listing form
//! - [`InstanceDecision`] / [`SectionInstance`] - per-user materialization
//! - [`UserSettings`] / [`SettingsStore`] - per-user enablement state
//!
//! # Error Types
//!
//! - [`HomeScreenError`] - Top-level error type
//! - [`DispatchError`] - Invocation errors
//! - [`ValidationError`] - Rejected registrations and writes
//! - [`StoreError`] - Settings storage errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod meta;
mod payload;
mod result;
mod section;
mod settings;

// Re-exports
pub use error::{BoxError, ConfigError, DispatchError, HomeScreenError, StoreError, ValidationError};
pub use meta::{SectionDescriptor, SectionMeta};
pub use payload::{SectionPayload, UserId};
pub use result::QueryResult;
pub use section::{
    DeclaredSection, DynSection, InstanceDecision, Section, SectionInstance, differentiate,
};
pub use settings::{SettingsStore, UserSettings, validate_user};
