//! Error types for the section registry.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`HomeScreenError`] - Top-level error type
//! - [`DispatchError`] - Errors while invoking a section
//! - [`ValidationError`] - Malformed registrations or settings writes
//! - [`StoreError`] - Settings storage failures
//! - [`ConfigError`] - Configuration loading failures

use std::time::Duration;
use thiserror::Error;

/// A boxed error type for section result computation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all home screen operations.
#[derive(Error, Debug)]
pub enum HomeScreenError {
    /// An error occurred while invoking a section.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// A registration or settings write was rejected.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The settings store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors that can occur while invoking a section.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// No section is registered under the key.
    #[error("no section registered for key: {0}")]
    NotFound(String),

    /// The section failed to compute its results.
    #[error("section `{key}` failed")]
    Section {
        /// Key of the failing section.
        key: String,
        /// Underlying collaborator failure.
        #[source]
        source: BoxError,
    },

    /// The section did not finish in time.
    #[error("section `{key}` timed out after {duration:?}")]
    Timeout {
        /// Key of the slow section.
        key: String,
        /// The exceeded bound.
        duration: Duration,
    },
}

impl DispatchError {
    /// Key of the section this error relates to.
    pub fn key(&self) -> &str {
        match self {
            DispatchError::NotFound(key) => key,
            DispatchError::Section { key, .. } => key,
            DispatchError::Timeout { key, .. } => key,
        }
    }
}

/// Errors raised before anything reaches the registry or the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A section was registered with an empty key.
    #[error("section key must not be empty")]
    EmptyKey,

    /// A section declared a limit of zero.
    #[error("section `{key}` declares a limit of zero")]
    ZeroLimit {
        /// Offending section key.
        key: String,
    },

    /// The nil UUID was used as a user id.
    #[error("user id must not be nil")]
    NilUser,

    /// Settings listed an empty section key.
    #[error("enabled section at index {index} is empty")]
    EmptySectionKey {
        /// Position in `enabled_sections`.
        index: usize,
    },
}

/// Errors raised by settings stores.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend cannot be reached.
    #[error("settings store unavailable: {0}")]
    Unavailable(String),

    /// Reading or writing the backing file failed.
    #[error("settings store io error")]
    Io(#[from] std::io::Error),

    /// The stored document could not be (de)serialized.
    #[error("settings store serialization error")]
    Serialization(#[from] serde_json::Error),

    /// A writer panicked while holding the store lock.
    #[error("settings store lock poisoned")]
    Poisoned,
}

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config")]
    Io(#[from] std::io::Error),

    /// The configuration document is not valid JSON for the schema.
    #[error("failed to parse config")]
    Parse(#[from] serde_json::Error),

    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}
