//! # homescreen-std
//!
//! Standard implementations for the homescreen section registry.
//!
//! This crate provides:
//! - **Registry**: [`SectionRegistry`](registry::SectionRegistry) with
//!   instance-identity resolution
//! - **Settings stores**: in-memory and JSON file backends
//! - **Dispatch engine**: [`HomeScreen`](dispatch::HomeScreen) and the dashboard protocol
//! - **Section wrappers**: Timeout, Traced
//! - **Configuration**: [`HomeScreenConfig`](config::HomeScreenConfig)

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core contracts
pub use homescreen_core;

// Modules
pub mod config;
pub mod dispatch;
pub mod registry;
pub mod settings;
pub mod testing;
pub mod wrappers;
