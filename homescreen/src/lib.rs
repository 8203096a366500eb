//! # homescreen - Pluggable Home Screen Sections
//!
//! `homescreen` lets a media server expose a customizable home screen built
//! from independently registered sections. Each user chooses whether the
//! feature is on and which sections they see; the engine resolves the
//! concrete instances for that user and computes their results.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use homescreen::prelude::*;
//!
//! #[derive(DeclaredSection)]
//! #[section(key = "LatestShows", display_text = "Latest Shows", route = "tvshows")]
//! struct LatestShows {
//!     meta: SectionMeta,
//! }
//!
//! impl Section for LatestShows {
//!     fn meta(&self) -> &SectionMeta {
//!         &self.meta
//!     }
//!
//!     async fn results(&self, payload: &SectionPayload) -> Result<QueryResult, BoxError> {
//!         Ok(QueryResult::empty())
//!     }
//! }
//!
//! let registry = Arc::new(SectionRegistry::new());
//! registry.register_instance(LatestShows { meta: LatestShows::declared_meta() })?;
//!
//! let home = HomeScreen::from_config(registry, HomeScreenConfig::default())?;
//! let dashboard = home.dashboard(&DashboardRequest::new(user_id)).await;
//! ```
//!
//! ## Features
//!
//! - `macros` (default): `#[derive(DeclaredSection)]`
//! - `tracing` (default): structured logs and per-section spans

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use homescreen_core::{
    // Error types
    BoxError,
    ConfigError,
    // Sections
    DeclaredSection,
    DispatchError,
    DynSection,
    HomeScreenError,
    InstanceDecision,
    QueryResult,
    SectionDescriptor,
    SectionInstance,
    SectionMeta,
    SectionPayload,
    Section,
    // Settings
    SettingsStore,
    StoreError,
    UserId,
    UserSettings,
    ValidationError,
    differentiate,
    validate_user,
};

// Registry and engine
pub use homescreen_std::{
    config::HomeScreenConfig,
    dispatch::{Dashboard, DashboardRequest, DashboardSection, HomeScreen},
    registry::{SectionFactory, SectionRegistry},
};

#[cfg(feature = "macros")]
pub use homescreen_macros::DeclaredSection;

/// Settings store backends.
pub mod settings {
    pub use homescreen_std::settings::{JsonFileSettingsStore, MemorySettingsStore};
}

/// Standard section wrappers.
pub mod wrappers {
    pub use homescreen_std::wrappers::{TimeoutSection, TracedSection};
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use homescreen_std::testing::*;
}

/// Prelude module - common imports for homescreen.
///
/// # Usage
///
/// ```rust,ignore
/// use homescreen::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, DashboardRequest, DeclaredSection, HomeScreen, HomeScreenConfig,
        InstanceDecision, QueryResult, Section, SectionInstance, SectionMeta, SectionPayload,
        SectionRegistry, UserId, UserSettings,
    };
}
