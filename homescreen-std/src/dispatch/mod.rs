//! # Dispatch engine
//!
//! [`HomeScreen`] glues a [`SectionRegistry`], a [`SettingsStore`] and a
//! [`HomeScreenConfig`] together and exposes the operations a frontend calls:
//! listing sections, invoking one section, reading and writing per-user
//! settings, and building a user's dashboard (see [`dashboard`]).
//!
//! # Failure Policy
//!
//! Settings reads and writes never fail the caller for storage reasons:
//! storage failures are logged and reported as "absent" or `false`.
//! Malformed input (nil user id, blank section keys) is rejected with a
//! [`ValidationError`] before the store is touched.

pub mod dashboard;

pub use dashboard::{Dashboard, DashboardRequest, DashboardSection};

use crate::{config::HomeScreenConfig, registry::SectionRegistry};
use homescreen_core::{
    DispatchError, HomeScreenError, QueryResult, SectionDescriptor, SectionPayload, SettingsStore,
    StoreError, UserId, UserSettings, ValidationError, validate_user,
};
use std::{fmt, sync::Arc};
use tokio::time::timeout;

/// The home screen engine.
///
/// Cheap to share behind an `Arc`; every operation takes `&self`.
///
/// # Example
///
/// ```rust,ignore
/// let registry = Arc::new(SectionRegistry::new());
/// registry.register_instance(LatestShows::new(catalog))?;
///
/// let home = HomeScreen::from_config(registry, HomeScreenConfig::load("homescreen.json")?)?;
/// home.update_user_settings(user, UserSettings::new().with_feature_enabled(true).with_section("LatestShows"))?;
///
/// let dashboard = home.dashboard(&DashboardRequest::new(user)).await;
/// ```
pub struct HomeScreen {
    registry: Arc<SectionRegistry>,
    store: Arc<dyn SettingsStore>,
    config: HomeScreenConfig,
}

impl HomeScreen {
    /// Create an engine from its parts.
    pub fn new(
        registry: Arc<SectionRegistry>,
        store: Arc<dyn SettingsStore>,
        config: HomeScreenConfig,
    ) -> Self {
        Self {
            registry,
            store,
            config,
        }
    }

    /// Validate `config` and open the settings store it names.
    pub fn from_config(
        registry: Arc<SectionRegistry>,
        config: HomeScreenConfig,
    ) -> Result<Self, HomeScreenError> {
        config.validate()?;
        let store = config.open_store()?;
        Ok(Self::new(registry, store, config))
    }

    /// The section registry.
    pub fn registry(&self) -> &Arc<SectionRegistry> {
        &self.registry
    }

    /// The engine configuration.
    pub fn config(&self) -> &HomeScreenConfig {
        &self.config
    }

    /// Descriptors of every registered section, in registration order.
    pub fn list_available_sections(&self) -> Vec<SectionDescriptor> {
        self.registry.list_descriptors()
    }

    /// Compute the results of one section, bounded by the section timeout.
    pub async fn invoke_section(
        &self,
        key: &str,
        payload: &SectionPayload,
    ) -> Result<QueryResult, DispatchError> {
        let duration = self.config.section_timeout();
        match timeout(duration, self.registry.invoke(key, payload)).await {
            Ok(result) => result,
            Err(_) => Err(DispatchError::Timeout {
                key: key.to_owned(),
                duration,
            }),
        }
    }

    /// Whether the user turned the home screen on. `false` when unknown or
    /// when the store fails.
    pub fn get_user_feature_enabled(&self, user_id: UserId) -> bool {
        self.get_user_settings(user_id)
            .is_some_and(|settings| settings.feature_enabled)
    }

    /// Turn the home screen on or off for a user, creating the record if
    /// needed. `Ok(false)` when the store fails.
    pub fn set_user_feature_enabled(
        &self,
        user_id: UserId,
        enabled: bool,
    ) -> Result<bool, ValidationError> {
        validate_user(user_id)?;
        let written = self
            .store
            .modify(user_id, &mut |settings| settings.feature_enabled = enabled);
        Ok(self.report_write(user_id, written.map(|_| ())))
    }

    /// A user's settings; `None` when never written or when the store fails.
    ///
    /// Use [`try_get_user_settings`](Self::try_get_user_settings) to tell
    /// the two apart.
    pub fn get_user_settings(&self, user_id: UserId) -> Option<UserSettings> {
        match self.try_get_user_settings(user_id) {
            Ok(settings) => settings,
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(user_id = %user_id, error = %_err, "failed to read user settings");
                None
            }
        }
    }

    /// A user's settings, with storage failures reported.
    pub fn try_get_user_settings(&self, user_id: UserId) -> Result<Option<UserSettings>, StoreError> {
        self.store.load(user_id)
    }

    /// Replace a user's settings. `Ok(false)` when the store fails.
    pub fn update_user_settings(
        &self,
        user_id: UserId,
        settings: UserSettings,
    ) -> Result<bool, ValidationError> {
        validate_user(user_id)?;
        settings.validate()?;
        let written = self.store.store(user_id, settings);
        Ok(self.report_write(user_id, written))
    }

    /// Flush the settings store.
    pub fn shutdown(&self) -> Result<(), StoreError> {
        #[cfg(feature = "tracing")]
        tracing::debug!("flushing settings store");
        self.store.flush()
    }

    fn report_write(&self, _user_id: UserId, written: Result<(), StoreError>) -> bool {
        match written {
            Ok(()) => true,
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(user_id = %_user_id, error = %_err, "failed to write user settings");
                false
            }
        }
    }
}

impl fmt::Debug for HomeScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HomeScreen")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
