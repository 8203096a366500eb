//! Section registry.
//!
//! The registry owns the ordered mapping from section key to provider. It is
//! written at startup and read concurrently by every request: registration
//! swaps a whole entry under the write lock, and lookups clone the provider
//! `Arc` out of the read lock before anything is awaited.
//!
//! Registration order is observable: descriptors are listed in that order and
//! instance resolution walks providers in that order (see [`resolve`]).

mod factory;
pub mod resolve;

pub use factory::SectionFactory;

use homescreen_core::{
    DispatchError, DynSection, QueryResult, Section, SectionDescriptor, SectionPayload,
    ValidationError,
};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

struct SectionEntry {
    key: String,
    section: Arc<dyn DynSection>,
}

/// An ordered, thread-safe registry of sections keyed by section key.
///
/// # Example
/// ```ignore
/// let registry = SectionRegistry::new();
/// registry.register::<MyMedia>()?;
/// registry.register_instance(LatestShows::new(catalog))?;
///
/// let results = registry.invoke("LatestShows", &payload).await?;
/// ```
#[derive(Default)]
pub struct SectionRegistry {
    entries: RwLock<Vec<SectionEntry>>,
}

impl SectionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a section type, constructed with `Default`.
    pub fn register<S: Section + Default>(&self) -> Result<(), ValidationError> {
        self.register_factory(&SectionFactory::of::<S>())
    }

    /// Register a section built by a factory.
    pub fn register_factory(&self, factory: &SectionFactory) -> Result<(), ValidationError> {
        self.register_arc(factory.create())
    }

    /// Register a ready-made section instance.
    pub fn register_instance<S: Section>(&self, section: S) -> Result<(), ValidationError> {
        self.register_arc(Arc::new(section))
    }

    /// Register a shared section.
    ///
    /// A section with a key that is already registered replaces the previous
    /// one in place, keeping its position.
    pub fn register_arc(&self, section: Arc<dyn DynSection>) -> Result<(), ValidationError> {
        let meta = (*section).meta_dyn();
        meta.validate()?;
        let key = meta.key().to_owned();

        let mut entries = self.write();
        match entries.iter_mut().find(|entry| entry.key == key) {
            Some(entry) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(key = %key, "replacing registered section");
                entry.section = section;
            }
            None => {
                #[cfg(feature = "tracing")]
                tracing::debug!(key = %key, "registering section");
                entries.push(SectionEntry { key, section });
            }
        }
        Ok(())
    }

    /// Remove a section. Returns whether one was registered.
    pub fn unregister(&self, key: &str) -> bool {
        let mut entries = self.write();
        let before = entries.len();
        entries.retain(|entry| entry.key != key);
        entries.len() != before
    }

    /// Descriptors of all registered sections, in registration order.
    pub fn list_descriptors(&self) -> Vec<SectionDescriptor> {
        self.read()
            .iter()
            .map(|entry| (*entry.section).meta_dyn().descriptor())
            .collect()
    }

    /// Look up a section by key.
    pub fn get(&self, key: &str) -> Option<Arc<dyn DynSection>> {
        self.read()
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| Arc::clone(&entry.section))
    }

    /// Whether a section is registered under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.read().iter().any(|entry| entry.key == key)
    }

    /// All registered sections, in registration order.
    pub fn snapshot(&self) -> Vec<Arc<dyn DynSection>> {
        self.read()
            .iter()
            .map(|entry| Arc::clone(&entry.section))
            .collect()
    }

    /// Get the number of registered sections.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Compute the results of the section registered under `key`.
    pub async fn invoke(
        &self,
        key: &str,
        payload: &SectionPayload,
    ) -> Result<QueryResult, DispatchError> {
        let section = self
            .get(key)
            .ok_or_else(|| DispatchError::NotFound(key.to_owned()))?;

        (*section)
            .results_dyn(payload)
            .await
            .map_err(|source| DispatchError::Section {
                key: key.to_owned(),
                source,
            })
    }

    // Entries are replaced whole, so a panicking writer cannot leave a torn entry.
    fn read(&self) -> RwLockReadGuard<'_, Vec<SectionEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<SectionEntry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for SectionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys: Vec<String> = self.read().iter().map(|entry| entry.key.clone()).collect();
        f.debug_struct("SectionRegistry").field("keys", &keys).finish()
    }
}
