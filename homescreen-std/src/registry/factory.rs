//! Constructible section registrations.

use homescreen_core::{DynSection, Section};
use std::sync::Arc;

/// Builds a section when it is registered.
///
/// This is how a section *type* is registered: the factory stands in for
/// the host's dependency resolution and is asked for one instance.
///
/// # Example
///
/// ```rust,ignore
/// let catalog = Arc::new(Catalog::connect(url)?);
/// let factory = SectionFactory::new(move || LatestShows::new(catalog.clone()));
/// registry.register_factory(&factory)?;
/// ```
#[derive(Clone)]
pub struct SectionFactory {
    ctor: Arc<dyn Fn() -> Arc<dyn DynSection> + Send + Sync>,
}

impl SectionFactory {
    /// Create a factory from a constructor.
    pub fn new<S, F>(build: F) -> Self
    where
        S: Section,
        F: Fn() -> S + Send + Sync + 'static,
    {
        Self {
            ctor: Arc::new(move || Arc::new(build()) as Arc<dyn DynSection>),
        }
    }

    /// A factory using the section's `Default` implementation.
    pub fn of<S: Section + Default>() -> Self {
        Self::new(S::default)
    }

    /// Construct a fresh section.
    pub fn create(&self) -> Arc<dyn DynSection> {
        (self.ctor)()
    }
}

impl std::fmt::Debug for SectionFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionFactory").finish_non_exhaustive()
    }
}
