#![allow(dead_code)]

use homescreen::{
    BoxError, HomeScreen, HomeScreenConfig, InstanceDecision, QueryResult, Section,
    SectionInstance, SectionMeta, SectionPayload, SectionRegistry, UserId, UserSettings,
    settings::MemorySettingsStore,
};
use serde_json::{Value, json};
use std::{
    collections::BTreeMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

// ============================================================================
// Test Catalog
// ============================================================================

/// A tiny in-memory media catalog keyed by library type.
#[derive(Default)]
pub struct Catalog {
    pub libraries: BTreeMap<String, Vec<String>>,
    pub queries: AtomicUsize,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_library(mut self, kind: &str, titles: &[&str]) -> Self {
        self.libraries
            .insert(kind.to_owned(), titles.iter().map(|t| (*t).to_owned()).collect());
        self
    }

    pub fn latest(&self, kind: &str, limit: usize) -> Result<Vec<Value>, BoxError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let titles = self
            .libraries
            .get(kind)
            .ok_or_else(|| format!("no library of type {kind}"))?;
        Ok(titles
            .iter()
            .rev()
            .take(limit)
            .map(|title| json!({ "Name": title, "Type": kind }))
            .collect())
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

// ============================================================================
// Test Sections
// ============================================================================

/// Latest items of one fixed library type.
pub struct LatestOf {
    pub meta: SectionMeta,
    pub kind: &'static str,
    pub catalog: Arc<Catalog>,
}

impl LatestOf {
    pub fn shows(catalog: Arc<Catalog>) -> Self {
        Self {
            meta: SectionMeta::new("LatestShows")
                .with_display_text("Latest Shows")
                .with_route("tvshows"),
            kind: "tvshows",
            catalog,
        }
    }

    pub fn movies(catalog: Arc<Catalog>) -> Self {
        Self {
            meta: SectionMeta::new("LatestMovies")
                .with_display_text("Latest Movies")
                .with_route("movies"),
            kind: "movies",
            catalog,
        }
    }
}

impl Section for LatestOf {
    fn meta(&self) -> &SectionMeta {
        &self.meta
    }

    async fn results(&self, payload: &SectionPayload) -> Result<QueryResult, BoxError> {
        let limit = payload
            .param("Limit")
            .map(str::parse::<usize>)
            .transpose()?
            .unwrap_or(16);
        Ok(self.catalog.latest(self.kind, limit)?.into_iter().collect())
    }
}

/// Latest items per library, one instance for each library in the catalog.
pub struct LatestPerLibrary {
    pub meta: SectionMeta,
    pub catalog: Arc<Catalog>,
}

impl LatestPerLibrary {
    pub fn new(catalog: Arc<Catalog>, limit: u32) -> Self {
        Self {
            meta: SectionMeta::new("LatestMedia")
                .with_display_text("Latest Media")
                .with_limit(limit),
            catalog,
        }
    }
}

impl Section for LatestPerLibrary {
    fn meta(&self) -> &SectionMeta {
        &self.meta
    }

    async fn results(&self, payload: &SectionPayload) -> Result<QueryResult, BoxError> {
        let kind = payload
            .additional_data
            .as_deref()
            .ok_or("missing library type")?;
        Ok(self.catalog.latest(kind, 16)?.into_iter().collect())
    }

    fn create_instance(&self, _user_id: Option<UserId>, others: &[SectionInstance]) -> InstanceDecision {
        let taken = |kind: &str| {
            others
                .iter()
                .any(|o| o.key() == self.meta.key() && o.meta().additional_data() == Some(kind))
        };
        match self.catalog.libraries.keys().find(|kind| !taken(kind.as_str())) {
            Some(kind) => InstanceDecision::Variant(
                self.meta
                    .clone()
                    .with_display_text(format!("Latest {kind}"))
                    .with_additional_data(kind.as_str()),
            ),
            None => InstanceDecision::Suppress,
        }
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn catalog() -> Arc<Catalog> {
    Arc::new(
        Catalog::new()
            .with_library("movies", &["Alien", "Heat", "Arrival"])
            .with_library("music", &["Blue Train"])
            .with_library("tvshows", &["Severance", "Dark"]),
    )
}

pub fn engine(config: HomeScreenConfig) -> HomeScreen {
    HomeScreen::new(
        Arc::new(SectionRegistry::new()),
        Arc::new(MemorySettingsStore::new()),
        config,
    )
}

pub fn enabled(sections: &[&str]) -> UserSettings {
    sections
        .iter()
        .fold(UserSettings::new().with_feature_enabled(true), |settings, key| {
            settings.with_section(*key)
        })
}
