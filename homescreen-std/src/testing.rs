//! Testing utilities for the section registry.
//!
//! This module provides ready-made sections to make testing registries and
//! dashboards easier.
//!
//! # Features
//!
//! - [`StaticSection`]: returns fixed items, records payloads, and follows a
//!   configurable instance policy
//! - [`FailingSection`]: always fails, like an unreachable catalog
//! - [`SlowSection`]: sleeps before answering, for timeout tests

use homescreen_core::{
    BoxError, InstanceDecision, QueryResult, Section, SectionInstance, SectionMeta, SectionPayload,
    UserId, differentiate,
};
use serde_json::Value;
use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

// ============================================================================
// Static Section
// ============================================================================

/// How a [`StaticSection`] answers `create_instance`.
#[derive(Debug, Clone, PartialEq)]
pub enum InstancePolicy {
    /// Always present itself.
    Keep,
    /// Relabel when the display text is already taken.
    Differentiate,
    /// Step aside when the display text is already taken.
    SuppressDuplicates,
    /// One variant per library, carried in `additional_data`.
    PerLibrary(Vec<String>),
    /// Always answer with this variant.
    Variant(SectionMeta),
}

/// A section returning fixed items and recording every payload it receives.
///
/// # Example
///
/// ```rust,ignore
/// let shows = StaticSection::new(SectionMeta::new("LatestShows"))
///     .with_items(vec![json!({"Name": "Severance"})]);
/// let recorder = shows.clone();
///
/// registry.register_instance(shows)?;
/// registry.invoke("LatestShows", &payload).await?;
///
/// assert_eq!(recorder.calls(), 1);
/// ```
#[derive(Clone)]
pub struct StaticSection {
    meta: SectionMeta,
    items: Vec<Value>,
    policy: InstancePolicy,
    payloads: Arc<Mutex<Vec<SectionPayload>>>,
}

impl StaticSection {
    /// Create a section with no items that keeps itself.
    pub fn new(meta: SectionMeta) -> Self {
        Self {
            meta,
            items: Vec::new(),
            policy: InstancePolicy::Keep,
            payloads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the items returned for every payload.
    pub fn with_items(mut self, items: Vec<Value>) -> Self {
        self.items = items;
        self
    }

    /// Set the instance policy.
    pub fn with_policy(mut self, policy: InstancePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Relabel on display text collisions.
    pub fn differentiating(self) -> Self {
        self.with_policy(InstancePolicy::Differentiate)
    }

    /// Step aside on display text collisions.
    pub fn suppressing_duplicates(self) -> Self {
        self.with_policy(InstancePolicy::SuppressDuplicates)
    }

    /// Present one variant per library.
    pub fn per_library<I, S>(self, libraries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_policy(InstancePolicy::PerLibrary(
            libraries.into_iter().map(Into::into).collect(),
        ))
    }

    /// Always answer with `variant`.
    pub fn with_variant(self, variant: SectionMeta) -> Self {
        self.with_policy(InstancePolicy::Variant(variant))
    }

    /// Payloads received so far.
    pub fn payloads(&self) -> Vec<SectionPayload> {
        self.recorded().clone()
    }

    /// Number of result computations so far.
    pub fn calls(&self) -> usize {
        self.recorded().len()
    }

    fn recorded(&self) -> MutexGuard<'_, Vec<SectionPayload>> {
        self.payloads.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Section for StaticSection {
    fn meta(&self) -> &SectionMeta {
        &self.meta
    }

    async fn results(&self, payload: &SectionPayload) -> Result<QueryResult, BoxError> {
        self.recorded().push(payload.clone());
        Ok(QueryResult::new(self.items.clone()))
    }

    fn create_instance(&self, _user_id: Option<UserId>, others: &[SectionInstance]) -> InstanceDecision {
        let label_taken = || {
            others
                .iter()
                .any(|o| o.meta().display_text().is_some() && o.meta().display_text() == self.meta.display_text())
        };

        match &self.policy {
            InstancePolicy::Keep => InstanceDecision::Keep,
            InstancePolicy::Differentiate => differentiate(&self.meta, others),
            InstancePolicy::SuppressDuplicates if label_taken() => InstanceDecision::Suppress,
            InstancePolicy::SuppressDuplicates => InstanceDecision::Keep,
            InstancePolicy::PerLibrary(libraries) => libraries
                .iter()
                .find(|library| {
                    !others.iter().any(|o| {
                        o.key() == self.meta.key()
                            && o.meta().additional_data() == Some(library.as_str())
                    })
                })
                .map(|library| InstanceDecision::Variant(self.meta.clone().with_additional_data(library.as_str())))
                .unwrap_or(InstanceDecision::Suppress),
            InstancePolicy::Variant(variant) => InstanceDecision::Variant(variant.clone()),
        }
    }
}

// ============================================================================
// Failing Section
// ============================================================================

/// A section whose result computation always fails.
pub struct FailingSection {
    meta: SectionMeta,
    message: String,
}

impl FailingSection {
    /// Create a section failing with `message`.
    pub fn new(meta: SectionMeta, message: impl Into<String>) -> Self {
        Self {
            meta,
            message: message.into(),
        }
    }
}

impl Section for FailingSection {
    fn meta(&self) -> &SectionMeta {
        &self.meta
    }

    async fn results(&self, _payload: &SectionPayload) -> Result<QueryResult, BoxError> {
        Err(self.message.clone().into())
    }
}

// ============================================================================
// Slow Section
// ============================================================================

/// A section that sleeps before returning its items.
pub struct SlowSection {
    meta: SectionMeta,
    delay: Duration,
    items: Vec<Value>,
}

impl SlowSection {
    /// Create a section answering after `delay`.
    pub fn new(meta: SectionMeta, delay: Duration) -> Self {
        Self {
            meta,
            delay,
            items: Vec::new(),
        }
    }

    /// Set the items returned once the delay has passed.
    pub fn with_items(mut self, items: Vec<Value>) -> Self {
        self.items = items;
        self
    }
}

impl Section for SlowSection {
    fn meta(&self) -> &SectionMeta {
        &self.meta
    }

    async fn results(&self, _payload: &SectionPayload) -> Result<QueryResult, BoxError> {
        tokio::time::sleep(self.delay).await;
        Ok(QueryResult::new(self.items.clone()))
    }
}
