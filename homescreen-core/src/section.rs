//! # Section providers
//!
//! A section is a unit of content-producing logic identified by a stable key.
//! It carries display metadata, computes results for a payload, and decides
//! how it materializes for a particular user given the instances that were
//! already created for that user.
//!
//! # Static vs Dynamic Dispatch
//!
//! [`Section`] uses native `async fn` for zero-cost static dispatch.
//! Registries hold providers as [`DynSection`] trait objects; every `Section`
//! implements `DynSection` automatically.

use crate::{
    error::BoxError,
    meta::{SectionDescriptor, SectionMeta},
    payload::{SectionPayload, UserId},
    result::QueryResult,
};
use std::{collections::BTreeMap, fmt, future::Future, pin::Pin, sync::Arc};

/// How a provider materializes for one user.
#[derive(Debug, Clone, PartialEq)]
pub enum InstanceDecision {
    /// Present the provider as it is. A provider answers `Keep` at most once
    /// per resolution.
    Keep,
    /// Present a differentiated instance with the given metadata.
    ///
    /// The key must stay the provider's key.
    Variant(SectionMeta),
    /// Present nothing (more).
    Suppress,
}

/// A content-producing home screen section.
///
/// # Example
///
/// ```rust,ignore
/// struct LatestShows {
///     meta: SectionMeta,
///     catalog: Arc<Catalog>,
/// }
///
/// impl Section for LatestShows {
///     fn meta(&self) -> &SectionMeta {
///         &self.meta
///     }
///
///     async fn results(&self, payload: &SectionPayload) -> Result<QueryResult, BoxError> {
///         Ok(self.catalog.latest(payload.user_id, "tvshows").await?.into_iter().collect())
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a home screen `Section`",
    label = "missing `Section` implementation",
    note = "Sections must implement `meta` and `results`."
)]
pub trait Section: Send + Sync + 'static {
    /// Metadata of this provider.
    fn meta(&self) -> &SectionMeta;

    /// Compute the results for a payload.
    fn results(
        &self,
        payload: &SectionPayload,
    ) -> impl Future<Output = Result<QueryResult, BoxError>> + Send;

    /// Decide how this provider appears for `user_id`.
    ///
    /// `others` holds every instance already created for the user, in order.
    /// Implementations must be pure with respect to their inputs.
    fn create_instance(&self, user_id: Option<UserId>, others: &[SectionInstance]) -> InstanceDecision {
        let _ = (user_id, others);
        InstanceDecision::Keep
    }
}

/// Dynamic object-safe version of [`Section`].
pub trait DynSection: Send + Sync + 'static {
    /// Metadata of this provider (dynamic dispatch version).
    fn meta_dyn(&self) -> &SectionMeta;

    /// Compute results (dynamic dispatch version).
    fn results_dyn<'a>(
        &'a self,
        payload: &'a SectionPayload,
    ) -> Pin<Box<dyn Future<Output = Result<QueryResult, BoxError>> + Send + 'a>>;

    /// Materialize for a user (dynamic dispatch version).
    fn create_instance_dyn(
        &self,
        user_id: Option<UserId>,
        others: &[SectionInstance],
    ) -> InstanceDecision;
}

// Blanket implementation: Any type implementing Section implements DynSection automatically.
impl<T: Section> DynSection for T {
    fn meta_dyn(&self) -> &SectionMeta {
        self.meta()
    }

    fn results_dyn<'a>(
        &'a self,
        payload: &'a SectionPayload,
    ) -> Pin<Box<dyn Future<Output = Result<QueryResult, BoxError>> + Send + 'a>> {
        Box::pin(self.results(payload))
    }

    fn create_instance_dyn(
        &self,
        user_id: Option<UserId>,
        others: &[SectionInstance],
    ) -> InstanceDecision {
        self.create_instance(user_id, others)
    }
}

// Allow Arc<dyn DynSection> to be used where Section is expected.
impl Section for Arc<dyn DynSection> {
    fn meta(&self) -> &SectionMeta {
        (**self).meta_dyn()
    }

    async fn results(&self, payload: &SectionPayload) -> Result<QueryResult, BoxError> {
        (**self).results_dyn(payload).await
    }

    fn create_instance(&self, user_id: Option<UserId>, others: &[SectionInstance]) -> InstanceDecision {
        (**self).create_instance_dyn(user_id, others)
    }
}

/// Sections whose default metadata is fixed at compile time.
///
/// Usually derived with `#[derive(DeclaredSection)]`.
pub trait DeclaredSection {
    /// The metadata every fresh instance starts with.
    fn declared_meta() -> SectionMeta;
}

/// A provider materialized for one user.
#[derive(Clone)]
pub struct SectionInstance {
    meta: SectionMeta,
    provider: Arc<dyn DynSection>,
}

impl SectionInstance {
    /// Pair a provider with the metadata it was materialized with.
    pub fn new(provider: Arc<dyn DynSection>, meta: SectionMeta) -> Self {
        Self { meta, provider }
    }

    /// The provider as it is.
    pub fn of(provider: Arc<dyn DynSection>) -> Self {
        let meta = (*provider).meta_dyn().clone();
        Self { meta, provider }
    }

    /// Section key.
    pub fn key(&self) -> &str {
        self.meta.key()
    }

    /// Metadata of this instance.
    pub fn meta(&self) -> &SectionMeta {
        &self.meta
    }

    /// Descriptor of this instance.
    pub fn descriptor(&self) -> SectionDescriptor {
        self.meta.descriptor()
    }

    /// The provider behind this instance.
    pub fn provider(&self) -> &Arc<dyn DynSection> {
        &self.provider
    }

    /// Build the payload this instance is queried with.
    pub fn payload_for(&self, user_id: UserId, params: &BTreeMap<String, String>) -> SectionPayload {
        SectionPayload {
            user_id,
            additional_data: self.meta.additional_data().map(str::to_owned),
            params: params.clone(),
        }
    }

    /// Compute the results of this instance.
    pub async fn results(&self, payload: &SectionPayload) -> Result<QueryResult, BoxError> {
        (*self.provider).results_dyn(payload).await
    }
}

impl fmt::Debug for SectionInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionInstance")
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}

/// Keep `meta` unless another instance already shows the same label, in which
/// case answer with a variant labelled `"<label> (n)"` using the first free `n`.
///
/// Answers `Suppress` once an instance with the same content (key, route and
/// additional data) exists, so a provider asked again does not relabel itself.
pub fn differentiate(meta: &SectionMeta, others: &[SectionInstance]) -> InstanceDecision {
    let same_content = others.iter().any(|o| {
        o.key() == meta.key()
            && o.meta().route() == meta.route()
            && o.meta().additional_data() == meta.additional_data()
    });
    if same_content {
        return InstanceDecision::Suppress;
    }

    let taken = |text: &str| others.iter().any(|o| o.meta().display_text() == Some(text));

    let Some(label) = meta.display_text() else {
        return InstanceDecision::Keep;
    };
    if !taken(label) {
        return InstanceDecision::Keep;
    }

    match (2u32..).map(|n| format!("{label} ({n})")).find(|text| !taken(text)) {
        Some(text) => InstanceDecision::Variant(meta.clone().with_display_text(text)),
        None => InstanceDecision::Suppress,
    }
}
