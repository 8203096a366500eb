//! Span-scoped result computation.

use homescreen_core::{
    BoxError, InstanceDecision, QueryResult, Section, SectionInstance, SectionMeta, SectionPayload,
    UserId,
};

/// A section whose result computation runs inside an `info` span carrying
/// the section key and the user id.
///
/// Without the `tracing` feature it delegates unchanged.
pub struct TracedSection<S> {
    inner: S,
}

impl<S> TracedSection<S> {
    /// Wrap `inner`.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// The wrapped section.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: Section> Section for TracedSection<S> {
    fn meta(&self) -> &SectionMeta {
        self.inner.meta()
    }

    #[cfg(feature = "tracing")]
    async fn results(&self, payload: &SectionPayload) -> Result<QueryResult, BoxError> {
        use tracing::Instrument;

        let span = tracing::info_span!(
            "section",
            key = %self.inner.meta().key(),
            user_id = %payload.user_id,
        );
        let result = self.inner.results(payload).instrument(span.clone()).await;
        if let Err(err) = &result {
            span.in_scope(|| tracing::debug!(error = %err, "section failed"));
        }
        result
    }

    #[cfg(not(feature = "tracing"))]
    async fn results(&self, payload: &SectionPayload) -> Result<QueryResult, BoxError> {
        self.inner.results(payload).await
    }

    fn create_instance(&self, user_id: Option<UserId>, others: &[SectionInstance]) -> InstanceDecision {
        self.inner.create_instance(user_id, others)
    }
}
