//! Time-limited result computation.

use homescreen_core::{
    BoxError, DispatchError, InstanceDecision, QueryResult, Section, SectionInstance, SectionMeta,
    SectionPayload, UserId,
};
use std::time::Duration;
use tokio::time::timeout;

/// A section that fails with [`DispatchError::Timeout`] when its inner
/// section takes longer than the configured duration.
pub struct TimeoutSection<S> {
    inner: S,
    duration: Duration,
}

impl<S> TimeoutSection<S> {
    /// Wrap `inner` with a timeout.
    pub fn new(inner: S, duration: Duration) -> Self {
        Self { inner, duration }
    }

    /// Wrap `inner` with a timeout in seconds.
    pub fn secs(inner: S, secs: u64) -> Self {
        Self::new(inner, Duration::from_secs(secs))
    }

    /// Wrap `inner` with a timeout in milliseconds.
    pub fn millis(inner: S, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }

    /// The configured timeout.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// The wrapped section.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: Section> Section for TimeoutSection<S> {
    fn meta(&self) -> &SectionMeta {
        self.inner.meta()
    }

    async fn results(&self, payload: &SectionPayload) -> Result<QueryResult, BoxError> {
        match timeout(self.duration, self.inner.results(payload)).await {
            Ok(result) => result,
            Err(_) => Err(Box::new(DispatchError::Timeout {
                key: self.inner.meta().key().to_owned(),
                duration: self.duration,
            })),
        }
    }

    fn create_instance(&self, user_id: Option<UserId>, others: &[SectionInstance]) -> InstanceDecision {
        self.inner.create_instance(user_id, others)
    }
}
