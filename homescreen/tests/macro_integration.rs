//! Integration tests for homescreen macros.

#![cfg(feature = "macros")]

use homescreen::{
    BoxError, DeclaredSection, QueryResult, Section, SectionMeta, SectionPayload, SectionRegistry,
    UserId,
};

#[derive(DeclaredSection)]
#[section(
    key = "ContinueWatching",
    display_text = "Continue Watching",
    limit = 1,
    route = "resume"
)]
struct ContinueWatching {
    meta: SectionMeta,
}

impl Default for ContinueWatching {
    fn default() -> Self {
        Self {
            meta: Self::declared_meta(),
        }
    }
}

impl Section for ContinueWatching {
    fn meta(&self) -> &SectionMeta {
        &self.meta
    }

    async fn results(&self, _payload: &SectionPayload) -> Result<QueryResult, BoxError> {
        Ok(QueryResult::empty())
    }
}

#[derive(DeclaredSection)]
#[section(key = "LatestMusic", additional_data = "music", limit = 3)]
struct LatestMusic;

#[test]
fn derive_builds_declared_meta() {
    let meta = ContinueWatching::declared_meta();
    assert_eq!(meta.key(), "ContinueWatching");
    assert_eq!(meta.display_text(), Some("Continue Watching"));
    assert_eq!(meta.limit(), Some(1));
    assert_eq!(meta.route(), Some("resume"));
    assert_eq!(meta.additional_data(), None);
}

#[test]
fn derive_leaves_unset_fields_empty() {
    let meta = LatestMusic::declared_meta();
    assert_eq!(meta.key(), "LatestMusic");
    assert_eq!(meta.display_text(), None);
    assert_eq!(meta.effective_limit(), 3);
    assert_eq!(meta.additional_data(), Some("music"));
}

#[tokio::test]
async fn derived_section_registers_by_type() {
    let registry = SectionRegistry::new();
    registry.register::<ContinueWatching>().unwrap();

    let descriptors = registry.list_descriptors();
    assert_eq!(descriptors[0].key, "ContinueWatching");
    assert_eq!(descriptors[0].route.as_deref(), Some("resume"));

    let payload = SectionPayload::new(UserId::new_v4());
    assert!(registry.invoke("ContinueWatching", &payload).await.unwrap().is_empty());
}
