//! Dashboard assembly.
//!
//! A dashboard is built in four steps:
//!
//! 1. read the user's settings; absent, unreadable or disabled settings give
//!    an empty dashboard
//! 2. resolve instances of the enabled sections, in registration order
//! 3. compute each instance's results with the request parameters, a bounded
//!    number at a time and each under the section timeout
//! 4. keep the successful sections, in order
//!
//! A section that fails or times out is logged and left out.

use super::HomeScreen;
use futures::{StreamExt, future, stream};
use homescreen_core::{QueryResult, SectionDescriptor, SectionInstance, UserId};
use serde::Serialize;
use std::{collections::BTreeMap, time::Duration};
use tokio::time::timeout;

/// A request for one user's dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardRequest {
    /// The user the dashboard is for.
    pub user_id: UserId,
    /// Parameters passed to every section.
    pub params: BTreeMap<String, String>,
}

impl DashboardRequest {
    /// A request without parameters.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            params: BTreeMap::new(),
        }
    }

    /// Add a parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }
}

/// One rendered section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DashboardSection {
    /// What the section is.
    pub descriptor: SectionDescriptor,
    /// What it shows.
    pub results: QueryResult,
}

/// The ordered sections of a user's home screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Dashboard {
    /// Sections in display order.
    pub sections: Vec<DashboardSection>,
}

impl Dashboard {
    /// Keys of the sections, in order.
    pub fn keys(&self) -> Vec<&str> {
        self.sections
            .iter()
            .map(|section| section.descriptor.key.as_str())
            .collect()
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the dashboard shows nothing.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl HomeScreen {
    /// Build the dashboard for a request.
    pub async fn dashboard(&self, request: &DashboardRequest) -> Dashboard {
        let settings = match self.get_user_settings(request.user_id) {
            Some(settings) if settings.feature_enabled => settings,
            _ => return Dashboard::default(),
        };

        let instances = self
            .registry
            .resolve_instances(Some(request.user_id), |key| settings.is_section_enabled(key));

        #[cfg(feature = "tracing")]
        tracing::debug!(
            user_id = %request.user_id,
            instances = instances.len(),
            "building dashboard"
        );

        let limit = self.config.section_timeout();
        let sections: Vec<DashboardSection> = stream::iter(instances)
            .map(|instance| render(instance, request, limit))
            .buffered(self.config.max_concurrent_sections.max(1))
            .filter_map(future::ready)
            .collect()
            .await;

        Dashboard { sections }
    }
}

async fn render(
    instance: SectionInstance,
    request: &DashboardRequest,
    limit: Duration,
) -> Option<DashboardSection> {
    let payload = instance.payload_for(request.user_id, &request.params);

    match timeout(limit, instance.results(&payload)).await {
        Ok(Ok(results)) => Some(DashboardSection {
            descriptor: instance.descriptor(),
            results,
        }),
        Ok(Err(_err)) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                key = %instance.key(),
                user_id = %request.user_id,
                error = %_err,
                "omitting failed section"
            );
            None
        }
        Err(_) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                key = %instance.key(),
                user_id = %request.user_id,
                timeout = ?limit,
                "omitting timed out section"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::HomeScreenConfig,
        registry::SectionRegistry,
        settings::MemorySettingsStore,
        testing::{FailingSection, SlowSection, StaticSection},
    };
    use homescreen_core::{SectionMeta, UserSettings};
    use serde_json::json;
    use std::sync::Arc;

    fn engine(config: HomeScreenConfig) -> HomeScreen {
        HomeScreen::new(
            Arc::new(SectionRegistry::new()),
            Arc::new(MemorySettingsStore::new()),
            config,
        )
    }

    fn enable(home: &HomeScreen, user: UserId, sections: &[&str]) {
        let settings = sections
            .iter()
            .fold(UserSettings::new().with_feature_enabled(true), |s, key| s.with_section(*key));
        assert_eq!(home.update_user_settings(user, settings), Ok(true));
    }

    #[tokio::test]
    async fn unknown_user_gets_empty_dashboard() {
        let home = engine(HomeScreenConfig::default());
        home.registry()
            .register_instance(StaticSection::new(SectionMeta::new("Shows")))
            .unwrap();

        assert!(home.dashboard(&DashboardRequest::new(UserId::new_v4())).await.is_empty());
    }

    #[tokio::test]
    async fn disabled_feature_gets_empty_dashboard() {
        let home = engine(HomeScreenConfig::default());
        let shows = StaticSection::new(SectionMeta::new("Shows"));
        home.registry().register_instance(shows.clone()).unwrap();

        let user = UserId::new_v4();
        home.update_user_settings(user, UserSettings::new().with_section("Shows"))
            .unwrap();

        assert!(home.dashboard(&DashboardRequest::new(user)).await.is_empty());
        assert_eq!(shows.calls(), 0);
    }

    #[tokio::test]
    async fn only_enabled_sections_are_rendered() {
        let home = engine(HomeScreenConfig::default());
        let movies = StaticSection::new(SectionMeta::new("LatestMovies"));
        home.registry()
            .register_instance(
                StaticSection::new(SectionMeta::new("LatestShows")).with_items(vec![json!("ep1")]),
            )
            .unwrap();
        home.registry().register_instance(movies.clone()).unwrap();

        let user = UserId::new_v4();
        enable(&home, user, &["LatestShows", "Unregistered"]);

        let dashboard = home.dashboard(&DashboardRequest::new(user)).await;
        assert_eq!(dashboard.keys(), ["LatestShows"]);
        assert_eq!(dashboard.sections[0].results.items, vec![json!("ep1")]);
        assert_eq!(movies.calls(), 0);
    }

    #[tokio::test]
    async fn order_follows_registration_not_settings() {
        let home = engine(HomeScreenConfig::default());
        for key in ["MyMedia", "LatestShows", "LatestMovies"] {
            home.registry()
                .register_instance(StaticSection::new(SectionMeta::new(key)))
                .unwrap();
        }

        let user = UserId::new_v4();
        enable(&home, user, &["LatestMovies", "MyMedia"]);

        let dashboard = home.dashboard(&DashboardRequest::new(user)).await;
        assert_eq!(dashboard.keys(), ["MyMedia", "LatestMovies"]);
    }

    #[tokio::test]
    async fn failing_section_is_omitted() {
        let home = engine(HomeScreenConfig::default());
        home.registry()
            .register_instance(FailingSection::new(SectionMeta::new("Broken"), "catalog offline"))
            .unwrap();
        home.registry()
            .register_instance(StaticSection::new(SectionMeta::new("Shows")).with_items(vec![json!(1)]))
            .unwrap();

        let user = UserId::new_v4();
        enable(&home, user, &["Broken", "Shows"]);

        let dashboard = home.dashboard(&DashboardRequest::new(user)).await;
        assert_eq!(dashboard.keys(), ["Shows"]);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_section_is_omitted() {
        let home = engine(HomeScreenConfig::default().with_section_timeout(Duration::from_millis(100)));
        home.registry()
            .register_instance(SlowSection::new(SectionMeta::new("Slow"), Duration::from_secs(30)))
            .unwrap();
        home.registry()
            .register_instance(
                SlowSection::new(SectionMeta::new("Quick"), Duration::from_millis(10))
                    .with_items(vec![json!("x")]),
            )
            .unwrap();

        let user = UserId::new_v4();
        enable(&home, user, &["Slow", "Quick"]);

        let dashboard = home.dashboard(&DashboardRequest::new(user)).await;
        assert_eq!(dashboard.keys(), ["Quick"]);
    }

    #[tokio::test]
    async fn payload_carries_params_and_additional_data() {
        let home = engine(HomeScreenConfig::default());
        let latest = StaticSection::new(SectionMeta::new("LatestMedia").with_limit(2))
            .per_library(["movies", "tvshows"]);
        home.registry().register_instance(latest.clone()).unwrap();

        let user = UserId::new_v4();
        enable(&home, user, &["LatestMedia"]);

        let request = DashboardRequest::new(user).with_param("Limit", "16");
        let dashboard = home.dashboard(&request).await;
        assert_eq!(dashboard.len(), 2);

        let payloads = latest.payloads();
        let mut data: Vec<_> = payloads
            .iter()
            .map(|p| p.additional_data.as_deref().unwrap_or_default())
            .collect();
        data.sort_unstable();
        assert_eq!(data, ["movies", "tvshows"]);
        assert!(payloads.iter().all(|p| p.user_id == user && p.param("Limit") == Some("16")));
    }

    #[tokio::test]
    async fn duplicate_labels_are_differentiated() {
        let home = engine(HomeScreenConfig::default().with_max_concurrent_sections(1));
        home.registry()
            .register_instance(StaticSection::new(SectionMeta::new("Shows").with_display_text("Shows")))
            .unwrap();
        home.registry()
            .register_instance(
                StaticSection::new(SectionMeta::new("Anime").with_display_text("Shows")).differentiating(),
            )
            .unwrap();

        let user = UserId::new_v4();
        enable(&home, user, &["Shows", "Anime"]);

        let dashboard = home.dashboard(&DashboardRequest::new(user)).await;
        let labels: Vec<_> = dashboard
            .sections
            .iter()
            .map(|s| s.descriptor.display_text.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(labels, ["Shows", "Shows (2)"]);
    }

    #[test]
    fn dashboard_serializes_with_host_field_names() {
        let dashboard = Dashboard {
            sections: vec![DashboardSection {
                descriptor: SectionMeta::new("MyMedia").descriptor(),
                results: QueryResult::new(vec![json!({"Name": "Movies"})]),
            }],
        };
        let value = serde_json::to_value(&dashboard).unwrap();
        assert_eq!(value["Sections"][0]["Descriptor"]["Section"], "MyMedia");
        assert_eq!(value["Sections"][0]["Results"]["TotalRecordCount"], 1);
    }
}
