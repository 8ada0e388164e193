// SPDX-FileCopyrightText: 2026 Lumora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Admin dashboard aggregates.
//!
//! One action loads everything the dashboard renders: the headline stats,
//! the user-growth trend for a selected time range, and the content-type
//! breakdown. The three requests run concurrently; a failure of any of
//! them keeps the previously loaded data in place.

use lumora_client::ApiClient;
use lumora_core::LumoraError;
use serde::Deserialize;
use strum::Display;
use tracing::debug;

/// Growth-trend window; doubles as the `range` query value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum TimeRange {
    #[default]
    #[strum(serialize = "7d")]
    Week,
    #[strum(serialize = "30d")]
    Month,
    #[strum(serialize = "90d")]
    Quarter,
}

/// Headline counters shown at the top of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub today_new_users: u64,
    #[serde(default)]
    pub pending_contents: u64,
}

/// One point of the user-growth trend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserGrowth {
    pub date: String,
    pub count: u64,
}

/// One slice of the content-type breakdown chart.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentTypeSlice {
    pub name: String,
    pub value: u64,
}

/// Headline counters rendered with thousands separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedStats {
    pub total_users: String,
    pub today_new_users: String,
    pub pending_contents: String,
}

/// Store backing the admin dashboard page.
pub struct DashboardStore {
    client: ApiClient,
    stats: DashboardStats,
    growth: Vec<UserGrowth>,
    content_types: Vec<ContentTypeSlice>,
    loading: bool,
    error: Option<String>,
}

impl DashboardStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            stats: DashboardStats::default(),
            growth: Vec::new(),
            content_types: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub fn stats(&self) -> &DashboardStats {
        &self.stats
    }

    pub fn growth(&self) -> &[UserGrowth] {
        &self.growth
    }

    pub fn content_types(&self) -> &[ContentTypeSlice] {
        &self.content_types
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Headline counters as display strings, grouped by thousands.
    pub fn formatted_stats(&self) -> FormattedStats {
        FormattedStats {
            total_users: group_thousands(self.stats.total_users),
            today_new_users: group_thousands(self.stats.today_new_users),
            pending_contents: group_thousands(self.stats.pending_contents),
        }
    }

    /// Loads stats, the growth trend for `range`, and the content-type
    /// breakdown concurrently. Nothing is applied unless all three
    /// succeed, so a partial failure leaves the previous dashboard
    /// intact.
    pub async fn fetch_all(&mut self, range: TimeRange) -> Result<(), LumoraError> {
        self.loading = true;
        self.error = None;

        let growth_query = [("range", range.to_string())];
        let result = tokio::try_join!(
            self.client
                .get_json::<DashboardStats>("/api/admin/dashboard/stats", &[]),
            self.client
                .get_json::<Vec<UserGrowth>>("/api/admin/dashboard/growth", &growth_query),
            self.client
                .get_json::<Vec<ContentTypeSlice>>("/api/admin/dashboard/content-types", &[]),
        );
        self.loading = false;

        match result {
            Ok((stats, growth, content_types)) => {
                self.stats = stats;
                self.growth = growth;
                self.content_types = content_types;
                debug!(
                    total_users = self.stats.total_users,
                    points = self.growth.len(),
                    slices = self.content_types.len(),
                    "dashboard loaded"
                );
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn fail(&mut self, err: LumoraError) -> LumoraError {
        self.error = Some(err.user_message());
        err
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use lumora_client::TokenSlot;
    use lumora_config::ApiConfig;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> ApiClient {
        let config = ApiConfig {
            base_url: server.uri(),
            timeout_secs: 5,
        };
        ApiClient::new(&config, TokenSlot::new()).unwrap()
    }

    async fn mount_dashboard(server: &MockServer, range: &str) {
        Mock::given(method("GET"))
            .and(path("/api/admin/dashboard/stats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "totalUsers": 1234567,
                "todayNewUsers": 89,
                "pendingContents": 12
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/admin/dashboard/growth"))
            .and(query_param("range", range))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"date": "2025-04-15", "count": 40},
                {"date": "2025-04-16", "count": 49}
            ])))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/admin/dashboard/content-types"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"name": "VIDEO", "value": 70},
                {"name": "ARTICLE", "value": 30}
            ])))
            .mount(server)
            .await;
    }

    #[test]
    fn time_range_formats_as_query_value() {
        assert_eq!(TimeRange::Week.to_string(), "7d");
        assert_eq!(TimeRange::Month.to_string(), "30d");
        assert_eq!(TimeRange::Quarter.to_string(), "90d");
        assert_eq!(TimeRange::default(), TimeRange::Week);
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[tokio::test]
    async fn fetch_all_loads_the_three_panels() {
        let server = MockServer::start().await;
        mount_dashboard(&server, "7d").await;

        let mut store = DashboardStore::new(client_for(&server));
        store.fetch_all(TimeRange::default()).await.unwrap();

        assert_eq!(store.stats().total_users, 1234567);
        assert_eq!(store.growth().len(), 2);
        assert_eq!(store.growth()[1].count, 49);
        assert_eq!(store.content_types()[0].name, "VIDEO");
        assert!(!store.is_loading());

        let formatted = store.formatted_stats();
        assert_eq!(formatted.total_users, "1,234,567");
        assert_eq!(formatted.today_new_users, "89");
        assert_eq!(formatted.pending_contents, "12");
    }

    #[tokio::test]
    async fn range_is_forwarded_to_the_growth_endpoint() {
        let server = MockServer::start().await;
        mount_dashboard(&server, "30d").await;

        let mut store = DashboardStore::new(client_for(&server));
        store.fetch_all(TimeRange::Month).await.unwrap();
        assert_eq!(store.growth().len(), 2);
    }

    #[tokio::test]
    async fn partial_failure_keeps_the_previous_dashboard() {
        let server = MockServer::start().await;
        mount_dashboard(&server, "7d").await;

        let mut store = DashboardStore::new(client_for(&server));
        store.fetch_all(TimeRange::Week).await.unwrap();

        // Replace the growth endpoint with a failure; stats still answer.
        server.reset().await;
        Mock::given(method("GET"))
            .and(path("/api/admin/dashboard/stats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "totalUsers": 1,
                "todayNewUsers": 1,
                "pendingContents": 1
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/admin/dashboard/growth"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        assert!(store.fetch_all(TimeRange::Week).await.is_err());
        assert_eq!(store.stats().total_users, 1234567, "stale stats survive");
        assert_eq!(store.growth().len(), 2);
        assert!(store.error().is_some());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn empty_stats_format_as_zero() {
        let server = MockServer::start().await;
        let store = DashboardStore::new(client_for(&server));
        let formatted = store.formatted_stats();
        assert_eq!(formatted.total_users, "0");
        assert_eq!(formatted.pending_contents, "0");
    }
}
