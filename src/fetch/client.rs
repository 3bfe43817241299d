//! HTTP client for the concert catalog API

use super::{Catalog, FetchError, PageFetcher};
use crate::model::EventsPage;
use async_trait::async_trait;
use std::time::Duration;

/// The public catalog instance.
pub const DEFAULT_API_BASE: &str = "http://basedeconciertos.uahurtado.cl:5099";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Filter parameters forwarded verbatim to the upstream event endpoint.
///
/// The engine does no filtering itself; these are passed through and the
/// upstream decides what they mean. Unset fields are omitted from the query.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub name_q: Option<String>,
    pub composer_q: Option<String>,
    pub participant_q: Option<String>,
    pub piece_q: Option<String>,
    pub activity_q: Option<String>,
    pub gender_q: Option<String>,
    pub year: Option<i32>,
    pub city_id: Option<u64>,
    pub location_id: Option<u64>,
    pub event_type_id: Option<u64>,
    pub cycle_id: Option<u64>,
    pub organization_id: Option<u64>,
    pub instrument_id: Option<u64>,
    pub ensemble_id: Option<u64>,
    pub premiere_type_id: Option<u64>,
    pub composer_id: Option<u64>,
    pub participant_id: Option<u64>,
    /// Result cap, forwarded and also used as the local fetch cap.
    pub limit: Option<u32>,
}

impl EventFilter {
    /// Query pairs for the set fields, in the upstream's parameter names.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        let mut text = |key, value: &Option<String>| {
            if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                query.push((key, value.to_string()));
            }
        };
        text("name_q", &self.name_q);
        text("composer_q", &self.composer_q);
        text("participant_q", &self.participant_q);
        text("piece_q", &self.piece_q);
        text("activity_q", &self.activity_q);
        text("gender_q", &self.gender_q);

        if let Some(year) = self.year {
            query.push(("year", year.to_string()));
        }
        let numeric: [(&'static str, Option<u64>); 10] = [
            ("city_id", self.city_id),
            ("location_id", self.location_id),
            ("event_type_id", self.event_type_id),
            ("cycle_id", self.cycle_id),
            ("organization_id", self.organization_id),
            ("instrument_id", self.instrument_id),
            ("ensemble_id", self.ensemble_id),
            ("premiere_type_id", self.premiere_type_id),
            ("composer_id", self.composer_id),
            ("participant_id", self.participant_id),
        ];
        for (key, value) in numeric {
            if let Some(value) = value {
                query.push((key, value.to_string()));
            }
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        query
    }
}

/// Client for the catalog's paged event endpoint and parameters endpoint.
///
/// Carries an optional [`EventFilter`] applied to every page request. The
/// request deadline lives here (one timeout, no retry policy); everything
/// above this layer is deterministic.
pub struct CatalogClient {
    base_url: String,
    filter: EventFilter,
    http: reqwest::Client,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            filter: EventFilter::default(),
            http,
        })
    }

    /// Apply a filter to all subsequent page requests.
    pub fn with_filter(mut self, filter: EventFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        tracing::debug!(url, "catalog request");
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| FetchError::Payload(e.to_string()))
    }
}

#[async_trait]
impl PageFetcher for CatalogClient {
    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<EventsPage, FetchError> {
        let url = format!("{}/api/events", self.base_url);
        let mut query = self.filter.to_query();
        query.push(("page", page.to_string()));
        query.push(("per_page", per_page.to_string()));
        self.get_json(&url, &query).await
    }
}

#[async_trait]
impl Catalog for CatalogClient {
    async fn get_params(&self) -> Result<serde_json::Value, FetchError> {
        let url = format!("{}/api/status/get_params", self.base_url);
        let query = [("full_content", "true".to_string())];
        self.get_json(&url, &query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_omits_unset_and_blank_fields() {
        let filter = EventFilter {
            composer_q: Some("Bach".into()),
            participant_q: Some("   ".into()),
            year: Some(1970),
            city_id: Some(4),
            limit: Some(500),
            ..Default::default()
        };
        let query = filter.to_query();
        assert_eq!(
            query,
            vec![
                ("composer_q", "Bach".to_string()),
                ("year", "1970".to_string()),
                ("city_id", "4".to_string()),
                ("limit", "500".to_string()),
            ]
        );
    }

    #[test]
    fn empty_filter_produces_no_query() {
        assert!(EventFilter::default().to_query().is_empty());
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = CatalogClient::new("http://example.test:5099/").unwrap();
        assert_eq!(client.base_url, "http://example.test:5099");
    }
}
