//! Async client for the FRED observations endpoint.

use chrono::NaiveDate;
use reqwest::Client;

use crate::config::FredConfig;
use crate::fred::types::{Observation, ObservationsResponse};
use crate::observability::metrics;

/// Client for `GET {base}/series/observations`.
///
/// Holds one pooled `reqwest::Client`; cheap to clone.
#[derive(Clone)]
pub struct FredClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl FredClient {
    /// Build a client from config. The transport timeout is the only
    /// resilience knob; there are no retries.
    pub fn new(config: &FredConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Fetch the most recent observation for a series.
    ///
    /// Returns `None` on any upstream failure or when the series has no
    /// observations at all. A present observation may still carry an
    /// absent value (sentinel date).
    pub async fn fetch_latest(&self, series_id: &str) -> Option<Observation> {
        let response = self
            .get_observations(series_id, &[("sort_order", "desc"), ("limit", "1")])
            .await?;

        response
            .observations
            .iter()
            .find_map(|raw| raw.normalize())
    }

    /// Fetch all observations within an inclusive date window, in the
    /// order upstream returns them. Any failure collapses to empty.
    pub async fn fetch_range(
        &self,
        series_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Vec<Observation> {
        let start = start_date.to_string();
        let end = end_date.to_string();
        let Some(response) = self
            .get_observations(
                series_id,
                &[
                    ("observation_start", start.as_str()),
                    ("observation_end", end.as_str()),
                ],
            )
            .await
        else {
            return Vec::new();
        };

        response
            .observations
            .iter()
            .filter_map(|raw| raw.normalize())
            .collect()
    }

    /// Perform one upstream GET. All failure modes collapse to `None`
    /// so callers only ever see "no data".
    async fn get_observations(
        &self,
        series_id: &str,
        extra: &[(&str, &str)],
    ) -> Option<ObservationsResponse> {
        let url = format!("{}/series/observations", self.base_url);
        let mut query: Vec<(&str, &str)> = vec![
            ("series_id", series_id),
            ("api_key", &self.api_key),
            ("file_type", "json"),
        ];
        query.extend_from_slice(extra);

        metrics::record_upstream_request(series_id);

        let response = match self.http.get(&url).query(&query).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(series_id = %series_id, error = %e, "Upstream request failed");
                metrics::record_upstream_failure(series_id);
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(series_id = %series_id, status = %status, "Upstream returned error status");
            metrics::record_upstream_failure(series_id);
            return None;
        }

        match response.json::<ObservationsResponse>().await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!(series_id = %series_id, error = %e, "Failed to parse upstream response");
                metrics::record_upstream_failure(series_id);
                None
            }
        }
    }
}
