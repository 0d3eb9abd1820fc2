//! Shared utilities for integration and load testing.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{Duration, Utc};
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use economic_data_api::auth::{TokenRecord, TokenStore};
use economic_data_api::cache::ObservationCache;
use economic_data_api::config::AppConfig;
use economic_data_api::fred::FredClient;
use economic_data_api::http::{AppState, HttpServer};
use economic_data_api::Shutdown;

/// A programmable in-process stand-in for the FRED observations API.
///
/// Observations are stored oldest-first per series; the handler applies
/// `sort_order`, `limit` and the observation window the way the real
/// endpoint does.
#[derive(Clone, Default)]
pub struct MockFred {
    series: Arc<Mutex<HashMap<String, Vec<(String, String)>>>>,
    failing: Arc<Mutex<HashSet<String>>>,
}

#[allow(dead_code)]
impl MockFred {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the observations for a series, oldest first.
    pub fn set_series(&self, series_id: &str, observations: &[(&str, &str)]) {
        let obs = observations
            .iter()
            .map(|(d, v)| (d.to_string(), v.to_string()))
            .collect();
        self.series
            .lock()
            .unwrap()
            .insert(series_id.to_string(), obs);
    }

    /// Make requests for a series return HTTP 500.
    pub fn fail_series(&self, series_id: &str) {
        self.failing.lock().unwrap().insert(series_id.to_string());
    }

    /// Bind the mock on an ephemeral port and return its base URL.
    pub async fn spawn(&self) -> String {
        let router = Router::new()
            .route("/series/observations", get(observations_handler))
            .with_state(self.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }
}

async fn observations_handler(
    State(mock): State<MockFred>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let series_id = params.get("series_id").cloned().unwrap_or_default();

    if mock.failing.lock().unwrap().contains(&series_id) {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error_message": "boom"})));
    }

    let mut observations = mock
        .series
        .lock()
        .unwrap()
        .get(&series_id)
        .cloned()
        .unwrap_or_default();

    if let Some(start) = params.get("observation_start") {
        observations.retain(|(d, _)| d.as_str() >= start.as_str());
    }
    if let Some(end) = params.get("observation_end") {
        observations.retain(|(d, _)| d.as_str() <= end.as_str());
    }
    if params.get("sort_order").map(String::as_str) == Some("desc") {
        observations.reverse();
    }
    if let Some(limit) = params.get("limit").and_then(|l| l.parse::<usize>().ok()) {
        observations.truncate(limit);
    }

    let body: Vec<_> = observations
        .into_iter()
        .map(|(date, value)| json!({"date": date, "value": value}))
        .collect();
    (StatusCode::OK, Json(json!({ "observations": body })))
}

/// A running API instance wired to a mock upstream.
pub struct TestApp {
    pub base_url: String,
    pub tokens: TokenStore,
    shutdown: Shutdown,
}

#[allow(dead_code)]
impl TestApp {
    /// A bearer token whose jti is registered and live.
    pub fn valid_token(&self) -> String {
        let jti = "integration-test-token";
        self.tokens.insert(
            jti,
            TokenRecord {
                revoked: false,
                expires_at: Utc::now() + Duration::hours(1),
            },
        );
        make_bearer_token(jti)
    }

    pub fn stop(&self) {
        self.shutdown.trigger();
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Spawn the full production router (auth enabled) against the given
/// upstream base URL.
#[allow(dead_code)]
pub async fn spawn_app(upstream_url: &str) -> TestApp {
    spawn_app_with(upstream_url, |_| {}).await
}

/// Spawn the app, letting the caller tweak the config first.
pub async fn spawn_app_with<F>(upstream_url: &str, customize: F) -> TestApp
where
    F: FnOnce(&mut AppConfig),
{
    let mut config = AppConfig::default();
    config.fred.base_url = upstream_url.to_string();
    config.fred.api_key = "test-api-key".to_string();
    customize(&mut config);

    let tokens = TokenStore::new();
    let state = AppState {
        client: FredClient::new(&config.fred).unwrap(),
        cache: ObservationCache::new(config.cache.ttl_secs),
        tokens: tokens.clone(),
    };
    let router = HttpServer::build_router(&config, state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let mut rx = shutdown.subscribe();
    tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = rx.recv().await;
            })
            .await
            .unwrap();
    });

    TestApp {
        base_url: format!("http://{addr}"),
        tokens,
        shutdown,
    }
}

/// Build a JWT-shaped bearer token carrying the given jti. The
/// signature is junk; the service only inspects the payload.
pub fn make_bearer_token(jti: &str) -> String {
    format!(
        "{}.{}.{}",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(json!({ "jti": jti }).to_string()),
        URL_SAFE_NO_PAD.encode("test-signature")
    )
}
