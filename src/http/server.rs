//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the axum Router with all handlers
//! - Wire up middleware (timeout, request ID, tracing, metrics, auth)
//! - Bind the server to a listener and serve until shutdown

use axum::{
    body::Body,
    http::Request,
    middleware,
    response::Response,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::auth::{require_client_token, TokenStore};
use crate::cache::ObservationCache;
use crate::config::AppConfig;
use crate::fred::FredClient;
use crate::http::handlers;
use crate::http::request::RequestIdLayer;
use crate::observability::metrics;

/// Application state injected into handlers and the auth middleware.
#[derive(Clone)]
pub struct AppState {
    pub client: FredClient,
    pub cache: ObservationCache,
    pub tokens: TokenStore,
}

/// HTTP server for the economic data API.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new server from validated configuration.
    pub fn new(config: AppConfig, tokens: TokenStore) -> Result<Self, reqwest::Error> {
        let client = FredClient::new(&config.fred)?;
        let cache = ObservationCache::new(config.cache.ttl_secs);
        let state = AppState {
            client,
            cache,
            tokens,
        };
        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the axum router with all middleware layers. Public so
    /// integration tests can assemble the exact production stack.
    pub fn build_router(config: &AppConfig, state: AppState) -> Router {
        let mut protected = Router::new()
            .route("/api/economic-indicators", get(handlers::economic_indicators))
            .route("/api/interest-rates", get(handlers::interest_rates))
            .route("/api/market-indicators", get(handlers::market_indicators))
            .route(
                "/api/custom-report/available-indicators",
                get(handlers::available_indicators),
            )
            .route("/api/custom-report", post(handlers::generate_custom_report));

        if config.auth.enabled {
            protected = protected.layer(middleware::from_fn_with_state(
                state.clone(),
                require_client_token,
            ));
        } else {
            tracing::warn!("Client-token authentication is DISABLED");
        }

        Router::new()
            .route("/api/health", get(handlers::health))
            .merge(protected)
            .fallback(handlers::not_found)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(track_metrics))
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

/// Record one counter per completed request.
async fn track_metrics(request: Request<Body>, next: middleware::Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let response = next.run(request).await;
    metrics::record_http_request(&method, &path, response.status().as_u16());
    response
}
