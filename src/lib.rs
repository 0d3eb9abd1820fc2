//! Economic Data API
//!
//! An authenticated HTTP API that proxies and reshapes FRED economic
//! time-series data into normalized JSON.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client Request
//!   ──────────────▶ http (axum router + timeout/request-id/trace)
//!                      │
//!                      ▼
//!                   auth (bearer token → jti → token store)
//!                      │
//!                      ▼
//!                   reports ──▶ catalog (logical key → series id)
//!                      │
//!          latest ─────┴───── ranged
//!            │                  │
//!            ▼                  │
//!          cache (1h TTL)       │
//!            │                  │
//!            ▼                  ▼
//!          fred client ──────▶ FRED /series/observations
//!
//!   Cross-cutting: config, observability, lifecycle
//! ```

// Core subsystems
pub mod catalog;
pub mod config;
pub mod fred;
pub mod http;

// Request pipeline
pub mod auth;
pub mod cache;
pub mod reports;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
