//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → server.rs (axum router, timeout / request-id / trace layers)
//!     → auth middleware (protected routes)
//!     → handlers.rs (extract, call report assemblers)
//!     → response.rs (success/validation envelope)
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use response::ApiResponse;
pub use server::{AppState, HttpServer};
