//! Service lifecycle coordination.
//!
//! # Data Flow
//! ```text
//! ctrl-c (or a test harness)
//!     → Shutdown::trigger()
//!     → broadcast to subscribers
//!     → axum graceful shutdown drains in-flight requests
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
