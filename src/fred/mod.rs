//! Upstream FRED client subsystem.
//!
//! # Data Flow
//! ```text
//! series_id + query window
//!     → client.rs (one GET against {base}/series/observations)
//!     → types.rs (wire structs → normalized Observation list)
//!     → caller (cache or report assembler)
//! ```
//!
//! # Design Decisions
//! - Failures never cross this boundary: network errors, non-2xx statuses
//!   and malformed bodies all collapse to absent/empty with a warn log
//! - The "." sentinel is data ("no observation that day"), not an error;
//!   it normalizes to a present date with an absent value
//! - One outbound call per invocation, no retries

pub mod client;
pub mod types;

pub use client::FredClient;
pub use types::Observation;
