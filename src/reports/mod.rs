//! Report assembly subsystem.
//!
//! # Data Flow
//! ```text
//! handler
//!     → fixed.rs: catalog category → cache.get_latest per series → envelope data
//!     → custom.rs: validate request → fetch_range per key (no cache) → envelope data
//! ```
//!
//! # Design Decisions
//! - Partial-failure tolerance: a failed indicator is omitted (fixed
//!   reports) or left with an empty series (custom report); the report
//!   itself always succeeds
//! - Output order is always catalog/request order, never fetch order
//! - Validation happens before any upstream call

pub mod custom;
pub mod fixed;

pub use custom::{available_indicators, custom_report, validate_request, ReportRequest};
pub use fixed::category_report;
