//! Bearer-token authentication subsystem.
//!
//! # Data Flow
//! ```text
//! Authorization: Bearer <header.payload.signature>
//!     → middleware.rs (split, base64url-decode payload, extract jti)
//!     → tokens.rs (look up record: revoked? expired?)
//!     → pass request through unchanged, or 401 {"message"}
//! ```
//!
//! # Design Decisions
//! - Rejections are bare `{"message"}` bodies, not the success envelope
//! - Tokens are validated, never issued here; the store is loaded at
//!   startup from a JSON file
//! - No signature verification: possession of a live jti is the check

pub mod middleware;
pub mod tokens;

pub use middleware::require_client_token;
pub use tokens::{TokenRecord, TokenStore};
