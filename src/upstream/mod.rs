//! Signed upstream record API client.
//!
//! # Data Flow
//! ```text
//! route handler
//!     → client.rs (record URL, Signer → Authorization header)
//!     → reqwest (timeout-bounded call)
//!     → 2xx: JSON body (empty → null, non-JSON → string)
//!     → otherwise: error.rs UpstreamError (status + body, or transport message)
//! ```
//!
//! # Design Decisions
//! - One attempt per call: no retries, no backoff, no circuit breaking
//! - Every call is bounded by the configured timeout; dropping the future
//!   (client went away) cancels the outbound request

pub mod client;
pub mod error;

pub use client::RecordClient;
pub use error::UpstreamError;
