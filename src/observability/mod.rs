//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured `tracing` events → stderr)
//!
//! Completed requests additionally produce:
//!     → logs::access (access line → real-time viewers)
//! ```
//!
//! # Design Decisions
//! - Structured fields on every event, never pre-formatted strings
//! - Request ID set on every request and echoed in the response
//! - Diagnostics go to stderr; the access stream goes to viewers

pub mod logging;

pub use logging::{init_tracing, DEFAULT_FILTER};
