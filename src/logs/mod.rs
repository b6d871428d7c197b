//! Real-time access log subsystem.
//!
//! # Data Flow
//! ```text
//! Completed request
//!     → access.rs (format one access line)
//!     → broadcaster.rs on_log_line
//!         → buffer.rs (bounded history, oldest evicted)
//!         → broadcast channel → one delivery task per viewer
//!             → http/websocket.rs (`log` events)
//! ```
//!
//! # Design Decisions
//! - The broadcaster is an owned object shared by `Arc`, never a global
//! - Publishing never waits on a subscriber; lagging viewers skip events
//! - History snapshot and subscription are taken under the same lock as
//!   appends, so a new viewer sees each line exactly once

pub mod access;
pub mod broadcaster;
pub mod buffer;

pub use access::{access_log_middleware, AccessLine};
pub use broadcaster::{LogBroadcaster, LogSubscription, DEFAULT_CHANNEL_CAPACITY, LOG_EVENT};
pub use buffer::{LogBuffer, DEFAULT_CAPACITY};
