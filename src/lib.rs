//! NetSuite record relay library.
//!
//! Signs inbound driver-record requests with OAuth 1.0a (HMAC-SHA256),
//! forwards them to the upstream record API, and streams every completed
//! request's access line to real-time viewers.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod logs;
pub mod oauth;
pub mod observability;
pub mod upstream;

pub use config::schema::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use logs::LogBroadcaster;
pub use oauth::{sign, Credentials, Signer};
