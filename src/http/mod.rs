//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → logs::access (one access line per completed request)
//!     → handlers.rs (liveness, driver relay routes)
//!         → upstream::RecordClient (signed call)
//!         → response.rs (success / failure bodies)
//!     → websocket.rs (real-time `log` events)
//! ```

pub mod handlers;
pub mod response;
pub mod server;
pub mod websocket;

pub use server::{AppState, HttpServer};
