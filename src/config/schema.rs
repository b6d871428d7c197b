//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::oauth::Credentials;

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Token-based authentication credentials for the upstream account.
    pub credentials: CredentialsConfig,

    /// Upstream record API location and call limits.
    pub upstream: UpstreamConfig,

    /// Real-time access log settings.
    pub logs: LogsConfig,

    /// Timeout configuration for inbound requests.
    pub timeouts: TimeoutConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// Listen port.
    pub port: u16,
}

impl ListenerConfig {
    /// `host:port`, ready for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// Upstream credentials as they appear in files and the environment.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CredentialsConfig {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub token_id: String,
    pub token_secret: String,
    pub realm: String,
}

impl CredentialsConfig {
    pub fn to_credentials(&self) -> Credentials {
        Credentials {
            consumer_key: self.consumer_key.clone(),
            consumer_secret: self.consumer_secret.clone(),
            token_key: self.token_id.clone(),
            token_secret: self.token_secret.clone(),
            realm: self.realm.clone(),
        }
    }
}

impl fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("token_id", &self.token_id)
            .field("token_secret", &"<redacted>")
            .field("realm", &self.realm)
            .finish()
    }
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            consumer_key: String::new(),
            consumer_secret: String::new(),
            token_id: String::new(),
            token_secret: String::new(),
            realm: "7930273_SB2".to_string(),
        }
    }
}

/// Upstream record API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Record service root, without a trailing record type.
    pub base_url: String,

    /// Record type served by the driver routes.
    pub record_type: String,

    /// Internal ID fetched by `GET /netsuite/driver`.
    pub driver_id: String,

    /// Total time allowed for one upstream call in seconds.
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://7930273-sb2.suitetalk.api.netsuite.com/services/rest/record/v1"
                .to_string(),
            record_type: "customrecord_driver_master_ag".to_string(),
            driver_id: "150".to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Real-time log configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogsConfig {
    /// Lines retained for late-joining viewers.
    pub capacity: usize,

    /// Per-viewer delivery queue depth before a slow viewer starts skipping.
    pub channel_capacity: usize,

    /// Static viewer page served at `/realtime-logs`.
    pub viewer_path: String,
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            capacity: crate::logs::DEFAULT_CAPACITY,
            channel_capacity: crate::logs::DEFAULT_CHANNEL_CAPACITY,
            viewer_path: "static/log-viewer.html".to_string(),
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 60 }
    }
}
