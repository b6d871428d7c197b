//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Require all four upstream credentials
//! - Validate value ranges (timeouts > 0, buffer capacity > 0)
//! - Check the upstream base URL is an absolute http(s) URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let credentials = &config.credentials;
    for (field, value, env) in [
        ("credentials.consumer_key", &credentials.consumer_key, "CONSUMER_KEY"),
        ("credentials.consumer_secret", &credentials.consumer_secret, "CONSUMER_SECRET"),
        ("credentials.token_id", &credentials.token_id, "TOKEN_ID"),
        ("credentials.token_secret", &credentials.token_secret, "TOKEN_SECRET"),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError::new(field, format!("required (set {})", env)));
        }
    }

    match Url::parse(&config.upstream.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
        Ok(_) => errors.push(ValidationError::new(
            "upstream.base_url",
            "must be an absolute http(s) URL",
        )),
        Err(e) => errors.push(ValidationError::new("upstream.base_url", e.to_string())),
    }

    if config.upstream.record_type.trim().is_empty() {
        errors.push(ValidationError::new("upstream.record_type", "must not be empty"));
    }
    if config.upstream.timeout_secs == 0 {
        errors.push(ValidationError::new("upstream.timeout_secs", "must be greater than 0"));
    }
    if config.upstream.connect_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "upstream.connect_timeout_secs",
            "must be greater than 0",
        ));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }
    if config.logs.capacity == 0 {
        errors.push(ValidationError::new("logs.capacity", "must be greater than 0"));
    }
    if config.logs.channel_capacity == 0 {
        errors.push(ValidationError::new("logs.channel_capacity", "must be greater than 0"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
