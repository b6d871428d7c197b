//! Configuration loading from disk and the environment.

use std::path::Path;
use std::fs;

use crate::config::schema::RelayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value for {key}: {value:?}")]
    Env { key: &'static str, value: String },
    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration: optional TOML file, then process environment, then validation.
pub fn load_config(path: Option<&Path>) -> Result<RelayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_config(&fs::read_to_string(path)?)?,
        None => RelayConfig::default(),
    };

    apply_env(&mut config, |key| std::env::var(key).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Parse a TOML document; missing sections fall back to defaults.
pub fn parse_config(content: &str) -> Result<RelayConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Override `config` with any recognized variables `lookup` returns.
///
/// Empty values are ignored so an exported-but-blank variable does not
/// clobber a file setting.
pub fn apply_env<F>(config: &mut RelayConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(v) = get("CONSUMER_KEY") {
        config.credentials.consumer_key = v;
    }
    if let Some(v) = get("CONSUMER_SECRET") {
        config.credentials.consumer_secret = v;
    }
    if let Some(v) = get("TOKEN_ID") {
        config.credentials.token_id = v;
    }
    if let Some(v) = get("TOKEN_SECRET") {
        config.credentials.token_secret = v;
    }
    if let Some(v) = get("REALM") {
        config.credentials.realm = v;
    }
    if let Some(v) = get("HOST") {
        config.listener.host = v;
    }
    if let Some(v) = get("PORT") {
        config.listener.port = v
            .trim()
            .parse()
            .map_err(|_| ConfigError::Env { key: "PORT", value: v })?;
    }
    if let Some(v) = get("NETSUITE_BASE_URL") {
        config.upstream.base_url = v;
    }
    if let Some(v) = get("UPSTREAM_TIMEOUT_SECS") {
        config.upstream.timeout_secs = v
            .trim()
            .parse()
            .map_err(|_| ConfigError::Env { key: "UPSTREAM_TIMEOUT_SECS", value: v })?;
    }

    Ok(())
}
