//! Upstream failure taxonomy.

use reqwest::StatusCode;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// No response within the configured timeout.
    #[error("upstream request timed out")]
    Timeout(#[source] reqwest::Error),

    /// DNS, TCP, TLS or body read failure.
    #[error("upstream transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The upstream answered with a non-2xx status.
    #[error("Request failed with status code {}", .status.as_u16())]
    Status { status: StatusCode, body: String },

    /// Configured base URL plus record path did not form a URL.
    #[error("invalid upstream URL: {0}")]
    Url(#[from] url::ParseError),
}

impl UpstreamError {
    pub(crate) fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(e)
        } else {
            Self::Transport(e)
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Best-effort detail for callers: the upstream body when there is one
    /// (parsed as JSON when possible), otherwise the error message.
    pub fn detail(&self) -> Value {
        match self {
            Self::Status { body, .. } if !body.trim().is_empty() => {
                serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.clone()))
            }
            _ => Value::String(self.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detail_prefers_json_body() {
        let err = UpstreamError::Status {
            status: StatusCode::NOT_FOUND,
            body: r#"{"title":"Record not found","status":404}"#.into(),
        };
        assert_eq!(err.detail(), json!({"title": "Record not found", "status": 404}));
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn test_detail_text_body() {
        let err = UpstreamError::Status {
            status: StatusCode::BAD_GATEWAY,
            body: "gateway down".into(),
        };
        assert_eq!(err.detail(), json!("gateway down"));
    }

    #[test]
    fn test_detail_empty_body_uses_message() {
        let err = UpstreamError::Status {
            status: StatusCode::NOT_FOUND,
            body: String::new(),
        };
        assert_eq!(err.detail(), json!("Request failed with status code 404"));
    }
}
