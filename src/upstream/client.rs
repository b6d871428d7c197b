//! Record API client: one signed call per relay request.

use std::time::{Duration, Instant};

use reqwest::{Method, RequestBuilder};
use serde_json::Value;
use url::Url;

use crate::config::UpstreamConfig;
use crate::oauth::Signer;
use crate::upstream::error::UpstreamError;

/// Client for a single upstream record type.
#[derive(Debug, Clone)]
pub struct RecordClient {
    http: reqwest::Client,
    signer: Signer,
    base_url: Url,
    record_type: String,
}

impl RecordClient {
    pub fn new(config: &UpstreamConfig, signer: Signer) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(UpstreamError::Transport)?;

        Ok(Self {
            http,
            signer,
            base_url: Url::parse(&config.base_url)?,
            record_type: config.record_type.clone(),
        })
    }

    /// `<base>/<record_type>` or `<base>/<record_type>/<id>`.
    pub fn record_url(&self, id: Option<&str>) -> Result<Url, UpstreamError> {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| UpstreamError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?;
            segments.pop_if_empty().push(&self.record_type);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    /// Read one record by internal ID.
    pub async fn fetch(&self, id: &str) -> Result<Value, UpstreamError> {
        let url = self.record_url(Some(id))?;
        let request = self.http.get(url.clone());
        self.send(Method::GET, url, request).await
    }

    /// Create a record from a JSON body passed through untouched.
    pub async fn create(&self, body: &Value) -> Result<Value, UpstreamError> {
        let url = self.record_url(None)?;
        let request = self.http.post(url.clone()).json(body);
        self.send(Method::POST, url, request).await
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        request: RequestBuilder,
    ) -> Result<Value, UpstreamError> {
        let start = Instant::now();
        let headers = self.signer.sign(method.as_str(), &url);

        tracing::debug!(method = %method, url = %url, "Calling upstream");

        let response = request
            .headers(headers)
            .send()
            .await
            .map_err(UpstreamError::from_reqwest)?;
        let status = response.status();
        let body = response.text().await.map_err(UpstreamError::from_reqwest)?;

        tracing::debug!(
            method = %method,
            url = %url,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Upstream responded"
        );

        if !status.is_success() {
            return Err(UpstreamError::Status { status, body });
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        // Non-JSON 2xx bodies are relayed as text.
        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }
}
