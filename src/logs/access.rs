//! Access-log middleware.
//!
//! Lines use the combined-style layout
//! `addr - [date] "METHOD url HTTP/v" status length - latency ms "agent"`,
//! with `-` for any value that is unknown.

use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::{Body, HttpBody},
    extract::{ConnectInfo, State},
    http::{header, Request, Version},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};

use crate::logs::broadcaster::LogBroadcaster;

/// One completed request, ready to render.
#[derive(Debug, Clone)]
pub struct AccessLine {
    pub remote_addr: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub method: String,
    pub url: String,
    pub http_version: &'static str,
    pub status: u16,
    pub content_length: Option<u64>,
    pub latency: Duration,
    pub user_agent: Option<String>,
}

impl fmt::Display for AccessLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - [{}] \"{} {} HTTP/{}\" {} {} - {:.3} ms \"{}\"",
            self.remote_addr.as_deref().unwrap_or("-"),
            self.timestamp.format("%d/%b/%Y:%H:%M:%S %z"),
            self.method,
            self.url,
            self.http_version,
            self.status,
            self.content_length
                .map(|len| len.to_string())
                .unwrap_or_else(|| "-".to_string()),
            self.latency.as_secs_f64() * 1000.0,
            self.user_agent.as_deref().unwrap_or("-"),
        )
    }
}

fn version_str(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2.0",
        Version::HTTP_3 => "3.0",
        _ => "1.1",
    }
}

/// Formats each completed request and hands it to the broadcaster.
pub async fn access_log_middleware(
    State(broadcaster): State<Arc<LogBroadcaster>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let start = Instant::now();

    let remote_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());
    let method = request.method().to_string();
    let url = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let http_version = version_str(request.version());
    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let response = next.run(request).await;

    let content_length = response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .or_else(|| response.body().size_hint().exact());

    let line = AccessLine {
        remote_addr,
        timestamp: Utc::now(),
        method,
        url,
        http_version,
        status: response.status().as_u16(),
        content_length,
        latency: start.elapsed(),
        user_agent,
    }
    .to_string();

    tracing::debug!(target: "access", "{}", line);
    broadcaster.on_log_line(line);

    response
}
