//! Real-time access log stream over WebSocket.
//!
//! # Responsibilities
//! - Upgrade `GET /ws/logs` to a WebSocket
//! - Replay retained history, then forward live lines as `log` events
//! - Stop on client close, send failure, or server shutdown
//!
//! # Data Flow
//! ```text
//! LogBroadcaster ──── broadcast channel ────→ delivery task ──── text frames ────→ Viewer
//! ```
//!
//! # Design Decisions
//! - One delivery task per viewer; a slow viewer lags and skips events
//!   without holding up the publisher or other viewers
//! - Frames are `{"event":"log","data":"<line>"}`

use axum::extract::ws::{Message, WebSocket};
use axum::{
    extract::{State, WebSocketUpgrade},
    response::IntoResponse,
};
use futures_util::{stream::SplitSink, SinkExt, StreamExt};
use serde::Serialize;
use tokio::sync::broadcast::{self, error::RecvError};

use crate::http::server::AppState;
use crate::logs::{LogSubscription, LOG_EVENT};

/// Wire form of one pushed line.
#[derive(Debug, Serialize)]
pub struct LogEvent<'a> {
    pub event: &'static str,
    pub data: &'a str,
}

impl<'a> LogEvent<'a> {
    pub fn new(data: &'a str) -> Self {
        Self {
            event: LOG_EVENT,
            data,
        }
    }
}

pub async fn logs_ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let subscription = state.logs.subscribe();
    let shutdown = state.shutdown.subscribe();
    ws.on_upgrade(move |socket| stream_logs(socket, subscription, shutdown))
}

async fn stream_logs(
    socket: WebSocket,
    subscription: LogSubscription,
    mut shutdown: broadcast::Receiver<()>,
) {
    let (mut sender, mut receiver) = socket.split();
    let LogSubscription {
        history,
        receiver: mut lines,
    } = subscription;

    tracing::debug!(history = history.len(), "Log viewer connected");

    for line in &history {
        if send_line(&mut sender, line).await.is_err() {
            return;
        }
    }

    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Close(_)) => break,
                Err(e) => {
                    tracing::debug!(error = %e, "Log viewer receive error");
                    break;
                }
                _ => {}
            }
        }
    });

    loop {
        tokio::select! {
            _ = &mut recv_task => {
                tracing::debug!("Log viewer disconnected");
                break;
            }
            _ = shutdown.recv() => {
                let _ = sender.send(Message::Close(None)).await;
                break;
            }
            result = lines.recv() => {
                match result {
                    Ok(line) => {
                        if let Err(e) = send_line(&mut sender, &line).await {
                            tracing::debug!(error = %e, "Failed to push log line");
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Log viewer lagged; events dropped");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }
    }

    recv_task.abort();
}

async fn send_line(
    sender: &mut SplitSink<WebSocket, Message>,
    line: &str,
) -> Result<(), axum::Error> {
    let frame = match serde_json::to_string(&LogEvent::new(line)) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to serialize log event");
            return Ok(());
        }
    };
    sender.send(Message::Text(frame.into())).await
}
