//! Shutdown coordination for the relay.
//!
//! One trigger stops two kinds of work: `HttpServer::run` stops accepting
//! and drains in-flight requests, and every `/ws/logs` stream sends a close
//! frame and drops its log subscription. Upgraded WebSocket connections are
//! not tracked by the server's graceful drain, so without this signal a
//! viewer would keep the process's log fan-out alive past shutdown.

use tokio::sync::broadcast;

/// Stop signal shared by the server and the live log streams.
///
/// `AppState` carries a clone; each log stream subscribes when its upgrade
/// is accepted.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver that resolves once `trigger` is called.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Stop the server and close every open log stream.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Server plus open log streams still waiting on the signal.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
