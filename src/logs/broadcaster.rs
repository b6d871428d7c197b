//! Log line fan-out to real-time viewers.

use parking_lot::Mutex;
use tokio::sync::broadcast;

use crate::logs::buffer::LogBuffer;

/// Event name carried by every pushed line.
pub const LOG_EVENT: &str = "log";

/// Default depth of the per-subscriber delivery queue.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Owns the retained history and the live subscriber set.
pub struct LogBroadcaster {
    buffer: Mutex<LogBuffer>,
    sender: broadcast::Sender<String>,
}

/// A viewer's handle: history at the moment of subscribing, then live lines.
pub struct LogSubscription {
    pub history: Vec<String>,
    pub receiver: broadcast::Receiver<String>,
}

impl LogBroadcaster {
    pub fn new(capacity: usize, channel_capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(channel_capacity.max(1));
        Self {
            buffer: Mutex::new(LogBuffer::new(capacity)),
            sender,
        }
    }

    /// Record one completed request and push it to every viewer.
    pub fn on_log_line(&self, line: impl Into<String>) {
        let line = line.into();
        let mut buffer = self.buffer.lock();
        buffer.push(line.clone());
        // Err only means nobody is listening.
        let _ = self.sender.send(line);
    }

    pub fn subscribe(&self) -> LogSubscription {
        let buffer = self.buffer.lock();
        LogSubscription {
            history: buffer.to_vec(),
            receiver: self.sender.subscribe(),
        }
    }

    /// Retained lines, oldest first.
    pub fn snapshot(&self) -> Vec<String> {
        self.buffer.lock().to_vec()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for LogBroadcaster {
    fn default() -> Self {
        Self::new(crate::logs::buffer::DEFAULT_CAPACITY, DEFAULT_CHANNEL_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::broadcast::error::{RecvError, TryRecvError};

    #[test]
    fn test_publish_without_subscribers() {
        let broadcaster = LogBroadcaster::default();
        broadcaster.on_log_line("first");
        assert_eq!(broadcaster.subscriber_count(), 0);
        assert_eq!(broadcaster.snapshot(), vec!["first".to_string()]);
    }

    #[test]
    fn test_buffer_bounded() {
        let broadcaster = LogBroadcaster::default();
        for i in 0..150 {
            broadcaster.on_log_line(format!("line {}", i));
        }
        let snapshot = broadcaster.snapshot();
        assert_eq!(snapshot.len(), 100);
        assert_eq!(snapshot[0], "line 50");
        assert_eq!(snapshot[99], "line 149");
    }

    #[test]
    fn test_subscription_history_then_live() {
        let broadcaster = LogBroadcaster::default();
        broadcaster.on_log_line("old");

        let mut sub = broadcaster.subscribe();
        assert_eq!(sub.history, vec!["old".to_string()]);
        assert!(matches!(sub.receiver.try_recv(), Err(TryRecvError::Empty)));

        broadcaster.on_log_line("new");
        assert_eq!(sub.receiver.try_recv().unwrap(), "new");
    }

    #[test]
    fn test_every_subscriber_receives() {
        let broadcaster = LogBroadcaster::default();
        let mut a = broadcaster.subscribe();
        let mut b = broadcaster.subscribe();
        broadcaster.on_log_line("x");
        assert_eq!(a.receiver.try_recv().unwrap(), "x");
        assert_eq!(b.receiver.try_recv().unwrap(), "x");
    }

    #[test]
    fn test_slow_subscriber_does_not_block() {
        let broadcaster = LogBroadcaster::new(100, 4);
        let mut slow = broadcaster.subscribe();
        let dropped = broadcaster.subscribe();
        drop(dropped);

        for i in 0..10 {
            broadcaster.on_log_line(format!("line {}", i));
        }
        assert_eq!(broadcaster.snapshot().len(), 10);

        assert!(matches!(slow.receiver.try_recv(), Err(TryRecvError::Lagged(6))));
        assert_eq!(slow.receiver.try_recv().unwrap(), "line 6");
    }

    #[tokio::test]
    async fn test_completion_order_recorded() {
        let broadcaster = Arc::new(LogBroadcaster::default());
        let mut sub = broadcaster.subscribe();

        // Started A..E, finishing C, A, E, B, D.
        let delays = [("A", 60), ("B", 140), ("C", 20), ("D", 180), ("E", 100)];
        let handles: Vec<_> = delays
            .into_iter()
            .map(|(name, ms)| {
                let broadcaster = broadcaster.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_millis(ms)).await;
                    broadcaster.on_log_line(name);
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let expected = vec!["C", "A", "E", "B", "D"];
        assert_eq!(broadcaster.snapshot(), expected);
        for name in expected {
            match sub.receiver.recv().await {
                Ok(line) => assert_eq!(line, name),
                Err(RecvError::Lagged(_)) | Err(RecvError::Closed) => panic!("missed {}", name),
            }
        }
    }
}
