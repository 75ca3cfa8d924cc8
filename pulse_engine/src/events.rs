//! Process-wide "data changed" broadcast.
//!
//! The hub is a refresh hint, not a change log: there is no payload, no queuing and no replay.
//! Subscribers that were disconnected when a notification fired must re-fetch current state on
//! reconnect instead of relying on missed signals.
use log::*;
use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataChanged;

/// Buffer for bursts while a subscriber is between `recv` calls. A lagged subscriber misses
/// hints, which is fine: one pending hint is as good as ten.
const BROADCAST_CAPACITY: usize = 16;

#[derive(Clone)]
pub struct ChangeHub {
    tx: broadcast::Sender<DataChanged>,
}

impl Default for ChangeHub {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeHub {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self { tx }
    }

    /// Pushes the hint to every currently connected subscriber. A send error only means there are
    /// no subscribers right now, which is not a failure.
    pub fn notify(&self) {
        match self.tx.send(DataChanged) {
            Ok(n) => trace!("📡️ Data-changed hint delivered to {n} subscribers"),
            Err(_) => trace!("📡️ Data changed, but nobody is listening"),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DataChanged> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
