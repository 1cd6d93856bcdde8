//! Realtime Notifier
//!
//! Best-effort push of new-order events to connected kitchen dashboards
//! over a single `tokio::sync::broadcast` channel. No per-subscriber ack,
//! no replay for late subscribers, no retry. The channel is a latency hint
//! only: dashboards re-fetch the live view on a fixed interval and that
//! poll is the authoritative state, so a lost or duplicated push is never
//! visible past one poll cycle.

use serde::Serialize;
use tokio::sync::broadcast;

use crate::db::models::Order;
use crate::orders::OrderView;

/// Event type carried by every push
pub const EVENT_NEW_ORDER: &str = "newOrder";

/// Wire payload: event tag + full order record
#[derive(Debug, Clone, Serialize)]
pub struct NewOrderEvent {
    pub event: &'static str,
    pub order: OrderView,
}

/// Fan-out handle for kitchen subscribers
#[derive(Debug, Clone)]
pub struct RealtimeNotifier {
    tx: broadcast::Sender<NewOrderEvent>,
}

impl RealtimeNotifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe a kitchen dashboard. Events published before this call
    /// are not replayed.
    pub fn subscribe(&self) -> broadcast::Receiver<NewOrderEvent> {
        self.tx.subscribe()
    }

    /// Push one `newOrder` event to all current subscribers.
    ///
    /// Synchronous and infallible from the caller's perspective: a send
    /// error only means there are no subscribers right now.
    pub fn broadcast_new_order(&self, order: &Order) {
        let event = NewOrderEvent {
            event: EVENT_NEW_ORDER,
            order: OrderView::from_order(order),
        };
        match self.tx.send(event) {
            Ok(n) => tracing::debug!(subscribers = n, "newOrder pushed"),
            Err(_) => tracing::debug!("newOrder push skipped, no subscribers"),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for RealtimeNotifier {
    fn default() -> Self {
        Self::new(1024)
    }
}
