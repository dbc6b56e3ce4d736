//! Board polling: a single task per view that re-fetches the order list on a
//! fixed interval and broadcasts snapshots to subscribers.

use std::time::Duration;

use shared::{
    domain::{BusinessId, Order},
    error::ApiError,
};
use tokio::{
    sync::broadcast,
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};
use tracing::warn;

/// The kitchen refreshes every five seconds.
pub const KITCHEN_POLL_INTERVAL: Duration = Duration::from_secs(5);
/// The delivery and dine-in boards refresh more slowly.
pub const BOARD_POLL_INTERVAL: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub enum BoardEvent {
    /// A fresh order list; replaces whatever the subscriber held.
    Snapshot(Vec<Order>),
    /// The fetch failed; subscribers keep their previous snapshot.
    FetchFailed(ApiError),
}

/// Periodically fetches the order list and fans it out over a broadcast
/// channel. Each fetch is awaited before the next tick, so at most one
/// request is ever in flight.
pub struct BoardWatcher {
    task: JoinHandle<()>,
    events: broadcast::Sender<BoardEvent>,
}

impl BoardWatcher {
    pub fn spawn(client: crate::OrdersClient, business: BusinessId, period: Duration) -> Self {
        let (events, _) = broadcast::channel(16);
        let tx = events.clone();
        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            // A slow request delays the next poll instead of stacking a
            // duplicate behind it.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match client.fetch_orders(business).await {
                    Ok(orders) => {
                        let _ = tx.send(BoardEvent::Snapshot(orders));
                    }
                    Err(err) => {
                        warn!("order list fetch failed, keeping last snapshot: {err}");
                        let _ = tx.send(BoardEvent::FetchFailed(err));
                    }
                }
            }
        });
        Self { task, events }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
        self.events.subscribe()
    }

    pub fn abort(&self) {
        self.task.abort();
    }
}

impl Drop for BoardWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}
