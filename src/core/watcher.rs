//! Pending-order watcher - periodically re-reads the orders and reports
//! whether any are still waiting for the admin.

use super::orders::OrderRepository;
use crate::{errors::Result, store::StorageBackend};
use std::future::Future;
use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Polls the order collection on a fixed interval.
pub struct PendingOrderWatcher<'a, B> {
    orders: &'a OrderRepository<B>,
    interval: Duration,
    last_pending: Option<usize>,
}

impl<'a, B: StorageBackend> PendingOrderWatcher<'a, B> {
    /// Creates a watcher that checks every `interval`.
    pub const fn new(orders: &'a OrderRepository<B>, interval: Duration) -> Self {
        Self {
            orders,
            interval,
            last_pending: None,
        }
    }

    /// Reads the orders once and returns the number still pending.
    ///
    /// Logs at `info` when the count changes, at `debug` otherwise.
    pub async fn check(&mut self) -> Result<usize> {
        let pending = self.orders.pending_count().await?;

        if self.last_pending == Some(pending) {
            debug!(pending, "No change in pending orders");
        } else {
            info!(pending, "Pending orders");
        }
        self.last_pending = Some(pending);

        Ok(pending)
    }

    /// Checks on every tick until `shutdown` resolves, then returns the number
    /// of checks that succeeded.
    ///
    /// The first check runs immediately. A failed check is logged and the loop
    /// carries on with the next tick.
    pub async fn run<F>(mut self, shutdown: F) -> usize
    where
        F: Future<Output = ()>,
    {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        let mut checks = 0;
        loop {
            tokio::select! {
                () = &mut shutdown => {
                    info!(checks, "Pending-order watcher stopped");
                    break;
                }
                _ = ticker.tick() => {
                    match self.check().await {
                        Ok(_) => checks += 1,
                        Err(e) => warn!("Pending-order check failed: {e}"),
                    }
                }
            }
        }
        checks
    }
}
