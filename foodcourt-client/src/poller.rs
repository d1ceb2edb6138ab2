use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::warn;
use uuid::Uuid;

use foodcourt_core::models::Order;

use crate::orders::OrderClient;

/// What a tracking view watches: a customer's own orders, or every order of
/// one restaurant for the kitchen board.
#[derive(Debug, Clone, Copy)]
pub enum OrderScope {
    Customer(Uuid),
    Restaurant(Uuid),
}

/// Snapshot published after each successful poll. Versions are monotonic, so
/// a receiver can never observe an older fetch overwriting a newer one.
#[derive(Debug, Clone, Default)]
pub struct OrderSnapshot {
    pub version: u64,
    pub fetched_at: Option<DateTime<Utc>>,
    pub orders: Vec<Order>,
}

/// Background polling task for an order tracking view. Fetches are
/// serialized within the task; failures are logged and the next tick
/// retries. Dropping the poller (leaving the view) stops the timer without
/// chasing an in-flight request.
pub struct OrderPoller {
    shutdown: CancellationToken,
    receiver: watch::Receiver<OrderSnapshot>,
    handle: JoinHandle<()>,
}

impl OrderPoller {
    pub fn spawn(client: OrderClient, scope: OrderScope, interval: Duration) -> Self {
        let shutdown = CancellationToken::new();
        let (sender, receiver) = watch::channel(OrderSnapshot::default());

        let token = shutdown.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut version = 0u64;

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        let fetched = match scope {
                            OrderScope::Customer(id) => client.list_for_customer(id).await,
                            OrderScope::Restaurant(id) => client.list_for_restaurant(id).await,
                        };
                        match fetched {
                            Ok(orders) => {
                                version += 1;
                                let _ = sender.send(OrderSnapshot {
                                    version,
                                    fetched_at: Some(Utc::now()),
                                    orders,
                                });
                            }
                            Err(err) => {
                                warn!(%err, "order poll failed, retrying on next tick");
                            }
                        }
                    }
                }
            }
        });

        Self {
            shutdown,
            receiver,
            handle,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<OrderSnapshot> {
        self.receiver.clone()
    }

    pub fn stop(&self) {
        self.shutdown.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for OrderPoller {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
