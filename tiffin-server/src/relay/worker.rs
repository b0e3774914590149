//! Relay background worker
//!
//! Two triggers, one loop:
//! - a sales event (order confirmed) pushes a fresh daily summary to
//!   the relay so its cache never goes stale;
//! - a minute ticker fires the formatted daily report once per day at
//!   the configured send time.
//!
//! Failures are logged and retried on the next trigger. The worker
//! stops when its cancellation token fires.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, Utc};
use shared::models::DailySummary;
use tokio::sync::broadcast;
use tokio::time::{Duration, interval};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{RelayError, ReportRelay, format_daily_report};
use crate::orders::SalesEvent;
use crate::reports;
use crate::storage::PosStorage;

pub struct RelayWorker {
    storage: PosStorage,
    relay: Arc<dyn ReportRelay>,
    send_time: NaiveTime,
    events: broadcast::Receiver<SalesEvent>,
    cancel: CancellationToken,
}

impl RelayWorker {
    pub fn new(
        storage: PosStorage,
        relay: Arc<dyn ReportRelay>,
        send_time: NaiveTime,
        events: broadcast::Receiver<SalesEvent>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            storage,
            relay,
            send_time,
            events,
            cancel,
        }
    }

    pub async fn run(mut self) {
        let mut ticker = interval(Duration::from_secs(60));
        let mut last_sent: Option<NaiveDate> = None;

        info!(send_time = %self.send_time, "relay worker started");

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    info!("relay worker stopping");
                    break;
                }
                event = self.events.recv() => match event {
                    Ok(SalesEvent::OrderConfirmed { order_id }) => {
                        debug!(order_id, "syncing sales data after confirmation");
                        if let Err(e) = self.sync_today().await {
                            warn!("sales data sync failed: {e}");
                        }
                    }
                    Ok(SalesEvent::PaymentAttached { .. }) => {}
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        warn!(missed, "sales event stream lagged, resyncing");
                        if let Err(e) = self.sync_today().await {
                            warn!("sales data sync failed: {e}");
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
                _ = ticker.tick() => {
                    let now = Utc::now();
                    let today = now.date_naive();
                    if now.time() >= self.send_time && last_sent != Some(today) {
                        last_sent = Some(today);
                        if let Err(e) = self.send_daily().await {
                            warn!("daily report send failed: {e}");
                        }
                    }
                }
            }
        }
    }

    fn summary_today(&self) -> Result<DailySummary, RelayError> {
        let log = self.storage.all_orders()?;
        let store = self.storage.store_info()?;
        Ok(reports::daily_summary(
            &log,
            &store.name,
            Utc::now().date_naive(),
        ))
    }

    async fn sync_today(&self) -> Result<(), RelayError> {
        let summary = self.summary_today()?;
        self.relay.sync_sales(&summary).await
    }

    async fn send_daily(&self) -> Result<(), RelayError> {
        let summary = self.summary_today()?;
        self.relay.send_report(&format_daily_report(&summary)).await?;
        info!(date = %summary.date, orders = summary.total_orders, "daily report sent");
        Ok(())
    }
}
