//! Postgres change stream for the `reviews` table.
//!
//! The `notify_review_change` trigger publishes every review UPDATE with
//! `pg_notify`. [`ChangeStreamListener`] holds one `LISTEN` connection for
//! the whole process and forwards decoded events onto the [`ChangeBus`].
//! Reconnecting a dropped connection is left to [`PgListener`], which
//! re-establishes it on the next `recv`; notifications sent while it was
//! down are lost.

use std::sync::Arc;
use std::time::Duration;

use revuoo_core::review::ReviewChangeEvent;
use revuoo_db::{DbPool, REVIEW_CHANGE_CHANNEL};
use sqlx::postgres::PgListener;
use tokio_util::sync::CancellationToken;

use crate::bus::ChangeBus;
use crate::error::EventError;

/// Pause after a failed receive before asking the listener again.
const RECEIVE_ERROR_PAUSE: Duration = Duration::from_secs(1);

/// Decode one notification payload.
pub fn decode_payload(payload: &str) -> Result<ReviewChangeEvent, EventError> {
    Ok(serde_json::from_str(payload)?)
}

/// Background service that feeds database change notifications into the bus.
pub struct ChangeStreamListener {
    pool: DbPool,
    bus: Arc<ChangeBus>,
}

impl ChangeStreamListener {
    pub fn new(pool: DbPool, bus: Arc<ChangeBus>) -> Self {
        Self { pool, bus }
    }

    /// Run the listen loop until `cancel` fires.
    ///
    /// Fails only if the initial `LISTEN` cannot be established.
    pub async fn run(self, cancel: CancellationToken) -> Result<(), EventError> {
        let mut listener = PgListener::connect_with(&self.pool).await?;
        listener.listen(REVIEW_CHANGE_CHANNEL).await?;
        tracing::info!(channel = REVIEW_CHANGE_CHANNEL, "Listening for review changes");

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Review change listener cancelled");
                    break;
                }
                received = listener.recv() => match received {
                    Ok(notification) => {
                        forward_payload(&self.bus, notification.payload());
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Review change stream interrupted");
                        tokio::select! {
                            _ = cancel.cancelled() => break,
                            _ = tokio::time::sleep(RECEIVE_ERROR_PAUSE) => {}
                        }
                    }
                },
            }
        }

        Ok(())
    }
}

/// Decode `payload` and publish it. Malformed payloads are logged and dropped.
fn forward_payload(bus: &ChangeBus, payload: &str) -> bool {
    match decode_payload(payload) {
        Ok(event) => {
            let receivers = bus.publish(event);
            tracing::trace!(receivers, "Review change forwarded");
            true
        }
        Err(e) => {
            tracing::warn!(error = %e, "Dropping malformed review change payload");
            false
        }
    }
}
