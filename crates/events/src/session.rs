//! One client's live review notification feed.
//!
//! Opening a [`NotificationSession`] registers exactly one [`Subscription`]
//! on the [`ChangeBus`] and starts a presenter. Each event received is
//! filtered, enriched with a business lookup and handed to the presenter.
//! [`NotificationSession::close`] cancels the display timer and releases the
//! subscription before returning.
//!
//! Enrichment lookups run detached and are not cancelled on close. Each one
//! is tagged with the order its event arrived in, and the presenter never
//! lets an older approval replace a newer one. A late lookup for the newest
//! approval still shows its toast; one that finishes after close is
//! discarded.

use std::sync::Arc;
use std::time::Duration;

use revuoo_core::notification::{EnrichedNotification, DEFAULT_TOAST_DURATION_SECS};
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::bus::{ChangeBus, Subscription};
use crate::enrich::{enrich, BusinessLookup};
use crate::filter::is_newly_approved;
use crate::presenter::{NotificationPresenter, PresenterCommand};

/// Tunables for a [`NotificationSession`].
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long a toast stays up before hiding itself.
    pub toast_duration: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            toast_duration: Duration::from_secs(DEFAULT_TOAST_DURATION_SECS),
        }
    }
}

/// Handle to a running session. Dropping it cancels the session; call
/// [`close`](Self::close) to also wait until the subscription is released.
pub struct NotificationSession {
    visible: watch::Receiver<Option<EnrichedNotification>>,
    commands: mpsc::UnboundedSender<PresenterCommand>,
    cancel: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl NotificationSession {
    /// Subscribe to `bus` and start presenting approvals for one client.
    pub fn open(bus: &ChangeBus, lookup: Arc<dyn BusinessLookup>, config: SessionConfig) -> Self {
        let cancel = CancellationToken::new();
        let (presenter, visible) = NotificationPresenter::new(config.toast_duration);
        let (commands, command_rx) = mpsc::unbounded_channel();

        let presenter_task = tokio::spawn(presenter.run(command_rx, cancel.clone()));
        let feed_task = tokio::spawn(feed(
            bus.subscribe(),
            lookup,
            commands.clone(),
            cancel.clone(),
        ));

        Self {
            visible,
            commands,
            cancel,
            tasks: vec![feed_task, presenter_task],
        }
    }

    /// Watch the visible notification. `None` means nothing is shown.
    pub fn watch(&self) -> watch::Receiver<Option<EnrichedNotification>> {
        self.visible.clone()
    }

    /// The notification currently shown, if any.
    pub fn current(&self) -> Option<EnrichedNotification> {
        self.visible.borrow().clone()
    }

    /// Hide the current notification and cancel its timer.
    pub fn dismiss(&self) {
        // Fails only once the presenter has stopped, when there is nothing to hide.
        let _ = self.commands.send(PresenterCommand::Dismiss);
    }

    /// Stop the session and wait for its tasks to finish.
    ///
    /// On return the subscription has been dropped and no timer is pending.
    pub async fn close(mut self) {
        self.cancel.cancel();
        for task in std::mem::take(&mut self.tasks) {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "Notification session task failed");
            }
        }
    }
}

impl Drop for NotificationSession {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Receive change events and turn qualifying ones into presenter commands.
async fn feed(
    mut subscription: Subscription,
    lookup: Arc<dyn BusinessLookup>,
    commands: mpsc::UnboundedSender<PresenterCommand>,
    cancel: CancellationToken,
) {
    let mut seq: u64 = 0;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            received = subscription.recv() => match received {
                Ok(event) => {
                    if !is_newly_approved(&event) {
                        tracing::trace!(review_id = event.review_id(), "Ignoring review change");
                        continue;
                    }
                    seq += 1;
                    let lookup = Arc::clone(&lookup);
                    let commands = commands.clone();
                    tokio::spawn(async move {
                        if let Some(notification) = enrich(lookup.as_ref(), &event).await {
                            // The presenter is gone if the session closed mid-lookup.
                            let _ = commands.send(PresenterCommand::Show { seq, notification });
                        }
                    });
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification session lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::debug!("Change bus closed, notification session ending");
                    break;
                }
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
