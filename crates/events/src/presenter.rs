//! Per-session toast state machine.
//!
//! ```text
//!            show                       show (replace, restart timer)
//! Hidden ───────────▶ Visible ◀──────┐
//!   ▲                   │  └─────────┘
//!   └───────────────────┘
//!     timer elapsed | dismiss
//! ```
//!
//! At most one notification is visible. A new one replaces the current one
//! without queuing and restarts the display timer. Only one timer is ever
//! armed: the deadline lives in the state and is recomputed on every
//! transition.
//!
//! Notifications carry the sequence number of the change event they came
//! from. A notification older than the last one shown is dropped, so a slow
//! lookup for an earlier approval cannot cover a later one.

use std::time::Duration;

use revuoo_core::notification::EnrichedNotification;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

// ---------------------------------------------------------------------------
// PresenterState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PresenterState {
    #[default]
    Hidden,
    Visible {
        notification: EnrichedNotification,
        deadline: Instant,
    },
}

impl PresenterState {
    /// Display `notification` until `now + duration`, replacing anything visible.
    pub fn show(&mut self, notification: EnrichedNotification, now: Instant, duration: Duration) {
        *self = PresenterState::Visible {
            notification,
            deadline: now + duration,
        };
    }

    /// Hide immediately. Returns whether anything was visible.
    pub fn dismiss(&mut self) -> bool {
        let was_visible = self.is_visible();
        *self = PresenterState::Hidden;
        was_visible
    }

    /// Hide if the deadline has passed. Returns whether the state changed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let elapsed = matches!(self, PresenterState::Visible { deadline, .. } if *deadline <= now);
        elapsed && self.dismiss()
    }

    pub fn deadline(&self) -> Option<Instant> {
        match self {
            PresenterState::Visible { deadline, .. } => Some(*deadline),
            PresenterState::Hidden => None,
        }
    }

    pub fn current(&self) -> Option<&EnrichedNotification> {
        match self {
            PresenterState::Visible { notification, .. } => Some(notification),
            PresenterState::Hidden => None,
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, PresenterState::Visible { .. })
    }
}

// ---------------------------------------------------------------------------
// NotificationPresenter
// ---------------------------------------------------------------------------

/// Input to a running presenter.
#[derive(Debug, Clone)]
pub enum PresenterCommand {
    /// Show a notification built from the `seq`-th qualifying event.
    Show {
        seq: u64,
        notification: EnrichedNotification,
    },
    Dismiss,
}

/// Owns one session's [`PresenterState`] and its display timer.
///
/// The visible notification is published on a `watch` channel; readers see
/// `Some` while a toast is up and `None` otherwise.
pub struct NotificationPresenter {
    duration: Duration,
    state: PresenterState,
    last_shown: Option<u64>,
    visible: watch::Sender<Option<EnrichedNotification>>,
}

impl NotificationPresenter {
    pub fn new(duration: Duration) -> (Self, watch::Receiver<Option<EnrichedNotification>>) {
        let (visible, rx) = watch::channel(None);
        let presenter = Self {
            duration,
            state: PresenterState::Hidden,
            last_shown: None,
            visible,
        };
        (presenter, rx)
    }

    /// Run until `cancel` fires or every command sender is dropped.
    ///
    /// Leaving the loop drops the pending timer and publishes `None`.
    pub async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<PresenterCommand>,
        cancel: CancellationToken,
    ) {
        loop {
            let deadline = self.state.deadline();

            tokio::select! {
                _ = cancel.cancelled() => break,
                command = commands.recv() => match command {
                    Some(PresenterCommand::Show { seq, notification }) => {
                        if self.last_shown.is_some_and(|last| seq < last) {
                            tracing::debug!(
                                review_id = notification.review_id,
                                seq,
                                "Dropping notification older than the one last shown"
                            );
                            continue;
                        }
                        self.last_shown = Some(seq);
                        tracing::debug!(
                            review_id = notification.review_id,
                            replaced = self.state.is_visible(),
                            "Showing review notification"
                        );
                        self.state.show(notification, Instant::now(), self.duration);
                        self.publish();
                    }
                    Some(PresenterCommand::Dismiss) => {
                        if self.state.dismiss() {
                            tracing::debug!("Review notification dismissed");
                            self.publish();
                        }
                    }
                    None => break,
                },
                _ = sleep_until(deadline) => {
                    if self.state.expire(Instant::now()) {
                        tracing::debug!("Review notification expired");
                        self.publish();
                    }
                }
            }
        }

        if self.state.dismiss() {
            self.publish();
        }
    }

    fn publish(&self) {
        self.visible.send_replace(self.state.current().cloned());
    }
}

/// Sleep until `deadline`, or forever when nothing is visible.
async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
