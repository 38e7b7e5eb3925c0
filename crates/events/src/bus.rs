//! In-process change bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`ChangeBus`] fans every [`ReviewChangeEvent`] out to all open client
//! sessions. It is designed to be shared via `Arc<ChangeBus>` across the
//! application.

use revuoo_core::review::ReviewChangeEvent;
use tokio::sync::broadcast;

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

// ---------------------------------------------------------------------------
// ChangeBus
// ---------------------------------------------------------------------------

/// In-process fan-out bus for review change events.
///
/// # Usage
///
/// ```rust
/// use revuoo_events::bus::ChangeBus;
///
/// let bus = ChangeBus::default();
/// let subscription = bus.subscribe();
/// assert_eq!(bus.subscriber_count(), 1);
///
/// drop(subscription);
/// assert_eq!(bus.subscriber_count(), 0);
/// ```
pub struct ChangeBus {
    sender: broadcast::Sender<ReviewChangeEvent>,
}

impl ChangeBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed events are dropped
    /// and slow subscribers observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// Returns the number of subscribers that will see it. With no open
    /// sessions the event is dropped.
    pub fn publish(&self, event: ReviewChangeEvent) -> usize {
        // A SendError only means there are zero receivers.
        self.sender.send(event).unwrap_or(0)
    }

    /// Open a subscription. It stays registered until dropped.
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            receiver: self.sender.subscribe(),
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

/// A registered listener on the [`ChangeBus`].
///
/// Dropping it unregisters the listener; there is no separate unsubscribe
/// call to forget.
pub struct Subscription {
    receiver: broadcast::Receiver<ReviewChangeEvent>,
}

impl Subscription {
    /// Wait for the next event.
    pub async fn recv(&mut self) -> Result<ReviewChangeEvent, broadcast::error::RecvError> {
        self.receiver.recv().await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use revuoo_core::review::{NewReviewRow, OldReviewRow, ReviewStatus};

    fn event(id: i64) -> ReviewChangeEvent {
        ReviewChangeEvent {
            old: OldReviewRow {
                status: ReviewStatus::Pending,
            },
            new: NewReviewRow {
                id,
                title: "Great service".to_string(),
                status: ReviewStatus::Approved,
                business_id: 7,
            },
        }
    }

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = ChangeBus::default();
        let mut sub = bus.subscribe();

        assert_eq!(bus.publish(event(42)), 1);

        let received = sub.recv().await.expect("should receive the event");
        assert_eq!(received.review_id(), 42);
        assert_eq!(received.business_id(), 7);
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = ChangeBus::default();
        let mut sub1 = bus.subscribe();
        let mut sub2 = bus.subscribe();

        assert_eq!(bus.publish(event(1)), 2);

        let e1 = sub1.recv().await.expect("subscriber 1 should receive");
        let e2 = sub2.recv().await.expect("subscriber 2 should receive");
        assert_eq!(e1, e2);
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = ChangeBus::default();
        assert_eq!(bus.publish(event(1)), 0);
    }

    #[test]
    fn dropping_subscription_unregisters_it() {
        let bus = ChangeBus::default();
        let a = bus.subscribe();
        let b = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        drop(a);
        assert_eq!(bus.subscriber_count(), 1);
        drop(b);
        assert_eq!(bus.subscriber_count(), 0);
    }
}
