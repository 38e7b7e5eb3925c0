//! Revuoo live review notifications.
//!
//! This crate carries review change events from the database to connected
//! client sessions:
//!
//! - [`ChangeStreamListener`]: `LISTEN`s on the review change channel and
//!   decodes each payload into a [`ReviewChangeEvent`](revuoo_core::review::ReviewChangeEvent).
//! - [`ChangeBus`]: in-process fan-out hub backed by `tokio::sync::broadcast`;
//!   each session holds exactly one [`Subscription`].
//! - [`filter`]: keeps only `pending -> approved` transitions.
//! - [`enrich`]: looks up the business name and slug for a qualifying event.
//! - [`NotificationPresenter`]: the per-session toast state machine.
//! - [`NotificationSession`]: wires the above together for one client.

pub mod bus;
pub mod enrich;
pub mod error;
pub mod filter;
pub mod listener;
pub mod presenter;
pub mod session;

pub use bus::{ChangeBus, Subscription};
pub use enrich::{BusinessLookup, PgBusinessLookup};
pub use error::EventError;
pub use listener::ChangeStreamListener;
pub use presenter::{NotificationPresenter, PresenterCommand, PresenterState};
pub use session::{NotificationSession, SessionConfig};
