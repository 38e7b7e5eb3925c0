//! Revuoo domain types shared by the database, event and API layers.
//!
//! - [`review`]: review moderation statuses and the row-level change event
//!   emitted when a review is updated.
//! - [`notification`]: the business summary returned by the enrichment
//!   lookup and the display-ready [`EnrichedNotification`](notification::EnrichedNotification).

pub mod error;
pub mod notification;
pub mod review;
pub mod types;
