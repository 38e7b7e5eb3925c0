//! Review models and moderation DTOs.

use revuoo_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `reviews` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub business_id: DbId,
    pub title: String,
    pub body: String,
    pub rating: i16,
    pub status: String,
    pub rejection_reason: Option<String>,
    pub moderated_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new review. Reviews always start out pending.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReview {
    pub business_id: DbId,
    pub title: String,
    pub body: String,
    pub rating: i16,
}

/// Request body for the reject endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RejectReview {
    pub reason: Option<String>,
}
