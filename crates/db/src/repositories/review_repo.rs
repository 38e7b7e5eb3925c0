//! Repository for the `reviews` table.
//!
//! Status changes here are picked up by the `notify_review_change` trigger,
//! which publishes the old and new row image on the `review_changes`
//! channel.

use revuoo_core::review::{ReviewStatus, STATUS_PENDING};
use revuoo_core::types::DbId;
use sqlx::PgPool;

use crate::models::review::{CreateReview, Review};

/// Column list for reviews queries.
const COLUMNS: &str = "id, business_id, title, body, rating, status, rejection_reason, \
    moderated_at, created_at, updated_at";

/// Provides CRUD and moderation operations for reviews.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a new pending review, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateReview) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (business_id, title, body, rating)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(input.business_id)
            .bind(&input.title)
            .bind(&input.body)
            .bind(input.rating)
            .fetch_one(pool)
            .await
    }

    /// Find a review by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE id = $1");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List reviews awaiting moderation, oldest first.
    pub async fn list_pending(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews
             WHERE status = $1
             ORDER BY created_at ASC, id ASC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(STATUS_PENDING)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Move a pending review to `status`.
    ///
    /// The update only applies while the row is still pending, so two
    /// moderators racing on the same review cannot both succeed. Returns
    /// `None` when the review is missing or no longer pending.
    pub async fn moderate(
        pool: &PgPool,
        id: DbId,
        status: ReviewStatus,
        rejection_reason: Option<&str>,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "UPDATE reviews
             SET status = $2, rejection_reason = $3, moderated_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND status = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .bind(status.as_str())
            .bind(rejection_reason)
            .bind(STATUS_PENDING)
            .fetch_optional(pool)
            .await
    }
}
