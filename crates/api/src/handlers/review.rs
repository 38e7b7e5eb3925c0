//! Handlers for the review moderation workflow.
//!
//! Approving a review is what ultimately raises the live toast: the
//! `reviews` UPDATE fires the change trigger, and every connected session
//! sees a `pending -> approved` transition.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;

use revuoo_core::error::CoreError;
use revuoo_core::review::{validate_rejection_reason, validate_transition, ReviewStatus};
use revuoo_core::types::DbId;
use revuoo_db::models::review::{RejectReview, Review};
use revuoo_db::repositories::ReviewRepo;

use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::response::data;
use crate::state::AppState;

/// GET /api/v1/reviews/pending
///
/// Reviews awaiting moderation, oldest first.
pub async fn list_pending(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let reviews = ReviewRepo::list_pending(&state.pool, params.limit(), params.offset()).await?;
    Ok(data(reviews))
}

/// POST /api/v1/reviews/{id}/approve
pub async fn approve(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let review = moderate(&state, id, ReviewStatus::Approved, None).await?;
    Ok(data(review))
}

/// POST /api/v1/reviews/{id}/reject
///
/// The body is optional; `{ "reason": "..." }` records why.
pub async fn reject(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Option<Json<RejectReview>>,
) -> AppResult<impl IntoResponse> {
    let input = body.map(|Json(b)| b).unwrap_or_default();
    validate_rejection_reason(input.reason.as_deref())?;

    let review = moderate(&state, id, ReviewStatus::Rejected, input.reason.as_deref()).await?;
    Ok(data(review))
}

/// Check the current status, then apply the guarded update.
///
/// A moderator that loses a race with another one gets a 409 from the
/// guarded update even though the pre-check passed.
async fn moderate(
    state: &AppState,
    id: DbId,
    target: ReviewStatus,
    reason: Option<&str>,
) -> AppResult<Review> {
    let existing = ReviewRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Review",
            id,
        }))?;

    let current: ReviewStatus = existing.status.parse()?;
    validate_transition(current, target)?;

    let review = ReviewRepo::moderate(&state.pool, id, target, reason)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Review was moderated concurrently".to_string(),
            ))
        })?;

    tracing::info!(review_id = id, status = %target, "Review moderated");

    Ok(review)
}
