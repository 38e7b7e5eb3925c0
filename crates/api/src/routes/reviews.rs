//! Route definitions for the `/reviews` moderation resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::review;
use crate::state::AppState;

/// Routes mounted at `/reviews`.
///
/// ```text
/// GET    /pending          -> list_pending (?limit, ?offset)
/// POST   /{id}/approve     -> approve
/// POST   /{id}/reject      -> reject
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pending", get(review::list_pending))
        .route("/{id}/approve", post(review::approve))
        .route("/{id}/reject", post(review::reject))
}
