//! Handlers for public business profiles.

use axum::extract::{Path, State};
use axum::response::IntoResponse;

use revuoo_db::repositories::BusinessRepo;

use crate::error::{AppError, AppResult};
use crate::response::data;
use crate::state::AppState;

/// GET /api/v1/businesses/{slug}
///
/// The page a review toast links to. Businesses without a claimed slug are
/// not reachable here.
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let business = BusinessRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Business '{slug}' not found")))?;

    Ok(data(business))
}
