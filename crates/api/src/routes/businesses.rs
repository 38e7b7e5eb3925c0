use axum::routing::get;
use axum::Router;

use crate::handlers::business;
use crate::state::AppState;

/// Routes mounted at `/businesses`.
///
/// ```text
/// GET    /{slug}    -> get_by_slug
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{slug}", get(business::get_by_slug))
}
