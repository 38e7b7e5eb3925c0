pub mod businesses;
pub mod health;
pub mod reviews;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                 WebSocket (review approval toasts)
///
/// /reviews/pending                    list pending reviews
/// /reviews/{id}/approve               approve (POST)
/// /reviews/{id}/reject                reject (POST)
///
/// /businesses/{slug}                  business profile
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/reviews", reviews::router())
        .nest("/businesses", businesses::router())
}
