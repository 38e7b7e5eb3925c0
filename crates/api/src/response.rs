//! Response envelope for API handlers.
//!
//! Successful responses are wrapped as `{ "data": ... }`; errors use the
//! `{ "error", "code" }` shape produced by [`AppError`](crate::error::AppError).

use axum::Json;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Wrap `data` in the envelope, ready to return from a handler.
pub fn data<T: Serialize>(data: T) -> Json<DataResponse<T>> {
    Json(DataResponse { data })
}
