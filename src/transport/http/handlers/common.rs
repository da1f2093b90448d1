use crate::domain::track::TrackError;
use crate::transport::http::types::ApiResponse;
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;

/// 400 with the client-facing reason plus `{ code, field? }` for programmatic handling.
pub fn rejection(err: &TrackError) -> (StatusCode, Json<ApiResponse>) {
    let data = match err.field() {
        Some(field) => json!({ "code": err.code(), "field": field }),
        None => json!({ "code": err.code() }),
    };
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::failure(err.to_string(), Some(data))),
    )
}

pub fn not_found(message: String) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::failure(message, None)),
    )
}
