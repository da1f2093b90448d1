use crate::domain::track::TrackType;
use crate::transport::http::handlers::common::not_found;
use crate::transport::http::types::{ApiResponse, AppState, TrackTypeQuery};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/track-types",
    params(
        ("with_data" = Option<bool>, Query, description = "Only list track types that accept a payload")
    ),
    responses(
        (status = 200, description = "All known track types", body = [TrackType])
    )
)]
pub async fn list_track_types_handler(
    State(state): State<AppState>,
    Query(query): Query<TrackTypeQuery>,
) -> impl IntoResponse {
    let track_types: Vec<&TrackType> = state
        .registry
        .iter()
        .filter(|t| !query.with_data || !t.fields.is_empty())
        .collect();
    (StatusCode::OK, Json(track_types)).into_response()
}

#[utoipa::path(
    get,
    path = "/api/track-types/{track_type}",
    params(
        ("track_type" = String, Path, description = "Track type identifier (e.g. CONSUMED_WATER)")
    ),
    responses(
        (status = 200, description = "Track type definition", body = TrackType),
        (status = 404, description = "Unknown track type", body = ApiResponse)
    )
)]
pub async fn get_track_type_handler(
    State(state): State<AppState>,
    Path(track_type): Path<String>,
) -> impl IntoResponse {
    match state.registry.get(&track_type) {
        Some(t) => (StatusCode::OK, Json(t)).into_response(),
        None => not_found(format!("unknown track type: {}", track_type)).into_response(),
    }
}
