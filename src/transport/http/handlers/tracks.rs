use crate::domain::track::NewTrack;
use crate::transport::http::handlers::common::rejection;
use crate::transport::http::types::{json_422, ApiResponse, AppState};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    post,
    path = "/api/tracks/validate",
    request_body = NewTrack,
    responses(
        (status = 200, description = "Track is valid; normalized record in `data`", body = ApiResponse),
        (status = 400, description = "Track rejected; reason in `error`, `{ code, field }` in `data`", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn validate_track_handler(
    State(state): State<AppState>,
    request: Result<Json<NewTrack>, JsonRejection>,
) -> impl IntoResponse {
    let Json(new_track) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_422(e, "{\"track_type\": \"...\", \"date\"?, \"duration\"?, \"data\"?}")
                .into_response()
        }
    };

    match state.tracks.prepare(new_track) {
        Ok(track) => match serde_json::to_value(&track) {
            Ok(data) => (StatusCode::OK, Json(ApiResponse::ok(data))).into_response(),
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::failure(format!("Failed to encode track: {}", e), None)),
            )
                .into_response(),
        },
        Err(err) => rejection(&err).into_response(),
    }
}
