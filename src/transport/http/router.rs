use crate::domain::track::{NewTrack, Track, TrackType};
use crate::transport::http::handlers::{health, track_types, tracks};
use crate::transport::http::types::{ApiResponse, TrackTypeQuery};
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        track_types::list_track_types_handler,
        track_types::get_track_type_handler,
        tracks::validate_track_handler
    ),
    components(schemas(ApiResponse, TrackTypeQuery, TrackType, NewTrack, Track))
)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/api/track-types", get(track_types::list_track_types_handler))
        .route(
            "/api/track-types/:track_type",
            get(track_types::get_track_type_handler),
        )
        .route("/api/tracks/validate", post(tracks::validate_track_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
