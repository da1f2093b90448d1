use crate::app::track_service::TrackService;
use crate::domain::track::TrackTypeRegistry;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<TrackTypeRegistry>,
    pub tracks: Arc<TrackService>,
}

impl AppState {
    pub fn new(registry: Arc<TrackTypeRegistry>) -> Self {
        Self {
            tracks: Arc::new(TrackService::new(registry.clone())),
            registry,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok(data: JsonValue) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>, data: Option<JsonValue>) -> Self {
        Self {
            success: false,
            data,
            error: Some(error.into()),
        }
    }
}

/// Query for `GET /api/track-types`.
#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct TrackTypeQuery {
    /// When true, only track types that accept a payload are listed.
    #[serde(default)]
    pub with_data: bool,
}

pub fn json_422(err: JsonRejection, expected: &str) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiResponse::failure(
            format!("Invalid JSON body: {} (expected: {})", err, expected),
            None,
        )),
    )
}
