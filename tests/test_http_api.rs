//! End-to-end HTTP test: serve the router in-process and drive it with reqwest.

use serde_json::{json, Value as JsonValue};
use std::sync::Arc;
use tracklog::{transport, TrackTypeRegistry};

const TEST_TRACK_TYPES: &str = include_str!("fixtures/test_track_types.json");

async fn spawn_server() -> Result<String, Box<dyn std::error::Error>> {
    let registry = TrackTypeRegistry::from_json_str(TEST_TRACK_TYPES)?;
    let app_state = transport::http::AppState::new(Arc::new(registry));
    let router = transport::http::create_router(app_state);

    // Bind to an ephemeral port to avoid conflicts between tests.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Ok(format!("http://127.0.0.1:{}", port))
}

#[tokio::test]
async fn health_reports_registry_size() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_server().await?;
    let resp = reqwest::get(format!("{}/health", base_url)).await?;
    assert_eq!(resp.status(), 200);

    let body: JsonValue = resp.json().await?;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["status"], json!("ok"));
    assert_eq!(body["data"]["track_types"], json!(8));
    Ok(())
}

#[tokio::test]
async fn lists_and_fetches_track_types() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_server().await?;
    let client = reqwest::Client::new();

    let all: Vec<JsonValue> = client
        .get(format!("{}/api/track-types", base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(all.len(), 8);

    let with_data: Vec<JsonValue> = client
        .get(format!("{}/api/track-types?with_data=true", base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(with_data.len(), 5);

    let one: JsonValue = client
        .get(format!("{}/api/track-types/DATA_TRACK_4", base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(
        one,
        json!({
            "id": "DATA_TRACK_4",
            "title": "Data track",
            "fields": { "dataField1": { "min": 1, "max": 5 } }
        })
    );

    let missing = client
        .get(format!("{}/api/track-types/NOT_A_REAL_TYPE", base_url))
        .send()
        .await?;
    assert_eq!(missing.status(), 404);
    Ok(())
}

#[tokio::test]
async fn validates_tracks() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_server().await?;
    let client = reqwest::Client::new();
    let url = format!("{}/api/tracks/validate", base_url);

    let ok = client
        .post(&url)
        .json(&json!({
            "track_type": "DATA_TRACK_1",
            "duration": 5,
            "data": { "dataField1": 1, "dataField2": "string", "dataField3": true }
        }))
        .send()
        .await?;
    assert_eq!(ok.status(), 200);
    let body: JsonValue = ok.json().await?;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["track_type"], json!("DATA_TRACK_1"));
    assert_eq!(body["data"]["duration"], json!(5.0));
    assert_eq!(body["data"]["data"]["dataField2"], json!("string"));
    assert!(body["data"]["date"].is_string());

    let rejected = client
        .post(&url)
        .json(&json!({
            "track_type": "DATA_TRACK_1",
            "data": { "invalidDataField": "test" }
        }))
        .send()
        .await?;
    assert_eq!(rejected.status(), 400);
    let body: JsonValue = rejected.json().await?;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("unknown field: invalidDataField"));
    assert_eq!(body["data"]["code"], json!("UNKNOWN_FIELD"));
    assert_eq!(body["data"]["field"], json!("invalidDataField"));

    let no_data = client
        .post(&url)
        .json(&json!({ "track_type": "NO_DATA_TRACK", "data": { "dataField1": 1 } }))
        .send()
        .await?;
    assert_eq!(no_data.status(), 400);
    let body: JsonValue = no_data.json().await?;
    assert_eq!(body["data"]["code"], json!("DATA_NOT_ACCEPTED"));

    let malformed = client
        .post(&url)
        .header("content-type", "application/json")
        .body("{\"data\": {}}")
        .send()
        .await?;
    assert_eq!(malformed.status(), 422);
    Ok(())
}
