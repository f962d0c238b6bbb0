// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session lifecycle tests over the HTTP API.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use some_tracker::models::RawGeoSample;
use tower::ServiceExt;

mod common;

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

fn walk_samples(points: usize) -> Value {
    let raw: Vec<RawGeoSample> = common::synthetic_walk(points)
        .into_iter()
        .map(RawGeoSample::from)
        .collect();
    json!({ "samples": raw })
}

async fn start(app: &Router, activity: &str) -> u64 {
    let response = send(
        app,
        "POST",
        "/api/sessions",
        Some(json!({ "activity_type": activity, "weight_kg": 70.0 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    common::json_body(response).await["id"].as_u64().unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let (app, _state) = common::create_test_app();
    let response = send(&app, "GET", "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::json_body(response).await["status"], "ok");
}

#[tokio::test]
async fn test_session_lifecycle() {
    let (app, state) = common::create_test_app();
    let id = start(&app, "Walk").await;

    let response = send(
        &app,
        "POST",
        &format!("/api/sessions/{}/samples", id),
        Some(walk_samples(60)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::json_body(response).await;
    assert_eq!(body["accepted"], 60);
    assert_eq!(body["sample_count"], 60);

    // Live summary while still recording
    let response = send(&app, "GET", &format!("/api/sessions/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::json_body(response).await;
    assert_eq!(body["status"], "recording");
    assert_eq!(body["activity_type"], "walk");
    assert_eq!(body["sample_count"], 60);
    assert!(body["metrics"]["total_distance_meters"].as_f64().unwrap() > 500.0);
    assert!(!body["polyline"].as_str().unwrap().is_empty());

    let response = send(
        &app,
        "POST",
        &format!("/api/sessions/{}/stop?end_time=2099-01-01T00:00:00Z", id),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::json_body(response).await;
    assert_eq!(body["status"], "stopped");
    assert_eq!(body["end_time"], "2099-01-01T00:00:00Z");
    assert!(body["metrics"]["calories_burned"].as_u64().unwrap() > 0);
    assert!(body["display"]["distance"].as_str().unwrap().ends_with(" m"));

    assert_eq!(state.sessions.len(), 1);
}

#[tokio::test]
async fn test_append_after_stop_conflicts() {
    let (app, _state) = common::create_test_app();
    let id = start(&app, "run").await;

    let response = send(&app, "POST", &format!("/api/sessions/{}/stop", id), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(
        &app,
        "POST",
        &format!("/api/sessions/{}/samples", id),
        Some(walk_samples(3)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(common::json_body(response).await["error"], "session_stopped");
}

#[tokio::test]
async fn test_stop_twice_keeps_first_end_time() {
    let (app, _state) = common::create_test_app();
    let id = start(&app, "hike").await;

    let first = send(
        &app,
        "POST",
        &format!("/api/sessions/{}/stop?end_time=2099-01-01T00:00:00Z", id),
        None,
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = send(
        &app,
        "POST",
        &format!("/api/sessions/{}/stop?end_time=2099-06-01T00:00:00Z", id),
        None,
    )
    .await;
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(
        common::json_body(second).await["end_time"],
        "2099-01-01T00:00:00Z"
    );
}

#[tokio::test]
async fn test_invalid_stop_time() {
    let (app, _state) = common::create_test_app();
    let id = start(&app, "walk").await;

    let response = send(
        &app,
        "POST",
        &format!("/api/sessions/{}/stop?end_time=soon", id),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_coordinate_rejects_batch() {
    let (app, state) = common::create_test_app();
    let id = start(&app, "walk").await;

    let body = json!({
        "samples": [
            { "latitude": 37.0, "longitude": -122.0, "timestamp": "2024-06-01T08:00:00Z" },
            { "latitude": 91.0, "longitude": -122.0, "timestamp": "2024-06-01T08:00:10Z" }
        ]
    });
    let response = send(&app, "POST", &format!("/api/sessions/{}/samples", id), Some(body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(common::json_body(response).await["error"], "invalid_coordinate");

    let info = state.sessions.list_sessions();
    assert_eq!(info[0].sample_count, 0);
}

#[tokio::test]
async fn test_out_of_order_batch_rejected() {
    let (app, state) = common::create_test_app();
    let id = start(&app, "walk").await;

    let body = json!({
        "samples": [
            { "latitude": 37.0, "longitude": -122.0, "timestamp": "2024-06-01T08:00:10Z" },
            { "latitude": 37.001, "longitude": -122.0, "timestamp": "2024-06-01T08:00:00Z" }
        ]
    });
    let response = send(&app, "POST", &format!("/api/sessions/{}/samples", id), Some(body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        common::json_body(response).await["error"],
        "non_chronological_sample"
    );
    assert_eq!(state.sessions.list_sessions()[0].sample_count, 0);
}

#[tokio::test]
async fn test_empty_sample_batch_rejected() {
    let (app, _state) = common::create_test_app();
    let id = start(&app, "walk").await;

    let response = send(
        &app,
        "POST",
        &format!("/api/sessions/{}/samples", id),
        Some(json!({ "samples": [] })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_oversized_batch_rejected() {
    let config = some_tracker::config::Config {
        max_samples_per_request: 10,
        ..Default::default()
    };
    let (app, _state) = common::create_test_app_with(config);
    let id = start(&app, "walk").await;

    let response = send(
        &app,
        "POST",
        &format!("/api/sessions/{}/samples", id),
        Some(walk_samples(11)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_start_session_validation() {
    let (app, _state) = common::create_test_app();

    let response = send(
        &app,
        "POST",
        "/api/sessions",
        Some(json!({ "activity_type": "" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        &app,
        "POST",
        "/api/sessions",
        Some(json!({ "activity_type": "walk", "weight_kg": 0.0 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_session_is_not_found() {
    let (app, _state) = common::create_test_app();

    for (method, uri) in [
        ("GET", "/api/sessions/999"),
        ("DELETE", "/api/sessions/999"),
        ("POST", "/api/sessions/999/stop"),
        ("GET", "/api/sessions/999/track"),
    ] {
        let response = send(&app, method, uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{} {}", method, uri);
        assert_eq!(common::json_body(response).await["error"], "not_found");
    }
}

#[tokio::test]
async fn test_delete_session() {
    let (app, state) = common::create_test_app();
    let id = start(&app, "bike").await;

    let response = send(&app, "DELETE", &format!("/api/sessions/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::json_body(response).await["success"], true);
    assert!(state.sessions.is_empty());

    let response = send(&app, "GET", &format!("/api/sessions/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_sessions_filters_by_activity() {
    let (app, _state) = common::create_test_app();
    let walk = start(&app, "walk").await;
    let _run = start(&app, "run").await;
    let walk_again = start(&app, "Walk").await;

    let response = send(&app, "GET", "/api/sessions?activity_type=WALK", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::json_body(response).await;
    assert_eq!(body["total"], 2);

    let ids: Vec<u64> = body["sessions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_u64().unwrap())
        .collect();
    // Newest first
    assert_eq!(ids, vec![walk_again, walk]);

    let response = send(&app, "GET", "/api/sessions", None).await;
    assert_eq!(common::json_body(response).await["total"], 3);

    let response = send(&app, "GET", "/api/sessions?after=2999-01-01T00:00:00Z", None).await;
    assert_eq!(common::json_body(response).await["total"], 0);
}

#[tokio::test]
async fn test_list_sessions_invalid_after() {
    let (app, _state) = common::create_test_app();
    let response = send(&app, "GET", "/api/sessions?after=invalid-date", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_stats_count_only_stopped_sessions() {
    let (app, _state) = common::create_test_app();
    let stopped = start(&app, "walk").await;
    let _live = start(&app, "walk").await;

    send(
        &app,
        "POST",
        &format!("/api/sessions/{}/samples", stopped),
        Some(walk_samples(20)),
    )
    .await;
    send(&app, "POST", &format!("/api/sessions/{}/stop", stopped), None).await;

    let response = send(&app, "GET", "/api/stats", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::json_body(response).await;
    assert_eq!(body["total_sessions"], 1);
    assert_eq!(body["sessions_by_activity"]["walk"], 1);
    assert!(body["total_distance_meters"].as_f64().unwrap() > 100.0);
}

#[tokio::test]
async fn test_track_geojson() {
    let (app, _state) = common::create_test_app();
    let id = start(&app, "walk").await;
    send(
        &app,
        "POST",
        &format!("/api/sessions/{}/samples", id),
        Some(walk_samples(5)),
    )
    .await;

    let response = send(&app, "GET", &format!("/api/sessions/{}/track", id), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::json_body(response).await;
    assert_eq!(body["type"], "Feature");
    assert_eq!(body["geometry"]["type"], "LineString");
    assert_eq!(body["geometry"]["coordinates"].as_array().unwrap().len(), 5);
    // GeoJSON positions are [longitude, latitude]
    assert_eq!(body["geometry"]["coordinates"][0][0], -122.087);
    assert_eq!(body["properties"]["activity_type"], "walk");
}

#[tokio::test]
async fn test_security_headers_present() {
    let (app, _state) = common::create_test_app();
    let response = send(&app, "GET", "/health", None).await;
    let headers = response.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
}
