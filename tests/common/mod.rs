// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{DateTime, Duration, TimeZone, Utc};
use some_tracker::config::Config;
use some_tracker::models::GeoSample;
use some_tracker::routes::create_router;
use some_tracker::AppState;
use std::sync::Arc;

/// Create a test app with default config.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Config::default())
}

#[allow(dead_code)]
pub fn create_test_app_with(config: Config) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(config));
    (create_router(state.clone()), state)
}

/// Fixed reference instant for synthetic tracks.
#[allow(dead_code)]
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
}

#[allow(dead_code)]
pub fn sample(lat: f64, lon: f64, secs: i64) -> GeoSample {
    GeoSample::new(lat, lon, t0() + Duration::seconds(secs)).expect("valid test coordinate")
}

/// A walk heading roughly north-east from Rancho San Antonio, one fix
/// every 10 seconds.
#[allow(dead_code)]
pub fn synthetic_walk(points: usize) -> Vec<GeoSample> {
    (0..points)
        .map(|i| {
            let step = i as f64;
            sample(
                37.3330 + step * 0.00010,
                -122.0870 + step * 0.00004 + (step * 0.7).sin() * 0.00002,
                i as i64 * 10,
            )
        })
        .collect()
}

/// Read a JSON response body.
#[allow(dead_code)]
pub async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}
