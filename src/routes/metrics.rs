// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Stateless metrics for a track recorded on the client.

use crate::error::{AppError, Result};
use crate::models::units::Kilograms;
use crate::models::{ActivitySession, ActivityType, DerivedMetrics, DisplayMetrics, RawGeoSample};
use crate::models::{GeoSample, Track};
use crate::services::distance::LegFilter;
use crate::services::export::encode_track_polyline;
use crate::services::metrics::compute_metrics_with;
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/metrics", post(compute))
}

/// Metrics plus their display strings and a map polyline.
#[derive(Serialize, Debug, Clone)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MetricsView {
    pub metrics: DerivedMetrics,
    pub display: DisplayMetrics,
    /// Encoded polyline (precision 5) of the track.
    pub polyline: String,
}

/// Derive metrics for a snapshot and render them for display.
pub(crate) fn metrics_view(session: &ActivitySession, filter: &LegFilter) -> Result<MetricsView> {
    let metrics = compute_metrics_with(session, filter);
    let polyline = encode_track_polyline(session.track.samples())
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;

    Ok(MetricsView {
        display: DisplayMetrics::from(&metrics),
        metrics,
        polyline,
    })
}

/// Convert wire samples, rejecting any out-of-range coordinate.
pub(crate) fn validate_samples(
    samples: Vec<RawGeoSample>,
    max_samples: usize,
) -> Result<Vec<GeoSample>> {
    if samples.len() > max_samples {
        return Err(AppError::BadRequest(format!(
            "Too many samples: {} (max {})",
            samples.len(),
            max_samples
        )));
    }

    samples
        .into_iter()
        .map(|raw| GeoSample::try_from(raw).map_err(AppError::from))
        .collect()
}

#[derive(Deserialize, Validate)]
pub struct ComputeMetricsRequest {
    #[validate(length(min = 1, max = 64))]
    activity_type: String,
    #[validate(range(min = 1.0, max = 500.0))]
    weight_kg: Option<f64>,
    /// Defaults to the first sample's timestamp.
    start_time: Option<DateTime<Utc>>,
    /// Defaults to the last sample's timestamp.
    end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    samples: Vec<RawGeoSample>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ComputeMetricsResponse {
    pub activity_type: String,
    pub sample_count: usize,
    #[serde(flatten)]
    pub view: MetricsView,
}

/// Compute metrics for an uploaded track without storing anything.
async fn compute(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ComputeMetricsRequest>,
) -> Result<Json<ComputeMetricsResponse>> {
    request.validate()?;

    let samples = validate_samples(request.samples, state.config.max_samples_per_request)?;
    let track = Track::from_samples(samples)?;

    let now = Utc::now();
    let start_time = request
        .start_time
        .or_else(|| track.first().map(|s| s.timestamp()))
        .unwrap_or(now);
    let end_time = request
        .end_time
        .or_else(|| track.last().map(|s| s.timestamp()))
        .unwrap_or(start_time);

    if end_time < start_time {
        return Err(AppError::BadRequest(
            "end_time must not be earlier than start_time".to_string(),
        ));
    }

    let session = ActivitySession {
        activity_type: ActivityType::from(request.activity_type),
        track,
        start_time,
        end_time,
        user_weight_kg: request
            .weight_kg
            .map(Kilograms)
            .unwrap_or(state.config.default_weight_kg),
    };

    tracing::debug!(
        activity = %session.activity_type,
        samples = session.track.len(),
        "Computing metrics for uploaded track"
    );

    let view = metrics_view(&session, &state.config.leg_filter)?;

    Ok(Json(ComputeMetricsResponse {
        activity_type: session.activity_type.to_string(),
        sample_count: session.track.len(),
        view,
    }))
}
