// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session routes: start, ingest, stop, summarize and discard tracks.

use crate::error::{AppError, Result};
use crate::models::units::Kilograms;
use crate::models::{ActivitySession, ActivityType, RawGeoSample, SessionStatus, SessionTotals};
use crate::routes::metrics::{metrics_view, validate_samples, MetricsView};
use crate::services::distance::LegFilter;
use crate::services::export::track_to_geojson;
use crate::services::metrics::compute_metrics_with;
use crate::time_utils::{format_utc_rfc3339, parse_utc_rfc3339};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/sessions", post(start_session).get(list_sessions))
        .route("/api/sessions/{id}", get(get_session).delete(delete_session))
        .route("/api/sessions/{id}/samples", post(append_samples))
        .route("/api/sessions/{id}/stop", post(stop_session))
        .route("/api/sessions/{id}/track", get(get_track))
        .route("/api/stats", get(get_stats))
}

// ─── Start ───────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct StartSessionRequest {
    #[validate(length(min = 1, max = 64))]
    activity_type: String,
    /// Falls back to the configured default weight.
    #[validate(range(min = 1.0, max = 500.0))]
    weight_kg: Option<f64>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StartSessionResponse {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    pub activity_type: String,
    pub start_time: String,
}

async fn start_session(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StartSessionRequest>,
) -> Result<(StatusCode, Json<StartSessionResponse>)> {
    request.validate()?;

    let activity_type = ActivityType::from(request.activity_type);
    let weight = request
        .weight_kg
        .map(Kilograms)
        .unwrap_or(state.config.default_weight_kg);
    let start_time = Utc::now();

    let id = state
        .sessions
        .start_session(activity_type.clone(), weight, start_time);

    Ok((
        StatusCode::CREATED,
        Json(StartSessionResponse {
            id,
            activity_type: activity_type.to_string(),
            start_time: format_utc_rfc3339(start_time),
        }),
    ))
}

// ─── Ingest ──────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct AppendSamplesRequest {
    #[validate(length(min = 1))]
    samples: Vec<RawGeoSample>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AppendSamplesResponse {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    pub accepted: usize,
    pub sample_count: usize,
}

/// Append a batch of samples. The whole batch is rejected if any sample
/// has an invalid coordinate or is out of chronological order.
async fn append_samples(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(request): Json<AppendSamplesRequest>,
) -> Result<Json<AppendSamplesResponse>> {
    request.validate()?;

    let samples = validate_samples(request.samples, state.config.max_samples_per_request)
        .inspect_err(|e| tracing::warn!(session_id = id, error = %e, "Rejected sample batch"))?;
    let accepted = samples.len();
    let sample_count = state.sessions.append_samples(id, samples)?;

    Ok(Json(AppendSamplesResponse {
        id,
        accepted,
        sample_count,
    }))
}

// ─── Summary ─────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SessionSummaryResponse {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    pub activity_type: String,
    pub status: String,
    pub start_time: String,
    pub end_time: String,
    pub sample_count: usize,
    #[serde(flatten)]
    pub view: MetricsView,
}

fn status_label(status: SessionStatus) -> &'static str {
    match status {
        SessionStatus::Recording => "recording",
        SessionStatus::Stopped => "stopped",
    }
}

fn summarize(
    id: u64,
    status: SessionStatus,
    snapshot: &ActivitySession,
    filter: &LegFilter,
) -> Result<SessionSummaryResponse> {
    let view = metrics_view(snapshot, filter)?;

    Ok(SessionSummaryResponse {
        id,
        activity_type: snapshot.activity_type.to_string(),
        status: status_label(status).to_string(),
        start_time: format_utc_rfc3339(snapshot.start_time),
        end_time: format_utc_rfc3339(snapshot.end_time),
        sample_count: snapshot.track.len(),
        view,
    })
}

/// Current metrics for a session. A recording session is measured up to now.
async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<SessionSummaryResponse>> {
    let (status, snapshot) = state.sessions.snapshot_with_status(id, Utc::now())?;
    Ok(Json(summarize(
        id,
        status,
        &snapshot,
        &state.config.leg_filter,
    )?))
}

// ─── Stop ────────────────────────────────────────────────────

#[derive(Deserialize)]
struct StopQuery {
    /// Explicit end time (RFC3339); defaults to now.
    end_time: Option<String>,
}

/// Freeze the track and return the final summary.
async fn stop_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Query(params): Query<StopQuery>,
) -> Result<Json<SessionSummaryResponse>> {
    let end_time = match params.end_time.as_deref() {
        Some(raw) => parse_utc_rfc3339(raw).ok_or_else(|| {
            AppError::BadRequest("Invalid 'end_time' parameter: must be RFC3339 datetime".to_string())
        })?,
        None => Utc::now(),
    };

    let snapshot = state.sessions.stop_session(id, end_time)?;
    Ok(Json(summarize(
        id,
        SessionStatus::Stopped,
        &snapshot,
        &state.config.leg_filter,
    )?))
}

// ─── Track export ────────────────────────────────────────────

/// Session track as a GeoJSON feature.
async fn get_track(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<geojson::Feature>> {
    let snapshot = state.sessions.snapshot(id, Utc::now())?;
    let metrics = compute_metrics_with(&snapshot, &state.config.leg_filter);
    Ok(Json(track_to_geojson(&snapshot, &metrics)))
}

// ─── Delete ──────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteSessionResponse {
    pub success: bool,
    pub message: String,
}

/// Discard a session log and its track.
async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<DeleteSessionResponse>> {
    state.sessions.delete_session(id)?;
    Ok(Json(DeleteSessionResponse {
        success: true,
        message: format!("Session {} deleted", id),
    }))
}

// ─── Listing ─────────────────────────────────────────────────

#[derive(Deserialize)]
struct ListQuery {
    /// Filter by activity type
    activity_type: Option<String>,
    /// Only sessions started at or after this time (RFC3339)
    after: Option<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SessionListItem {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    pub activity_type: String,
    pub status: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub sample_count: usize,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SessionListResponse {
    pub sessions: Vec<SessionListItem>,
    pub total: usize,
}

async fn list_sessions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListQuery>,
) -> Result<Json<SessionListResponse>> {
    let after = params
        .after
        .as_deref()
        .map(|raw| {
            parse_utc_rfc3339(raw).ok_or_else(|| {
                AppError::BadRequest("Invalid 'after' parameter: must be RFC3339 datetime".to_string())
            })
        })
        .transpose()?;
    let activity_filter = params.activity_type.as_deref().map(ActivityType::from);

    let sessions: Vec<SessionListItem> = state
        .sessions
        .list_sessions()
        .into_iter()
        .filter(|s| activity_filter.as_ref().is_none_or(|a| *a == s.activity_type))
        .filter(|s| after.is_none_or(|after| s.start_time >= after))
        .map(|s| SessionListItem {
            id: s.id,
            activity_type: s.activity_type.to_string(),
            status: status_label(s.status).to_string(),
            start_time: format_utc_rfc3339(s.start_time),
            end_time: s.end_time.map(format_utc_rfc3339),
            sample_count: s.sample_count,
        })
        .collect();

    Ok(Json(SessionListResponse {
        total: sessions.len(),
        sessions,
    }))
}

// ─── Stats ───────────────────────────────────────────────────

/// Totals across stopped sessions.
async fn get_stats(State(state): State<Arc<AppState>>) -> Json<SessionTotals> {
    Json(state.sessions.totals(&state.config.leg_filter))
}
