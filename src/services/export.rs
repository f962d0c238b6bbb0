// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Track export for map display (encoded polyline and GeoJSON).

use crate::models::{ActivitySession, DerivedMetrics, GeoSample};
use crate::time_utils::format_utc_rfc3339;
use geo::{BoundingRect, LineString, Rect};
use geojson::{Feature, Geometry, JsonObject};
use serde_json::json;

/// Precision of the Google encoded polyline format.
pub const POLYLINE_PRECISION: u32 = 5;

/// Track as a line string (x = longitude, y = latitude).
pub fn track_line_string(track: &[GeoSample]) -> LineString<f64> {
    track.iter().map(GeoSample::point).collect()
}

/// Bounding box of the track, `None` when empty.
pub fn track_bounds(track: &[GeoSample]) -> Option<Rect<f64>> {
    track_line_string(track).bounding_rect()
}

/// Encode the track as a precision-5 polyline.
pub fn encode_track_polyline(track: &[GeoSample]) -> Result<String, ExportError> {
    polyline::encode_coordinates(track_line_string(track), POLYLINE_PRECISION)
        .map_err(|e| ExportError::Polyline(e.to_string()))
}

/// GeoJSON feature for a session, with its metrics as properties.
pub fn track_to_geojson(session: &ActivitySession, metrics: &DerivedMetrics) -> Feature {
    let line = track_line_string(session.track.samples());
    let bbox = line
        .bounding_rect()
        .map(|r| vec![r.min().x, r.min().y, r.max().x, r.max().y]);

    let mut properties = JsonObject::new();
    properties.insert("activity_type".to_string(), json!(session.activity_type));
    properties.insert(
        "start_time".to_string(),
        json!(format_utc_rfc3339(session.start_time)),
    );
    properties.insert(
        "end_time".to_string(),
        json!(format_utc_rfc3339(session.end_time)),
    );
    properties.insert(
        "distance_meters".to_string(),
        json!(metrics.total_distance_meters),
    );
    properties.insert(
        "duration_minutes".to_string(),
        json!(metrics.duration_minutes),
    );
    properties.insert("calories_burned".to_string(), json!(metrics.calories_burned));

    Feature {
        bbox,
        geometry: Some(Geometry::new(geojson::Value::from(&line))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Errors from track export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to encode polyline: {0}")]
    Polyline(String),
}
