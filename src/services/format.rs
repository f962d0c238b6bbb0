// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Display strings for activity metrics.

use crate::models::{DerivedMetrics, DisplayMetrics};

/// Placeholder shown when pace is undefined.
pub const PACE_PLACEHOLDER: &str = "--:--/km";

/// Slowest pace rendered verbatim, in min/km.
const SLOWEST_DISPLAY_PACE: f64 = 60.0;
/// Fastest pace rendered verbatim, in min/km.
const FASTEST_DISPLAY_PACE: f64 = 2.0;

/// Meters below 1 km, kilometers with one decimal from there on.
pub fn format_distance(meters: f64) -> String {
    if !meters.is_finite() || meters <= 0.0 {
        return "0 m".to_string();
    }
    if meters < 1000.0 {
        format!("{} m", meters.round() as u64)
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}

/// `"45m"`, `"1h 30m"` or `"2h"`, after rounding to whole minutes.
pub fn format_duration(minutes: f64) -> String {
    let total = if minutes.is_finite() && minutes > 0.0 {
        minutes.round() as u64
    } else {
        0
    };

    if total < 60 {
        return format!("{}m", total);
    }

    let (hours, mins) = (total / 60, total % 60);
    if mins == 0 {
        format!("{}h", hours)
    } else {
        format!("{}h {}m", hours, mins)
    }
}

/// `"m:ss/km"`, clamped for display outside 2..=60 min/km.
///
/// The clamp is cosmetic; the numeric pace is left untouched.
pub fn format_pace(min_per_km: f64) -> String {
    if !min_per_km.is_finite() || min_per_km <= 0.0 {
        return PACE_PLACEHOLDER.to_string();
    }
    if min_per_km > SLOWEST_DISPLAY_PACE {
        return ">60:00/km".to_string();
    }
    if min_per_km < FASTEST_DISPLAY_PACE {
        return "<2:00/km".to_string();
    }

    let total_seconds = (min_per_km * 60.0).round() as u64;
    format!("{}:{:02}/km", total_seconds / 60, total_seconds % 60)
}

/// Render an optional pace, using the placeholder when undefined.
pub fn format_pace_opt(min_per_km: Option<f64>) -> String {
    min_per_km.map_or_else(|| PACE_PLACEHOLDER.to_string(), format_pace)
}

pub fn format_speed(kmh: f64) -> String {
    if kmh.is_finite() && kmh > 0.0 {
        format!("{:.1} km/h", kmh)
    } else {
        "0.0 km/h".to_string()
    }
}

impl From<&DerivedMetrics> for DisplayMetrics {
    fn from(metrics: &DerivedMetrics) -> Self {
        Self {
            distance: format_distance(metrics.total_distance_meters.value()),
            duration: format_duration(metrics.duration_minutes.value()),
            pace: format_pace_opt(metrics.pace_min_per_km),
            speed: format_speed(metrics.speed_kmh),
            calories: format!("{} kcal", metrics.calories_burned),
        }
    }
}
