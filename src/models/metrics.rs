// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Derived activity metrics.

use crate::models::units::{Meters, Minutes};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Metrics derived from a session's track.
///
/// Always recomputed from the samples; never stored as a source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DerivedMetrics {
    pub total_distance_meters: Meters,
    pub duration_minutes: Minutes,
    /// `None` when the session covered no distance.
    pub pace_min_per_km: Option<f64>,
    pub speed_kmh: f64,
    pub calories_burned: u32,
}

/// Human-readable rendering of [`DerivedMetrics`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DisplayMetrics {
    pub distance: String,
    pub duration: String,
    pub pace: String,
    pub speed: String,
    pub calories: String,
}
