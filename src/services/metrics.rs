// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pace, speed and calorie derivation.
//!
//! All functions here are total over their input domain: a stationary or
//! instantaneous session yields guarded values rather than an error.

use crate::models::units::{Kilograms, Meters, Minutes};
use crate::models::{ActivitySession, ActivityType, DerivedMetrics};
use crate::services::distance::{cumulative_distance, cumulative_distance_filtered, LegFilter};

/// MET used for activity types outside the built-in table.
pub const DEFAULT_MET: f64 = 4.0;

/// Metabolic equivalent for an activity type.
pub fn met(activity: &ActivityType) -> f64 {
    match activity {
        ActivityType::Walk => 3.5,
        ActivityType::Hike => 6.0,
        ActivityType::Run => 8.0,
        ActivityType::Bike => 7.5,
        ActivityType::Other(_) => DEFAULT_MET,
    }
}

/// Minutes per kilometer, or `None` when no distance was covered.
pub fn pace(distance: Meters, duration: Minutes) -> Option<f64> {
    if distance.value() <= 0.0 || !distance.value().is_finite() {
        return None;
    }
    let pace = duration.value() / distance.kilometers();
    pace.is_finite().then_some(pace)
}

/// Kilometers per hour. Zero-duration sessions report 0.
pub fn speed(distance: Meters, duration: Minutes) -> f64 {
    if duration.value() <= 0.0 {
        return 0.0;
    }
    let speed = distance.kilometers() / duration.hours();
    if speed.is_finite() {
        speed
    } else {
        0.0
    }
}

/// Estimated energy in kcal: `MET * kg * hours`, rounded.
pub fn calories_burned(activity: &ActivityType, duration: Minutes, weight: Kilograms) -> u32 {
    let kcal = met(activity) * weight.value() * duration.hours();
    if kcal.is_finite() && kcal > 0.0 {
        kcal.round() as u32
    } else {
        0
    }
}

/// Derive all metrics for a session from its raw track.
pub fn compute_metrics(session: &ActivitySession) -> DerivedMetrics {
    let distance = cumulative_distance(session.track.samples());
    derive(session, distance)
}

/// Like [`compute_metrics`], but sums the track through a leg filter.
pub fn compute_metrics_with(session: &ActivitySession, filter: &LegFilter) -> DerivedMetrics {
    if !filter.is_enabled() {
        return compute_metrics(session);
    }
    let filtered = cumulative_distance_filtered(session.track.samples(), filter);
    derive(session, filtered.distance)
}

fn derive(session: &ActivitySession, distance: Meters) -> DerivedMetrics {
    let duration = session.duration();
    DerivedMetrics {
        total_distance_meters: distance,
        duration_minutes: duration,
        pace_min_per_km: pace(distance, duration),
        speed_kmh: speed(distance, duration),
        calories_burned: calories_burned(&session.activity_type, duration, session.user_weight_kg),
    }
}
