// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ground distance along a GPS track.
//!
//! Distances use the haversine formula on a spherical Earth. There is no
//! elevation term: the result is ground distance, not 3D path length.

use crate::models::units::Meters;
use crate::models::GeoSample;

/// Mean Earth radius used for all great-circle distances.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance between two samples.
pub fn pairwise_distance(a: &GeoSample, b: &GeoSample) -> Meters {
    Meters(haversine_meters(
        a.latitude(),
        a.longitude(),
        b.latitude(),
        b.longitude(),
    ))
}

fn haversine_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1 for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Sum of consecutive legs in insertion order.
///
/// Tracks with fewer than two samples have zero distance. This is the path
/// length, so a loop back to the start still reports its full length.
pub fn cumulative_distance(track: &[GeoSample]) -> Meters {
    track
        .windows(2)
        .map(|pair| pairwise_distance(&pair[0], &pair[1]))
        .sum()
}

/// Optional leg rejection applied while summing a track.
///
/// Both thresholds are off by default, in which case
/// [`cumulative_distance_filtered`] equals [`cumulative_distance`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LegFilter {
    /// Legs implying a speed above this (m/s) are treated as GPS jumps.
    pub max_speed_mps: Option<f64>,
    /// Legs shorter than this (meters) are treated as stationary jitter.
    pub min_leg_meters: Option<f64>,
}

impl LegFilter {
    pub fn is_enabled(&self) -> bool {
        self.max_speed_mps.is_some() || self.min_leg_meters.is_some()
    }
}

/// Outcome of summing a track through a [`LegFilter`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilteredDistance {
    pub distance: Meters,
    /// Samples skipped as jitter.
    pub jitter_skipped: usize,
    /// Samples dropped as implausible jumps.
    pub outliers_dropped: usize,
}

/// Consecutive rejected samples that agree with each other after which the
/// anchor itself is taken to be the bad fix.
const REANCHOR_RUN: usize = 3;

/// Whether moving from `from` to `to` over `leg` stays within `max_speed`.
fn is_plausible(from: &GeoSample, to: &GeoSample, leg: Meters, max_speed: f64) -> bool {
    let elapsed = to
        .timestamp()
        .signed_duration_since(from.timestamp())
        .num_milliseconds() as f64
        / 1000.0;
    if elapsed > 0.0 {
        leg.value() / elapsed <= max_speed
    } else {
        leg.value() <= 0.0
    }
}

/// Sum legs measured from the last accepted sample.
///
/// A rejected sample does not move the anchor, so later samples are measured
/// against the last good fix. If the anchor is itself a jump (a bad cold-start
/// fix, say), the samples after it are rejected but agree with each other;
/// after three of them the run is accepted and the anchor moves to its end. Distance is only ever added, so appending samples can only add
/// distance.
pub fn cumulative_distance_filtered(track: &[GeoSample], filter: &LegFilter) -> FilteredDistance {
    let mut result = FilteredDistance::default();
    let Some(mut anchor) = track.first() else {
        return result;
    };
    // Rejected samples, each plausible from the one before.
    let mut run: Vec<&GeoSample> = Vec::new();

    for sample in &track[1..] {
        let leg = pairwise_distance(anchor, sample);

        if filter.min_leg_meters.is_some_and(|min_leg| leg.value() < min_leg) {
            result.jitter_skipped += 1;
            continue;
        }

        let Some(max_speed) = filter.max_speed_mps else {
            result.distance += leg;
            anchor = sample;
            continue;
        };

        if is_plausible(anchor, sample, leg, max_speed) {
            result.distance += leg;
            anchor = sample;
            run.clear();
            continue;
        }

        result.outliers_dropped += 1;
        let extends_run = run.last().is_some_and(|prev| {
            is_plausible(prev, sample, pairwise_distance(prev, sample), max_speed)
        });
        if !extends_run {
            run.clear();
        }
        run.push(sample);

        if run.len() >= REANCHOR_RUN {
            let recovered: Meters = run
                .windows(2)
                .map(|pair| pairwise_distance(pair[0], pair[1]))
                .sum();
            result.distance += recovered;
            // The run's samples are kept; the abandoned anchor is the outlier.
            result.outliers_dropped = result.outliers_dropped + 1 - run.len();
            tracing::debug!(
                run = run.len(),
                recovered_meters = recovered.value(),
                "Leg filter moved anchor past a bad fix"
            );
            anchor = sample;
            run.clear();
        }
    }

    if result.jitter_skipped > 0 || result.outliers_dropped > 0 {
        tracing::debug!(
            samples = track.len(),
            jitter_skipped = result.jitter_skipped,
            outliers_dropped = result.outliers_dropped,
            "Leg filter rejected samples"
        );
    }

    result
}
