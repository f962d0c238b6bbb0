// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Metrics derivation tests: pace/speed guards, calorie table, and full
//! session metrics from a synthetic track.

use chrono::Duration;
use some_tracker::models::{ActivitySession, ActivityType, Kilograms, Meters, Minutes, Track};
use some_tracker::services::distance::{cumulative_distance, LegFilter};
use some_tracker::services::metrics::{
    calories_burned, compute_metrics, compute_metrics_with, pace, speed,
};

mod common;
use common::{sample, synthetic_walk, t0};

fn session(activity: &str, track: Track, minutes: i64, weight: f64) -> ActivitySession {
    ActivitySession {
        activity_type: ActivityType::from(activity),
        track,
        start_time: t0(),
        end_time: t0() + Duration::minutes(minutes),
        user_weight_kg: Kilograms(weight),
    }
}

#[test]
fn test_calories_walk_one_hour() {
    assert_eq!(
        calories_burned(&ActivityType::from("walk"), Minutes(60.0), Kilograms(70.0)),
        245
    );
}

#[test]
fn test_calories_run_half_hour() {
    assert_eq!(
        calories_burned(&ActivityType::from("run"), Minutes(30.0), Kilograms(80.0)),
        320
    );
}

#[test]
fn test_calories_unknown_activity_uses_fallback_met() {
    assert_eq!(
        calories_burned(
            &ActivityType::from("unknown-type"),
            Minutes(60.0),
            Kilograms(70.0)
        ),
        280
    );
}

#[test]
fn test_calories_hike_and_bike() {
    // 6.0 * 65 * 1.5 = 585
    assert_eq!(
        calories_burned(&ActivityType::Hike, Minutes(90.0), Kilograms(65.0)),
        585
    );
    // 7.5 * 72 * 0.75 = 405
    assert_eq!(
        calories_burned(&ActivityType::Bike, Minutes(45.0), Kilograms(72.0)),
        405
    );
}

#[test]
fn test_pace_zero_distance_is_undefined_for_any_duration() {
    for minutes in [0.0, 0.5, 30.0, 600.0] {
        assert_eq!(pace(Meters(0.0), Minutes(minutes)), None);
    }
}

#[test]
fn test_speed_zero_duration_is_zero_for_any_distance() {
    for meters in [0.0, 1.0, 5_000.0, 1e9] {
        let s = speed(Meters(meters), Minutes(0.0));
        assert_eq!(s, 0.0);
        assert!(s.is_finite());
    }
}

#[test]
fn test_pace_and_speed_agree() {
    let distance = Meters(8_000.0);
    let duration = Minutes(40.0);
    let p = pace(distance, duration).unwrap();
    let s = speed(distance, duration);
    assert_eq!(p, 5.0);
    assert_eq!(s, 12.0);
    assert!((p * s - 60.0).abs() < 1e-9);
}

#[test]
fn test_compute_metrics_for_walk() {
    let track = Track::from_samples(synthetic_walk(181)).unwrap();
    let expected_distance = cumulative_distance(track.samples());
    let metrics = compute_metrics(&session("walk", track, 30, 70.0));

    assert_eq!(metrics.total_distance_meters, expected_distance);
    assert_eq!(metrics.duration_minutes, Minutes(30.0));
    let pace = metrics.pace_min_per_km.expect("pace defined for a moving walk");
    assert!((pace - 30.0 / expected_distance.kilometers()).abs() < 1e-9);
    assert!((metrics.speed_kmh - expected_distance.kilometers() * 2.0).abs() < 1e-9);
    // 3.5 * 70 * 0.5 = 122.5 -> 123
    assert_eq!(metrics.calories_burned, 123);
}

#[test]
fn test_compute_metrics_stationary_session() {
    let track = Track::from_samples(vec![sample(37.0, -122.0, 0), sample(37.0, -122.0, 60)])
        .unwrap();
    let metrics = compute_metrics(&session("hike", track, 1, 70.0));

    assert_eq!(metrics.total_distance_meters, Meters(0.0));
    assert_eq!(metrics.pace_min_per_km, None);
    assert_eq!(metrics.speed_kmh, 0.0);
    assert_eq!(metrics.calories_burned, 7); // 6.0 * 70 / 60 = 7
}

#[test]
fn test_compute_metrics_empty_instantaneous_session() {
    let metrics = compute_metrics(&session("run", Track::new(), 0, 80.0));
    assert_eq!(metrics.total_distance_meters, Meters(0.0));
    assert_eq!(metrics.duration_minutes, Minutes(0.0));
    assert_eq!(metrics.pace_min_per_km, None);
    assert_eq!(metrics.speed_kmh, 0.0);
    assert_eq!(metrics.calories_burned, 0);
}

#[test]
fn test_compute_metrics_with_disabled_filter_matches_raw() {
    let track = Track::from_samples(synthetic_walk(50)).unwrap();
    let s = session("walk", track, 10, 70.0);
    assert_eq!(
        compute_metrics_with(&s, &LegFilter::default()),
        compute_metrics(&s)
    );
}

#[test]
fn test_compute_metrics_with_filter_drops_teleport() {
    let mut samples = synthetic_walk(30);
    samples[15] = sample(40.0, -120.0, 150);
    let track = Track::from_samples(samples).unwrap();
    let s = session("walk", track, 5, 70.0);

    let raw = compute_metrics(&s);
    let filtered = compute_metrics_with(
        &s,
        &LegFilter {
            max_speed_mps: Some(15.0),
            min_leg_meters: None,
        },
    );

    assert!(raw.total_distance_meters.value() > 100_000.0);
    assert!(filtered.total_distance_meters.value() < 1_000.0);
    assert_eq!(filtered.calories_burned, raw.calories_burned);
}
