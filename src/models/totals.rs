// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Aggregate totals across finished sessions, for the dashboard.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::units::{Meters, Minutes};
use crate::models::{ActivityType, DerivedMetrics};

/// Running totals over stopped sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionTotals {
    // ─── Overall ─────────────────────────────────────────────────
    /// Number of sessions counted
    pub total_sessions: u32,
    /// Total ground distance
    pub total_distance_meters: Meters,
    /// Total elapsed time
    pub total_duration_minutes: Minutes,
    /// Total estimated energy
    pub total_calories: u64,

    // ─── By Activity Type ────────────────────────────────────────
    /// Session count per activity type
    pub sessions_by_activity: BTreeMap<String, u32>,
    /// Distance per activity type
    pub distance_by_activity: BTreeMap<String, Meters>,
    /// Calories per activity type
    pub calories_by_activity: BTreeMap<String, u64>,

    // ─── Time Series ─────────────────────────────────────────────
    /// Session count per month ("YYYY-MM")
    pub sessions_by_month: BTreeMap<String, u32>,
}

impl SessionTotals {
    /// Fold one session into the totals.
    pub fn add_session(
        &mut self,
        activity_type: &ActivityType,
        start_time: chrono::DateTime<chrono::Utc>,
        metrics: &DerivedMetrics,
    ) {
        let key = activity_type.as_str().to_string();

        self.total_sessions += 1;
        self.total_distance_meters += metrics.total_distance_meters;
        self.total_duration_minutes += metrics.duration_minutes;
        self.total_calories += u64::from(metrics.calories_burned);

        *self.sessions_by_activity.entry(key.clone()).or_insert(0) += 1;
        *self
            .distance_by_activity
            .entry(key.clone())
            .or_insert(Meters::ZERO) += metrics.total_distance_meters;
        *self.calories_by_activity.entry(key).or_insert(0) += u64::from(metrics.calories_burned);

        let month_key = start_time.format("%Y-%m").to_string();
        *self.sessions_by_month.entry(month_key).or_insert(0) += 1;
    }
}
