// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity sessions: the live recording and its frozen snapshot.

use crate::error::TrackError;
use crate::models::units::{Kilograms, Minutes};
use crate::models::{GeoSample, Track};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of activity being tracked.
///
/// The UI offers a closed set of choices, but any other name is kept as
/// `Other` so that newer clients never fail to record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityType {
    Walk,
    Hike,
    Run,
    Bike,
    Other(String),
}

impl ActivityType {
    pub fn as_str(&self) -> &str {
        match self {
            ActivityType::Walk => "walk",
            ActivityType::Hike => "hike",
            ActivityType::Run => "run",
            ActivityType::Bike => "bike",
            ActivityType::Other(name) => name,
        }
    }
}

impl From<&str> for ActivityType {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "walk" => ActivityType::Walk,
            "hike" => ActivityType::Hike,
            "run" => ActivityType::Run,
            "bike" => ActivityType::Bike,
            _ => ActivityType::Other(value.trim().to_string()),
        }
    }
}

impl From<String> for ActivityType {
    fn from(value: String) -> Self {
        ActivityType::from(value.as_str())
    }
}

impl From<ActivityType> for String {
    fn from(value: ActivityType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable view of one activity: the input to metrics derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySession {
    pub activity_type: ActivityType,
    pub track: Track,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub user_weight_kg: Kilograms,
}

impl ActivitySession {
    /// Elapsed time between start and end.
    pub fn duration(&self) -> Minutes {
        Minutes::between(self.start_time, self.end_time)
    }
}

/// Lifecycle state of a recording session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Recording,
    Stopped,
}

/// Live session record held by the session store.
///
/// The track grows while the session is recording and is frozen once it
/// stops. Readers never see this directly; they get an [`ActivitySession`]
/// from [`RecordingSession::snapshot`].
#[derive(Debug, Clone)]
pub struct RecordingSession {
    pub id: u64,
    pub activity_type: ActivityType,
    pub user_weight_kg: Kilograms,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    track: Track,
}

impl RecordingSession {
    pub fn new(
        id: u64,
        activity_type: ActivityType,
        user_weight_kg: Kilograms,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            activity_type,
            user_weight_kg,
            start_time,
            end_time: None,
            track: Track::new(),
        }
    }

    pub fn status(&self) -> SessionStatus {
        if self.end_time.is_some() {
            SessionStatus::Stopped
        } else {
            SessionStatus::Recording
        }
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    /// Append a batch of samples. Fails without changes if the session is
    /// stopped or the batch is out of order.
    pub fn append<I>(&mut self, samples: I) -> Result<usize, TrackError>
    where
        I: IntoIterator<Item = GeoSample>,
    {
        if self.end_time.is_some() {
            return Err(TrackError::SessionStopped(self.id));
        }
        self.track.extend(samples)
    }

    /// Freeze the track. Stopping twice keeps the first end time.
    pub fn stop(&mut self, end_time: DateTime<Utc>) {
        if self.end_time.is_none() {
            self.end_time = Some(end_time.max(self.start_time));
        }
    }

    /// Copy the session into an immutable snapshot.
    ///
    /// A session still recording is measured up to `now`.
    pub fn snapshot(&self, now: DateTime<Utc>) -> ActivitySession {
        ActivitySession {
            activity_type: self.activity_type.clone(),
            track: self.track.clone(),
            start_time: self.start_time,
            end_time: self.end_time.unwrap_or(now),
            user_weight_kg: self.user_weight_kg,
        }
    }
}
