// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory session store.
//!
//! Each session lives in a sharded map entry. Writers (sample ingestion,
//! stop, delete) hold the entry's write guard; readers copy the session
//! into an immutable [`ActivitySession`] under the read guard, so metrics
//! are always computed from a consistent snapshot while appends continue.

use crate::error::TrackError;
use crate::models::units::Kilograms;
use crate::models::{
    ActivitySession, ActivityType, GeoSample, RecordingSession, SessionStatus, SessionTotals,
};
use crate::services::distance::LegFilter;
use crate::services::metrics::compute_metrics_with;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Listing entry for a session.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub id: u64,
    pub activity_type: ActivityType,
    pub status: SessionStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub sample_count: usize,
}

/// Shared handle to all sessions. Cloning is cheap.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<DashMap<u64, RecordingSession>>,
    next_id: Arc<AtomicU64>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new recording session and return its id.
    pub fn start_session(
        &self,
        activity_type: ActivityType,
        user_weight_kg: Kilograms,
        start_time: DateTime<Utc>,
    ) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.sessions.insert(
            id,
            RecordingSession::new(id, activity_type.clone(), user_weight_kg, start_time),
        );
        tracing::info!(session_id = id, activity = %activity_type, "Session started");
        id
    }

    /// Append a batch of samples to a recording session.
    ///
    /// The batch is all-or-nothing. Returns the track length afterwards.
    pub fn append_samples<I>(&self, id: u64, samples: I) -> Result<usize, TrackError>
    where
        I: IntoIterator<Item = GeoSample>,
    {
        let mut session = self
            .sessions
            .get_mut(&id)
            .ok_or(TrackError::SessionNotFound(id))?;
        let added = session.append(samples)?;
        let total = session.track().len();
        tracing::debug!(session_id = id, added, total, "Samples appended");
        Ok(total)
    }

    /// Stop a session and freeze its track. Stopping twice is a no-op.
    pub fn stop_session(
        &self,
        id: u64,
        end_time: DateTime<Utc>,
    ) -> Result<ActivitySession, TrackError> {
        let mut session = self
            .sessions
            .get_mut(&id)
            .ok_or(TrackError::SessionNotFound(id))?;
        let was_recording = session.status() == SessionStatus::Recording;
        session.stop(end_time);
        if was_recording {
            tracing::info!(
                session_id = id,
                samples = session.track().len(),
                "Session stopped"
            );
        }
        Ok(session.snapshot(end_time))
    }

    /// Immutable copy of a session, measured up to `now` if still recording.
    pub fn snapshot(&self, id: u64, now: DateTime<Utc>) -> Result<ActivitySession, TrackError> {
        self.sessions
            .get(&id)
            .map(|session| session.snapshot(now))
            .ok_or(TrackError::SessionNotFound(id))
    }

    /// Status and snapshot read under the same guard, so a concurrent stop
    /// is seen by both or by neither.
    pub fn snapshot_with_status(
        &self,
        id: u64,
        now: DateTime<Utc>,
    ) -> Result<(SessionStatus, ActivitySession), TrackError> {
        self.sessions
            .get(&id)
            .map(|session| (session.status(), session.snapshot(now)))
            .ok_or(TrackError::SessionNotFound(id))
    }

    pub fn status(&self, id: u64) -> Result<SessionStatus, TrackError> {
        self.sessions
            .get(&id)
            .map(|session| session.status())
            .ok_or(TrackError::SessionNotFound(id))
    }

    /// Discard a session and its track.
    pub fn delete_session(&self, id: u64) -> Result<(), TrackError> {
        if self.sessions.remove(&id).is_none() {
            return Err(TrackError::SessionNotFound(id));
        }
        tracing::info!(session_id = id, "Session deleted");
        Ok(())
    }

    /// All sessions, newest first.
    pub fn list_sessions(&self) -> Vec<SessionInfo> {
        let mut sessions: Vec<SessionInfo> = self
            .sessions
            .iter()
            .map(|entry| SessionInfo {
                id: entry.id,
                activity_type: entry.activity_type.clone(),
                status: entry.status(),
                start_time: entry.start_time,
                end_time: entry.end_time,
                sample_count: entry.track().len(),
            })
            .collect();
        sessions.sort_by(|a, b| b.start_time.cmp(&a.start_time).then(b.id.cmp(&a.id)));
        sessions
    }

    /// Totals over stopped sessions.
    pub fn totals(&self, filter: &LegFilter) -> SessionTotals {
        // Snapshot first so no guard is held while deriving metrics.
        let stopped: Vec<ActivitySession> = self
            .sessions
            .iter()
            .filter_map(|entry| entry.end_time.map(|end_time| entry.snapshot(end_time)))
            .collect();

        let mut totals = SessionTotals::default();
        for session in &stopped {
            let metrics = compute_metrics_with(session, filter);
            totals.add_session(&session.activity_type, session.start_time, &metrics);
        }
        totals
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
