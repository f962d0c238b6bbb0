// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sample ingestion from a location source into the session store.
//!
//! The metrics core never talks to a platform location API directly. A
//! [`LocationSource`] delivers fixes over a channel; [`TrackRecorder`]
//! drains that channel into a recording session, which owns exclusive
//! write access to the track.

use crate::db::SessionStore;
use crate::error::TrackError;
use crate::models::GeoSample;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Buffered events between a source and the recorder.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Something a location source reports.
#[derive(Debug, Clone)]
pub enum LocationEvent {
    Sample(GeoSample),
    /// Non-fatal source error (lost fix, permission change, ...).
    Error(String),
}

/// A stream of position fixes with start/stop control.
pub trait LocationSource: Send {
    /// Begin delivering events. The stream ends when the receiver yields `None`.
    fn start(&mut self) -> mpsc::Receiver<LocationEvent>;

    /// Stop delivering events. Safe to call more than once.
    fn stop(&mut self);
}

/// Replays a fixed list of events, for tests and benchmarks.
pub struct ReplaySource {
    events: Vec<LocationEvent>,
    interval: Option<Duration>,
    task: Option<JoinHandle<()>>,
}

impl ReplaySource {
    pub fn new(samples: Vec<GeoSample>) -> Self {
        Self::from_events(samples.into_iter().map(LocationEvent::Sample).collect())
    }

    pub fn from_events(events: Vec<LocationEvent>) -> Self {
        Self {
            events,
            interval: None,
            task: None,
        }
    }

    /// Sleep between samples, to mimic a live fix rate.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }
}

impl LocationSource for ReplaySource {
    fn start(&mut self) -> mpsc::Receiver<LocationEvent> {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let events = std::mem::take(&mut self.events);
        let interval = self.interval;

        self.task = Some(tokio::spawn(async move {
            for event in events {
                if let Some(interval) = interval {
                    tokio::time::sleep(interval).await;
                }
                if tx.send(event).await.is_err() {
                    break;
                }
            }
        }));

        rx
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for ReplaySource {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Result of a recording run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordingReport {
    /// Samples appended to the track.
    pub recorded: usize,
    /// Samples refused because they were older than the last one.
    pub rejected: usize,
    /// Error events reported by the source.
    pub source_errors: usize,
}

/// Drives a location source into a session.
#[derive(Clone)]
pub struct TrackRecorder {
    store: SessionStore,
}

impl TrackRecorder {
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    /// Record samples from `source` into session `session_id`.
    ///
    /// Runs until the source's stream ends or the session is stopped from
    /// elsewhere, then stops the source. A session deleted mid-run ends the
    /// run with `SessionNotFound`.
    pub async fn record<S>(
        &self,
        session_id: u64,
        mut source: S,
    ) -> Result<RecordingReport, TrackError>
    where
        S: LocationSource,
    {
        // Fail early rather than starting a source for nothing.
        self.store.status(session_id)?;

        let mut events = source.start();
        let mut report = RecordingReport::default();
        tracing::info!(session_id, "Recording started");

        let outcome = loop {
            let Some(event) = events.recv().await else {
                break Ok(());
            };

            match event {
                LocationEvent::Sample(sample) => {
                    match self.store.append_samples(session_id, [sample]) {
                        Ok(_) => report.recorded += 1,
                        Err(TrackError::NonChronologicalSample { timestamp, last }) => {
                            tracing::warn!(
                                session_id,
                                %timestamp,
                                %last,
                                "Dropping out-of-order sample"
                            );
                            report.rejected += 1;
                        }
                        Err(TrackError::SessionStopped(_)) => break Ok(()),
                        Err(e) => break Err(e),
                    }
                }
                LocationEvent::Error(message) => {
                    tracing::warn!(session_id, error = %message, "Location source error");
                    report.source_errors += 1;
                }
            }
        };

        source.stop();
        tracing::info!(
            session_id,
            recorded = report.recorded,
            rejected = report.rejected,
            source_errors = report.source_errors,
            "Recording finished"
        );
        outcome.map(|_| report)
    }
}
