// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ordered sequence of GPS samples for one session.

use crate::error::TrackError;
use crate::models::GeoSample;
use crate::time_utils::format_utc_rfc3339;
use serde::{Deserialize, Serialize};

/// Samples in insertion order, which is also chronological order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<GeoSample>", into = "Vec<GeoSample>")]
pub struct Track {
    samples: Vec<GeoSample>,
}

impl Track {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a track from samples, checking chronological order.
    pub fn from_samples(samples: Vec<GeoSample>) -> Result<Self, TrackError> {
        let mut track = Self::new();
        track.extend(samples)?;
        Ok(track)
    }

    /// Append one sample. Samples older than the last one are rejected;
    /// equal timestamps are allowed.
    pub fn push(&mut self, sample: GeoSample) -> Result<(), TrackError> {
        if let Some(last) = self.samples.last() {
            if sample.timestamp() < last.timestamp() {
                return Err(TrackError::NonChronologicalSample {
                    timestamp: format_utc_rfc3339(sample.timestamp()),
                    last: format_utc_rfc3339(last.timestamp()),
                });
            }
        }
        self.samples.push(sample);
        Ok(())
    }

    /// Append a batch atomically: if any sample is out of order, the track is
    /// left unchanged.
    pub fn extend<I>(&mut self, samples: I) -> Result<usize, TrackError>
    where
        I: IntoIterator<Item = GeoSample>,
    {
        let before = self.samples.len();
        for sample in samples {
            if let Err(e) = self.push(sample) {
                self.samples.truncate(before);
                return Err(e);
            }
        }
        Ok(self.samples.len() - before)
    }

    pub fn samples(&self) -> &[GeoSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&GeoSample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&GeoSample> {
        self.samples.last()
    }
}

impl TryFrom<Vec<GeoSample>> for Track {
    type Error = TrackError;

    fn try_from(samples: Vec<GeoSample>) -> Result<Self, Self::Error> {
        Self::from_samples(samples)
    }
}

impl From<Track> for Vec<GeoSample> {
    fn from(track: Track) -> Self {
        track.samples
    }
}

impl AsRef<[GeoSample]> for Track {
    fn as_ref(&self) -> &[GeoSample] {
        &self.samples
    }
}
