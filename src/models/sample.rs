// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! A single timestamped GPS fix.

use crate::error::TrackError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One position fix as delivered by a location source.
///
/// Coordinates are validated on construction (and on deserialization), so
/// every `GeoSample` in a track is known to lie within the valid
/// latitude/longitude ranges. Samples are immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoSample", into = "RawGeoSample")]
pub struct GeoSample {
    latitude: f64,
    longitude: f64,
    timestamp: DateTime<Utc>,
    accuracy: Option<f64>,
    speed: Option<f64>,
    heading: Option<f64>,
}

impl GeoSample {
    /// Build a sample, rejecting out-of-range or non-finite coordinates.
    pub fn new(
        latitude: f64,
        longitude: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, TrackError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(TrackError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }

        Ok(Self {
            latitude,
            longitude,
            timestamp,
            accuracy: None,
            speed: None,
            heading: None,
        })
    }

    /// Reported horizontal accuracy in meters.
    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = Some(accuracy);
        self
    }

    /// Device-reported ground speed in m/s.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Device-reported heading in degrees.
    pub fn with_heading(mut self, heading: f64) -> Self {
        self.heading = Some(heading);
        self
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn accuracy(&self) -> Option<f64> {
        self.accuracy
    }

    pub fn speed(&self) -> Option<f64> {
        self.speed
    }

    pub fn heading(&self) -> Option<f64> {
        self.heading
    }

    /// Position as a geo point (x = longitude, y = latitude).
    pub fn point(&self) -> geo::Point<f64> {
        geo::Point::new(self.longitude, self.latitude)
    }
}

/// Wire shape of a sample, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawGeoSample {
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<f64>,
}

impl TryFrom<RawGeoSample> for GeoSample {
    type Error = TrackError;

    fn try_from(raw: RawGeoSample) -> Result<Self, Self::Error> {
        let mut sample = GeoSample::new(raw.latitude, raw.longitude, raw.timestamp)?;
        sample.accuracy = raw.accuracy;
        sample.speed = raw.speed;
        sample.heading = raw.heading;
        Ok(sample)
    }
}

impl From<GeoSample> for RawGeoSample {
    fn from(sample: GeoSample) -> Self {
        Self {
            latitude: sample.latitude,
            longitude: sample.longitude,
            timestamp: sample.timestamp,
            accuracy: sample.accuracy,
            speed: sample.speed,
            heading: sample.heading,
        }
    }
}
