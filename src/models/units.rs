// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed quantities used at every API boundary.
//!
//! Distances, durations and weights travel as plain `f64` on the wire but
//! are wrapped here so a kilometer can never be passed where a meter is
//! expected.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Ground distance in meters.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Meters(pub f64);

impl Meters {
    pub const ZERO: Meters = Meters(0.0);

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn kilometers(self) -> f64 {
        self.0 / 1000.0
    }
}

impl Add for Meters {
    type Output = Meters;

    fn add(self, rhs: Meters) -> Meters {
        Meters(self.0 + rhs.0)
    }
}

impl AddAssign for Meters {
    fn add_assign(&mut self, rhs: Meters) {
        self.0 += rhs.0;
    }
}

impl std::iter::Sum for Meters {
    fn sum<I: Iterator<Item = Meters>>(iter: I) -> Meters {
        iter.fold(Meters::ZERO, Add::add)
    }
}

/// Elapsed time in minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Minutes(pub f64);

impl Minutes {
    pub const ZERO: Minutes = Minutes(0.0);

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn hours(self) -> f64 {
        self.0 / 60.0
    }

    /// Elapsed minutes between two instants. A negative span clamps to zero.
    pub fn between(
        start: chrono::DateTime<chrono::Utc>,
        end: chrono::DateTime<chrono::Utc>,
    ) -> Self {
        Self::from(end.signed_duration_since(start))
    }
}

impl From<chrono::Duration> for Minutes {
    fn from(duration: chrono::Duration) -> Self {
        let millis = duration.num_milliseconds().max(0);
        Minutes(millis as f64 / 60_000.0)
    }
}

impl Add for Minutes {
    type Output = Minutes;

    fn add(self, rhs: Minutes) -> Minutes {
        Minutes(self.0 + rhs.0)
    }
}

impl AddAssign for Minutes {
    fn add_assign(&mut self, rhs: Minutes) {
        self.0 += rhs.0;
    }
}

/// Body weight in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Kilograms(pub f64);

impl Kilograms {
    pub fn value(self) -> f64 {
        self.0
    }
}
