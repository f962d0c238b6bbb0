// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod metrics;
pub mod sample;
pub mod session;
pub mod totals;
pub mod track;
pub mod units;

pub use metrics::{DerivedMetrics, DisplayMetrics};
pub use sample::{GeoSample, RawGeoSample};
pub use session::{ActivitySession, ActivityType, RecordingSession, SessionStatus};
pub use totals::SessionTotals;
pub use track::Track;
pub use units::{Kilograms, Meters, Minutes};
