// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - track metrics, formatting and ingestion.

pub mod distance;
pub mod export;
pub mod format;
pub mod metrics;
pub mod recorder;

pub use distance::{cumulative_distance, pairwise_distance, LegFilter};
pub use format::{format_distance, format_duration, format_pace};
pub use metrics::{calories_burned, compute_metrics, compute_metrics_with, pace, speed};
pub use recorder::{LocationEvent, LocationSource, ReplaySource, TrackRecorder};
