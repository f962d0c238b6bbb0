// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! S.O.M.E. tracker: GPS activity metrics for hikes, walks, runs and rides
//!
//! This crate turns a stream of timestamped GPS fixes into ground distance,
//! pace, speed and calorie estimates, and serves them over a small JSON API.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::SessionStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            sessions: SessionStore::new(),
        }
    }
}
