// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! S.O.M.E. Tracker API Server
//!
//! Records GPS activity sessions and serves distance, pace, speed and
//! calorie metrics for them.

use some_tracker::{config::Config, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        default_weight_kg = config.default_weight_kg.value(),
        "Starting S.O.M.E. Tracker API"
    );

    if config.leg_filter.is_enabled() {
        tracing::info!(
            max_speed_mps = ?config.leg_filter.max_speed_mps,
            min_leg_meters = ?config.leg_filter.min_leg_meters,
            "GPS leg filter enabled"
        );
    }

    // Build shared state
    let state = Arc::new(AppState::new(config.clone()));

    // Build router
    let app = some_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("some_tracker=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
