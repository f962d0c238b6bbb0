// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use crate::models::units::Kilograms;
use crate::services::distance::LegFilter;
use std::env;
use std::str::FromStr;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Weight used when a request does not carry one
    pub default_weight_kg: Kilograms,
    /// Upper bound on samples accepted in one request
    pub max_samples_per_request: usize,
    /// GPS jump / jitter rejection; disabled unless configured
    pub leg_filter: LegFilter,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            default_weight_kg: Kilograms(70.0),
            max_samples_per_request: 5000,
            leg_filter: LegFilter::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        Ok(Self {
            port: parse_var("PORT")?.unwrap_or(defaults.port),
            frontend_url: env::var("FRONTEND_URL").unwrap_or(defaults.frontend_url),
            default_weight_kg: parse_var_where("DEFAULT_WEIGHT_KG", valid_weight)?
                .map(Kilograms)
                .unwrap_or(defaults.default_weight_kg),
            max_samples_per_request: parse_var_where("MAX_SAMPLES_PER_REQUEST", valid_sample_cap)?
                .unwrap_or(defaults.max_samples_per_request),
            leg_filter: LegFilter {
                max_speed_mps: parse_var_where("MAX_PLAUSIBLE_SPEED_MPS", valid_threshold)?,
                min_leg_meters: parse_var_where("MIN_LEG_DISTANCE_M", valid_threshold)?,
            },
        })
    }
}

/// Same bounds the request validators apply to `weight_kg`.
fn valid_weight(kg: &f64) -> bool {
    (1.0..=500.0).contains(kg)
}

fn valid_sample_cap(cap: &usize) -> bool {
    *cap > 0
}

/// Leg filter thresholds must be finite and positive.
fn valid_threshold(value: &f64) -> bool {
    value.is_finite() && *value > 0.0
}

/// Read an optional variable. Unset or blank is `None`; unparseable is an error.
fn parse_var<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    parse_var_where(name, |_: &T| true)
}

/// Like [`parse_var`], but a parsed value failing `valid` is also an error.
fn parse_var_where<T: FromStr>(
    name: &'static str,
    valid: impl Fn(&T) -> bool,
) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) if valid(&value) => Ok(Some(value)),
            _ => Err(ConfigError::Invalid(name, raw)),
        },
        Err(_) => Ok(None),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
