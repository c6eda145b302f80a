//! Configuration loader for the `agave-estimator` binary.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). Every variable is optional; a variable that is set
//! but does not parse is a startup error rather than a silent default.
//!
use std::env;

use anyhow::{anyhow, bail, Result};

use crate::dates::{format_uk_date, parse_uk_date};
use crate::estimator::SeedParams;

/// Parse an optional environment variable with `FromStr` and a default value.
macro_rules! parse_env {
    ($var_name:expr, $ty:ty, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.trim().parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Parse an optional `day/month/year` environment variable with a default value.
macro_rules! parse_env_date {
    ($var_name:expr, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| parse_uk_date(&v))
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the session.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Parameters for the starting table.
    pub seed: SeedParams,

    /// Pretty-print JSON replies instead of one document per line.
    pub pretty_json: bool,
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `ESTIMATOR_BOTTLE_RATIO` – bottle ratio of the seed rows (default: 2)
/// - `ESTIMATOR_SEED_ROWS` – number of seed rows (default: 10)
/// - `ESTIMATOR_SEED_START` – first batch date, `day/month/year` (default: 7/3/2025)
/// - `ESTIMATOR_PRETTY_JSON` – `true` to pretty-print replies (default: false)
///
/// Returns an error if any variable is set to an invalid value.
pub fn load_from_env() -> Result<Config> {
    // ---
    let defaults = SeedParams::default();

    let bottle_ratio = parse_env!("ESTIMATOR_BOTTLE_RATIO", f64, defaults.bottle_ratio);
    let rows = parse_env!("ESTIMATOR_SEED_ROWS", u32, defaults.rows);
    let start_date = parse_env_date!("ESTIMATOR_SEED_START", defaults.start_date);
    let pretty_json = parse_env!("ESTIMATOR_PRETTY_JSON", bool, false);

    if !bottle_ratio.is_finite() || bottle_ratio <= 0.0 {
        bail!("Invalid ESTIMATOR_BOTTLE_RATIO: {bottle_ratio} must be a positive number");
    }

    Ok(Config {
        seed: SeedParams {
            rows,
            start_date,
            bottle_ratio,
        },
        pretty_json,
    })
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  ESTIMATOR_BOTTLE_RATIO : {}", self.seed.bottle_ratio);
        tracing::info!("  ESTIMATOR_SEED_ROWS    : {}", self.seed.rows);
        tracing::info!("  ESTIMATOR_SEED_START   : {}", format_uk_date(self.seed.start_date));
        tracing::info!("  ESTIMATOR_PRETTY_JSON  : {}", self.pretty_json);
    }
}
