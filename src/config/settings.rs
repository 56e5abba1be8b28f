//! Application settings loading from roomledger.toml.
//!
//! The budget and alert thresholds that the accounting rules depend on live
//! here as named values with documented defaults, instead of inline literals
//! scattered through the computation code. A missing settings file is not an
//! error; every field has a default.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Default room-level daily food budget in rupees, used when neither the
/// settings file nor the admin profile sets one.
pub const DEFAULT_DAILY_FOOD_BUDGET: f64 = 120.0;

/// Default purse balance below which a low-balance alert fires after a
/// spend event.
pub const DEFAULT_LOW_BALANCE_THRESHOLD: f64 = 500.0;

/// Settings structure representing the entire roomledger.toml file
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Daily food budget applied when the admin profile has none set
    #[serde(default = "default_daily_food_budget")]
    pub daily_food_budget: f64,
    /// Purse balance threshold for low-balance alerts
    #[serde(default = "default_low_balance_threshold")]
    pub low_balance_threshold: f64,
}

fn default_daily_food_budget() -> f64 {
    DEFAULT_DAILY_FOOD_BUDGET
}

fn default_low_balance_threshold() -> f64 {
    DEFAULT_LOW_BALANCE_THRESHOLD
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            daily_food_budget: DEFAULT_DAILY_FOOD_BUDGET,
            low_balance_threshold: DEFAULT_LOW_BALANCE_THRESHOLD,
        }
    }
}

/// Loads settings from a TOML file.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read settings file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse settings file: {e}"),
    })
}

/// Loads settings from the default location (./roomledger.toml), falling
/// back to defaults when the file does not exist.
///
/// # Errors
/// Returns an error only when the file exists but is unreadable or invalid.
pub fn load_default_settings() -> Result<Settings> {
    let path = Path::new("roomledger.toml");
    if path.exists() {
        load_settings(path)
    } else {
        Ok(Settings::default())
    }
}
