//! Configuration and statistics persistence
//!
//! Supports:
//! - Admin-editable pricing parameters with built-in defaults
//! - Running calculation statistics
//! - A self-healing JSON store (missing/corrupt/degenerate records are
//!   replaced with defaults and immediately written back)
//! - Process settings from `carcost.toml` and `CARCOST__` environment
//!   variables

pub mod pricing;
pub mod settings;
pub mod statistics;
pub mod store;

pub use pricing::{PricingParameters, SettingKey};
pub use settings::{load_settings, Settings};
pub use statistics::{Statistics, StatsTracker};
pub use store::ConfigStore;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<ConfigError> for carcost_core::Error {
    fn from(err: ConfigError) -> Self {
        carcost_core::Error::Persistence(err.to_string())
    }
}
