//! Process settings
//!
//! Loaded from an optional `carcost.toml` next to the binary plus
//! `CARCOST__`-prefixed environment variables, e.g.
//! `CARCOST__ADMIN_PASSWORD=...`.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Built-in admin secret; deployments are expected to override it
pub const DEFAULT_ADMIN_PASSWORD: &str = "pulse-admin";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory holding the two persisted JSON records
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Admin secret, compared verbatim against trimmed input
    #[serde(default = "default_admin_password")]
    pub admin_password: String,

    /// Pacing delay before a calculation result is presented
    #[serde(default = "default_result_delay_ms")]
    pub result_delay_ms: u64,
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_admin_password() -> String {
    DEFAULT_ADMIN_PASSWORD.to_string()
}

fn default_result_delay_ms() -> u64 {
    1000
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            admin_password: default_admin_password(),
            result_delay_ms: default_result_delay_ms(),
        }
    }
}

impl Settings {
    /// True while the built-in secret has not been overridden
    pub fn uses_default_password(&self) -> bool {
        self.admin_password == DEFAULT_ADMIN_PASSWORD
    }
}

/// Load settings from `carcost.toml` (optional) and the environment
pub fn load_settings() -> Result<Settings, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("carcost").required(false))
        .add_source(config::Environment::with_prefix("CARCOST").separator("__"))
        .build()?
        .try_deserialize()?;
    Ok(settings)
}
