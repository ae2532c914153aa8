//! Durable JSON store for pricing parameters and statistics
//!
//! Two independent pretty-printed JSON files with stable snake_case field
//! names, so an operator can hand-edit them. Loads self-heal: a missing,
//! corrupt or degenerate record is replaced with the built-in defaults and
//! those defaults are written back immediately. Writes go through a temp
//! file and rename so a reader never observes a half-written record.

use std::path::{Path, PathBuf};

use chrono::Utc;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::pricing::PricingParameters;
use crate::statistics::Statistics;
use crate::ConfigError;

const PARAMS_FILE: &str = "pricing_params.json";
const STATS_FILE: &str = "statistics.json";

/// Durable store plus the in-memory parameter handle shared by the
/// calculation engine (read) and the admin flow (read-write).
pub struct ConfigStore {
    params_path: PathBuf,
    stats_path: PathBuf,
    params: RwLock<PricingParameters>,
    last_save_error: RwLock<Option<String>>,
}

impl ConfigStore {
    /// Open (or initialize) the store under `data_dir`
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data_dir = data_dir.as_ref();
        std::fs::create_dir_all(data_dir)?;

        let store = Self {
            params_path: data_dir.join(PARAMS_FILE),
            stats_path: data_dir.join(STATS_FILE),
            params: RwLock::new(PricingParameters::default()),
            last_save_error: RwLock::new(None),
        };
        let params = store.load_parameters();
        tracing::info!(path = %store.params_path.display(), ?params, "pricing parameters loaded");
        Ok(store)
    }

    /// Current parameters snapshot
    pub fn parameters(&self) -> PricingParameters {
        self.params.read().clone()
    }

    /// Re-read parameters from disk, self-healing on failure, and refresh
    /// the in-memory handle.
    pub fn load_parameters(&self) -> PricingParameters {
        let params = match read_json::<PricingParameters>(&self.params_path) {
            Ok(params) if params.validate().is_ok() && !params.is_degenerate() => params,
            Ok(params) => {
                tracing::warn!(
                    path = %self.params_path.display(),
                    degenerate = params.is_degenerate(),
                    "pricing parameters failed sanity check, using defaults"
                );
                self.heal_parameters()
            }
            Err(err) => {
                tracing::warn!(
                    path = %self.params_path.display(),
                    %err,
                    "could not load pricing parameters, using defaults"
                );
                self.heal_parameters()
            }
        };
        *self.params.write() = params.clone();
        params
    }

    /// Apply a mutation to the parameters and persist the full set.
    ///
    /// The in-memory mutation stands even when the write fails; the failure
    /// is recorded and surfaced through [`ConfigStore::last_save_error`].
    pub fn update_parameters(
        &self,
        mutate: impl FnOnce(&mut PricingParameters),
    ) -> Result<(), ConfigError> {
        let snapshot = {
            let mut params = self.params.write();
            mutate(&mut params);
            params.clone()
        };
        self.save_parameters(&snapshot)
    }

    /// Replace the parameters with the built-in defaults and persist
    pub fn reset_parameters(&self) -> Result<(), ConfigError> {
        self.update_parameters(|params| *params = PricingParameters::default())
    }

    /// Serialize and overwrite the parameter record
    pub fn save_parameters(&self, params: &PricingParameters) -> Result<(), ConfigError> {
        *self.params.write() = params.clone();
        match write_json(&self.params_path, params) {
            Ok(()) => {
                *self.last_save_error.write() = None;
                tracing::debug!(path = %self.params_path.display(), "pricing parameters saved");
                Ok(())
            }
            Err(err) => {
                tracing::error!(path = %self.params_path.display(), %err, "failed to save pricing parameters");
                *self.last_save_error.write() = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Load statistics, self-healing like the parameter record
    pub fn load_statistics(&self) -> Statistics {
        match read_json::<Statistics>(&self.stats_path) {
            Ok(stats) => stats,
            Err(err) => {
                tracing::warn!(
                    path = %self.stats_path.display(),
                    %err,
                    "could not load statistics, using defaults"
                );
                let stats = Statistics::default();
                if let Err(err) = self.save_statistics(&stats) {
                    tracing::error!(%err, "failed to seed default statistics");
                }
                stats
            }
        }
    }

    /// Serialize and overwrite the statistics record
    pub fn save_statistics(&self, stats: &Statistics) -> Result<(), ConfigError> {
        let mut stamped = stats.clone();
        stamped.last_saved = Utc::now();
        write_json(&self.stats_path, &stamped)
    }

    /// Most recent parameter save failure, if the latest save failed
    pub fn last_save_error(&self) -> Option<String> {
        self.last_save_error.read().clone()
    }

    fn heal_parameters(&self) -> PricingParameters {
        let defaults = PricingParameters::default();
        if let Err(err) = self.save_parameters(&defaults) {
            tracing::error!(%err, "failed to write default pricing parameters");
        }
        defaults
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Write via temp file + rename so readers never see a partial record
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ConfigError> {
    let content =
        serde_json::to_string_pretty(value).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, content)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
