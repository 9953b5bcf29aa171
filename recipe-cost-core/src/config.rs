//! Costing configuration from environment variables.

use std::env;
use std::fs;
use std::path::PathBuf;

use ingredient_density::{DensityError, DensityTable};
use thiserror::Error;

pub const DENSITY_TABLE_VAR: &str = "RECIPE_COST_DENSITY_TABLE";
pub const DEFAULT_RATE_VAR: &str = "RECIPE_COST_DEFAULT_RATE";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: \"{value}\"")]
    InvalidEnvVar { var: &'static str, value: String },

    #[error("Failed to read density table {path}: {source}")]
    ReadDensityTable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid density table {path}: {source}")]
    InvalidDensityTable {
        path: PathBuf,
        #[source]
        source: DensityError,
    },

    #[error(transparent)]
    Density(#[from] DensityError),
}

/// Costing configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostConfig {
    /// JSON density table replacing the built-in one.
    pub density_table_path: Option<PathBuf>,
    /// Cups per pound when no density rule matches.
    pub default_rate: Option<f64>,
}

impl CostConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `RECIPE_COST_DENSITY_TABLE`: path to a JSON density table
    /// - `RECIPE_COST_DEFAULT_RATE`: fallback cups per pound (default: 2.0)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Same as [`CostConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let density_table_path = lookup(DENSITY_TABLE_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let default_rate = match lookup(DEFAULT_RATE_VAR).filter(|v| !v.trim().is_empty()) {
            Some(value) => Some(parse_rate(&value).ok_or(ConfigError::InvalidEnvVar {
                var: DEFAULT_RATE_VAR,
                value,
            })?),
            None => None,
        };

        Ok(Self {
            density_table_path,
            default_rate,
        })
    }

    /// Command-line values win over the environment.
    pub fn with_overrides(
        mut self,
        density_table_path: Option<PathBuf>,
        default_rate: Option<f64>,
    ) -> Self {
        if density_table_path.is_some() {
            self.density_table_path = density_table_path;
        }
        if default_rate.is_some() {
            self.default_rate = default_rate;
        }
        self
    }

    /// Build the density table this configuration describes.
    pub fn load_density_table(&self) -> Result<DensityTable, ConfigError> {
        let table = match &self.density_table_path {
            Some(path) => {
                let json = fs::read_to_string(path).map_err(|source| {
                    ConfigError::ReadDensityTable {
                        path: path.clone(),
                        source,
                    }
                })?;
                let table = DensityTable::from_json(&json).map_err(|source| {
                    ConfigError::InvalidDensityTable {
                        path: path.clone(),
                        source,
                    }
                })?;
                tracing::info!(
                    path = %path.display(),
                    rules = table.rules().len(),
                    "loaded density table"
                );
                table
            }
            None => DensityTable::default(),
        };

        match self.default_rate {
            Some(rate) => Ok(table.with_default_rate(rate)?),
            None => Ok(table),
        }
    }
}

fn parse_rate(value: &str) -> Option<f64> {
    let rate: f64 = value.trim().parse().ok()?;
    (rate.is_finite() && rate > 0.0).then_some(rate)
}
