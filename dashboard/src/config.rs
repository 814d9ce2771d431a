//! Dashboard configuration
//!
//! Read from `ip4t.toml` in the working directory, or from the file named by `IP4T_CONFIG`.
//! Every field is optional and falls back to the program defaults.
use std::path::{Path, PathBuf};

use ip4t_datasets::{LoadOptions, Schema};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the configuration file
pub const CONFIG_ENV: &str = "IP4T_CONFIG";
/// Configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "ip4t.toml";

/// Errors that may occur while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a config file.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse TOML config.
    #[error("invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub dataset_path: PathBuf,
    /// Shown in the header when the file exists
    pub logo_path: PathBuf,
    pub index_column: String,
    pub area_column: String,
    pub target_column: String,
    /// Share of labelled rows held out for evaluation
    pub test_ratio: f64,
    /// Seed of the split, the oversampler and the forest
    pub seed: u64,
    pub n_trees: usize,
    pub max_depth: usize,
    pub k_neighbors: usize,
    pub head_rows: usize,
    pub histogram_bins: usize,
    pub schema: Schema,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            dataset_path: PathBuf::from("dataset28052025.csv"),
            logo_path: PathBuf::from("logo.png"),
            index_column: "NO".to_string(),
            area_column: "Luas  m2".to_string(),
            target_column: "POTENSI TOL".to_string(),
            test_ratio: 0.2,
            seed: 42,
            n_trees: 100,
            max_depth: 4,
            k_neighbors: 1,
            head_rows: 5,
            histogram_bins: 30,
            schema: Schema::default(),
        }
    }
}

impl DashboardConfig {
    /// Load the configuration named by `IP4T_CONFIG`, or `ip4t.toml` if it exists
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Self::load_with(explicit, Path::new(CONFIG_FILE))
    }

    /// Load `explicit` if given, otherwise `fallback` if it exists, otherwise the defaults
    ///
    /// An explicitly named file has to exist.
    pub fn load_with(explicit: Option<PathBuf>, fallback: &Path) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_path(&path),
            None if fallback.is_file() => Self::from_path(fallback),
            None => Ok(Self::default()),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Column roles and kinds for the loader
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            index_column: self.index_column.clone(),
            area_column: self.area_column.clone(),
            target_column: self.target_column.clone(),
            schema: self.schema.clone(),
        }
    }
}
