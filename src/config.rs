//! Application configuration module
//!
//! Settings are persisted with `confy` in the OS-specific config directory;
//! data (saved reports) lives under the `directories` project data dir.

use crate::constant::{
    APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, DEFAULT_CACHE_CAPACITY, DEFAULT_JSON_INDENT,
    REPORTS_DIR,
};
use crate::differ::{Algorithm, DEFAULT_MAX_TABLE_CELLS, DiffOptions};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Confy(#[from] confy::ConfyError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub settings: Settings,
}

impl Config {
    /// Load configuration from disk, creating default if it doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        let settings: Settings = confy::load(APP_NAME, None)?;
        info!("Load config from {:?}", Self::config_path()?);
        Ok(Self { settings })
    }

    /// Save current configuration to disk
    pub fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, None, &self.settings)?;
        info!("Save config to {:?}", Self::config_path()?);
        Ok(())
    }

    /// Get the application data directory
    /// Falls back to a local "data" directory if platform dirs are unavailable
    pub fn data_dir(&self) -> PathBuf {
        if let Some(proj_dirs) = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME) {
            proj_dirs.data_dir().to_path_buf()
        } else {
            PathBuf::from("data")
        }
    }

    /// Directory reports are saved to when no explicit path is given
    pub fn report_dir(&self) -> PathBuf {
        self.settings
            .report_dir
            .clone()
            .unwrap_or_else(|| self.data_dir().join(REPORTS_DIR))
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(confy::get_configuration_file_path(APP_NAME, None)?)
    }

    pub fn diff_options(&self) -> DiffOptions {
        DiffOptions {
            algorithm: self.settings.algorithm,
            max_table_cells: self.settings.max_table_cells,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Falling back to default settings: {}", e);
            Self {
                settings: Settings::default(),
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Spaces per indentation level when formatting JSON
    #[serde(default = "default_json_indent")]
    pub json_indent: usize,

    /// Alignment engine for the block between common prefix and suffix
    #[serde(default)]
    pub algorithm: Algorithm,

    /// LCS table size above which alignment switches to Myers
    #[serde(default = "default_max_table_cells")]
    pub max_table_cells: usize,

    /// Keep line terminators when reading files
    #[serde(default)]
    pub keep_line_endings: bool,

    /// Number of files kept in the input cache
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// Overrides the default report directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_dir: Option<PathBuf>,
}

fn default_json_indent() -> usize {
    DEFAULT_JSON_INDENT
}

fn default_max_table_cells() -> usize {
    DEFAULT_MAX_TABLE_CELLS
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            json_indent: DEFAULT_JSON_INDENT,
            algorithm: Algorithm::default(),
            max_table_cells: DEFAULT_MAX_TABLE_CELLS,
            keep_line_endings: false,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            report_dir: None,
        }
    }
}
