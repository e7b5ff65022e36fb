//! Settings file loading and path resolution.
//!
//! The settings file lives at `~/.config/sparkify/settings.toml` unless
//! `--config` names another one. Every value has a default, so a missing
//! default file is not an error. Resolution order for each path:
//!
//! 1. CLI flag (`--db`, `--song-dir`, `--log-dir`)
//! 2. Value from the settings file
//! 3. Built-in default (`sparkify.db`, `data/song_data`, `data/log_data`)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cli_types::PathArgs;
use crate::error::CliError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct Settings {
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub data: DataSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct DatabaseSettings {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct DataSettings {
    #[serde(default = "default_song_dir")]
    pub song_dir: PathBuf,
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            song_dir: default_song_dir(),
            log_dir: default_log_dir(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("sparkify.db")
}

fn default_song_dir() -> PathBuf {
    PathBuf::from("data/song_data")
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("data/log_data")
}

/// Canonical path to the settings file: `~/.config/sparkify/settings.toml`.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("sparkify").join("settings.toml")
}

impl Settings {
    /// Load settings from `explicit`, or from [`settings_path`] when `None`.
    ///
    /// An explicit file must exist; the default one may be absent.
    pub(crate) fn load(explicit: Option<&Path>) -> Result<Self, CliError> {
        let (path, required) = match explicit {
            Some(p) => (p.to_path_buf(), true),
            None => (settings_path(), false),
        };

        if !path.exists() {
            if required {
                return Err(CliError::config(format!(
                    "settings file not found: {}",
                    path.display()
                )));
            }
            log::debug!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)?;
        Self::parse(&contents)
            .map_err(|e| CliError::config(format!("{}: {}", path.display(), e)))
    }

    /// Parse settings from TOML text.
    pub(crate) fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Apply CLI path overrides on top of the loaded values.
    pub(crate) fn with_overrides(mut self, args: &PathArgs) -> Self {
        if let Some(db) = &args.db {
            self.database.path = db.clone();
        }
        if let Some(dir) = &args.song_dir {
            self.data.song_dir = dir.clone();
        }
        if let Some(dir) = &args.log_dir {
            self.data.log_dir = dir.clone();
        }
        self
    }

    /// Render as pretty TOML for display.
    pub(crate) fn to_toml(&self) -> Result<String, CliError> {
        toml::to_string_pretty(self).map_err(|e| CliError::config(e.to_string()))
    }
}
