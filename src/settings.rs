//! Settings persistence using TOML
//!
//! Stores rules, key bindings and high scores in ~/.config/blockfall/settings.toml
//! (or platform equivalent). A missing file means defaults; a broken one is an error.

use crate::rules::{Rules, RulesError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid rules: {0}")]
    Rules(#[from] RulesError),
}

/// Persistent settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub rules: Rules,
    pub keys: KeyBindings,
    /// Best score per opaque key
    pub high_scores: BTreeMap<String, u64>,
}

/// Key bindings, stored as key names for easy editing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub move_left: Vec<String>,
    pub move_right: Vec<String>,
    pub soft_drop: Vec<String>,
    pub hard_drop: Vec<String>,
    pub rotate: Vec<String>,
    pub start: Vec<String>,
    pub pause: Vec<String>,
    pub quit: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        fn keys(names: &[&str]) -> Vec<String> {
            names.iter().map(|name| name.to_string()).collect()
        }

        Self {
            move_left: keys(&["Left", "a"]),
            move_right: keys(&["Right", "d"]),
            soft_drop: keys(&["Down", "s"]),
            hard_drop: keys(&["Space"]),
            rotate: keys(&["Up", "w"]),
            start: keys(&["Enter"]),
            pause: keys(&["p", "Esc"]),
            quit: keys(&["q"]),
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "blockfall", "blockfall")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
    }

    /// Load from the platform config directory
    pub fn load() -> Result<Self, SettingsError> {
        let path = Self::default_path().ok_or(SettingsError::NoConfigDir)?;
        Self::load_from(&path)
    }

    /// Load from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no settings file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let settings: Settings = toml::from_str(&contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.rules.validate()?;
        tracing::info!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// Save to the platform config directory
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::default_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save to `path`, creating parent directories if needed
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(io_err)?;

        tracing::info!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// Best recorded score under `key`
    pub fn high_score(&self, key: &str) -> u64 {
        self.high_scores.get(key).copied().unwrap_or(0)
    }

    /// Record a score, keeping the best. Returns true if it improved the record
    pub fn record_high_score(&mut self, key: &str, score: u64) -> bool {
        let best = self.high_scores.entry(key.to_string()).or_insert(0);
        if score > *best {
            *best = score;
            true
        } else {
            false
        }
    }
}
