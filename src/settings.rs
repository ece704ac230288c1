//! Settings persistence using TOML
//!
//! Stores settings in ~/.config/tetrs/settings.toml (or platform equivalent)

use crate::mode::GameMode;
use anyhow::{Context, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Driver settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub game: GameSettings,
    pub driver: DriverSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Mode used when a replay doesn't name one
    pub mode: GameMode,
    /// Fixed bag seed, random when unset
    pub seed: Option<u64>,
}

/// How the headless driver advances time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverSettings {
    /// Milliseconds per tick (16 is one 60 Hz frame)
    pub tick_ms: u64,
    /// Stop a run after this much game time
    pub max_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// tracing-subscriber directive, overridden by RUST_LOG
    pub filter: String,
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            tick_ms: 16,
            max_ms: 600_000,
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "tetrs_engine=info".to_string(),
        }
    }
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "tetrs", "tetrs").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.toml"))
    }

    /// Load settings from file, or fall back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            return Self::default();
        };

        match fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents).unwrap_or_else(|e| {
                tracing::warn!("Ignoring {}: {:#}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        toml::from_str(contents).context("Invalid settings")
    }

    /// Save settings to file, returns where they went
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let dir = Self::config_dir().ok_or_else(|| anyhow!("Could not determine config directory"))?;
        let path = dir.join("settings.toml");

        fs::create_dir_all(&dir).context("Failed to create config dir")?;
        let contents = toml::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(path)
    }
}
