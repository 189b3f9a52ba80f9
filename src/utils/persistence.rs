//! JSON persistence under ~/.flappy-shrimp/: config, high score.

use crate::core::config::GameConfig;
use crate::core::error::Result;
use crate::host::HighScoreStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const SCORES_FILE: &str = "scores.json";
pub const CONFIG_FILE: &str = "config.json";
pub const LOG_FILE: &str = "flappy.log";

/// Get the ~/.flappy-shrimp/ directory path, creating it if needed.
pub fn flappy_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".flappy-shrimp");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

pub fn save_path(filename: &str) -> io::Result<PathBuf> {
    Ok(flappy_dir()?.join(filename))
}

/// Write `data` as pretty-printed JSON, creating parent directories.
pub fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json)?;
    Ok(())
}

/// Tuning from ~/.flappy-shrimp/config.json, or defaults.
pub fn load_config() -> GameConfig {
    match save_path(CONFIG_FILE) {
        Ok(path) => load_config_from(&path),
        Err(e) => {
            tracing::warn!(error = %e, "no config directory, using defaults");
            GameConfig::default()
        }
    }
}

/// A missing file means defaults. An unreadable or invalid one also falls
/// back to defaults, with a warning.
pub fn load_config_from(path: &Path) -> GameConfig {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return GameConfig::default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read config");
            return GameConfig::default();
        }
    };
    match GameConfig::from_json(&json) {
        Ok(config) => {
            tracing::info!(path = %path.display(), "loaded config");
            config
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
            GameConfig::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub value: u32,
    pub updated_at: DateTime<Utc>,
}

/// High score store backed by a JSON file of `key -> entry`.
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    /// ~/.flappy-shrimp/scores.json
    pub fn open_default() -> Result<Self> {
        Ok(Self::at(save_path(SCORES_FILE)?))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file holds no entries. An unreadable or unparsable one is an
    /// error, so a save never replaces scores it could not read.
    fn entries(&self) -> Result<BTreeMap<String, ScoreEntry>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&json)?)
    }
}

impl HighScoreStore for JsonScoreStore {
    fn load(&mut self, key: &str) -> Result<Option<u32>> {
        Ok(self.entries()?.get(key).map(|e| e.value))
    }

    fn save(&mut self, key: &str, value: u32) -> Result<()> {
        let mut entries = self.entries()?;
        entries.insert(
            key.to_string(),
            ScoreEntry {
                value,
                updated_at: Utc::now(),
            },
        );
        save_json(&self.path, &entries)
    }
}
