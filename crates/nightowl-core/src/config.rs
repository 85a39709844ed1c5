//! Application configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use nightowl_shortcuts::KeyRange;

const DATA_DIR_ENV: &str = "NIGHTOWL_DATA_DIR";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file
    pub database_path: PathBuf,
    /// Where session exports are written
    pub export_dir: PathBuf,
    /// Keys that shortcuts may be bound to
    pub shortcut_keys: KeyRange,
    /// Pending popup → background messages before new ones are dropped
    pub message_capacity: usize,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        let export_dir = dirs::download_dir().unwrap_or_else(|| data_dir.join("exports"));

        Self {
            database_path: data_dir.join("nightowl.db"),
            export_dir,
            shortcut_keys: KeyRange::default(),
            message_capacity: 16,
        }
    }

    /// `$NIGHTOWL_DATA_DIR`, else the platform's local data directory
    pub fn data_dir() -> PathBuf {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
            return PathBuf::from(dir);
        }

        dirs::data_local_dir()
            .map(|d| d.join("NightOwl"))
            .unwrap_or_else(|| PathBuf::from(".nightowl"))
    }

    pub fn with_shortcut_keys(mut self, keys: KeyRange) -> Self {
        self.shortcut_keys = keys;
        self
    }

    pub fn with_export_dir(mut self, dir: PathBuf) -> Self {
        self.export_dir = dir;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}
