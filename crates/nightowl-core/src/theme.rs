//! Theme preference

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use nightowl_storage::{read_json, write_json, SharedStore, StorageKey};

use crate::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// The only thing the presentation layer styles on
    pub fn is_light(&self) -> bool {
        matches!(self, Theme::Light)
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(format!("Unknown theme: {}", s)),
        }
    }
}

pub struct ThemeStore {
    current: Arc<RwLock<Theme>>,
    storage: SharedStore,
}

impl ThemeStore {
    pub fn new(storage: SharedStore) -> Self {
        Self {
            current: Arc::new(RwLock::new(Theme::default())),
            storage,
        }
    }

    /// Load the persisted theme; anything unrecognized reads as dark
    pub fn load(&self) -> Result<Theme> {
        let theme = read_json::<String>(self.storage.as_ref(), StorageKey::Theme)?
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();
        *self.current.write() = theme;
        Ok(theme)
    }

    pub fn current(&self) -> Theme {
        *self.current.read()
    }

    pub fn set(&self, theme: Theme) -> Result<()> {
        write_json(self.storage.as_ref(), StorageKey::Theme, theme.as_str())?;
        *self.current.write() = theme;

        tracing::info!(theme = %theme, "Theme changed");

        Ok(())
    }

    pub fn toggle(&self) -> Result<Theme> {
        let next = self.current().toggled();
        self.set(next)?;
        Ok(next)
    }
}

impl Clone for ThemeStore {
    fn clone(&self) -> Self {
        Self {
            current: Arc::clone(&self.current),
            storage: Arc::clone(&self.storage),
        }
    }
}
