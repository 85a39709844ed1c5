//! Application state container
//!
//! Wires every store to the same storage backend. The popup-side stores and
//! the background listener share state only through that backend plus the
//! message channel.

use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;

use nightowl_session::{Session, SessionStore};
use nightowl_shortcuts::{BackgroundListener, Notifier, ShortcutStore};
use nightowl_storage::{Database, SharedStore};
use nightowl_tabs::TabOpener;

use crate::config::Config;
use crate::export::{export_stats, write_export, ExportStats};
use crate::theme::{Theme, ThemeStore};
use crate::Result;

pub struct NightOwl {
    config: Config,
    storage: SharedStore,
    sessions: SessionStore,
    shortcuts: ShortcutStore,
    theme: ThemeStore,
}

impl NightOwl {
    /// Open the database named by `config` and build the stores on top of it
    pub fn new(config: Config, notifier: Notifier) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;
        Ok(Self::with_storage(config, Arc::new(db), notifier))
    }

    pub fn with_storage(config: Config, storage: SharedStore, notifier: Notifier) -> Self {
        let sessions = SessionStore::new(Arc::clone(&storage));
        let shortcuts =
            ShortcutStore::new(Arc::clone(&storage), config.shortcut_keys, notifier);
        let theme = ThemeStore::new(Arc::clone(&storage));

        Self {
            config,
            storage,
            sessions,
            shortcuts,
            theme,
        }
    }

    /// Load persisted sessions, sort preference and theme
    pub fn initialize(&self) -> Result<()> {
        let sessions = self.sessions.load()?;
        let theme = self.theme.load()?;

        tracing::info!(
            session_count = sessions.len(),
            sort_method = %self.sessions.sort_method(),
            theme = %theme,
            "Night Owl initialized"
        );

        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn storage(&self) -> SharedStore {
        Arc::clone(&self.storage)
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn shortcuts(&self) -> &ShortcutStore {
        &self.shortcuts
    }

    pub fn theme(&self) -> Theme {
        self.theme.current()
    }

    pub fn theme_store(&self) -> &ThemeStore {
        &self.theme
    }

    /// Build a background listener over the same storage
    pub fn background_listener(&self, opener: Arc<dyn TabOpener>) -> Result<BackgroundListener> {
        Ok(BackgroundListener::new(self.storage(), opener)?)
    }

    /// Export sessions, in storage order, to the configured export directory
    pub fn export_sessions(&self, now: DateTime<Utc>) -> Result<PathBuf> {
        let sessions: Vec<Session> = self.sessions.sessions();
        write_export(&sessions, &self.config.export_dir, now)
    }

    pub fn export_stats(&self) -> ExportStats {
        export_stats(&self.sessions.sessions())
    }
}

impl Clone for NightOwl {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            storage: Arc::clone(&self.storage),
            sessions: self.sessions.clone(),
            shortcuts: self.shortcuts.clone(),
            theme: self.theme.clone(),
        }
    }
}
