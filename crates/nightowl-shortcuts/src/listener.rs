//! Background listener
//!
//! Lives in the long-running context. Keeps a cached copy of the bindings
//! for quick inspection, but always re-reads storage before opening a URL.

use parking_lot::RwLock;
use std::sync::Arc;

use nightowl_storage::SharedStore;
use nightowl_tabs::TabOpener;

use crate::command::GlobalCommand;
use crate::message::{Inbox, RuntimeMessage};
use crate::shortcut::Shortcut;
use crate::store::load_shortcuts;
use crate::Result;

pub struct BackgroundListener {
    storage: SharedStore,
    cache: Arc<RwLock<Vec<Shortcut>>>,
    opener: Arc<dyn TabOpener>,
}

impl BackgroundListener {
    /// Create a listener and prime its cache from storage
    pub fn new(storage: SharedStore, opener: Arc<dyn TabOpener>) -> Result<Self> {
        let listener = Self {
            storage,
            cache: Arc::new(RwLock::new(Vec::new())),
            opener,
        };
        listener.refresh()?;

        tracing::info!("Background listener initialized");

        Ok(listener)
    }

    /// Reload the cache from storage
    pub fn refresh(&self) -> Result<usize> {
        let shortcuts = load_shortcuts(self.storage.as_ref())?;
        let count = shortcuts.len();
        *self.cache.write() = shortcuts;

        tracing::debug!(shortcut_count = count, "Shortcut cache refreshed");

        Ok(count)
    }

    pub fn cached(&self) -> Vec<Shortcut> {
        self.cache.read().clone()
    }

    /// Open the URL bound to `key`, using fresh data from storage.
    ///
    /// Returns `None` when nothing is bound to `key`.
    pub fn open_shortcut(&self, key: u32) -> Result<Option<Shortcut>> {
        let shortcuts = load_shortcuts(self.storage.as_ref())?;

        let Some(shortcut) = shortcuts.into_iter().find(|s| s.key == key) else {
            tracing::info!(key, "No shortcut bound to key");
            return Ok(None);
        };

        self.opener.open_tab(&shortcut.url)?;

        tracing::info!(
            key,
            name = %shortcut.name,
            url = %shortcut.url,
            "Opened shortcut"
        );

        Ok(Some(shortcut))
    }

    /// Handle a global command by name; unknown commands are ignored.
    pub fn handle_command(&self, command: &str) -> Result<Option<Shortcut>> {
        let Some(parsed) = GlobalCommand::parse(command) else {
            tracing::debug!(command = %command, "Ignoring unknown command");
            return Ok(None);
        };

        tracing::debug!(command = %parsed.name(), "Dispatching global command");

        match parsed {
            GlobalCommand::OpenShortcut(key) => self.open_shortcut(key),
            GlobalCommand::OpenPopup => {
                tracing::debug!("Popup requested");
                Ok(None)
            }
        }
    }

    pub fn handle_message(&self, message: RuntimeMessage) -> Result<()> {
        tracing::debug!(action = message.action(), "Background received message");

        match message {
            RuntimeMessage::RefreshShortcuts { .. } => {
                self.refresh()?;
            }
            RuntimeMessage::OpenShortcut { key } => {
                self.open_shortcut(key)?;
            }
        }

        Ok(())
    }

    /// Drain `inbox` until every notifier is gone. Handler failures are
    /// logged and the loop continues.
    pub async fn run(&self, mut inbox: Inbox) {
        while let Some(message) = inbox.recv().await {
            let action = message.action();
            if let Err(e) = self.handle_message(message) {
                tracing::warn!(action, error = %e, "Failed to handle message");
            }
        }

        tracing::info!("Background listener stopped");
    }
}

impl Clone for BackgroundListener {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            cache: Arc::clone(&self.cache),
            opener: Arc::clone(&self.opener),
        }
    }
}
