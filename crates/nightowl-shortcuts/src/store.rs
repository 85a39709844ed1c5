//! Shortcut Store
//!
//! Storage is the source of truth: every call re-reads the `shortcuts` key,
//! and every mutation writes the whole list back and pings the background
//! listener.

use std::sync::Arc;

use nightowl_storage::{
    read_json_entries, read_json_list, write_json_entries, KeyValueStore, SharedStore,
    StorageKey, StoredList,
};

use crate::message::{Notifier, RuntimeMessage};
use crate::shortcut::{KeyRange, Shortcut};
use crate::Result;

pub(crate) fn load_shortcuts(storage: &dyn KeyValueStore) -> Result<Vec<Shortcut>> {
    Ok(read_json_list(storage, StorageKey::Shortcuts)?)
}

/// Copy of `shortcuts` ordered by ascending key, for display
pub fn display_order(shortcuts: &[Shortcut]) -> Vec<Shortcut> {
    let mut ordered = shortcuts.to_vec();
    ordered.sort_by_key(|s| s.key);
    ordered
}

pub struct ShortcutStore {
    storage: SharedStore,
    keys: KeyRange,
    notifier: Notifier,
}

impl ShortcutStore {
    pub fn new(storage: SharedStore, keys: KeyRange, notifier: Notifier) -> Self {
        Self {
            storage,
            keys,
            notifier,
        }
    }

    pub fn keys(&self) -> KeyRange {
        self.keys
    }

    /// All bindings in storage order
    pub fn list(&self) -> Result<Vec<Shortcut>> {
        load_shortcuts(self.storage.as_ref())
    }

    pub fn find_by_key(&self, key: u32) -> Result<Option<Shortcut>> {
        Ok(self.list()?.into_iter().find(|s| s.key == key))
    }

    fn stored(&self) -> Result<StoredList<Shortcut>> {
        Ok(read_json_entries(self.storage.as_ref(), StorageKey::Shortcuts)?)
    }

    /// Write `shortcuts` back, keeping entries that could not be read
    fn persist(&self, list: &StoredList<Shortcut>) -> Result<()> {
        write_json_entries(
            self.storage.as_ref(),
            StorageKey::Shortcuts,
            &list.items,
            &list.unparsed,
        )?;
        Ok(())
    }

    /// Bind `shortcut.key`, replacing any existing binding for that key.
    /// Name and URL are stored trimmed.
    pub fn upsert(&self, shortcut: Shortcut) -> Result<Vec<Shortcut>> {
        let shortcut = shortcut.trimmed();
        shortcut.validate(&self.keys)?;

        let mut stored = self.stored()?;
        let replaced = stored.items.iter().any(|s| s.key == shortcut.key);
        stored.items.retain(|s| s.key != shortcut.key);
        stored.items.push(shortcut.clone());

        self.persist(&stored)?;

        tracing::info!(
            key = shortcut.key,
            name = %shortcut.name,
            url = %shortcut.url,
            replaced,
            "Saved shortcut"
        );

        self.notifier.notify(RuntimeMessage::RefreshShortcuts {
            shortcut: Some(shortcut),
        });

        Ok(stored.items)
    }

    pub fn delete_by_key(&self, key: u32) -> Result<Vec<Shortcut>> {
        let mut stored = self.stored()?;
        stored.items.retain(|s| s.key != key);

        self.persist(&stored)?;

        tracing::info!(key, "Deleted shortcut");

        self.notifier
            .notify(RuntimeMessage::RefreshShortcuts { shortcut: None });

        Ok(stored.items)
    }
}

impl Clone for ShortcutStore {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            keys: self.keys,
            notifier: self.notifier.clone(),
        }
    }
}
