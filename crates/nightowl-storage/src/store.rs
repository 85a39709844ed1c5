//! Key-value store abstraction

use std::sync::Arc;

use crate::Result;

/// Keys of the persisted namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Sessions,
    SortPreference,
    Theme,
    Shortcuts,
}

impl StorageKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Sessions => "sessions",
            StorageKey::SortPreference => "sortPreference",
            StorageKey::Theme => "theme",
            StorageKey::Shortcuts => "shortcuts",
        }
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pass-through persistence boundary used by every store.
///
/// Values are opaque strings (JSON text in practice). Implementations must
/// make a completed `set` visible to every later `get` on any clone.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: StorageKey) -> Result<Option<String>>;

    fn set(&self, key: StorageKey, value: &str) -> Result<()>;

    fn remove(&self, key: StorageKey) -> Result<()>;
}

pub type SharedStore = Arc<dyn KeyValueStore>;
