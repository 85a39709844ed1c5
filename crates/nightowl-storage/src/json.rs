//! Typed JSON access on top of [`KeyValueStore`].
//!
//! Reads are forgiving: a missing key or a value that no longer parses falls
//! back to "nothing stored" instead of failing the caller. Only backend
//! errors propagate.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::store::{KeyValueStore, StorageKey};
use crate::Result;

/// Read a single JSON value. Malformed values read as `None`.
pub fn read_json<T>(store: &dyn KeyValueStore, key: StorageKey) -> Result<Option<T>>
where
    T: DeserializeOwned,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Ignoring malformed stored value");
            Ok(None)
        }
    }
}

/// Entries of a stored JSON array, split by whether they parsed as `T`.
///
/// `unparsed` keeps the raw form of entries that did not parse so they can be
/// written back untouched by [`write_json_entries`].
#[derive(Debug, Clone, PartialEq)]
pub struct StoredList<T> {
    pub items: Vec<T>,
    pub unparsed: Vec<serde_json::Value>,
}

impl<T> Default for StoredList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            unparsed: Vec::new(),
        }
    }
}

/// Read a JSON array, setting aside entries that fail to parse.
///
/// A missing key, or a value that is not an array, reads as an empty list.
pub fn read_json_entries<T>(store: &dyn KeyValueStore, key: StorageKey) -> Result<StoredList<T>>
where
    T: DeserializeOwned,
{
    let Some(entries) = read_json::<Vec<serde_json::Value>>(store, key)? else {
        return Ok(StoredList::default());
    };

    let mut list = StoredList::default();
    for entry in entries {
        match serde_json::from_value(entry.clone()) {
            Ok(item) => list.items.push(item),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Keeping unreadable entry in stored list");
                list.unparsed.push(entry);
            }
        }
    }

    Ok(list)
}

/// Read a JSON array, skipping entries that fail to parse.
pub fn read_json_list<T>(store: &dyn KeyValueStore, key: StorageKey) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    Ok(read_json_entries(store, key)?.items)
}

/// Store `items` followed by the raw `unparsed` entries as one array.
pub fn write_json_entries<T>(
    store: &dyn KeyValueStore,
    key: StorageKey,
    items: &[T],
    unparsed: &[serde_json::Value],
) -> Result<()>
where
    T: Serialize,
{
    let mut entries = Vec::with_capacity(items.len() + unparsed.len());
    for item in items {
        entries.push(serde_json::to_value(item)?);
    }
    entries.extend(unparsed.iter().cloned());
    write_json(store, key, &entries)
}

/// Serialize and store the complete value for `key`.
pub fn write_json<T>(store: &dyn KeyValueStore, key: StorageKey, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let serialized = serde_json::to_string(value)?;
    store.set(key, &serialized)
}
