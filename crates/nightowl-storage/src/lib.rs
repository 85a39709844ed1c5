//! Night Owl Storage Layer
//!
//! A flat key-value namespace (`sessions`, `sortPreference`, `theme`,
//! `shortcuts`) whose values are JSON documents. Stores always write the
//! complete value for a key; there are no partial updates.

mod database;
mod error;
mod json;
mod migrations;
mod store;

pub use database::Database;
pub use error::StorageError;
pub use json::{
    read_json, read_json_entries, read_json_list, write_json, write_json_entries, StoredList,
};
pub use store::{KeyValueStore, SharedStore, StorageKey};

pub type Result<T> = std::result::Result<T, StorageError>;
