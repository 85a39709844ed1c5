//! Shortcut error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShortcutError {
    #[error("Shortcut key must be a number: {0}")]
    InvalidKey(String),

    #[error("Shortcut key {key} is outside the allowed range {min}-{max}")]
    KeyOutOfRange { key: u32, min: u32, max: u32 },

    #[error("Shortcut name cannot be empty")]
    EmptyName,

    #[error("Shortcut URL cannot be empty")]
    EmptyUrl,

    #[error("Shortcut URL must start with http:// or https://: {0}")]
    InvalidUrl(String),

    #[error("Storage error: {0}")]
    Storage(#[from] nightowl_storage::StorageError),

    #[error("Tab error: {0}")]
    Tab(#[from] nightowl_tabs::TabError),
}
