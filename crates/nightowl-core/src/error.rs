//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] nightowl_storage::StorageError),

    #[error("Tab error: {0}")]
    Tab(#[from] nightowl_tabs::TabError),

    #[error("Session error: {0}")]
    Session(#[from] nightowl_session::SessionError),

    #[error("Shortcut error: {0}")]
    Shortcut(#[from] nightowl_shortcuts::ShortcutError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No sessions to export. Save some sessions first!")]
    NothingToExport,
}
