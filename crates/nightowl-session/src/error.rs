//! Session error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("A session with this name already exists: {0}")]
    NameConflict(String),

    #[error("Session name cannot be empty")]
    EmptyName,

    #[error("Session has no tabs to open: {0}")]
    EmptySession(String),

    #[error("Storage error: {0}")]
    Storage(#[from] nightowl_storage::StorageError),

    #[error("Tab error: {0}")]
    Tab(#[from] nightowl_tabs::TabError),
}
