//! Night Owl Core
//!
//! Central coordination layer: wires the session, shortcut and theme stores
//! to one storage backend and owns the export writer.

mod app;
mod config;
mod error;
pub mod export;
mod theme;

pub use app::NightOwl;
pub use config::Config;
pub use error::CoreError;
pub use export::{export_document, export_filename, export_stats, write_export, ExportStats};
pub use theme::{Theme, ThemeStore};

// Re-export core components
pub use nightowl_session::{sort_sessions, Session, SessionError, SessionStore, SortMethod};
pub use nightowl_shortcuts::{
    display_order, message_channel, BackgroundListener, GlobalCommand, Inbox, KeyRange, Notifier,
    RuntimeMessage, Shortcut, ShortcutDraft, ShortcutError, ShortcutStore,
};
pub use nightowl_storage::{Database, KeyValueStore, SharedStore, StorageError, StorageKey};
pub use nightowl_tabs::{
    format_tab_count, parse_web_url, truncate_url, TabError, TabOpener, TabSnapshot, TabSource, WindowOpener,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
///
/// Log lines go to stderr so stdout stays free for command output.
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
