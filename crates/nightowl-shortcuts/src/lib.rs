//! Night Owl Shortcuts
//!
//! A shortcut binds a small integer key to a URL. One binding per key:
//! assigning a bound key replaces the old binding.
//!
//! The popup side edits bindings through [`ShortcutStore`]; the background
//! side ([`BackgroundListener`]) reacts to global commands such as
//! `open-shortcut-3` and opens the bound URL. The two sides talk over a
//! best-effort [`message_channel`]; the listener always re-reads storage
//! before opening, so a lost message only leaves its cache stale.

mod command;
mod error;
mod listener;
mod message;
mod shortcut;
mod store;

pub use command::GlobalCommand;
pub use error::ShortcutError;
pub use listener::BackgroundListener;
pub use message::{message_channel, Inbox, Notifier, RuntimeMessage};
pub use shortcut::{KeyRange, Shortcut, ShortcutDraft};
pub use store::{display_order, ShortcutStore};

pub type Result<T> = std::result::Result<T, ShortcutError>;
