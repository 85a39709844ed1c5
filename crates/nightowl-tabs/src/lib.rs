//! Night Owl Tabs
//!
//! Tabs are captured as plain `{url, title}` snapshots. The browser itself is
//! reached only through the collaborator traits in [`browser`]: enumerate the
//! current window, open a window, open a single tab.

pub mod browser;
mod error;
mod tab;

pub use browser::{RecordingBrowser, StaticTabSource, TabOpener, TabSource, WindowOpener};
pub use error::TabError;
pub use tab::{format_tab_count, is_web_url, parse_web_url, truncate_url, TabSnapshot};

pub type Result<T> = std::result::Result<T, TabError>;
