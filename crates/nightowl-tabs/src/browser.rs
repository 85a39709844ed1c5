//! Browser collaborators
//!
//! The stores never talk to a browser directly. Whatever hosts them (an
//! extension shim, the CLI, a test) provides these three capabilities.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::tab::TabSnapshot;
use crate::Result;

/// Enumerates the tabs of the active window, in tab order.
pub trait TabSource: Send + Sync {
    fn current_window_tabs(&self) -> Result<Vec<TabSnapshot>>;
}

/// Opens a new focused window with one tab per URL, in order.
pub trait WindowOpener: Send + Sync {
    fn open_window(&self, urls: &[String]) -> Result<()>;
}

/// Opens a single new tab.
pub trait TabOpener: Send + Sync {
    fn open_tab(&self, url: &str) -> Result<()>;
}

/// A tab source with a fixed set of tabs.
#[derive(Debug, Clone, Default)]
pub struct StaticTabSource {
    tabs: Vec<TabSnapshot>,
}

impl StaticTabSource {
    pub fn new(tabs: Vec<TabSnapshot>) -> Self {
        Self { tabs }
    }
}

impl TabSource for StaticTabSource {
    fn current_window_tabs(&self) -> Result<Vec<TabSnapshot>> {
        Ok(self.tabs.clone())
    }
}

/// Remembers every window and tab it was asked to open.
#[derive(Debug, Default)]
pub struct RecordingBrowser {
    windows: Arc<Mutex<Vec<Vec<String>>>>,
    tabs: Arc<Mutex<Vec<String>>>,
}

impl RecordingBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened_windows(&self) -> Vec<Vec<String>> {
        self.windows.lock().clone()
    }

    pub fn opened_tabs(&self) -> Vec<String> {
        self.tabs.lock().clone()
    }
}

impl Clone for RecordingBrowser {
    fn clone(&self) -> Self {
        Self {
            windows: Arc::clone(&self.windows),
            tabs: Arc::clone(&self.tabs),
        }
    }
}

impl WindowOpener for RecordingBrowser {
    fn open_window(&self, urls: &[String]) -> Result<()> {
        tracing::debug!(tab_count = urls.len(), "Recording opened window");
        self.windows.lock().push(urls.to_vec());
        Ok(())
    }
}

impl TabOpener for RecordingBrowser {
    fn open_tab(&self, url: &str) -> Result<()> {
        tracing::debug!(url = %url, "Recording opened tab");
        self.tabs.lock().push(url.to_string());
        Ok(())
    }
}
