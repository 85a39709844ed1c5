//! Terminal stand-ins for the browser
//!
//! Tabs come from a JSON file (or stdin), and "opening" a window or tab
//! records the URLs so the command can print them.

use parking_lot::Mutex;
use serde::Deserialize;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use nightowl_core::{parse_web_url, TabError, TabOpener, TabSnapshot, TabSource, WindowOpener};

const STDIN: &str = "-";

/// A tab entry is either a bare URL or a `{url, title}` object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TabEntry {
    Url(String),
    Tab(TabSnapshot),
}

impl From<TabEntry> for TabSnapshot {
    fn from(entry: TabEntry) -> Self {
        match entry {
            TabEntry::Url(url) => TabSnapshot::from_url(url),
            TabEntry::Tab(tab) => tab,
        }
    }
}

pub struct FileTabSource {
    path: String,
}

impl FileTabSource {
    /// `-` reads from stdin
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    fn read_raw(&self) -> std::io::Result<String> {
        if self.path == STDIN {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;
            Ok(raw)
        } else {
            std::fs::read_to_string(PathBuf::from(&self.path))
        }
    }
}

pub(crate) fn parse_tabs(raw: &str) -> Result<Vec<TabSnapshot>, TabError> {
    let entries: Vec<TabEntry> =
        serde_json::from_str(raw).map_err(|e| TabError::Source(e.to_string()))?;
    Ok(entries.into_iter().map(Into::into).collect())
}

impl TabSource for FileTabSource {
    fn current_window_tabs(&self) -> Result<Vec<TabSnapshot>, TabError> {
        let raw = self
            .read_raw()
            .map_err(|e| TabError::Source(format!("{}: {}", self.path, e)))?;
        let tabs = parse_tabs(&raw)?;

        tracing::debug!(source = %self.path, tab_count = tabs.len(), "Read tabs");

        Ok(tabs)
    }
}

/// Records every URL it is asked to open
#[derive(Default)]
pub struct ConsoleBrowser {
    opened: Arc<Mutex<Vec<String>>>,
}

impl ConsoleBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().clone()
    }
}

impl Clone for ConsoleBrowser {
    fn clone(&self) -> Self {
        Self {
            opened: Arc::clone(&self.opened),
        }
    }
}

impl WindowOpener for ConsoleBrowser {
    fn open_window(&self, urls: &[String]) -> Result<(), TabError> {
        tracing::info!(tab_count = urls.len(), "Opening window");
        self.opened.lock().extend(urls.iter().cloned());
        Ok(())
    }
}

impl TabOpener for ConsoleBrowser {
    /// Only web URLs open as a single tab
    fn open_tab(&self, url: &str) -> Result<(), TabError> {
        parse_web_url(url)?;
        tracing::info!(url = %url, "Opening tab");
        self.opened.lock().push(url.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_mixed_entries() {
        let tabs = parse_tabs(
            r#"["https://a.com", {"url": "https://b.com", "title": "B"}, {"url": "https://c.com"}]"#,
        )
        .unwrap();

        assert_eq!(tabs.len(), 3);
        assert_eq!(tabs[0].url, "https://a.com");
        assert_eq!(tabs[1].title, "B");
        assert_eq!(tabs[2].title, "");
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(matches!(
            parse_tabs(r#"{"url": "https://a.com"}"#),
            Err(TabError::Source(_))
        ));
    }

    #[test]
    fn test_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["https://a.com", "https://b.com"]"#).unwrap();

        let source = FileTabSource::new(file.path().to_string_lossy().to_string());
        let tabs = source.current_window_tabs().unwrap();
        assert_eq!(tabs.len(), 2);
    }

    #[test]
    fn test_missing_file_is_source_error() {
        let source = FileTabSource::new("/nonexistent/tabs.json");
        assert!(matches!(
            source.current_window_tabs(),
            Err(TabError::Source(_))
        ));
    }

    #[test]
    fn test_console_browser_records() {
        let browser = ConsoleBrowser::new();
        let shared = browser.clone();
        browser
            .open_window(&["https://a.com".to_string(), "https://b.com".to_string()])
            .unwrap();
        browser.open_tab("https://c.com").unwrap();
        assert_eq!(shared.opened().len(), 3);
    }

    #[test]
    fn test_console_browser_rejects_non_web_tab() {
        let browser = ConsoleBrowser::new();
        assert!(matches!(
            browser.open_tab("chrome://settings"),
            Err(TabError::InvalidUrl(_))
        ));
        assert!(browser.opened().is_empty());
    }
}
