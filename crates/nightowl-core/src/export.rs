//! Session export
//!
//! The export document maps each session name to its tab URLs:
//!
//! ```json
//! {
//!   "Work": ["https://a.com", "https://b.com"],
//!   "Home": ["https://c.com"]
//! }
//! ```
//!
//! Titles are dropped, as are tabs without a URL.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use nightowl_session::Session;

use crate::error::CoreError;
use crate::Result;

const FILE_PREFIX: &str = "night-owl-sessions";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportStats {
    pub sessions: usize,
    pub tabs: usize,
    pub urls: usize,
}

pub fn export_document(sessions: &[Session]) -> Value {
    let mut document = Map::new();
    for session in sessions {
        let urls: Vec<Value> = session
            .tabs
            .iter()
            .filter(|tab| !tab.is_blank())
            .map(|tab| Value::String(tab.url.clone()))
            .collect();
        document.insert(session.name.clone(), Value::Array(urls));
    }
    Value::Object(document)
}

/// `night-owl-sessions-YYYY-MM-DDTHH-MM-SS.json`, in UTC
pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("{FILE_PREFIX}-{}.json", now.format("%Y-%m-%dT%H-%M-%S"))
}

pub fn export_stats(sessions: &[Session]) -> ExportStats {
    ExportStats {
        sessions: sessions.len(),
        tabs: sessions.iter().map(Session::tab_count).sum(),
        urls: sessions
            .iter()
            .flat_map(|s| s.tabs.iter())
            .filter(|tab| !tab.is_blank())
            .count(),
    }
}

/// Write the export document into `dir` and return the file path
pub fn write_export(sessions: &[Session], dir: &Path, now: DateTime<Utc>) -> Result<PathBuf> {
    if sessions.is_empty() {
        return Err(CoreError::NothingToExport);
    }

    std::fs::create_dir_all(dir)?;

    let path = dir.join(export_filename(now));
    let contents = serde_json::to_string_pretty(&export_document(sessions))?;
    std::fs::write(&path, contents)?;

    tracing::info!(
        session_count = sessions.len(),
        path = %path.display(),
        "Exported sessions"
    );

    Ok(path)
}
