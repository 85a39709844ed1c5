//! Session data structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use nightowl_tabs::TabSnapshot;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Unique, user-editable name
    pub name: String,
    /// Tabs in the order of the source window
    #[serde(default)]
    pub tabs: Vec<TabSnapshot>,
    /// Last content change (tabs), not touched by renames
    #[serde(default = "unknown_time", deserialize_with = "lenient_timestamp")]
    pub last_modified: DateTime<Utc>,
}

/// Timestamps as written by older versions: RFC 3339 text or epoch millis
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredTimestamp {
    Text(String),
    Millis(i64),
    Other(serde::de::IgnoredAny),
}

fn unknown_time() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH
}

/// Unreadable timestamps fall back to the epoch instead of dropping the session
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match StoredTimestamp::deserialize(deserializer)? {
        StoredTimestamp::Text(raw) => DateTime::parse_from_rfc3339(&raw)
            .ok()
            .map(|t| t.with_timezone(&Utc)),
        StoredTimestamp::Millis(ms) => DateTime::from_timestamp_millis(ms),
        StoredTimestamp::Other(_) => None,
    };
    Ok(parsed.unwrap_or_else(unknown_time))
}

impl Session {
    pub fn new(name: String, tabs: Vec<TabSnapshot>) -> Self {
        Self {
            name,
            tabs,
            last_modified: Utc::now(),
        }
    }

    /// Replace the captured tabs wholesale
    pub fn replace_tabs(&mut self, tabs: Vec<TabSnapshot>) {
        self.tabs = tabs;
        self.last_modified = Utc::now();
    }

    /// Rename the session. The content timestamp is kept.
    pub fn rename(&mut self, name: String) {
        self.name = name;
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    /// Tab URLs in window order
    pub fn urls(&self) -> Vec<String> {
        self.tabs.iter().map(|tab| tab.url.clone()).collect()
    }
}
