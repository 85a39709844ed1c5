//! Tab snapshot data structure

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::TabError;
use crate::Result;

/// A tab as captured from the browser at save time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabSnapshot {
    /// Empty when the browser did not report one
    #[serde(default, deserialize_with = "string_or_null")]
    pub url: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub title: String,
}

fn string_or_null<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl TabSnapshot {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }

    /// Snapshot of a tab whose title is unknown
    pub fn from_url(url: impl Into<String>) -> Self {
        Self::new(url, String::new())
    }

    /// Get display title (with fallback to URL)
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.url
        } else {
            &self.title
        }
    }

    /// Tabs without a URL are skipped on export
    pub fn is_blank(&self) -> bool {
        self.url.trim().is_empty()
    }
}

pub fn format_tab_count(count: usize) -> String {
    if count == 1 {
        "1 tab".to_string()
    } else {
        format!("{count} tabs")
    }
}

/// True for absolute `http`/`https` URLs.
pub fn is_web_url(raw: &str) -> bool {
    match url::Url::parse(raw.trim()) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

pub fn parse_web_url(raw: &str) -> Result<url::Url> {
    let parsed =
        url::Url::parse(raw.trim()).map_err(|e| TabError::InvalidUrl(format!("{raw}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(TabError::InvalidUrl(format!(
            "{raw}: unsupported scheme '{other}'"
        ))),
    }
}

/// Shorten a URL for list display.
///
/// Short URLs are returned unchanged. Longer ones keep the host and as much
/// of the path as fits, followed by `...`. Lengths are counted in chars.
pub fn truncate_url(raw: &str, max_len: usize) -> String {
    if raw.chars().count() <= max_len {
        return raw.to_string();
    }

    let budget = max_len.saturating_sub(3);
    let Ok(parsed) = url::Url::parse(raw) else {
        return format!("{}...", take_chars(raw, budget));
    };

    let host = parsed.host_str().unwrap_or_default();
    let host_len = host.chars().count();
    if host_len >= budget {
        return format!("{}...", take_chars(host, budget));
    }

    let path_space = budget - host_len;
    if path_space == 0 {
        return host.to_string();
    }

    format!("{host}{}...", take_chars(parsed.path(), path_space))
}

fn take_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}
