//! Session display ordering
//!
//! ```text
//! name  ascending, locale-style: letters, then accents, then lowercase first
//! date  newest lastModified first
//! tabs  most tabs first
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::session::Session;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMethod {
    #[default]
    Name,
    Date,
    Tabs,
}

impl SortMethod {
    /// Parse a stored or user-provided method, falling back to `Name`.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMethod::Name => "name",
            SortMethod::Date => "date",
            SortMethod::Tabs => "tabs",
        }
    }

    fn compare(&self, a: &Session, b: &Session) -> Ordering {
        match self {
            SortMethod::Name => compare_names(&a.name, &b.name),
            SortMethod::Date => b.last_modified.cmp(&a.last_modified),
            SortMethod::Tabs => b.tab_count().cmp(&a.tab_count()),
        }
    }
}

impl std::fmt::Display for SortMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SortMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortMethod::Name),
            "date" => Ok(SortMethod::Date),
            "tabs" => Ok(SortMethod::Tabs),
            _ => Err(format!("Unknown sort method: {}", s)),
        }
    }
}

/// Compare names the way a user-facing collator would: base letters
/// ignoring accents and case, then accents, then case with lowercase first.
fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| folded(a).cmp(&folded(b)))
        .then_with(|| case_pattern(a).cmp(&case_pattern(b)))
        .then_with(|| a.cmp(b))
}

fn base_letters(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Lowercased, accents kept as combining marks
fn folded(s: &str) -> String {
    s.nfd().flat_map(char::to_lowercase).collect()
}

fn case_pattern(s: &str) -> Vec<bool> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(char::is_uppercase)
        .collect()
}

/// Return a sorted copy of `sessions`. The input is left untouched and equal
/// elements keep their relative order.
pub fn sort_sessions(sessions: &[Session], method: SortMethod) -> Vec<Session> {
    if sessions.is_empty() {
        return Vec::new();
    }

    let mut sorted = sessions.to_vec();
    sorted.sort_by(|a, b| method.compare(a, b));
    sorted
}
