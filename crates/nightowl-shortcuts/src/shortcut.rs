//! Shortcut data structures and validation

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ShortcutError;
use crate::Result;

/// Inclusive range of keys a binding may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRange {
    pub min: u32,
    pub max: u32,
}

impl KeyRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn contains(&self, key: u32) -> bool {
        (self.min..=self.max).contains(&key)
    }

    pub fn check(&self, key: u32) -> Result<()> {
        if self.contains(key) {
            Ok(())
        } else {
            Err(ShortcutError::KeyOutOfRange {
                key,
                min: self.min,
                max: self.max,
            })
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = u32> {
        self.min..=self.max
    }
}

impl Default for KeyRange {
    fn default() -> Self {
        Self::new(0, 9)
    }
}

impl std::fmt::Display for KeyRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortcut {
    /// Primary identifier
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub key: u32,
    /// Display label
    pub name: String,
    /// Absolute http(s) URL
    pub url: String,
}

/// Keys saved from form input may have been stored as `"3"`
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredKey {
    Number(u32),
    Text(String),
}

fn number_or_numeric_string<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match StoredKey::deserialize(deserializer)? {
        StoredKey::Number(key) => Ok(key),
        StoredKey::Text(raw) => raw
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid shortcut key: {raw}"))),
    }
}

impl Shortcut {
    pub fn new(key: u32, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            key,
            name: name.into(),
            url: url.into(),
        }
    }

    /// Same binding with surrounding whitespace removed from name and URL
    pub fn trimmed(self) -> Self {
        Self {
            key: self.key,
            name: self.name.trim().to_string(),
            url: self.url.trim().to_string(),
        }
    }

    /// Check the binding against `keys` and the field rules
    pub fn validate(&self, keys: &KeyRange) -> Result<()> {
        keys.check(self.key)?;

        if self.name.trim().is_empty() {
            return Err(ShortcutError::EmptyName);
        }

        let url = self.url.trim();
        if url.is_empty() {
            return Err(ShortcutError::EmptyUrl);
        }
        if !(url.starts_with("http://") || url.starts_with("https://"))
            || !nightowl_tabs::is_web_url(url)
        {
            return Err(ShortcutError::InvalidUrl(self.url.clone()));
        }

        Ok(())
    }
}

/// Raw form input for a shortcut, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShortcutDraft {
    pub key: String,
    pub name: String,
    pub url: String,
}

impl ShortcutDraft {
    pub fn new(key: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            url: url.into(),
        }
    }

    /// Turn form input into a shortcut, trimming every field.
    pub fn validate(&self, keys: &KeyRange) -> Result<Shortcut> {
        let raw_key = self.key.trim();
        let key: u32 = raw_key
            .parse()
            .map_err(|_| ShortcutError::InvalidKey(raw_key.to_string()))?;

        let shortcut = Shortcut::new(key, self.name.trim(), self.url.trim());
        shortcut.validate(keys)?;
        Ok(shortcut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_range() {
        let range = KeyRange::default();
        assert!(range.contains(0));
        assert!(range.contains(9));
        assert!(!range.contains(10));
        assert_eq!(range.keys().count(), 10);

        let swapped = KeyRange::new(3, 1);
        assert_eq!(swapped, KeyRange::new(1, 3));
        assert_eq!(swapped.to_string(), "1-3");
    }

    #[test]
    fn test_draft_validates_and_trims() {
        let draft = ShortcutDraft::new(" 1 ", " Mail ", " https://mail.example.com ");
        let shortcut = draft.validate(&KeyRange::default()).unwrap();
        assert_eq!(shortcut, Shortcut::new(1, "Mail", "https://mail.example.com"));
    }

    #[test]
    fn test_draft_rejects_bad_key() {
        let keys = KeyRange::default();
        let err = ShortcutDraft::new("x", "Mail", "https://a.com")
            .validate(&keys)
            .unwrap_err();
        assert!(matches!(err, ShortcutError::InvalidKey(_)));

        let err = ShortcutDraft::new("-1", "Mail", "https://a.com")
            .validate(&keys)
            .unwrap_err();
        assert!(matches!(err, ShortcutError::InvalidKey(_)));

        let err = ShortcutDraft::new("4", "Mail", "https://a.com")
            .validate(&KeyRange::new(1, 3))
            .unwrap_err();
        assert!(matches!(err, ShortcutError::KeyOutOfRange { key: 4, .. }));
    }

    #[test]
    fn test_draft_rejects_blank_fields() {
        let keys = KeyRange::default();
        assert!(matches!(
            ShortcutDraft::new("1", "  ", "https://a.com").validate(&keys),
            Err(ShortcutError::EmptyName)
        ));
        assert!(matches!(
            ShortcutDraft::new("1", "Mail", "").validate(&keys),
            Err(ShortcutError::EmptyUrl)
        ));
    }

    #[test]
    fn test_draft_requires_web_scheme() {
        let keys = KeyRange::default();
        for url in ["mail.example.com", "ftp://example.com", "javascript:alert(1)", "https://"] {
            let err = ShortcutDraft::new("1", "Mail", url).validate(&keys).unwrap_err();
            assert!(matches!(err, ShortcutError::InvalidUrl(_)), "{url}");
        }
        assert!(ShortcutDraft::new("1", "Local", "http://localhost:3000")
            .validate(&keys)
            .is_ok());
    }

    #[test]
    fn test_wire_format() {
        let shortcut: Shortcut =
            serde_json::from_str(r#"{"key": 2, "name": "News", "url": "https://news.example"}"#)
                .unwrap();
        assert_eq!(shortcut.key, 2);
        assert_eq!(
            serde_json::to_value(&shortcut).unwrap()["url"],
            "https://news.example"
        );
    }

    #[test]
    fn test_string_key_in_storage() {
        let shortcut: Shortcut =
            serde_json::from_str(r#"{"key": "4", "name": "Mail", "url": "https://mail.example"}"#)
                .unwrap();
        assert_eq!(shortcut.key, 4);
        assert_eq!(serde_json::to_value(&shortcut).unwrap()["key"], 4);

        assert!(serde_json::from_str::<Shortcut>(
            r#"{"key": "four", "name": "Mail", "url": "https://mail.example"}"#
        )
        .is_err());
    }

    #[test]
    fn test_trimmed() {
        let shortcut = Shortcut::new(1, " Mail ", " https://mail.example ").trimmed();
        assert_eq!(shortcut, Shortcut::new(1, "Mail", "https://mail.example"));
    }
}
