//! Session Store
//!
//! Owns the in-memory session list and mirrors it to storage. Every mutating
//! operation writes the complete list back before returning.

use parking_lot::RwLock;
use std::sync::Arc;

use nightowl_storage::{
    read_json, read_json_entries, write_json, write_json_entries, SharedStore, StorageKey,
};
use nightowl_tabs::{TabSnapshot, TabSource, WindowOpener};

use crate::error::SessionError;
use crate::session::Session;
use crate::sort::{sort_sessions, SortMethod};
use crate::Result;

pub struct SessionStore {
    /// In-memory session list, in storage order
    sessions: Arc<RwLock<Vec<Session>>>,
    /// Stored entries that no longer parse; written back untouched
    unparsed: Arc<RwLock<Vec<serde_json::Value>>>,
    /// Current display order
    sort_method: Arc<RwLock<SortMethod>>,
    /// Persistence boundary
    storage: SharedStore,
}

impl SessionStore {
    pub fn new(storage: SharedStore) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(Vec::new())),
            unparsed: Arc::new(RwLock::new(Vec::new())),
            sort_method: Arc::new(RwLock::new(SortMethod::default())),
            storage,
        }
    }

    /// Load sessions and the sort preference from storage
    pub fn load(&self) -> Result<Vec<Session>> {
        let stored = read_json_entries::<Session>(self.storage.as_ref(), StorageKey::Sessions)?;
        let sessions = stored.items;
        let sort_method = read_json::<String>(self.storage.as_ref(), StorageKey::SortPreference)?
            .map(|s| SortMethod::parse_lenient(&s))
            .unwrap_or_default();

        *self.sessions.write() = sessions.clone();
        *self.unparsed.write() = stored.unparsed;
        *self.sort_method.write() = sort_method;

        tracing::info!(
            session_count = sessions.len(),
            unreadable = self.unparsed.read().len(),
            sort_method = %sort_method,
            "Loaded sessions"
        );

        Ok(sessions)
    }

    /// Write the full session list to storage, unreadable entries last
    fn persist(&self, sessions: &[Session]) -> Result<()> {
        write_json_entries(
            self.storage.as_ref(),
            StorageKey::Sessions,
            sessions,
            &self.unparsed.read(),
        )?;
        Ok(())
    }

    /// Save the given tabs under `name`.
    ///
    /// An existing session with the same name has its tabs and timestamp
    /// replaced in place; otherwise a new session is appended. A blank name
    /// leaves everything untouched.
    pub fn save(&self, name: &str, tabs: Vec<TabSnapshot>) -> Result<Vec<Session>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(self.sessions());
        }

        let mut sessions = self.sessions.write();
        let mut updated = sessions.clone();
        let tab_count = tabs.len();

        match updated.iter_mut().find(|s| s.name == name) {
            Some(existing) => {
                existing.replace_tabs(tabs);
                tracing::info!(session_name = %name, tab_count, "Updated session");
            }
            None => {
                updated.push(Session::new(name.to_string(), tabs));
                tracing::info!(session_name = %name, tab_count, "Created session");
            }
        }

        self.persist(&updated)?;
        *sessions = updated.clone();

        Ok(updated)
    }

    /// Capture the current window's tabs from `source` and save them
    pub fn capture(&self, name: &str, source: &dyn TabSource) -> Result<Vec<Session>> {
        if name.trim().is_empty() {
            return Err(SessionError::EmptyName);
        }

        let tabs = source.current_window_tabs()?;
        self.save(name, tabs)
    }

    /// Delete every session named `name`
    pub fn delete(&self, name: &str) -> Result<Vec<Session>> {
        let mut sessions = self.sessions.write();
        if name.is_empty() || !sessions.iter().any(|s| s.name == name) {
            return Ok(sessions.clone());
        }

        let updated: Vec<Session> = sessions
            .iter()
            .filter(|s| s.name != name)
            .cloned()
            .collect();

        self.persist(&updated)?;
        *sessions = updated.clone();

        tracing::info!(session_name = %name, "Deleted session");

        Ok(updated)
    }

    /// Rename a session.
    ///
    /// Returns `Ok(None)` when the new name is blank or `old_name` does not
    /// exist, and `NameConflict` when another session already uses the new
    /// name. Renaming a session to its current name succeeds.
    pub fn rename(&self, old_name: &str, new_name: &str) -> Result<Option<Session>> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Ok(None);
        }

        let mut sessions = self.sessions.write();

        if sessions
            .iter()
            .any(|s| s.name == new_name && s.name != old_name)
        {
            return Err(SessionError::NameConflict(new_name.to_string()));
        }

        let Some(index) = sessions.iter().position(|s| s.name == old_name) else {
            return Ok(None);
        };

        let mut updated = sessions.clone();
        updated[index].rename(new_name.to_string());

        self.persist(&updated)?;
        let renamed = updated[index].clone();
        *sessions = updated;

        tracing::info!(
            old_name = %old_name,
            new_name = %new_name,
            "Renamed session"
        );

        Ok(Some(renamed))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.sessions.read().iter().any(|s| s.name == name)
    }

    pub fn find_by_name(&self, name: &str) -> Option<Session> {
        self.sessions.read().iter().find(|s| s.name == name).cloned()
    }

    /// All sessions in storage order
    pub fn sessions(&self) -> Vec<Session> {
        self.sessions.read().clone()
    }

    /// Sorted copy by `method`, or by the current preference
    pub fn sorted(&self, method: Option<SortMethod>) -> Vec<Session> {
        let method = method.unwrap_or_else(|| self.sort_method());
        sort_sessions(&self.sessions.read(), method)
    }

    pub fn sort_method(&self) -> SortMethod {
        *self.sort_method.read()
    }

    /// Remember `method` as the display order
    pub fn set_sort_preference(&self, method: SortMethod) -> Result<()> {
        write_json(
            self.storage.as_ref(),
            StorageKey::SortPreference,
            method.as_str(),
        )?;
        *self.sort_method.write() = method;

        tracing::debug!(sort_method = %method, "Saved sort preference");

        Ok(())
    }

    /// Open the session's tabs, in order, in a new window
    pub fn open(&self, session: &Session, opener: &dyn WindowOpener) -> Result<()> {
        if session.tabs.is_empty() {
            return Err(SessionError::EmptySession(session.name.clone()));
        }

        opener.open_window(&session.urls())?;

        tracing::info!(
            session_name = %session.name,
            tab_count = session.tab_count(),
            "Opened session"
        );

        Ok(())
    }

    pub fn open_by_name(&self, name: &str, opener: &dyn WindowOpener) -> Result<Session> {
        let session = self
            .find_by_name(name)
            .ok_or_else(|| SessionError::NotFound(name.to_string()))?;
        self.open(&session, opener)?;
        Ok(session)
    }
}

impl Clone for SessionStore {
    fn clone(&self) -> Self {
        Self {
            sessions: Arc::clone(&self.sessions),
            unparsed: Arc::clone(&self.unparsed),
            sort_method: Arc::clone(&self.sort_method),
            storage: Arc::clone(&self.storage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use nightowl_storage::{read_json_list, Database, KeyValueStore, StorageError};
    use nightowl_tabs::{RecordingBrowser, StaticTabSource};

    fn store() -> (SessionStore, Database) {
        let db = Database::open_in_memory().unwrap();
        (SessionStore::new(Arc::new(db.clone())), db)
    }

    fn tabs(urls: &[&str]) -> Vec<TabSnapshot> {
        urls.iter().map(|u| TabSnapshot::from_url(*u)).collect()
    }

    fn stored_sessions(db: &Database) -> Vec<Session> {
        read_json_list(db, StorageKey::Sessions).unwrap()
    }

    /// Storage that fails every write
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: StorageKey) -> nightowl_storage::Result<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: StorageKey, _value: &str) -> nightowl_storage::Result<()> {
            Err(StorageError::Backend("read-only".to_string()))
        }

        fn remove(&self, _key: StorageKey) -> nightowl_storage::Result<()> {
            Err(StorageError::Backend("read-only".to_string()))
        }
    }

    #[test]
    fn test_load_defaults_when_empty() {
        let (store, _db) = store();
        assert!(store.load().unwrap().is_empty());
        assert_eq!(store.sort_method(), SortMethod::Name);
    }

    #[test]
    fn test_unreadable_entries_survive_mutation() {
        let (store, db) = store();
        db.set(
            StorageKey::Sessions,
            r#"[
                {
                    "name": "Old",
                    "tabs": [{"url": "https://a.com"}, {"title": "New Tab"}],
                    "lastModified": "2024-03-01T10:00:00.000Z"
                },
                {"name": 42, "tabs": "broken"}
            ]"#,
        )
        .unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Old");
        assert_eq!(loaded[0].tab_count(), 2);

        store.save("Other", tabs(&["https://b.com"])).unwrap();
        store.delete("Nope").unwrap();
        store.rename("Other", "Renamed").unwrap();

        let stored: serde_json::Value =
            serde_json::from_str(&db.get(StorageKey::Sessions).unwrap().unwrap()).unwrap();
        let entries = stored.as_array().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0]["name"], "Old");
        assert_eq!(entries[0]["tabs"].as_array().unwrap().len(), 2);
        assert_eq!(entries[1]["name"], "Renamed");
        assert_eq!(entries[2], serde_json::json!({"name": 42, "tabs": "broken"}));
    }

    #[test]
    fn test_save_then_find() {
        let (store, db) = store();
        let snapshot = vec![
            TabSnapshot::new("https://a.com", "A"),
            TabSnapshot::new("https://b.com", "B"),
        ];

        let sessions = store.save("Work", snapshot.clone()).unwrap();
        assert_eq!(sessions.len(), 1);

        let found = store.find_by_name("Work").unwrap();
        assert_eq!(found.tabs, snapshot);
        assert_eq!(stored_sessions(&db), sessions);
    }

    #[test]
    fn test_save_existing_name_overwrites() {
        let (store, _db) = store();

        store.save("Work", tabs(&["https://a.com"])).unwrap();
        assert!(store.exists("Work"));
        store.save("Home", tabs(&["https://h.com"])).unwrap();

        let sessions = store.save("Work", tabs(&["https://b.com"])).unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].name, "Work");
        assert_eq!(
            store.find_by_name("Work").unwrap().tabs,
            tabs(&["https://b.com"])
        );
    }

    #[test]
    fn test_save_updates_last_modified() {
        let (store, db) = store();
        let mut old = Session::new("Work".to_string(), tabs(&["https://a.com"]));
        old.last_modified = Utc::now() - Duration::days(2);
        write_json(&db, StorageKey::Sessions, &vec![old.clone()]).unwrap();
        store.load().unwrap();

        store.save("Work", tabs(&["https://b.com"])).unwrap();
        assert!(store.find_by_name("Work").unwrap().last_modified > old.last_modified);
    }

    #[test]
    fn test_save_blank_name_is_noop() {
        let (store, db) = store();
        store.save("Work", tabs(&["https://a.com"])).unwrap();

        let sessions = store.save("   ", tabs(&["https://b.com"])).unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(stored_sessions(&db).len(), 1);
    }

    #[test]
    fn test_save_trims_name() {
        let (store, _db) = store();
        store.save("  Work  ", tabs(&["https://a.com"])).unwrap();
        assert!(store.exists("Work"));
    }

    #[test]
    fn test_capture_from_source() {
        let (store, _db) = store();
        let source = StaticTabSource::new(vec![
            TabSnapshot::new("https://a.com", "A"),
            TabSnapshot::new("https://b.com", "B"),
        ]);

        store.capture("Research", &source).unwrap();
        assert_eq!(store.find_by_name("Research").unwrap().tab_count(), 2);
        assert!(matches!(
            store.capture(" ", &source),
            Err(SessionError::EmptyName)
        ));
    }

    #[test]
    fn test_delete() {
        let (store, db) = store();
        store.save("Work", tabs(&["https://a.com"])).unwrap();
        store.save("Home", tabs(&["https://h.com"])).unwrap();

        let sessions = store.delete("Work").unwrap();
        assert_eq!(sessions.len(), 1);
        assert!(!store.exists("Work"));
        assert!(store.exists("Home"));
        assert_eq!(stored_sessions(&db).len(), 1);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let (store, _db) = store();
        store.save("Work", tabs(&["https://a.com"])).unwrap();
        let before = store.sessions();

        assert_eq!(store.delete("Nope").unwrap(), before);
        assert_eq!(store.delete("").unwrap(), before);
    }

    #[test]
    fn test_rename() {
        let (store, db) = store();
        store.save("A", tabs(&["https://a.com"])).unwrap();
        let before = store.find_by_name("A").unwrap();

        let renamed = store.rename("A", "B").unwrap().unwrap();
        assert_eq!(renamed.name, "B");
        assert_eq!(renamed.tabs, before.tabs);
        assert_eq!(renamed.last_modified, before.last_modified);
        assert!(store.find_by_name("A").is_none());
        assert!(store.find_by_name("B").is_some());
        assert_eq!(stored_sessions(&db)[0].name, "B");
    }

    #[test]
    fn test_rename_conflict_leaves_both_unchanged() {
        let (store, db) = store();
        store.save("A", tabs(&["https://a.com"])).unwrap();
        store.save("B", tabs(&["https://b.com"])).unwrap();
        let before = store.sessions();

        let err = store.rename("A", "B").unwrap_err();
        assert!(matches!(err, SessionError::NameConflict(_)));
        assert_eq!(store.sessions(), before);
        assert_eq!(stored_sessions(&db), before);
    }

    #[test]
    fn test_rename_to_own_name() {
        let (store, _db) = store();
        store.save("A", tabs(&["https://a.com"])).unwrap();
        let renamed = store.rename("A", "A").unwrap();
        assert_eq!(renamed.unwrap().name, "A");
    }

    #[test]
    fn test_rename_blank_or_missing() {
        let (store, _db) = store();
        store.save("A", tabs(&["https://a.com"])).unwrap();

        assert!(store.rename("A", "  ").unwrap().is_none());
        assert!(store.rename("Missing", "C").unwrap().is_none());
        assert!(store.exists("A"));
    }

    #[test]
    fn test_sorted_uses_preference_without_mutating() {
        let (store, db) = store();
        store.save("b", tabs(&["https://1.com"])).unwrap();
        store
            .save("a", tabs(&["https://1.com", "https://2.com", "https://3.com"]))
            .unwrap();
        store
            .save("c", tabs(&["https://1.com", "https://2.com"]))
            .unwrap();

        let by_name: Vec<String> = store.sorted(None).into_iter().map(|s| s.name).collect();
        assert_eq!(by_name, vec!["a", "b", "c"]);

        store.set_sort_preference(SortMethod::Tabs).unwrap();
        let by_tabs: Vec<usize> = store
            .sorted(None)
            .iter()
            .map(Session::tab_count)
            .collect();
        assert_eq!(by_tabs, vec![3, 2, 1]);

        let stored: Vec<String> = store.sessions().into_iter().map(|s| s.name).collect();
        assert_eq!(stored, vec!["b", "a", "c"]);

        let reloaded = SessionStore::new(Arc::new(db));
        reloaded.load().unwrap();
        assert_eq!(reloaded.sort_method(), SortMethod::Tabs);
    }

    #[test]
    fn test_unknown_sort_preference_falls_back() {
        let (store, db) = store();
        db.set(StorageKey::SortPreference, "\"size\"").unwrap();
        store.load().unwrap();
        assert_eq!(store.sort_method(), SortMethod::Name);
    }

    #[test]
    fn test_open() {
        let (store, _db) = store();
        let browser = RecordingBrowser::new();
        store
            .save("Work", tabs(&["https://a.com", "https://b.com"]))
            .unwrap();

        store.open_by_name("Work", &browser).unwrap();
        assert_eq!(
            browser.opened_windows(),
            vec![vec!["https://a.com".to_string(), "https://b.com".to_string()]]
        );

        assert!(matches!(
            store.open_by_name("Missing", &browser),
            Err(SessionError::NotFound(_))
        ));
    }

    #[test]
    fn test_open_empty_session_rejected() {
        let (store, _db) = store();
        let browser = RecordingBrowser::new();
        store.save("Empty", Vec::new()).unwrap();

        let session = store.find_by_name("Empty").unwrap();
        assert!(matches!(
            store.open(&session, &browser),
            Err(SessionError::EmptySession(_))
        ));
        assert!(browser.opened_windows().is_empty());
    }

    #[test]
    fn test_storage_failure_propagates_without_mutation() {
        let store = SessionStore::new(Arc::new(ReadOnlyStore));

        let err = store.save("Work", tabs(&["https://a.com"])).unwrap_err();
        assert!(matches!(err, SessionError::Storage(_)));
        assert!(!store.exists("Work"));
    }

    #[test]
    fn test_clones_share_state() {
        let (store, _db) = store();
        let other = store.clone();
        store.save("Work", tabs(&["https://a.com"])).unwrap();
        assert!(other.exists("Work"));
    }
}
