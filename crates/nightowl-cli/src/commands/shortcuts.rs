//! Shortcut commands
//!
//! The CLI hosts both sides: mutations go through the `ShortcutStore`, and
//! the queued notifications are handed to an in-process background listener
//! before the command returns.
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use nightowl_core::{display_order, truncate_url, Inbox, NightOwl, Shortcut, ShortcutDraft};

use super::browser::ConsoleBrowser;
use super::CommandResult;

const URL_DISPLAY_LEN: usize = 30;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutInfo {
    pub key: u32,
    pub name: String,
    pub url: String,
    pub display_url: String,
}

impl From<Shortcut> for ShortcutInfo {
    fn from(shortcut: Shortcut) -> Self {
        let display_url = truncate_url(&shortcut.url, URL_DISPLAY_LEN);
        Self {
            key: shortcut.key,
            name: shortcut.name,
            url: shortcut.url,
            display_url,
        }
    }
}

/// A bindable key and what, if anything, is bound to it
#[derive(Debug, Serialize)]
pub struct KeySlot {
    pub key: u32,
    pub label: String,
    pub assigned: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OpenedShortcut {
    pub shortcut: Option<ShortcutInfo>,
    pub opened: Vec<String>,
}

fn infos(shortcuts: &[Shortcut]) -> Vec<ShortcutInfo> {
    display_order(shortcuts)
        .into_iter()
        .map(ShortcutInfo::from)
        .collect()
}

/// Feed queued notifications to a background listener
fn deliver(app: &NightOwl, inbox: &mut Inbox) {
    let listener = match app.background_listener(Arc::new(ConsoleBrowser::new())) {
        Ok(listener) => listener,
        Err(e) => {
            tracing::warn!(error = %e, "Could not start background listener");
            return;
        }
    };

    while let Some(message) = inbox.try_recv() {
        if let Err(e) = listener.handle_message(message) {
            tracing::warn!(error = %e, "Failed to handle message");
        }
    }
}

pub fn list(app: &NightOwl) -> CommandResult<Vec<ShortcutInfo>> {
    match app.shortcuts().list() {
        Ok(shortcuts) => CommandResult::ok(infos(&shortcuts)),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Every key in the configured range, marking the taken ones
pub fn keys(app: &NightOwl) -> CommandResult<Vec<KeySlot>> {
    let shortcuts = match app.shortcuts().list() {
        Ok(shortcuts) => shortcuts,
        Err(e) => return CommandResult::err(e.to_string()),
    };

    let slots = app
        .shortcuts()
        .keys()
        .keys()
        .map(|key| {
            let assigned = shortcuts
                .iter()
                .find(|s| s.key == key)
                .map(|s| s.name.clone());
            let label = match &assigned {
                Some(name) => format!("{key} - {name}"),
                None => key.to_string(),
            };
            KeySlot {
                key,
                label,
                assigned,
            }
        })
        .collect();

    CommandResult::ok(slots)
}

/// Bind a key. A key that is already bound is only replaced with `force`.
pub fn set(
    app: &NightOwl,
    inbox: &mut Inbox,
    draft: ShortcutDraft,
    force: bool,
) -> CommandResult<Vec<ShortcutInfo>> {
    let shortcut = match draft.validate(&app.shortcuts().keys()) {
        Ok(shortcut) => shortcut,
        Err(e) => return CommandResult::err(e.to_string()),
    };

    if !force {
        match app.shortcuts().find_by_key(shortcut.key) {
            Ok(Some(existing)) => {
                return CommandResult::err(format!(
                    "Ctrl+{} is already assigned to \"{}\". Use --force to overwrite it.",
                    shortcut.key, existing.name
                ))
            }
            Ok(None) => {}
            Err(e) => return CommandResult::err(e.to_string()),
        }
    }

    match app.shortcuts().upsert(shortcut) {
        Ok(shortcuts) => {
            deliver(app, inbox);
            CommandResult::ok(infos(&shortcuts))
        }
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub fn delete(app: &NightOwl, inbox: &mut Inbox, key: u32) -> CommandResult<Vec<ShortcutInfo>> {
    match app.shortcuts().delete_by_key(key) {
        Ok(shortcuts) => {
            deliver(app, inbox);
            CommandResult::ok(infos(&shortcuts))
        }
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub fn open(app: &NightOwl, key: u32) -> CommandResult<OpenedShortcut> {
    let browser = ConsoleBrowser::new();
    let result = app
        .background_listener(Arc::new(browser.clone()))
        .and_then(|listener| Ok(listener.open_shortcut(key)?));

    match result {
        Ok(shortcut) => CommandResult::ok(OpenedShortcut {
            shortcut: shortcut.map(ShortcutInfo::from),
            opened: browser.opened(),
        }),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Dispatch a global command name such as `open-shortcut-3`
pub fn command(app: &NightOwl, name: &str) -> CommandResult<OpenedShortcut> {
    let browser = ConsoleBrowser::new();
    let result = app
        .background_listener(Arc::new(browser.clone()))
        .and_then(|listener| Ok(listener.handle_command(name)?));

    match result {
        Ok(shortcut) => CommandResult::ok(OpenedShortcut {
            shortcut: shortcut.map(ShortcutInfo::from),
            opened: browser.opened(),
        }),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing;

    #[test]
    fn test_set_lists_in_key_order() {
        let (app, mut inbox) = testing::app();

        set(&app, &mut inbox, ShortcutDraft::new("5", "Mail", "https://mail.example"), false);
        let result = set(&app, &mut inbox, ShortcutDraft::new(" 1 ", " News ", "https://news.example"), false);

        let shortcuts = result.data.unwrap();
        assert_eq!(shortcuts.len(), 2);
        assert_eq!(shortcuts[0].key, 1);
        assert_eq!(shortcuts[0].name, "News");
        assert!(inbox.try_recv().is_none());
    }

    #[test]
    fn test_set_rejects_invalid_draft() {
        let (app, mut inbox) = testing::app();

        assert!(!set(&app, &mut inbox, ShortcutDraft::new("x", "Mail", "https://mail.example"), false).success);
        assert!(!set(&app, &mut inbox, ShortcutDraft::new("12", "Mail", "https://mail.example"), false).success);
        assert!(!set(&app, &mut inbox, ShortcutDraft::new("1", "Mail", "ftp://mail.example"), false).success);
        assert!(list(&app).data.unwrap().is_empty());
    }

    #[test]
    fn test_set_bound_key_requires_force() {
        let (app, mut inbox) = testing::app();
        set(&app, &mut inbox, ShortcutDraft::new("2", "Mail", "https://mail.example"), false);

        let refused = set(&app, &mut inbox, ShortcutDraft::new("2", "News", "https://news.example"), false);
        assert!(!refused.success);
        assert_eq!(
            refused.error.as_deref(),
            Some("Ctrl+2 is already assigned to \"Mail\". Use --force to overwrite it.")
        );
        assert_eq!(app.shortcuts().find_by_key(2).unwrap().unwrap().name, "Mail");

        let forced = set(&app, &mut inbox, ShortcutDraft::new("2", "News", "https://news.example"), true);
        assert!(forced.success);
        assert_eq!(app.shortcuts().find_by_key(2).unwrap().unwrap().name, "News");
    }

    #[test]
    fn test_keys_marks_taken_slots() {
        let (app, mut inbox) = testing::app();
        set(&app, &mut inbox, ShortcutDraft::new("3", "Docs", "https://docs.example"), false);

        let slots = keys(&app).data.unwrap();
        assert_eq!(slots.len(), 10);
        assert_eq!(slots[0].label, "0");
        assert!(slots[0].assigned.is_none());
        assert_eq!(slots[3].label, "3 - Docs");
        assert_eq!(slots[3].assigned.as_deref(), Some("Docs"));
    }

    #[test]
    fn test_open_and_command() {
        let (app, mut inbox) = testing::app();
        set(&app, &mut inbox, ShortcutDraft::new("3", "Docs", "https://docs.example"), false);

        let opened = open(&app, 3).data.unwrap();
        assert_eq!(opened.opened, vec!["https://docs.example"]);

        let unbound = open(&app, 4).data.unwrap();
        assert!(unbound.shortcut.is_none());
        assert!(unbound.opened.is_empty());

        let via_command = command(&app, "open-shortcut-3").data.unwrap();
        assert_eq!(via_command.shortcut.unwrap().name, "Docs");
    }

    #[test]
    fn test_delete() {
        let (app, mut inbox) = testing::app();
        set(&app, &mut inbox, ShortcutDraft::new("3", "Docs", "https://docs.example"), false);

        let remaining = delete(&app, &mut inbox, 3).data.unwrap();
        assert!(remaining.is_empty());
    }
}
