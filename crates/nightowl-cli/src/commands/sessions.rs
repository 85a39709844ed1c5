//! Session commands
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nightowl_core::{
    format_tab_count, truncate_url, NightOwl, Session, SessionError, SortMethod, TabSnapshot,
    TabSource,
};

use super::browser::ConsoleBrowser;
use super::CommandResult;

const URL_DISPLAY_LEN: usize = 30;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub name: String,
    pub tab_count: usize,
    pub tab_label: String,
    pub last_modified: DateTime<Utc>,
}

impl From<Session> for SessionInfo {
    fn from(session: Session) -> Self {
        let tab_count = session.tab_count();
        Self {
            name: session.name,
            tab_count,
            tab_label: format_tab_count(tab_count),
            last_modified: session.last_modified,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabInfo {
    pub title: String,
    pub url: String,
    pub display_url: String,
}

impl From<&TabSnapshot> for TabInfo {
    fn from(tab: &TabSnapshot) -> Self {
        Self {
            title: tab.display_title().to_string(),
            url: tab.url.clone(),
            display_url: truncate_url(&tab.url, URL_DISPLAY_LEN),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionDetail {
    #[serde(flatten)]
    pub session: SessionInfo,
    pub tabs: Vec<TabInfo>,
}

#[derive(Debug, Serialize)]
pub struct OpenedSession {
    pub name: String,
    pub opened: Vec<String>,
}

fn listing(app: &NightOwl, sort: Option<SortMethod>) -> Vec<SessionInfo> {
    app.sessions()
        .sorted(sort)
        .into_iter()
        .map(SessionInfo::from)
        .collect()
}

pub fn list(app: &NightOwl, sort: Option<SortMethod>) -> CommandResult<Vec<SessionInfo>> {
    CommandResult::ok(listing(app, sort))
}

/// One session with its tabs
pub fn show(app: &NightOwl, name: &str) -> CommandResult<SessionDetail> {
    match app.sessions().find_by_name(name) {
        Some(session) => {
            let tabs = session.tabs.iter().map(TabInfo::from).collect();
            CommandResult::ok(SessionDetail {
                session: session.into(),
                tabs,
            })
        }
        None => CommandResult::err(SessionError::NotFound(name.to_string()).to_string()),
    }
}

pub fn save(app: &NightOwl, name: &str, source: &dyn TabSource) -> CommandResult<Vec<SessionInfo>> {
    match app.sessions().capture(name, source) {
        Ok(_) => CommandResult::ok(listing(app, None)),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub fn delete(app: &NightOwl, name: &str) -> CommandResult<Vec<SessionInfo>> {
    match app.sessions().delete(name) {
        Ok(_) => CommandResult::ok(listing(app, None)),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub fn rename(app: &NightOwl, old_name: &str, new_name: &str) -> CommandResult<SessionInfo> {
    match app.sessions().rename(old_name, new_name) {
        Ok(Some(session)) => CommandResult::ok(session.into()),
        Ok(None) => CommandResult::err(format!("Nothing to rename: {old_name}")),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub fn open(app: &NightOwl, name: &str) -> CommandResult<OpenedSession> {
    let browser = ConsoleBrowser::new();
    match app.sessions().open_by_name(name, &browser) {
        Ok(session) => CommandResult::ok(OpenedSession {
            name: session.name,
            opened: browser.opened(),
        }),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Store the display order and return the re-sorted list
pub fn sort(app: &NightOwl, method: SortMethod) -> CommandResult<Vec<SessionInfo>> {
    match app.sessions().set_sort_preference(method) {
        Ok(()) => CommandResult::ok(listing(app, None)),
        Err(e) => CommandResult::err(e.to_string()),
    }
}
