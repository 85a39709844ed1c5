//! Theme commands
use serde::Serialize;

use nightowl_core::{NightOwl, Theme};

use super::CommandResult;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeInfo {
    pub theme: Theme,
    pub is_light: bool,
}

impl From<Theme> for ThemeInfo {
    fn from(theme: Theme) -> Self {
        Self {
            theme,
            is_light: theme.is_light(),
        }
    }
}

pub fn get_theme(app: &NightOwl) -> CommandResult<ThemeInfo> {
    CommandResult::ok(app.theme().into())
}

pub fn set_theme(app: &NightOwl, theme: Theme) -> CommandResult<ThemeInfo> {
    match app.theme_store().set(theme) {
        Ok(()) => CommandResult::ok(theme.into()),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub fn toggle_theme(app: &NightOwl) -> CommandResult<ThemeInfo> {
    match app.theme_store().toggle() {
        Ok(theme) => CommandResult::ok(theme.into()),
        Err(e) => CommandResult::err(e.to_string()),
    }
}
