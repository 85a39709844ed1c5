//! Export and statistics commands
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

use nightowl_core::{write_export, ExportStats, NightOwl, SortMethod, Theme};

use super::CommandResult;

#[derive(Debug, Serialize)]
pub struct ExportInfo {
    pub path: PathBuf,
    pub stats: ExportStats,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsInfo {
    #[serde(flatten)]
    pub sessions: ExportStats,
    pub shortcuts: usize,
    pub theme: Theme,
    pub sort_method: SortMethod,
    pub database_path: PathBuf,
    pub export_dir: PathBuf,
}

/// Write the export into `dir`, or the configured export directory
pub fn export(app: &NightOwl, dir: Option<&Path>, now: DateTime<Utc>) -> CommandResult<ExportInfo> {
    let result = match dir {
        Some(dir) => write_export(&app.sessions().sessions(), dir, now),
        None => app.export_sessions(now),
    };

    match result {
        Ok(path) => CommandResult::ok(ExportInfo {
            path,
            stats: app.export_stats(),
        }),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub fn stats(app: &NightOwl) -> CommandResult<StatsInfo> {
    match app.shortcuts().list() {
        Ok(shortcuts) => CommandResult::ok(StatsInfo {
            sessions: app.export_stats(),
            shortcuts: shortcuts.len(),
            theme: app.theme(),
            sort_method: app.sessions().sort_method(),
            database_path: app.config().database_path.clone(),
            export_dir: app.config().export_dir.clone(),
        }),
        Err(e) => CommandResult::err(e.to_string()),
    }
}
