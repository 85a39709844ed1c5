//! Global keyboard commands
//!
//! Commands arrive by name from the browser's command registry:
//! - `_execute_action`: open the popup
//! - `open-shortcut-N`: open the URL bound to key N

use serde::{Deserialize, Serialize};

const OPEN_SHORTCUT_PREFIX: &str = "open-shortcut-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GlobalCommand {
    OpenPopup,
    OpenShortcut(u32),
}

impl GlobalCommand {
    /// Parse a command name; unknown names yield `None`
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        if name == "_execute_action" {
            return Some(GlobalCommand::OpenPopup);
        }

        let key = name.strip_prefix(OPEN_SHORTCUT_PREFIX)?;
        key.parse().ok().map(GlobalCommand::OpenShortcut)
    }

    pub fn name(&self) -> String {
        match self {
            GlobalCommand::OpenPopup => "_execute_action".to_string(),
            GlobalCommand::OpenShortcut(key) => format!("{OPEN_SHORTCUT_PREFIX}{key}"),
        }
    }
}
