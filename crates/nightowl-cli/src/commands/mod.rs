//! CLI commands
//!
//! Each command returns a `CommandResult` which `main` prints as JSON.

pub mod browser;
pub mod export;
pub mod sessions;
pub mod settings;
pub mod shortcuts;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

impl<T: Serialize> CommandResult<T> {
    /// Print as pretty JSON on stdout; returns `success`
    pub fn emit(&self) -> anyhow::Result<bool> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(self.success)
    }
}
