use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use nightowl_core::{message_channel, Config, NightOwl, ShortcutDraft, SortMethod, Theme};

mod commands;

use commands::browser::FileTabSource;
use commands::{export, sessions, settings, shortcuts, CommandResult};

#[derive(Parser)]
#[command(name = "nightowl")]
#[command(about = "Night Owl - Tab sessions, numeric shortcuts and theme", long_about = None)]
struct Cli {
    /// Data directory (default: $NIGHTOWL_DATA_DIR, else the platform data directory)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage saved sessions
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
    /// Manage numeric shortcuts
    Shortcut {
        #[command(subcommand)]
        action: ShortcutAction,
    },
    /// Show or change the theme
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
    /// Export all sessions to a JSON file
    Export {
        /// Output directory (default: the configured export directory)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Show counts, preferences and data paths
    Stats,
}

#[derive(Subcommand)]
enum SessionAction {
    /// List sessions
    List {
        /// name, date or tabs (default: the saved preference)
        #[arg(long)]
        sort: Option<SortMethod>,
    },
    /// Save tabs under a name, replacing a session of the same name
    Save {
        name: String,
        /// JSON array of URLs or {url, title} objects; `-` reads stdin
        #[arg(long, default_value = "-")]
        tabs: String,
    },
    /// Show a session's tabs
    Show { name: String },
    /// Delete a session
    Delete { name: String },
    /// Rename a session
    Rename { old_name: String, new_name: String },
    /// Open a session's tabs in a new window
    Open { name: String },
    /// Set the saved display order
    Sort { method: SortMethod },
}

#[derive(Subcommand)]
enum ShortcutAction {
    /// List shortcuts by key
    List,
    /// List bindable keys and their current shortcuts
    Keys,
    /// Bind a key to a URL
    Set {
        key: String,
        name: String,
        url: String,
        /// Replace a shortcut already bound to the key
        #[arg(long)]
        force: bool,
    },
    /// Remove the binding for a key
    Delete { key: u32 },
    /// Open the URL bound to a key
    Open { key: u32 },
    /// Dispatch a global command, e.g. `open-shortcut-3`
    Command { name: String },
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Show the current theme
    Get,
    /// Set the theme (dark or light)
    Set { theme: Theme },
    /// Switch between dark and light
    Toggle,
}

fn run(cli: Cli) -> Result<bool> {
    let data_dir = cli.data_dir.unwrap_or_else(Config::data_dir);
    let config = Config::new(data_dir);

    let (notifier, mut inbox) = message_channel(config.message_capacity);
    let app = NightOwl::new(config, notifier).context("Failed to open Night Owl storage")?;
    app.initialize().context("Failed to load Night Owl state")?;

    match cli.command {
        Commands::Session { action } => match action {
            SessionAction::List { sort } => sessions::list(&app, sort).emit(),
            SessionAction::Save { name, tabs } => {
                sessions::save(&app, &name, &FileTabSource::new(tabs)).emit()
            }
            SessionAction::Show { name } => sessions::show(&app, &name).emit(),
            SessionAction::Delete { name } => sessions::delete(&app, &name).emit(),
            SessionAction::Rename { old_name, new_name } => {
                sessions::rename(&app, &old_name, &new_name).emit()
            }
            SessionAction::Open { name } => sessions::open(&app, &name).emit(),
            SessionAction::Sort { method } => sessions::sort(&app, method).emit(),
        },
        Commands::Shortcut { action } => match action {
            ShortcutAction::List => shortcuts::list(&app).emit(),
            ShortcutAction::Keys => shortcuts::keys(&app).emit(),
            ShortcutAction::Set {
                key,
                name,
                url,
                force,
            } => shortcuts::set(&app, &mut inbox, ShortcutDraft::new(key, name, url), force).emit(),
            ShortcutAction::Delete { key } => shortcuts::delete(&app, &mut inbox, key).emit(),
            ShortcutAction::Open { key } => shortcuts::open(&app, key).emit(),
            ShortcutAction::Command { name } => shortcuts::command(&app, &name).emit(),
        },
        Commands::Theme { action } => match action {
            ThemeAction::Get => settings::get_theme(&app).emit(),
            ThemeAction::Set { theme } => settings::set_theme(&app, theme).emit(),
            ThemeAction::Toggle => settings::toggle_theme(&app).emit(),
        },
        Commands::Export { dir } => export::export(&app, dir.as_deref(), Utc::now()).emit(),
        Commands::Stats => export::stats(&app).emit(),
    }
}

fn main() -> ExitCode {
    nightowl_core::init_logging();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            let _ = CommandResult::<()>::err(format!("{e:#}")).emit();
            ExitCode::FAILURE
        }
    }
}
