//! chat-settings - binary entry point
//!
//! Without a subcommand this launches the terminal interface with the settings
//! modal open. The subcommands run the same export/import/reset operations
//! headless.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use chat_settings::panel::{export_to_dir, import_from_file, INVALID_IMPORT_MESSAGE};
use chat_settings::runner::{init_stderr_logging, run_tui, AppConfig};
use chat_settings::settings::SettingsService;

/// Chat settings - preferences, API key, and local model endpoints
#[derive(Parser, Debug)]
#[command(name = "chat-settings")]
#[command(version, about = "Manage chat application settings")]
#[command(propagate_version = true)]
struct Args {
    /// Enable debug logging
    #[arg(short = 'd', long, global = true)]
    debug: bool,

    /// Enable verbose (trace-level) logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Settings database to use instead of the default location
    #[arg(long = "db", env = "CHAT_SETTINGS_DB", global = true)]
    db_path: Option<PathBuf>,

    /// Directory exports are written to
    #[arg(long, global = true)]
    export_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the current settings as JSON
    Show,
    /// Write chat-settings.json
    Export {
        /// Directory to write into (defaults to --export-dir)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Replace all settings with the contents of a .json file
    Import {
        /// Settings file to read
        file: PathBuf,
    },
    /// Restore every setting to its default and remove all local models
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

impl From<&Args> for AppConfig {
    fn from(args: &Args) -> Self {
        AppConfig {
            debug: args.debug,
            verbose: args.verbose,
            db_path: args.db_path.clone(),
            export_dir: args.export_dir.clone(),
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    let config = AppConfig::from(&args);

    let Some(command) = args.command else {
        run_tui(config)?;
        return Ok(ExitCode::SUCCESS);
    };

    init_stderr_logging(&config);
    let store = config.open_store()?;

    match command {
        Command::Show => {
            let settings = store.get_settings()?;
            let json =
                serde_json::to_string_pretty(&settings).context("Failed to serialize settings")?;
            println!("{}", json);
        }
        Command::Export { out } => {
            let dir = out.unwrap_or_else(|| config.export_dir());
            let path = export_to_dir(&store, &dir)?;
            println!("Settings exported to {}", path.display());
        }
        Command::Import { file } => {
            if import_from_file(&store, &file).is_err() {
                eprintln!("{}", INVALID_IMPORT_MESSAGE);
                return Ok(ExitCode::FAILURE);
            }
            println!("Settings imported successfully");
        }
        Command::Reset { yes } => {
            if !yes {
                eprintln!("Refusing to reset settings without --yes");
                return Ok(ExitCode::FAILURE);
            }
            store.reset_settings()?;
            println!("All settings have been reset to defaults");
        }
    }

    Ok(ExitCode::SUCCESS)
}
