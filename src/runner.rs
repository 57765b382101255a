//! Application Runner Module
//!
//! Shared configuration and entry points used by the `chat-settings` binary.

use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::XdgDirs;
use crate::db::Database;
use crate::settings::SettingsStore;

/// Shared application configuration.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Enable debug logging
    pub debug: bool,
    /// Enable verbose (trace-level) logging
    pub verbose: bool,
    /// Database file to use instead of the XDG default
    pub db_path: Option<PathBuf>,
    /// Directory exports are written to
    pub export_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Filter used when `RUST_LOG` is unset.
    pub fn default_filter(&self) -> &'static str {
        if self.verbose {
            "trace"
        } else if self.debug {
            "debug"
        } else {
            "info,chat_settings=debug"
        }
    }

    pub fn database_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(Database::default_path)
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(XdgDirs::export_dir)
    }

    /// Open and migrate the settings database.
    pub fn open_store(&self) -> anyhow::Result<SettingsStore> {
        let path = self.database_path();
        let db = Database::open_at(path.clone())
            .with_context(|| format!("Failed to open database at {}", path.display()))?;
        db.migrate().context("Failed to migrate settings database")?;
        Ok(SettingsStore::new(db))
    }
}

/// Send logs to the state-dir log file. The terminal belongs to the TUI.
pub fn init_file_logging(config: &AppConfig) -> anyhow::Result<PathBuf> {
    let dirs = XdgDirs::new();
    dirs.ensure_dirs()?;
    let log_path = dirs.log_path();
    let log_file = File::create(&log_path)
        .with_context(|| format!("Failed to create log file {}", log_path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_filter()));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(log_file)),
        )
        .try_init()?;

    Ok(log_path)
}

/// Log to stderr for one-shot commands. Quiet unless asked.
pub fn init_stderr_logging(config: &AppConfig) {
    let default_filter = if config.verbose || config.debug {
        config.default_filter()
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the TUI feature is not enabled or if the TUI fails to start.
#[cfg(feature = "tui")]
pub fn run_tui(config: AppConfig) -> anyhow::Result<()> {
    crate::tui::run_tui(config)
}

#[cfg(not(feature = "tui"))]
pub fn run_tui(_config: AppConfig) -> anyhow::Result<()> {
    anyhow::bail!("TUI feature not enabled. Recompile with --features tui")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingsService;
    use tempfile::TempDir;

    #[test]
    fn test_default_filter_levels() {
        let mut config = AppConfig::default();
        assert_eq!(config.default_filter(), "info,chat_settings=debug");
        config.debug = true;
        assert_eq!(config.default_filter(), "debug");
        config.verbose = true;
        assert_eq!(config.default_filter(), "trace");
    }

    #[test]
    fn test_explicit_paths_win() {
        let config = AppConfig {
            db_path: Some(PathBuf::from("/tmp/x/settings.db")),
            export_dir: Some(PathBuf::from("/tmp/exports")),
            ..Default::default()
        };
        assert_eq!(config.database_path(), PathBuf::from("/tmp/x/settings.db"));
        assert_eq!(config.export_dir(), PathBuf::from("/tmp/exports"));
    }

    #[test]
    fn test_open_store_migrates() {
        let tmp = TempDir::new().unwrap();
        let config = AppConfig {
            db_path: Some(tmp.path().join("nested").join("settings.db")),
            ..Default::default()
        };
        let store = config.open_store().unwrap();
        assert!(store.get_settings().unwrap().local_models.is_empty());
    }
}
