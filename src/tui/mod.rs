//! TUI (Terminal User Interface) mode
//!
//! A minimal host screen with the settings modal on top, driven by keyboard
//! and mouse.

mod app;
mod event;
mod theme;
mod ui;

pub mod hit_test;
pub mod settings;

pub use app::{StorePanel, TuiApp};
pub use theme::Theme;

use anyhow::{Context, Result};
use tracing::info;

use crate::runner::{init_file_logging, AppConfig};

/// Run the TUI application. The settings modal is open on launch.
pub fn run_tui(config: AppConfig) -> Result<()> {
    // Stderr belongs to the terminal UI, so logs go to a file
    let log_path = init_file_logging(&config)?;
    info!("TUI starting, logging to {}", log_path.display());

    let runtime = tokio::runtime::Runtime::new().context("Failed to start runtime")?;
    runtime.block_on(async {
        let mut app = TuiApp::new(config)?;
        app.open_settings();
        app.run().await
    })
}
