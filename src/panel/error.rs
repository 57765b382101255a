use thiserror::Error;

use super::binder::BindError;
use crate::settings::SettingsError;

/// The only message shown for a failed import.
pub const INVALID_IMPORT_MESSAGE: &str = "Invalid settings file format";

/// Errors surfaced by panel operations.
#[derive(Debug, Error)]
pub enum PanelError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Bind(#[from] BindError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid settings file format")]
    InvalidImport,
}
