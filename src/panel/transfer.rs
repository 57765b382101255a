//! Settings file export and import.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::PanelError;
use crate::settings::SettingsService;

/// Name of the file written by export.
pub const EXPORT_FILE_NAME: &str = "chat-settings.json";

/// Write the service's exported settings to `dir/chat-settings.json`.
pub fn export_to_dir<S>(service: &S, dir: &Path) -> Result<PathBuf, PanelError>
where
    S: SettingsService + ?Sized,
{
    let text = service.export_settings()?;
    fs::create_dir_all(dir)?;
    let path = dir.join(EXPORT_FILE_NAME);
    fs::write(&path, text)?;
    info!(path = %path.display(), "Exported settings");
    Ok(path)
}

/// Read a settings file and hand its text to the service.
///
/// Every failure collapses into [`PanelError::InvalidImport`]; the cause only
/// goes to the log.
pub fn import_from_file<S>(service: &S, path: &Path) -> Result<(), PanelError>
where
    S: SettingsService + ?Sized,
{
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        warn!(path = %path.display(), "Rejected import: not a .json file");
        return Err(PanelError::InvalidImport);
    }

    let text = fs::read_to_string(path).map_err(|e| {
        warn!(path = %path.display(), error = %e, "Rejected import: unreadable file");
        PanelError::InvalidImport
    })?;

    service.import_settings(&text).map_err(|e| {
        warn!(path = %path.display(), error = %e, "Rejected import");
        PanelError::InvalidImport
    })?;

    info!(path = %path.display(), "Imported settings");
    Ok(())
}
