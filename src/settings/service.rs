//! The settings service seam consumed by the panel.

use std::sync::Arc;

use super::{LocalModelConfig, Settings, SettingsError, SettingsPatch};

/// Authoritative settings state.
///
/// Every read returns a full snapshot; callers replace what they hold with it
/// rather than mutating nested collections locally.
pub trait SettingsService {
    /// Current snapshot.
    fn get_settings(&self) -> Result<Settings, SettingsError>;

    /// Apply a partial update and return the new snapshot.
    fn update_settings(&self, patch: SettingsPatch) -> Result<Settings, SettingsError>;

    /// Append one local model. Fails if its id is already taken.
    fn add_local_model(&self, config: LocalModelConfig) -> Result<(), SettingsError>;

    /// Append several local models atomically.
    fn add_local_models(&self, configs: Vec<LocalModelConfig>) -> Result<(), SettingsError>;

    /// Replace the local model stored under `id`.
    fn update_local_model(&self, id: &str, config: LocalModelConfig) -> Result<(), SettingsError>;

    /// Remove the local model stored under `id`.
    fn remove_local_model(&self, id: &str) -> Result<(), SettingsError>;

    /// Serialize all settings to text.
    fn export_settings(&self) -> Result<String, SettingsError>;

    /// Replace all settings with the ones in `text`.
    fn import_settings(&self, text: &str) -> Result<(), SettingsError>;

    /// Restore defaults and drop all local models.
    fn reset_settings(&self) -> Result<(), SettingsError>;
}

impl<S: SettingsService + ?Sized> SettingsService for Arc<S> {
    fn get_settings(&self) -> Result<Settings, SettingsError> {
        (**self).get_settings()
    }

    fn update_settings(&self, patch: SettingsPatch) -> Result<Settings, SettingsError> {
        (**self).update_settings(patch)
    }

    fn add_local_model(&self, config: LocalModelConfig) -> Result<(), SettingsError> {
        (**self).add_local_model(config)
    }

    fn add_local_models(&self, configs: Vec<LocalModelConfig>) -> Result<(), SettingsError> {
        (**self).add_local_models(configs)
    }

    fn update_local_model(&self, id: &str, config: LocalModelConfig) -> Result<(), SettingsError> {
        (**self).update_local_model(id, config)
    }

    fn remove_local_model(&self, id: &str) -> Result<(), SettingsError> {
        (**self).remove_local_model(id)
    }

    fn export_settings(&self) -> Result<String, SettingsError> {
        (**self).export_settings()
    }

    fn import_settings(&self, text: &str) -> Result<(), SettingsError> {
        (**self).import_settings(text)
    }

    fn reset_settings(&self) -> Result<(), SettingsError> {
        (**self).reset_settings()
    }
}
