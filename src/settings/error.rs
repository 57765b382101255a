use thiserror::Error;

/// Errors returned by the settings service.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid stored value for {key}: {value}")]
    InvalidValue { key: String, value: String },
    #[error("Invalid settings document: {0}")]
    InvalidDocument(String),
    #[error("Local model already exists: {0}")]
    DuplicateModel(String),
    #[error("Local model not found: {0}")]
    ModelNotFound(String),
}
