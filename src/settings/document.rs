//! Settings file format used by export and import.
//!
//! Exports are written as a versioned envelope:
//!
//! ```json
//! { "version": 1, "exported_at": "2026-01-01T00:00:00Z", "settings": { ... } }
//! ```
//!
//! Imports accept the envelope or a bare settings object.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Settings, SettingsError};

/// Current document format version.
pub const DOCUMENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsDocument {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    pub settings: Settings,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AnyDocument {
    Envelope {
        version: u32,
        settings: Settings,
    },
    Bare(Settings),
}

impl SettingsDocument {
    pub fn new(settings: Settings) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            exported_at: Utc::now(),
            settings,
        }
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Parse and validate settings file text.
pub fn parse_document(text: &str) -> Result<Settings, SettingsError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    if !value.is_object() {
        return Err(SettingsError::InvalidDocument(
            "expected a JSON object".to_string(),
        ));
    }

    let settings = match serde_json::from_value::<AnyDocument>(value)? {
        AnyDocument::Envelope { version, settings } => {
            if version > DOCUMENT_VERSION {
                return Err(SettingsError::InvalidDocument(format!(
                    "unsupported version {}",
                    version
                )));
            }
            settings
        }
        AnyDocument::Bare(settings) => settings,
    };

    validate(&settings)?;
    Ok(settings)
}

fn validate(settings: &Settings) -> Result<(), SettingsError> {
    if !settings.temperature.is_finite() {
        return Err(SettingsError::InvalidDocument(
            "temperature must be a finite number".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for model in &settings.local_models {
        if model.id.trim().is_empty() {
            return Err(SettingsError::InvalidDocument(
                "local model with empty id".to_string(),
            ));
        }
        if model.name.trim().is_empty() {
            return Err(SettingsError::InvalidDocument(format!(
                "local model {} has an empty name",
                model.id
            )));
        }
        if !seen.insert(model.id.as_str()) {
            return Err(SettingsError::DuplicateModel(model.id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{LocalModelConfig, LocalModelType, ThemeMode};

    #[test]
    fn test_envelope_is_accepted() {
        let mut settings = Settings::default();
        settings.theme = ThemeMode::Light;
        settings
            .local_models
            .push(LocalModelConfig::new("m1", "llama3", LocalModelType::Ollama));

        let text = SettingsDocument::new(settings.clone()).to_json().unwrap();
        assert_eq!(parse_document(&text).unwrap(), settings);
    }

    #[test]
    fn test_bare_settings_with_missing_fields_use_defaults() {
        let parsed = parse_document(r#"{"max_tokens": 512}"#).unwrap();
        assert_eq!(parsed.max_tokens, 512);
        assert_eq!(parsed.timeout_ms, Settings::default().timeout_ms);
    }

    #[test]
    fn test_rejects_non_objects_and_garbage() {
        assert!(parse_document("not json").is_err());
        assert!(parse_document("[1, 2, 3]").is_err());
        assert!(parse_document(r#""settings""#).is_err());
    }

    #[test]
    fn test_rejects_wrong_field_types() {
        assert!(parse_document(r#"{"max_tokens": "lots"}"#).is_err());
        assert!(parse_document(r#"{"theme": "sepia"}"#).is_err());
        assert!(parse_document(r#"{"colour_scheme": "dark"}"#).is_err());
    }

    #[test]
    fn test_rejects_duplicate_model_ids() {
        let text = r#"{"local_models": [
            {"id": "a", "name": "one"},
            {"id": "a", "name": "two"}
        ]}"#;
        assert!(matches!(
            parse_document(text),
            Err(SettingsError::DuplicateModel(id)) if id == "a"
        ));
    }

    #[test]
    fn test_rejects_empty_model_name() {
        let text = r#"{"local_models": [{"id": "a", "name": "  "}]}"#;
        assert!(parse_document(text).is_err());
    }

    #[test]
    fn test_rejects_future_version() {
        let text = r#"{"version": 99, "settings": {}}"#;
        assert!(parse_document(text).is_err());
    }
}
