//! Field binder: raw input in, single-field patches out.
//!
//! Every editable preference maps to one [`SettingField`]. [`coerce`] turns
//! what the user typed into a [`SettingsPatch`] that touches only that field,
//! and [`display_value`] renders the stored value back for editing. The
//! timeout is edited in seconds but stored in milliseconds.

use thiserror::Error;

use super::tabs::SettingsTab;
use crate::settings::{Settings, SettingsPatch, ThemeMode};

/// Errors from coercing raw input into a setting value.
#[derive(Debug, Error, PartialEq)]
pub enum BindError {
    #[error("{field} expects a number, got '{value}'")]
    NotANumber { field: &'static str, value: String },

    #[error("{field} cannot be negative")]
    Negative { field: &'static str },

    #[error("{field} expects on or off, got '{value}'")]
    NotABool { field: &'static str, value: String },

    #[error("unknown theme '{0}'")]
    UnknownTheme(String),
}

/// An editable preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingField {
    MaxTokens,
    Temperature,
    TimeoutSeconds,
    AutoSave,
    Theme,
    ApiKey,
}

impl SettingField {
    pub fn label(&self) -> &'static str {
        match self {
            SettingField::MaxTokens => "Max Tokens",
            SettingField::Temperature => "Temperature",
            SettingField::TimeoutSeconds => "Timeout (seconds)",
            SettingField::AutoSave => "Auto-save Conversations",
            SettingField::Theme => "Theme",
            SettingField::ApiKey => "API Key",
        }
    }

    pub fn tab(&self) -> SettingsTab {
        match self {
            SettingField::MaxTokens
            | SettingField::Temperature
            | SettingField::TimeoutSeconds
            | SettingField::AutoSave => SettingsTab::General,
            SettingField::ApiKey => SettingsTab::Api,
            SettingField::Theme => SettingsTab::Appearance,
        }
    }

    /// Fields shown on `tab`, in display order.
    pub fn for_tab(tab: SettingsTab) -> &'static [SettingField] {
        match tab {
            SettingsTab::General => &[
                SettingField::MaxTokens,
                SettingField::Temperature,
                SettingField::TimeoutSeconds,
                SettingField::AutoSave,
            ],
            SettingsTab::Api => &[SettingField::ApiKey],
            SettingsTab::Appearance => &[SettingField::Theme],
            SettingsTab::LocalModels => &[],
        }
    }

    /// Whether the field is edited as free text (vs. toggled or cycled).
    pub fn is_text(&self) -> bool {
        !matches!(self, SettingField::AutoSave | SettingField::Theme)
    }
}

/// Coerce raw input for `field` into a patch touching only that field.
pub fn coerce(field: SettingField, raw: &str) -> Result<SettingsPatch, BindError> {
    let trimmed = raw.trim();
    let label = field.label();
    let mut patch = SettingsPatch::default();

    match field {
        SettingField::MaxTokens => {
            if trimmed.starts_with('-') && trimmed[1..].parse::<u64>().is_ok() {
                return Err(BindError::Negative { field: label });
            }
            patch.max_tokens = Some(trimmed.parse().map_err(|_| BindError::NotANumber {
                field: label,
                value: trimmed.to_string(),
            })?);
        }
        SettingField::Temperature => {
            // Values beyond f32 range would round to infinity
            let value = parse_finite(label, trimmed)? as f32;
            if !value.is_finite() {
                return Err(BindError::NotANumber {
                    field: label,
                    value: trimmed.to_string(),
                });
            }
            patch.temperature = Some(value);
        }
        SettingField::TimeoutSeconds => {
            let seconds = parse_finite(label, trimmed)?;
            if seconds < 0.0 {
                return Err(BindError::Negative { field: label });
            }
            patch.timeout_ms = Some((seconds * 1000.0).round() as u64);
        }
        SettingField::AutoSave => {
            patch.auto_save = Some(parse_bool(label, trimmed)?);
        }
        SettingField::Theme => {
            patch.theme = Some(
                trimmed
                    .parse::<ThemeMode>()
                    .map_err(|_| BindError::UnknownTheme(trimmed.to_string()))?,
            );
        }
        // Keys are taken verbatim, whitespace included
        SettingField::ApiKey => {
            patch.api_key = Some(raw.to_string());
        }
    }

    Ok(patch)
}

/// Current value of `field` as it should appear in an input.
pub fn display_value(field: SettingField, settings: &Settings) -> String {
    match field {
        SettingField::MaxTokens => settings.max_tokens.to_string(),
        SettingField::Temperature => settings.temperature.to_string(),
        SettingField::TimeoutSeconds => format_seconds(settings.timeout_ms),
        SettingField::AutoSave => if settings.auto_save { "on" } else { "off" }.to_string(),
        SettingField::Theme => settings.theme.display_name().to_string(),
        SettingField::ApiKey => settings.api_key.clone(),
    }
}

/// Milliseconds rendered as seconds: `45000` -> `45`, `1500` -> `1.5`.
pub fn format_seconds(ms: u64) -> String {
    if ms % 1000 == 0 {
        (ms / 1000).to_string()
    } else {
        (ms as f64 / 1000.0).to_string()
    }
}

fn parse_finite(field: &'static str, raw: &str) -> Result<f64, BindError> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| BindError::NotANumber {
            field,
            value: raw.to_string(),
        })
}

fn parse_bool(field: &'static str, raw: &str) -> Result<bool, BindError> {
    match raw.to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(BindError::NotABool {
            field,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_seconds_are_stored_as_millis() {
        let patch = coerce(SettingField::TimeoutSeconds, "30").unwrap();
        assert_eq!(patch.timeout_ms, Some(30_000));
        assert!(patch.max_tokens.is_none());

        let patch = coerce(SettingField::TimeoutSeconds, " 2.5 ").unwrap();
        assert_eq!(patch.timeout_ms, Some(2_500));
    }

    #[test]
    fn test_timeout_millis_display_as_seconds() {
        let settings = Settings {
            timeout_ms: 45_000,
            ..Default::default()
        };
        assert_eq!(display_value(SettingField::TimeoutSeconds, &settings), "45");
        assert_eq!(format_seconds(1_500), "1.5");
        assert_eq!(format_seconds(0), "0");
    }

    #[test]
    fn test_temperature_out_of_f32_range_is_rejected() {
        assert_eq!(
            coerce(SettingField::Temperature, "1e39"),
            Err(BindError::NotANumber {
                field: "Temperature",
                value: "1e39".to_string(),
            })
        );
        assert_eq!(
            coerce(SettingField::Temperature, "1.5").unwrap().temperature,
            Some(1.5)
        );
    }

    #[test]
    fn test_negative_timeout_is_rejected() {
        assert_eq!(
            coerce(SettingField::TimeoutSeconds, "-1"),
            Err(BindError::Negative {
                field: "Timeout (seconds)"
            })
        );
    }

    #[test]
    fn test_non_numbers_are_rejected() {
        assert!(matches!(
            coerce(SettingField::MaxTokens, "lots"),
            Err(BindError::NotANumber { .. })
        ));
        assert!(matches!(
            coerce(SettingField::MaxTokens, "-5"),
            Err(BindError::Negative { .. })
        ));
        assert!(coerce(SettingField::Temperature, "NaN").is_err());
        assert!(coerce(SettingField::Temperature, "").is_err());
    }

    #[test]
    fn test_numbers_are_not_bounded() {
        let patch = coerce(SettingField::Temperature, "7.5").unwrap();
        assert_eq!(patch.temperature, Some(7.5));
        let patch = coerce(SettingField::MaxTokens, "0").unwrap();
        assert_eq!(patch.max_tokens, Some(0));
    }

    #[test]
    fn test_bool_and_theme() {
        assert_eq!(
            coerce(SettingField::AutoSave, "off").unwrap().auto_save,
            Some(false)
        );
        assert_eq!(
            coerce(SettingField::Theme, "Dark").unwrap().theme,
            Some(ThemeMode::Dark)
        );
        assert_eq!(
            coerce(SettingField::Theme, "sepia"),
            Err(BindError::UnknownTheme("sepia".to_string()))
        );
    }

    #[test]
    fn test_api_key_is_verbatim() {
        let patch = coerce(SettingField::ApiKey, "sk-abc ").unwrap();
        assert_eq!(patch.api_key.as_deref(), Some("sk-abc "));
    }

    #[test]
    fn test_every_field_belongs_to_its_tab() {
        for tab in SettingsTab::all() {
            for field in SettingField::for_tab(*tab) {
                assert_eq!(field.tab(), *tab);
            }
        }
    }
}
