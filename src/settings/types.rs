//! Settings snapshot and local model configuration types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default maximum tokens per response.
pub const DEFAULT_MAX_TOKENS: u32 = 2048;
/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Color theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    Light,
    Dark,
    /// Follow the terminal/OS preference
    #[default]
    System,
}

impl ThemeMode {
    /// All modes in display order.
    pub fn all() -> &'static [ThemeMode] {
        &[ThemeMode::Light, ThemeMode::Dark, ThemeMode::System]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
            ThemeMode::System => "System",
        }
    }

    /// Next mode in display order (wraps around).
    pub fn next(&self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::System,
            ThemeMode::System => ThemeMode::Light,
        }
    }

    /// Previous mode in display order (wraps around).
    pub fn prev(&self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::System,
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::System => ThemeMode::Dark,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeMode::Light => write!(f, "light"),
            ThemeMode::Dark => write!(f, "dark"),
            ThemeMode::System => write!(f, "system"),
        }
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "system" | "auto" => Ok(ThemeMode::System),
            other => Err(format!("unknown theme: {}", other)),
        }
    }
}

/// Kind of local model server an endpoint points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LocalModelType {
    /// Ollama server
    #[default]
    Ollama,
    /// LM Studio local server
    LmStudio,
    /// llama.cpp `server`
    LlamaCpp,
    /// Any server speaking the OpenAI chat completions API
    #[serde(rename = "openai_compatible")]
    OpenAiCompatible,
    /// Anything else
    Custom,
}

impl LocalModelType {
    pub fn all() -> &'static [LocalModelType] {
        &[
            LocalModelType::Ollama,
            LocalModelType::LmStudio,
            LocalModelType::LlamaCpp,
            LocalModelType::OpenAiCompatible,
            LocalModelType::Custom,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LocalModelType::Ollama => "Ollama",
            LocalModelType::LmStudio => "LM Studio",
            LocalModelType::LlamaCpp => "llama.cpp",
            LocalModelType::OpenAiCompatible => "OpenAI-compatible",
            LocalModelType::Custom => "Custom",
        }
    }

    /// Endpoint the server listens on out of the box.
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            LocalModelType::Ollama => "http://localhost:11434",
            LocalModelType::LmStudio => "http://localhost:1234/v1",
            LocalModelType::LlamaCpp => "http://localhost:8080",
            LocalModelType::OpenAiCompatible => "http://localhost:8000/v1",
            LocalModelType::Custom => "",
        }
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|t| t == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub fn prev(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|t| t == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

impl fmt::Display for LocalModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalModelType::Ollama => write!(f, "ollama"),
            LocalModelType::LmStudio => write!(f, "lm_studio"),
            LocalModelType::LlamaCpp => write!(f, "llama_cpp"),
            LocalModelType::OpenAiCompatible => write!(f, "openai_compatible"),
            LocalModelType::Custom => write!(f, "custom"),
        }
    }
}

impl FromStr for LocalModelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ollama" => Ok(LocalModelType::Ollama),
            "lm_studio" => Ok(LocalModelType::LmStudio),
            "llama_cpp" => Ok(LocalModelType::LlamaCpp),
            "openai_compatible" => Ok(LocalModelType::OpenAiCompatible),
            "custom" => Ok(LocalModelType::Custom),
            other => Err(format!("unknown local model type: {}", other)),
        }
    }
}

/// A locally hosted model endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalModelConfig {
    /// Unique identifier
    pub id: String,
    /// Display name (also the model name sent to the server)
    pub name: String,
    /// Server kind
    #[serde(default)]
    pub model_type: LocalModelType,
    /// Base URL of the server
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Optional key for servers that require one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

fn default_true() -> bool {
    true
}

impl LocalModelConfig {
    /// Create an enabled config pointing at the type's default endpoint.
    pub fn new(id: impl Into<String>, name: impl Into<String>, model_type: LocalModelType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            model_type,
            endpoint: model_type.default_endpoint().to_string(),
            description: String::new(),
            enabled: true,
            api_key: None,
        }
    }
}

/// Full settings snapshot returned by every settings service call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Maximum tokens per response
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    /// Save conversations automatically
    pub auto_save: bool,
    pub theme: ThemeMode,
    /// Hosted provider API key
    pub api_key: String,
    /// Local model endpoints, in display order
    pub local_models: Vec<LocalModelConfig>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            auto_save: true,
            theme: ThemeMode::default(),
            api_key: String::new(),
            local_models: Vec::new(),
        }
    }
}

impl Settings {
    /// Find a local model by id.
    pub fn local_model(&self, id: &str) -> Option<&LocalModelConfig> {
        self.local_models.iter().find(|m| m.id == id)
    }
}

/// Partial update of the scalar preferences. `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsPatch {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub timeout_ms: Option<u64>,
    pub auto_save: Option<bool>,
    pub theme: Option<ThemeMode>,
    pub api_key: Option<String>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        self.max_tokens.is_none()
            && self.temperature.is_none()
            && self.timeout_ms.is_none()
            && self.auto_save.is_none()
            && self.theme.is_none()
            && self.api_key.is_none()
    }

    /// Key/value pairs to persist, using the stored string representation.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let mut entries = Vec::new();
        if let Some(v) = self.max_tokens {
            entries.push(("max_tokens", v.to_string()));
        }
        if let Some(v) = self.temperature {
            entries.push(("temperature", v.to_string()));
        }
        if let Some(v) = self.timeout_ms {
            entries.push(("timeout_ms", v.to_string()));
        }
        if let Some(v) = self.auto_save {
            entries.push(("auto_save", v.to_string()));
        }
        if let Some(v) = self.theme {
            entries.push(("theme", v.to_string()));
        }
        if let Some(v) = &self.api_key {
            entries.push(("api_key", v.clone()));
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.max_tokens, 2048);
        assert_eq!(settings.timeout_ms, 30_000);
        assert!(settings.auto_save);
        assert_eq!(settings.theme, ThemeMode::System);
        assert!(settings.local_models.is_empty());
    }

    #[test]
    fn test_theme_parse_and_display() {
        for mode in ThemeMode::all() {
            assert_eq!(mode.to_string().parse::<ThemeMode>().unwrap(), *mode);
        }
        assert_eq!("  Dark ".parse::<ThemeMode>().unwrap(), ThemeMode::Dark);
        assert!("sepia".parse::<ThemeMode>().is_err());
    }

    #[test]
    fn test_theme_cycle_wraps() {
        assert_eq!(ThemeMode::System.next(), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.prev(), ThemeMode::System);
    }

    #[test]
    fn test_model_type_cycle_wraps() {
        assert_eq!(LocalModelType::Custom.next(), LocalModelType::Ollama);
        assert_eq!(LocalModelType::Ollama.prev(), LocalModelType::Custom);
    }

    #[test]
    fn test_model_type_serde_matches_display() {
        for kind in LocalModelType::all() {
            let json = serde_json::to_string(kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind));
        }
        assert_eq!(
            serde_json::from_str::<LocalModelType>("\"openai_compatible\"").unwrap(),
            LocalModelType::OpenAiCompatible
        );
    }

    #[test]
    fn test_local_model_deserialize_fills_defaults() {
        let model: LocalModelConfig =
            serde_json::from_str(r#"{"id":"m1","name":"llama3"}"#).unwrap();
        assert_eq!(model.model_type, LocalModelType::Ollama);
        assert!(model.enabled);
        assert!(model.api_key.is_none());
    }

    #[test]
    fn test_patch_entries_only_set_fields() {
        let patch = SettingsPatch {
            timeout_ms: Some(45_000),
            theme: Some(ThemeMode::Dark),
            ..Default::default()
        };
        assert_eq!(
            patch.entries(),
            vec![
                ("timeout_ms", "45000".to_string()),
                ("theme", "dark".to_string())
            ]
        );
        assert!(SettingsPatch::default().is_empty());
    }
}
