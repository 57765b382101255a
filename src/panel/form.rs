//! Draft state of the local model form.

use crate::settings::{LocalModelConfig, LocalModelType};

/// Fields of the local model form, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    ModelType,
    Endpoint,
    Description,
    Enabled,
    ApiKey,
}

impl FormField {
    pub fn all() -> &'static [FormField] {
        &[
            FormField::Name,
            FormField::ModelType,
            FormField::Endpoint,
            FormField::Description,
            FormField::Enabled,
            FormField::ApiKey,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::ModelType => "Type",
            FormField::Endpoint => "Endpoint",
            FormField::Description => "Description",
            FormField::Enabled => "Enabled",
            FormField::ApiKey => "API Key",
        }
    }

    /// Whether the field takes free text input.
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            FormField::Name | FormField::Endpoint | FormField::Description | FormField::ApiKey
        )
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|f| f == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub fn prev(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|f| f == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }

    pub fn is_last(&self) -> bool {
        Self::all().last() == Some(self)
    }
}

/// Editable copy of a local model config.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelForm {
    pub name: String,
    pub model_type: LocalModelType,
    pub endpoint: String,
    pub description: String,
    pub enabled: bool,
    pub api_key: String,
    /// Field with keyboard focus
    pub focus: FormField,
    /// Validation message shown under the form
    pub error: Option<String>,
}

impl ModelForm {
    /// Empty form for a new model.
    pub fn blank() -> Self {
        let model_type = LocalModelType::default();
        Self {
            endpoint: model_type.default_endpoint().to_string(),
            model_type,
            enabled: true,
            ..Default::default()
        }
    }

    /// Form pre-filled from an existing model.
    pub fn from_config(config: &LocalModelConfig) -> Self {
        Self {
            name: config.name.clone(),
            model_type: config.model_type,
            endpoint: config.endpoint.clone(),
            description: config.description.clone(),
            enabled: config.enabled,
            api_key: config.api_key.clone().unwrap_or_default(),
            focus: FormField::default(),
            error: None,
        }
    }

    /// Build the config this form describes under `id`.
    pub fn to_config(&self, id: impl Into<String>) -> LocalModelConfig {
        let api_key = self.api_key.trim();
        LocalModelConfig {
            id: id.into(),
            name: self.name.trim().to_string(),
            model_type: self.model_type,
            endpoint: self.endpoint.trim().to_string(),
            description: self.description.clone(),
            enabled: self.enabled,
            api_key: (!api_key.is_empty()).then(|| api_key.to_string()),
        }
    }

    /// Text buffer behind a text field.
    pub fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Name => Some(&mut self.name),
            FormField::Endpoint => Some(&mut self.endpoint),
            FormField::Description => Some(&mut self.description),
            FormField::ApiKey => Some(&mut self.api_key),
            FormField::ModelType | FormField::Enabled => None,
        }
    }

    /// Insert text into the focused field, if it takes text.
    pub fn insert_str(&mut self, text: &str) {
        let focus = self.focus;
        if let Some(buffer) = self.text_mut(focus) {
            buffer.push_str(text);
            self.error = None;
        }
    }

    /// Delete the last character of the focused field.
    pub fn backspace(&mut self) {
        let focus = self.focus;
        if let Some(buffer) = self.text_mut(focus) {
            buffer.pop();
        }
    }

    /// Switch server type, carrying the endpoint along if it was still the
    /// previous type's default.
    pub fn set_model_type(&mut self, model_type: LocalModelType) {
        let untouched =
            self.endpoint.trim().is_empty() || self.endpoint == self.model_type.default_endpoint();
        self.model_type = model_type;
        if untouched {
            self.endpoint = model_type.default_endpoint().to_string();
        }
    }

    pub fn cycle_model_type(&mut self, forward: bool) {
        let next = if forward {
            self.model_type.next()
        } else {
            self.model_type.prev()
        };
        self.set_model_type(next);
    }

    pub fn toggle_enabled(&mut self) {
        self.enabled = !self.enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_form_uses_default_endpoint() {
        let form = ModelForm::blank();
        assert_eq!(form.model_type, LocalModelType::Ollama);
        assert_eq!(form.endpoint, "http://localhost:11434");
        assert!(form.enabled);
    }

    #[test]
    fn test_cycling_type_moves_untouched_endpoint() {
        let mut form = ModelForm::blank();
        form.cycle_model_type(true);
        assert_eq!(form.model_type, LocalModelType::LmStudio);
        assert_eq!(form.endpoint, "http://localhost:1234/v1");
    }

    #[test]
    fn test_cycling_type_keeps_custom_endpoint() {
        let mut form = ModelForm::blank();
        form.endpoint = "http://gpu-box:11434".to_string();
        form.cycle_model_type(true);
        assert_eq!(form.endpoint, "http://gpu-box:11434");
    }

    #[test]
    fn test_round_trip_through_config() {
        let mut config = LocalModelConfig::new("m1", "llama3", LocalModelType::LlamaCpp);
        config.description = "8B instruct".to_string();
        config.api_key = Some("secret".to_string());

        let form = ModelForm::from_config(&config);
        assert_eq!(form.to_config("m1"), config);
    }

    #[test]
    fn test_blank_api_key_becomes_none() {
        let mut form = ModelForm::blank();
        form.name = "phi3".to_string();
        form.api_key = "   ".to_string();
        assert!(form.to_config("x").api_key.is_none());
    }

    #[test]
    fn test_text_input_only_reaches_text_fields() {
        let mut form = ModelForm::blank();
        form.insert_str("mistral");
        assert_eq!(form.name, "mistral");

        form.focus = FormField::Enabled;
        form.insert_str("zzz");
        assert_eq!(form.name, "mistral");

        form.focus = FormField::Name;
        form.backspace();
        assert_eq!(form.name, "mistra");
    }

    #[test]
    fn test_focus_wraps() {
        assert_eq!(FormField::ApiKey.next(), FormField::Name);
        assert_eq!(FormField::Name.prev(), FormField::ApiKey);
        assert!(FormField::ApiKey.is_last());
    }
}
