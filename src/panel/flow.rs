//! Create/edit/bulk-confirm state machine for the local model form.
//!
//! [`ModelFlow::transition`] is pure: it returns the next state and the
//! [`FlowEffect`] the panel must carry out against the settings service.
//! Nothing is persisted from here.

use tracing::debug;

use super::bulk::{expand_bulk_models, IdGenerator};
use super::form::ModelForm;
use crate::settings::LocalModelConfig;

/// Shown when a create submission has no usable names.
pub const EMPTY_NAME_MESSAGE: &str = "Enter at least one model name";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ModelFlow {
    /// No form open
    #[default]
    Idle,
    /// Adding a new model (name may hold several comma-separated names)
    Creating(ModelForm),
    /// Editing the model stored under `id`
    Editing { id: String, form: ModelForm },
    /// Several configs parsed from one submission, awaiting confirmation
    BulkConfirmPending { staged: Vec<LocalModelConfig> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlowEvent {
    OpenCreate,
    OpenEdit { id: String, config: LocalModelConfig },
    Submit,
    ConfirmBulk,
    CancelBulk,
    Close,
}

/// Service work requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowEffect {
    None,
    AddOne(LocalModelConfig),
    AddMany(Vec<LocalModelConfig>),
    Update { id: String, config: LocalModelConfig },
}

impl ModelFlow {
    pub fn is_idle(&self) -> bool {
        matches!(self, ModelFlow::Idle)
    }

    /// The open form, if any.
    pub fn form(&self) -> Option<&ModelForm> {
        match self {
            ModelFlow::Creating(form) | ModelFlow::Editing { form, .. } => Some(form),
            _ => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut ModelForm> {
        match self {
            ModelFlow::Creating(form) | ModelFlow::Editing { form, .. } => Some(form),
            _ => None,
        }
    }

    pub fn staged(&self) -> &[LocalModelConfig] {
        match self {
            ModelFlow::BulkConfirmPending { staged } => staged,
            _ => &[],
        }
    }

    pub fn transition(
        self,
        event: FlowEvent,
        ids: &mut dyn IdGenerator,
    ) -> (ModelFlow, FlowEffect) {
        debug!(state = self.label(), ?event, "Model flow event");

        match (self, event) {
            (ModelFlow::Idle, FlowEvent::OpenCreate) => {
                (ModelFlow::Creating(ModelForm::blank()), FlowEffect::None)
            }
            (ModelFlow::Idle, FlowEvent::OpenEdit { id, config }) => {
                let form = ModelForm::from_config(&config);
                (ModelFlow::Editing { id, form }, FlowEffect::None)
            }

            (ModelFlow::Creating(mut form), FlowEvent::Submit) => {
                let source = form.to_config(ids.next_id());
                let mut parsed = expand_bulk_models(source, ids);
                match parsed.len() {
                    0 => {
                        form.error = Some(EMPTY_NAME_MESSAGE.to_string());
                        (ModelFlow::Creating(form), FlowEffect::None)
                    }
                    1 => match parsed.pop() {
                        Some(config) => (ModelFlow::Idle, FlowEffect::AddOne(config)),
                        None => (ModelFlow::Creating(form), FlowEffect::None),
                    },
                    _ => (
                        ModelFlow::BulkConfirmPending { staged: parsed },
                        FlowEffect::None,
                    ),
                }
            }

            // Edits always update in place; commas stay part of the name
            (ModelFlow::Editing { id, mut form }, FlowEvent::Submit) => {
                if form.name.trim().is_empty() {
                    form.error = Some("Model name cannot be empty".to_string());
                    return (ModelFlow::Editing { id, form }, FlowEffect::None);
                }
                let config = form.to_config(id.clone());
                (ModelFlow::Idle, FlowEffect::Update { id, config })
            }

            (ModelFlow::BulkConfirmPending { staged }, FlowEvent::ConfirmBulk) => {
                (ModelFlow::Idle, FlowEffect::AddMany(staged))
            }
            (ModelFlow::BulkConfirmPending { .. }, FlowEvent::CancelBulk | FlowEvent::Close) => {
                (ModelFlow::Idle, FlowEffect::None)
            }

            (ModelFlow::Creating(_) | ModelFlow::Editing { .. }, FlowEvent::Close) => {
                (ModelFlow::Idle, FlowEffect::None)
            }

            (state, _) => (state, FlowEffect::None),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ModelFlow::Idle => "idle",
            ModelFlow::Creating(_) => "creating",
            ModelFlow::Editing { .. } => "editing",
            ModelFlow::BulkConfirmPending { .. } => "bulk_confirm_pending",
        }
    }
}
