//! Yes/no prompts guarding destructive actions.

/// A destructive action waiting for the user to say yes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    DeleteModel { id: String, name: String },
    ResetAll,
}

impl Confirmation {
    pub fn title(&self) -> &'static str {
        match self {
            Confirmation::DeleteModel { .. } => "Delete Model",
            Confirmation::ResetAll => "Reset Settings",
        }
    }

    pub fn prompt(&self) -> String {
        match self {
            Confirmation::DeleteModel { name, .. } => {
                format!("Delete local model \"{}\"?", name)
            }
            Confirmation::ResetAll => {
                "Reset all settings to their defaults? Local models will be removed.".to_string()
            }
        }
    }
}
