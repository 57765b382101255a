//! Database schema types.

use serde::{Deserialize, Serialize};

/// A stored scalar setting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
    pub updated_at: i64,
}

/// A stored local model row, as laid out in the `local_models` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalModelRow {
    pub id: String,
    pub position: i64,
    pub name: String,
    pub model_type: String,
    pub endpoint: String,
    pub description: String,
    pub enabled: bool,
    pub api_key: Option<String>,
}
