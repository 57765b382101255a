//! SQLite-backed settings service.
//!
//! Scalar preferences live in the `settings` key/value table; local model
//! endpoints live in `local_models`, ordered by `position`.

use rusqlite::{params, Connection, OptionalExtension};

use super::document::{parse_document, SettingsDocument};
use super::{
    LocalModelConfig, Settings, SettingsError, SettingsPatch, SettingsService, ThemeMode,
};
use crate::db::{Database, LocalModelRow, Setting};

/// Keys of the scalar preferences in the `settings` table.
const SCALAR_KEYS: &[&str] = &[
    "max_tokens",
    "temperature",
    "timeout_ms",
    "auto_save",
    "theme",
    "api_key",
];

/// Settings service backed by the application database.
pub struct SettingsStore {
    db: Database,
}

impl SettingsStore {
    /// Wrap an already migrated database.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    fn load_scalars(&self, settings: &mut Settings) -> Result<(), SettingsError> {
        let mut stmt = self
            .db
            .conn()
            .prepare("SELECT key, value, updated_at FROM settings ORDER BY key")?;
        let rows = stmt.query_map([], |row| {
            Ok(Setting {
                key: row.get(0)?,
                value: row.get(1)?,
                updated_at: row.get(2)?,
            })
        })?;

        for row in rows {
            apply_scalar(settings, &row?)?;
        }
        Ok(())
    }

    fn load_local_models(&self) -> Result<Vec<LocalModelConfig>, SettingsError> {
        let mut stmt = self.db.conn().prepare(
            "SELECT id, position, name, model_type, endpoint, description, enabled, api_key
             FROM local_models
             ORDER BY position, id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(LocalModelRow {
                id: row.get(0)?,
                position: row.get(1)?,
                name: row.get(2)?,
                model_type: row.get(3)?,
                endpoint: row.get(4)?,
                description: row.get(5)?,
                enabled: row.get(6)?,
                api_key: row.get(7)?,
            })
        })?;

        let mut models = Vec::new();
        for row in rows {
            models.push(model_from_row(row?)?);
        }
        Ok(models)
    }
}

fn apply_scalar(settings: &mut Settings, row: &Setting) -> Result<(), SettingsError> {
    let invalid = || SettingsError::InvalidValue {
        key: row.key.clone(),
        value: row.value.clone(),
    };

    match row.key.as_str() {
        "max_tokens" => settings.max_tokens = row.value.parse().map_err(|_| invalid())?,
        "temperature" => settings.temperature = row.value.parse().map_err(|_| invalid())?,
        "timeout_ms" => settings.timeout_ms = row.value.parse().map_err(|_| invalid())?,
        "auto_save" => settings.auto_save = row.value.parse().map_err(|_| invalid())?,
        "theme" => settings.theme = row.value.parse::<ThemeMode>().map_err(|_| invalid())?,
        "api_key" => settings.api_key = row.value.clone(),
        _ => {
            // Ignore unknown keys for forward compatibility
        }
    }
    Ok(())
}

fn model_from_row(row: LocalModelRow) -> Result<LocalModelConfig, SettingsError> {
    let model_type = row
        .model_type
        .parse()
        .map_err(|_| SettingsError::InvalidValue {
            key: format!("local_models.{}.model_type", row.id),
            value: row.model_type.clone(),
        })?;

    Ok(LocalModelConfig {
        id: row.id,
        name: row.name,
        model_type,
        endpoint: row.endpoint,
        description: row.description,
        enabled: row.enabled,
        api_key: row.api_key,
    })
}

fn write_patch(conn: &Connection, patch: &SettingsPatch) -> Result<(), rusqlite::Error> {
    for (key, value) in patch.entries() {
        conn.execute(
            "INSERT INTO settings (key, value, updated_at) VALUES (?, ?, unixepoch())
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value],
        )?;
    }
    Ok(())
}

fn model_exists(conn: &Connection, id: &str) -> Result<bool, rusqlite::Error> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM local_models WHERE id = ?)",
        [id],
        |row| row.get(0),
    )
}

fn insert_model(conn: &Connection, config: &LocalModelConfig) -> Result<(), SettingsError> {
    if model_exists(conn, &config.id)? {
        return Err(SettingsError::DuplicateModel(config.id.clone()));
    }

    let next_position: i64 = conn.query_row(
        "SELECT COALESCE(MAX(position), -1) + 1 FROM local_models",
        [],
        |row| row.get(0),
    )?;

    conn.execute(
        "INSERT INTO local_models
            (id, position, name, model_type, endpoint, description, enabled, api_key)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        params![
            config.id,
            next_position,
            config.name,
            config.model_type.to_string(),
            config.endpoint,
            config.description,
            config.enabled,
            config.api_key,
        ],
    )?;
    Ok(())
}

fn clear_all(conn: &Connection) -> Result<(), rusqlite::Error> {
    let placeholders = vec!["?"; SCALAR_KEYS.len()].join(", ");
    conn.execute(
        &format!("DELETE FROM settings WHERE key IN ({})", placeholders),
        rusqlite::params_from_iter(SCALAR_KEYS.iter()),
    )?;
    conn.execute("DELETE FROM local_models", [])?;
    Ok(())
}

impl SettingsService for SettingsStore {
    fn get_settings(&self) -> Result<Settings, SettingsError> {
        let mut settings = Settings::default();
        self.load_scalars(&mut settings)?;
        settings.local_models = self.load_local_models()?;
        Ok(settings)
    }

    fn update_settings(&self, patch: SettingsPatch) -> Result<Settings, SettingsError> {
        if !patch.is_empty() {
            self.db
                .transaction(|conn| write_patch(conn, &patch))?;
            tracing::debug!(
                "Updated settings: {:?}",
                patch.entries().iter().map(|(k, _)| *k).collect::<Vec<_>>()
            );
        }
        self.get_settings()
    }

    fn add_local_model(&self, config: LocalModelConfig) -> Result<(), SettingsError> {
        self.db.transaction(|conn| insert_model(conn, &config))?;
        tracing::info!("Added local model {} ({})", config.name, config.id);
        Ok(())
    }

    fn add_local_models(&self, configs: Vec<LocalModelConfig>) -> Result<(), SettingsError> {
        self.db.transaction(|conn| {
            for config in &configs {
                insert_model(conn, config)?;
            }
            Ok::<_, SettingsError>(())
        })?;
        tracing::info!("Added {} local models", configs.len());
        Ok(())
    }

    fn update_local_model(&self, id: &str, config: LocalModelConfig) -> Result<(), SettingsError> {
        self.db.transaction(|conn| -> Result<(), SettingsError> {
            let position: Option<i64> = conn
                .query_row(
                    "SELECT position FROM local_models WHERE id = ?",
                    [id],
                    |row| row.get(0),
                )
                .optional()?;
            let Some(position) = position else {
                return Err(SettingsError::ModelNotFound(id.to_string()));
            };

            if config.id != id && model_exists(conn, &config.id)? {
                return Err(SettingsError::DuplicateModel(config.id.clone()));
            }

            conn.execute(
                "UPDATE local_models
                 SET id = ?, position = ?, name = ?, model_type = ?, endpoint = ?,
                     description = ?, enabled = ?, api_key = ?, updated_at = unixepoch()
                 WHERE id = ?",
                params![
                    config.id,
                    position,
                    config.name,
                    config.model_type.to_string(),
                    config.endpoint,
                    config.description,
                    config.enabled,
                    config.api_key,
                    id,
                ],
            )?;
            Ok(())
        })?;
        tracing::info!("Updated local model {}", id);
        Ok(())
    }

    fn remove_local_model(&self, id: &str) -> Result<(), SettingsError> {
        let removed = self
            .db
            .conn()
            .execute("DELETE FROM local_models WHERE id = ?", [id])?;
        if removed == 0 {
            return Err(SettingsError::ModelNotFound(id.to_string()));
        }
        tracing::info!("Removed local model {}", id);
        Ok(())
    }

    fn export_settings(&self) -> Result<String, SettingsError> {
        SettingsDocument::new(self.get_settings()?).to_json()
    }

    fn import_settings(&self, text: &str) -> Result<(), SettingsError> {
        let imported = parse_document(text)?;

        self.db.transaction(|conn| {
            clear_all(conn)?;
            write_patch(
                conn,
                &SettingsPatch {
                    max_tokens: Some(imported.max_tokens),
                    temperature: Some(imported.temperature),
                    timeout_ms: Some(imported.timeout_ms),
                    auto_save: Some(imported.auto_save),
                    theme: Some(imported.theme),
                    api_key: Some(imported.api_key.clone()),
                },
            )?;
            for model in &imported.local_models {
                insert_model(conn, model)?;
            }
            Ok::<_, SettingsError>(())
        })?;

        tracing::info!(
            "Imported settings with {} local models",
            imported.local_models.len()
        );
        Ok(())
    }

    fn reset_settings(&self) -> Result<(), SettingsError> {
        self.db.transaction(clear_all)?;
        tracing::info!("Reset settings to defaults");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::LocalModelType;
    use tempfile::TempDir;

    fn setup_store() -> (TempDir, SettingsStore) {
        let tmp = TempDir::new().unwrap();
        let db = Database::open_at(tmp.path().join("test.db")).unwrap();
        db.migrate().unwrap();
        (tmp, SettingsStore::new(db))
    }

    fn model(id: &str, name: &str) -> LocalModelConfig {
        LocalModelConfig::new(id, name, LocalModelType::Ollama)
    }

    #[test]
    fn test_fresh_store_returns_defaults() {
        let (_tmp, store) = setup_store();
        assert_eq!(store.get_settings().unwrap(), Settings::default());
    }

    #[test]
    fn test_update_returns_new_snapshot() {
        let (_tmp, store) = setup_store();

        let updated = store
            .update_settings(SettingsPatch {
                timeout_ms: Some(45_000),
                theme: Some(ThemeMode::Dark),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(updated.timeout_ms, 45_000);
        assert_eq!(updated.theme, ThemeMode::Dark);
        assert_eq!(updated.max_tokens, Settings::default().max_tokens);
        assert_eq!(store.get_settings().unwrap(), updated);
    }

    #[test]
    fn test_models_keep_insertion_order() {
        let (_tmp, store) = setup_store();

        store.add_local_model(model("b", "second")).unwrap();
        store
            .add_local_models(vec![model("a", "third"), model("c", "fourth")])
            .unwrap();

        let names: Vec<_> = store
            .get_settings()
            .unwrap()
            .local_models
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["second", "third", "fourth"]);
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let (_tmp, store) = setup_store();

        store.add_local_model(model("a", "one")).unwrap();
        let err = store.add_local_model(model("a", "two")).unwrap_err();
        assert!(matches!(err, SettingsError::DuplicateModel(id) if id == "a"));
    }

    #[test]
    fn test_batch_add_is_atomic() {
        let (_tmp, store) = setup_store();

        store.add_local_model(model("a", "one")).unwrap();
        let result = store.add_local_models(vec![model("b", "two"), model("a", "dup")]);
        assert!(result.is_err());
        assert_eq!(store.get_settings().unwrap().local_models.len(), 1);
    }

    #[test]
    fn test_update_keeps_position() {
        let (_tmp, store) = setup_store();

        store
            .add_local_models(vec![model("a", "one"), model("b", "two")])
            .unwrap();

        let mut edited = model("a", "renamed");
        edited.enabled = false;
        edited.endpoint = "http://10.0.0.5:11434".to_string();
        store.update_local_model("a", edited.clone()).unwrap();

        let models = store.get_settings().unwrap().local_models;
        assert_eq!(models[0], edited);
        assert_eq!(models[1].id, "b");
    }

    #[test]
    fn test_update_and_remove_unknown_model() {
        let (_tmp, store) = setup_store();

        assert!(matches!(
            store.update_local_model("missing", model("missing", "x")),
            Err(SettingsError::ModelNotFound(_))
        ));
        assert!(matches!(
            store.remove_local_model("missing"),
            Err(SettingsError::ModelNotFound(_))
        ));
    }

    #[test]
    fn test_export_import_between_stores() {
        let (_tmp, source) = setup_store();
        source
            .update_settings(SettingsPatch {
                max_tokens: Some(4096),
                api_key: Some("sk-test".to_string()),
                auto_save: Some(false),
                ..Default::default()
            })
            .unwrap();
        source.add_local_model(model("a", "llama3")).unwrap();

        let exported = source.export_settings().unwrap();

        let (_tmp2, target) = setup_store();
        target.add_local_model(model("old", "stale")).unwrap();
        target.import_settings(&exported).unwrap();

        assert_eq!(target.get_settings().unwrap(), source.get_settings().unwrap());
    }

    #[test]
    fn test_failed_import_changes_nothing() {
        let (_tmp, store) = setup_store();
        store.add_local_model(model("a", "keep")).unwrap();
        let before = store.get_settings().unwrap();

        assert!(store.import_settings("{ not json").is_err());
        assert!(store
            .import_settings(r#"{"local_models": [{"id": "x", "name": ""}]}"#)
            .is_err());

        assert_eq!(store.get_settings().unwrap(), before);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let (_tmp, store) = setup_store();
        store
            .update_settings(SettingsPatch {
                temperature: Some(1.3),
                ..Default::default()
            })
            .unwrap();
        store.add_local_model(model("a", "one")).unwrap();

        store.reset_settings().unwrap();
        assert_eq!(store.get_settings().unwrap(), Settings::default());
    }

    #[test]
    fn test_corrupt_stored_value_is_reported() {
        let (_tmp, store) = setup_store();
        store
            .database()
            .conn()
            .execute(
                "INSERT INTO settings (key, value) VALUES ('max_tokens', 'many')",
                [],
            )
            .unwrap();

        assert!(matches!(
            store.get_settings(),
            Err(SettingsError::InvalidValue { key, .. }) if key == "max_tokens"
        ));
    }
}
