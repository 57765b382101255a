//! The settings panel: everything the modal does apart from drawing.
//!
//! A [`SettingsPanel`] is built when the modal opens and dropped when it
//! closes. It holds the last snapshot returned by the service and the
//! transient UI state (active tab, model form, staged bulk list, pending
//! confirmation, notices). Every mutation goes through the service and is
//! followed by a fresh snapshot.

mod binder;
mod bulk;
mod confirm;
mod error;
mod flow;
mod form;
mod notice;
mod tabs;
mod transfer;

pub use binder::{coerce, display_value, format_seconds, BindError, SettingField};
pub use bulk::{
    expand_bulk_models, split_model_names, IdGenerator, SequentialIdGenerator, UuidIdGenerator,
};
pub use confirm::Confirmation;
pub use error::{PanelError, INVALID_IMPORT_MESSAGE};
pub use flow::{FlowEffect, FlowEvent, ModelFlow, EMPTY_NAME_MESSAGE};
pub use form::{FormField, ModelForm};
pub use notice::{Notice, NoticeKind, NoticeSlot, NOTICE_DURATION};
pub use tabs::SettingsTab;
pub use transfer::{export_to_dir, import_from_file, EXPORT_FILE_NAME};

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, error, info};

use crate::settings::{LocalModelConfig, Settings, SettingsError, SettingsService};

/// Modal settings panel bound to a settings service.
pub struct SettingsPanel<S: SettingsService> {
    service: S,
    snapshot: Settings,
    active_tab: SettingsTab,
    flow: ModelFlow,
    ids: Box<dyn IdGenerator>,
    notice: NoticeSlot,
    import_error: Option<String>,
    field_error: Option<String>,
    pending: Option<Confirmation>,
}

impl<S: SettingsService> SettingsPanel<S> {
    /// Fetch the current snapshot and build a fresh panel.
    pub fn mount(service: S) -> Result<Self, SettingsError> {
        Self::mount_with_ids(service, Box::new(UuidIdGenerator))
    }

    pub fn mount_with_ids(service: S, ids: Box<dyn IdGenerator>) -> Result<Self, SettingsError> {
        let snapshot = service.get_settings()?;
        debug!(
            local_models = snapshot.local_models.len(),
            "Mounted settings panel"
        );
        Ok(Self {
            service,
            snapshot,
            active_tab: SettingsTab::default(),
            flow: ModelFlow::Idle,
            ids,
            notice: NoticeSlot::new(),
            import_error: None,
            field_error: None,
            pending: None,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn settings(&self) -> &Settings {
        &self.snapshot
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn active_tab(&self) -> SettingsTab {
        self.active_tab
    }

    pub fn set_tab(&mut self, tab: SettingsTab) {
        self.active_tab = tab;
        self.field_error = None;
    }

    pub fn next_tab(&mut self) {
        self.set_tab(self.active_tab.next());
    }

    pub fn prev_tab(&mut self) {
        self.set_tab(self.active_tab.prev());
    }

    pub fn flow(&self) -> &ModelFlow {
        &self.flow
    }

    /// The open model form, for in-place editing.
    pub fn form_mut(&mut self) -> Option<&mut ModelForm> {
        self.flow.form_mut()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.current()
    }

    pub fn import_error(&self) -> Option<&str> {
        self.import_error.as_deref()
    }

    pub fn field_error(&self) -> Option<&str> {
        self.field_error.as_deref()
    }

    pub fn pending(&self) -> Option<&Confirmation> {
        self.pending.as_ref()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Field binder
    // ─────────────────────────────────────────────────────────────────────────

    /// Coerce `raw` for `field`, persist it, and take the returned snapshot.
    ///
    /// Input that fails coercion never reaches the service.
    pub fn update_field(&mut self, field: SettingField, raw: &str) -> Result<(), PanelError> {
        let patch = match coerce(field, raw) {
            Ok(patch) => patch,
            Err(e) => {
                debug!(?field, error = %e, "Rejected field input");
                self.field_error = Some(e.to_string());
                return Err(e.into());
            }
        };

        match self.service.update_settings(patch) {
            Ok(snapshot) => {
                self.snapshot = snapshot;
                self.field_error = None;
                Ok(())
            }
            Err(e) => {
                error!(?field, error = %e, "Failed to update setting");
                self.field_error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Model form
    // ─────────────────────────────────────────────────────────────────────────

    pub fn begin_create(&mut self) {
        self.apply(FlowEvent::OpenCreate, Instant::now());
    }

    /// Open the form on the model stored under `id`. Returns false if no
    /// such model is in the snapshot.
    pub fn begin_edit(&mut self, id: &str) -> bool {
        let Some(config) = self.snapshot.local_model(id).cloned() else {
            return false;
        };
        self.apply(
            FlowEvent::OpenEdit {
                id: id.to_string(),
                config,
            },
            Instant::now(),
        );
        true
    }

    pub fn submit_form(&mut self, now: Instant) -> Result<(), PanelError> {
        self.dispatch(FlowEvent::Submit, now)
    }

    pub fn confirm_bulk(&mut self, now: Instant) -> Result<(), PanelError> {
        self.dispatch(FlowEvent::ConfirmBulk, now)
    }

    pub fn cancel_bulk(&mut self) {
        self.apply(FlowEvent::CancelBulk, Instant::now());
    }

    pub fn close_form(&mut self) {
        self.apply(FlowEvent::Close, Instant::now());
    }

    /// Flip the enabled flag of a stored model.
    pub fn toggle_model_enabled(&mut self, id: &str, now: Instant) -> Result<(), PanelError> {
        let Some(mut config) = self.snapshot.local_model(id).cloned() else {
            return Err(SettingsError::ModelNotFound(id.to_string()).into());
        };
        config.enabled = !config.enabled;
        let result = self
            .service
            .update_local_model(id, config)
            .and_then(|_| self.refresh());
        self.report(result, now, None)
    }

    fn apply(&mut self, event: FlowEvent, now: Instant) {
        // Effect-free events cannot fail
        let _ = self.dispatch(event, now);
    }

    fn dispatch(&mut self, event: FlowEvent, now: Instant) -> Result<(), PanelError> {
        let previous = self.flow.clone();
        let (next, effect) = std::mem::take(&mut self.flow).transition(event, self.ids.as_mut());
        self.flow = next;

        let (result, success) = match effect {
            FlowEffect::None => return Ok(()),
            FlowEffect::AddOne(config) => {
                let message = format!("Added model {}", config.name);
                info!(id = %config.id, name = %config.name, "Adding local model");
                (self.service.add_local_model(config), message)
            }
            FlowEffect::AddMany(staged) => {
                let message = bulk_success_message(&staged);
                info!(count = staged.len(), "Adding local models");
                (self.service.add_local_models(staged), message)
            }
            FlowEffect::Update { id, config } => {
                let message = format!("Updated model {}", config.name);
                info!(id = %id, "Updating local model");
                (self.service.update_local_model(&id, config), message)
            }
        };

        // Roll back only when the write itself failed
        if result.is_err() {
            self.flow = previous;
        }
        let result = result.and_then(|_| self.refresh());
        self.report(result, now, Some(success))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Delete / reset
    // ─────────────────────────────────────────────────────────────────────────

    /// Ask before deleting the model stored under `id`.
    pub fn request_delete(&mut self, id: &str) -> bool {
        let Some(model) = self.snapshot.local_model(id) else {
            return false;
        };
        self.pending = Some(Confirmation::DeleteModel {
            id: model.id.clone(),
            name: model.name.clone(),
        });
        true
    }

    pub fn request_reset(&mut self) {
        self.pending = Some(Confirmation::ResetAll);
    }

    /// Answer the pending prompt. `false` simply dismisses it.
    pub fn resolve_confirmation(&mut self, confirmed: bool, now: Instant) -> Result<(), PanelError> {
        let Some(pending) = self.pending.take() else {
            return Ok(());
        };
        if !confirmed {
            debug!(?pending, "Confirmation declined");
            return Ok(());
        }

        let (result, message) = match &pending {
            Confirmation::DeleteModel { id, name } => (
                self.service.remove_local_model(id),
                format!("Deleted model {}", name),
            ),
            Confirmation::ResetAll => (
                self.service.reset_settings(),
                "Settings reset to defaults".to_string(),
            ),
        };
        let result = result.and_then(|_| self.refresh());
        self.report(result, now, Some(message))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Import / export
    // ─────────────────────────────────────────────────────────────────────────

    /// Write `chat-settings.json` into `dir`.
    pub fn export_to(&mut self, dir: &Path, now: Instant) -> Result<PathBuf, PanelError> {
        match export_to_dir(&self.service, dir) {
            Ok(path) => {
                self.notice.show(
                    format!("Exported settings to {}", path.display()),
                    NoticeKind::Success,
                    now,
                );
                Ok(path)
            }
            Err(e) => {
                error!(error = %e, "Failed to export settings");
                self.notice
                    .show(format!("Export failed: {}", e), NoticeKind::Error, now);
                Err(e)
            }
        }
    }

    /// Import a settings file. On failure the snapshot is left as it was and
    /// the fixed import message is set.
    pub fn import_file(&mut self, path: &Path, now: Instant) -> Result<(), PanelError> {
        if let Err(e) = import_from_file(&self.service, path) {
            self.import_error = Some(INVALID_IMPORT_MESSAGE.to_string());
            return Err(e);
        }
        self.import_error = None;
        let result = self.refresh();
        self.report(result, now, Some("Settings imported".to_string()))
    }

    pub fn clear_import_error(&mut self) {
        self.import_error = None;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Housekeeping
    // ─────────────────────────────────────────────────────────────────────────

    /// Expire notices whose deadline has passed. Returns true if anything
    /// changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.notice.tick(now)
    }

    fn refresh(&mut self) -> Result<(), SettingsError> {
        self.snapshot = self.service.get_settings()?;
        Ok(())
    }

    fn report(
        &mut self,
        result: Result<(), SettingsError>,
        now: Instant,
        success: Option<String>,
    ) -> Result<(), PanelError> {
        match result {
            Ok(()) => {
                if let Some(message) = success {
                    self.notice.show(message, NoticeKind::Success, now);
                }
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Settings service call failed");
                self.notice.show(e.to_string(), NoticeKind::Error, now);
                Err(e.into())
            }
        }
    }
}

/// `Successfully added N models: A, B, C`
pub fn bulk_success_message(models: &[LocalModelConfig]) -> String {
    let names: Vec<&str> = models.iter().map(|m| m.name.as_str()).collect();
    format!(
        "Successfully added {} models: {}",
        models.len(),
        names.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::settings::{LocalModelType, SettingsPatch, SettingsStore, ThemeMode};
    use std::cell::Cell;
    use std::fs;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;

    fn setup_store() -> (TempDir, Arc<SettingsStore>) {
        let tmp = TempDir::new().unwrap();
        let db = Database::open_at(tmp.path().join("settings.db")).unwrap();
        db.migrate().unwrap();
        (tmp, Arc::new(SettingsStore::new(db)))
    }

    fn mount(store: &Arc<SettingsStore>) -> SettingsPanel<Arc<SettingsStore>> {
        SettingsPanel::mount_with_ids(
            Arc::clone(store),
            Box::new(SequentialIdGenerator::new("model")),
        )
        .unwrap()
    }

    fn submit_names(panel: &mut SettingsPanel<Arc<SettingsStore>>, names: &str) {
        panel.begin_create();
        panel.form_mut().unwrap().name = names.to_string();
        panel.submit_form(Instant::now()).unwrap();
    }

    #[test]
    fn test_single_name_is_saved_immediately() {
        let (_tmp, store) = setup_store();
        let mut panel = mount(&store);

        submit_names(&mut panel, "llama3");

        assert!(panel.flow().is_idle());
        assert_eq!(store.get_settings().unwrap().local_models.len(), 1);
        assert_eq!(panel.settings().local_models[0].name, "llama3");
    }

    #[test]
    fn test_confirming_bulk_persists_every_model() {
        let (_tmp, store) = setup_store();
        let mut panel = mount(&store);

        submit_names(&mut panel, "A, B , C");
        assert_eq!(panel.flow().staged().len(), 3);
        assert!(store.get_settings().unwrap().local_models.is_empty());

        panel.confirm_bulk(Instant::now()).unwrap();

        let stored = store.get_settings().unwrap().local_models;
        let names: Vec<_> = stored.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert!(panel.flow().staged().is_empty());
        assert_eq!(
            panel.notice().map(|n| n.text.as_str()),
            Some("Successfully added 3 models: A, B, C")
        );
    }

    #[test]
    fn test_bulk_notice_clears_after_three_seconds() {
        let (_tmp, store) = setup_store();
        let mut panel = mount(&store);
        let now = Instant::now();

        submit_names(&mut panel, "a,b");
        panel.confirm_bulk(now).unwrap();

        assert!(!panel.tick(now + Duration::from_secs(2)));
        assert!(panel.notice().is_some());
        assert!(panel.tick(now + NOTICE_DURATION));
        assert!(panel.notice().is_none());
    }

    #[test]
    fn test_cancelling_bulk_persists_nothing() {
        let (_tmp, store) = setup_store();
        let mut panel = mount(&store);

        submit_names(&mut panel, "x,y");
        panel.cancel_bulk();

        assert!(panel.flow().is_idle());
        assert!(panel.flow().staged().is_empty());
        assert!(store.get_settings().unwrap().local_models.is_empty());
    }

    #[test]
    fn test_zero_names_keep_form_open() {
        let (_tmp, store) = setup_store();
        let mut panel = mount(&store);

        submit_names(&mut panel, " , ");

        let form = panel.flow().form().unwrap();
        assert_eq!(form.error.as_deref(), Some(EMPTY_NAME_MESSAGE));
        assert!(store.get_settings().unwrap().local_models.is_empty());
    }

    #[test]
    fn test_editing_updates_in_place() {
        let (_tmp, store) = setup_store();
        store
            .add_local_model(LocalModelConfig::new("m1", "old", LocalModelType::Ollama))
            .unwrap();
        let mut panel = mount(&store);

        assert!(panel.begin_edit("m1"));
        panel.form_mut().unwrap().name = "a, b".to_string();
        panel.submit_form(Instant::now()).unwrap();

        let stored = store.get_settings().unwrap().local_models;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, "m1");
        assert_eq!(stored[0].name, "a, b");
        assert!(!panel.begin_edit("missing"));
    }

    #[test]
    fn test_timeout_field_round_trip() {
        let (_tmp, store) = setup_store();
        let mut panel = mount(&store);

        panel
            .update_field(SettingField::TimeoutSeconds, "30")
            .unwrap();
        assert_eq!(store.get_settings().unwrap().timeout_ms, 30_000);

        store
            .update_settings(SettingsPatch {
                timeout_ms: Some(45_000),
                ..Default::default()
            })
            .unwrap();
        let panel = mount(&store);
        assert_eq!(
            display_value(SettingField::TimeoutSeconds, panel.settings()),
            "45"
        );
    }

    #[test]
    fn test_bad_input_never_reaches_service() {
        let (_tmp, store) = setup_store();
        let mut panel = mount(&store);

        let err = panel.update_field(SettingField::MaxTokens, "many");
        assert!(matches!(err, Err(PanelError::Bind(_))));
        assert!(panel.field_error().is_some());
        assert_eq!(store.get_settings().unwrap(), Settings::default());
    }

    #[test]
    fn test_snapshot_is_replaced_after_update() {
        let (_tmp, store) = setup_store();
        let mut panel = mount(&store);

        panel.update_field(SettingField::Theme, "light").unwrap();
        assert_eq!(panel.settings().theme, ThemeMode::Light);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let (_tmp, store) = setup_store();
        store
            .add_local_model(LocalModelConfig::new("m1", "phi3", LocalModelType::Ollama))
            .unwrap();
        let mut panel = mount(&store);

        assert!(panel.request_delete("m1"));
        panel.resolve_confirmation(false, Instant::now()).unwrap();
        assert_eq!(store.get_settings().unwrap().local_models.len(), 1);
        assert!(panel.pending().is_none());

        assert!(panel.request_delete("m1"));
        panel.resolve_confirmation(true, Instant::now()).unwrap();
        assert!(store.get_settings().unwrap().local_models.is_empty());
        assert!(panel.settings().local_models.is_empty());
    }

    #[test]
    fn test_reset_requires_confirmation() {
        let (_tmp, store) = setup_store();
        let mut panel = mount(&store);
        panel.update_field(SettingField::MaxTokens, "99").unwrap();

        panel.request_reset();
        assert_eq!(panel.pending(), Some(&Confirmation::ResetAll));
        panel.resolve_confirmation(true, Instant::now()).unwrap();

        assert_eq!(panel.settings(), &Settings::default());
    }

    #[test]
    fn test_toggle_model_enabled() {
        let (_tmp, store) = setup_store();
        store
            .add_local_model(LocalModelConfig::new("m1", "phi3", LocalModelType::Ollama))
            .unwrap();
        let mut panel = mount(&store);

        panel.toggle_model_enabled("m1", Instant::now()).unwrap();
        assert!(!store.get_settings().unwrap().local_models[0].enabled);
    }

    #[test]
    fn test_export_writes_named_file() {
        let (tmp, store) = setup_store();
        let mut panel = mount(&store);

        let path = panel
            .export_to(&tmp.path().join("out"), Instant::now())
            .unwrap();
        assert_eq!(path.file_name().unwrap(), EXPORT_FILE_NAME);
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"settings\""));
    }

    #[test]
    fn test_malformed_import_keeps_snapshot() {
        let (tmp, store) = setup_store();
        let mut panel = mount(&store);
        panel.update_field(SettingField::MaxTokens, "512").unwrap();
        let before = panel.settings().clone();

        let bad = tmp.path().join("broken.json");
        fs::write(&bad, "{ not json").unwrap();
        assert!(panel.import_file(&bad, Instant::now()).is_err());
        assert_eq!(panel.import_error(), Some(INVALID_IMPORT_MESSAGE));
        assert_eq!(panel.settings(), &before);
        assert_eq!(store.get_settings().unwrap(), before);

        let wrong_ext = tmp.path().join("settings.txt");
        fs::write(&wrong_ext, "{}").unwrap();
        assert!(panel.import_file(&wrong_ext, Instant::now()).is_err());

        let missing = tmp.path().join("missing.json");
        assert!(panel.import_file(&missing, Instant::now()).is_err());
        assert_eq!(panel.import_error(), Some(INVALID_IMPORT_MESSAGE));
    }

    #[test]
    fn test_successful_import_clears_error() {
        let (tmp, store) = setup_store();
        let mut panel = mount(&store);

        let bad = tmp.path().join("bad.json");
        fs::write(&bad, "[]").unwrap();
        let _ = panel.import_file(&bad, Instant::now());
        assert!(panel.import_error().is_some());

        let good = tmp.path().join("good.json");
        fs::write(&good, r#"{"theme": "dark", "max_tokens": 100}"#).unwrap();
        panel.import_file(&good, Instant::now()).unwrap();

        assert!(panel.import_error().is_none());
        assert_eq!(panel.settings().theme, ThemeMode::Dark);
        assert_eq!(panel.settings().max_tokens, 100);
    }

    /// Store wrapper whose batch add can be made to fail.
    struct FlakyStore {
        inner: Arc<SettingsStore>,
        fail_batch: Cell<bool>,
        fail_reads: Cell<bool>,
    }

    impl FlakyStore {
        fn new(inner: &Arc<SettingsStore>) -> Self {
            Self {
                inner: Arc::clone(inner),
                fail_batch: Cell::new(false),
                fail_reads: Cell::new(false),
            }
        }
    }

    impl SettingsService for FlakyStore {
        fn get_settings(&self) -> Result<Settings, SettingsError> {
            if self.fail_reads.get() {
                return Err(SettingsError::InvalidDocument("database locked".to_string()));
            }
            self.inner.get_settings()
        }
        fn update_settings(&self, patch: SettingsPatch) -> Result<Settings, SettingsError> {
            self.inner.update_settings(patch)
        }
        fn add_local_model(&self, config: LocalModelConfig) -> Result<(), SettingsError> {
            self.inner.add_local_model(config)
        }
        fn add_local_models(&self, configs: Vec<LocalModelConfig>) -> Result<(), SettingsError> {
            if self.fail_batch.get() {
                return Err(SettingsError::InvalidDocument("disk full".to_string()));
            }
            self.inner.add_local_models(configs)
        }
        fn update_local_model(
            &self,
            id: &str,
            config: LocalModelConfig,
        ) -> Result<(), SettingsError> {
            self.inner.update_local_model(id, config)
        }
        fn remove_local_model(&self, id: &str) -> Result<(), SettingsError> {
            self.inner.remove_local_model(id)
        }
        fn export_settings(&self) -> Result<String, SettingsError> {
            self.inner.export_settings()
        }
        fn import_settings(&self, text: &str) -> Result<(), SettingsError> {
            self.inner.import_settings(text)
        }
        fn reset_settings(&self) -> Result<(), SettingsError> {
            self.inner.reset_settings()
        }
    }

    #[test]
    fn test_failed_confirm_keeps_staged_list() {
        let (_tmp, store) = setup_store();
        let flaky = FlakyStore::new(&store);
        flaky.fail_batch.set(true);
        let mut panel =
            SettingsPanel::mount_with_ids(flaky, Box::new(SequentialIdGenerator::new("m")))
                .unwrap();

        panel.begin_create();
        panel.form_mut().unwrap().name = "a,b".to_string();
        panel.submit_form(Instant::now()).unwrap();

        assert!(panel.confirm_bulk(Instant::now()).is_err());
        assert_eq!(panel.flow().staged().len(), 2);
        assert_eq!(panel.notice().map(|n| n.kind), Some(NoticeKind::Error));

        panel.service().fail_batch.set(false);
        panel.confirm_bulk(Instant::now()).unwrap();
        assert_eq!(store.get_settings().unwrap().local_models.len(), 2);
    }

    #[test]
    fn test_failed_refresh_after_write_does_not_restage() {
        let (_tmp, store) = setup_store();
        let mut panel = SettingsPanel::mount_with_ids(
            FlakyStore::new(&store),
            Box::new(SequentialIdGenerator::new("m")),
        )
        .unwrap();

        panel.begin_create();
        panel.form_mut().unwrap().name = "a,b".to_string();
        panel.submit_form(Instant::now()).unwrap();

        panel.service().fail_reads.set(true);
        assert!(panel.confirm_bulk(Instant::now()).is_err());
        assert!(panel.flow().is_idle());
        assert_eq!(panel.notice().map(|n| n.kind), Some(NoticeKind::Error));
        assert_eq!(store.get_settings().unwrap().local_models.len(), 2);

        // Nothing left to confirm a second time
        panel.service().fail_reads.set(false);
        panel.confirm_bulk(Instant::now()).unwrap();
        assert_eq!(store.get_settings().unwrap().local_models.len(), 2);
    }

    #[test]
    fn test_out_of_range_temperature_keeps_export_importable() {
        let (tmp, store) = setup_store();
        let mut panel = mount(&store);

        assert!(panel.update_field(SettingField::Temperature, "1e39").is_err());
        assert!(panel.settings().temperature.is_finite());
        panel.update_field(SettingField::Temperature, "1.2").unwrap();

        let path = panel.export_to(tmp.path(), Instant::now()).unwrap();
        panel.import_file(&path, Instant::now()).unwrap();
        assert!(panel.import_error().is_none());
        assert_eq!(panel.settings().temperature, 1.2);
    }

    #[test]
    fn test_remount_resets_transient_state() {
        let (_tmp, store) = setup_store();
        let mut panel = mount(&store);
        panel.next_tab();
        submit_names(&mut panel, "a,b");
        drop(panel);

        let panel = mount(&store);
        assert_eq!(panel.active_tab(), SettingsTab::General);
        assert!(panel.flow().is_idle());
        assert!(panel.notice().is_none());
    }
}
