//! Keyboard handling for the settings modal
//!
//! Keys go to the innermost layer first: yes/no prompt, bulk confirmation,
//! text input, model form, then tab navigation.

use std::path::Path;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use super::{InputMode, SettingsState};
use crate::panel::{display_value, FormField, ModelFlow, SettingField, SettingsPanel, SettingsTab};
use crate::settings::SettingsService;

/// Result of handling a settings key event
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsKeyResult {
    /// Event was handled, no further action needed
    Handled,
    /// Close the settings modal
    Close,
    /// Ignored (event not handled by the modal)
    Ignored,
}

/// Environment a key handler may need beyond panel and widget state
pub struct KeyContext<'a> {
    /// Clipboard contents, fetched by the caller on Ctrl+V only
    pub clipboard_text: Option<&'a str>,
    /// Where Ctrl+E writes the export
    pub export_dir: &'a Path,
    pub now: Instant,
}

fn is_typing_key(key: &KeyEvent) -> Option<char> {
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => Some(c),
        _ => None,
    }
}

fn is_paste(key: &KeyEvent) -> bool {
    key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('v')
}

/// Handle a key event while the settings modal is open
pub fn handle_settings_key<S: SettingsService>(
    panel: &mut SettingsPanel<S>,
    state: &mut SettingsState,
    key: KeyEvent,
    ctx: &KeyContext,
) -> SettingsKeyResult {
    if panel.pending().is_some() {
        return handle_confirmation_key(panel, key, ctx);
    }
    if matches!(panel.flow(), ModelFlow::BulkConfirmPending { .. }) {
        return handle_bulk_key(panel, key, ctx);
    }
    if state.is_typing() {
        return handle_input_key(panel, state, key, ctx);
    }
    if panel.flow().form().is_some() {
        return handle_form_key(panel, key, ctx);
    }
    handle_navigation_key(panel, state, key, ctx)
}

/// Route bracketed paste into whatever is taking text
pub fn handle_settings_paste<S: SettingsService>(
    panel: &mut SettingsPanel<S>,
    state: &mut SettingsState,
    text: &str,
) {
    match &mut state.input_mode {
        InputMode::EditingField { buffer, .. } | InputMode::ImportPath { buffer } => {
            buffer.push_str(text);
        }
        InputMode::Navigation => {
            if let Some(form) = panel.form_mut() {
                form.insert_str(text);
            }
        }
    }
}

fn handle_confirmation_key<S: SettingsService>(
    panel: &mut SettingsPanel<S>,
    key: KeyEvent,
    ctx: &KeyContext,
) -> SettingsKeyResult {
    let answer = match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(false),
        _ => None,
    };
    if let Some(confirmed) = answer {
        // Failures are already surfaced as a notice
        let _ = panel.resolve_confirmation(confirmed, ctx.now);
    }
    SettingsKeyResult::Handled
}

fn handle_bulk_key<S: SettingsService>(
    panel: &mut SettingsPanel<S>,
    key: KeyEvent,
    ctx: &KeyContext,
) -> SettingsKeyResult {
    match key.code {
        KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
            let _ = panel.confirm_bulk(ctx.now);
        }
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => panel.cancel_bulk(),
        _ => {}
    }
    SettingsKeyResult::Handled
}

fn handle_input_key<S: SettingsService>(
    panel: &mut SettingsPanel<S>,
    state: &mut SettingsState,
    key: KeyEvent,
    ctx: &KeyContext,
) -> SettingsKeyResult {
    if key.code == KeyCode::Esc {
        state.input_mode = InputMode::Navigation;
        return SettingsKeyResult::Handled;
    }

    if key.code == KeyCode::Enter {
        match std::mem::take(&mut state.input_mode) {
            InputMode::EditingField { field, buffer } => {
                if panel.update_field(field, &buffer).is_err() {
                    // Keep editing so the input can be fixed
                    state.input_mode = InputMode::EditingField { field, buffer };
                }
            }
            InputMode::ImportPath { buffer } => {
                let path = buffer.trim();
                if !path.is_empty() {
                    let _ = panel.import_file(Path::new(path), ctx.now);
                }
            }
            InputMode::Navigation => {}
        }
        return SettingsKeyResult::Handled;
    }

    let buffer = match &mut state.input_mode {
        InputMode::EditingField { buffer, .. } | InputMode::ImportPath { buffer } => buffer,
        InputMode::Navigation => return SettingsKeyResult::Ignored,
    };

    if is_paste(&key) {
        if let Some(text) = ctx.clipboard_text {
            buffer.push_str(text.trim_end_matches(['\r', '\n']));
        }
    } else if key.code == KeyCode::Backspace {
        buffer.pop();
    } else if let Some(c) = is_typing_key(&key) {
        buffer.push(c);
    }
    SettingsKeyResult::Handled
}

fn handle_form_key<S: SettingsService>(
    panel: &mut SettingsPanel<S>,
    key: KeyEvent,
    ctx: &KeyContext,
) -> SettingsKeyResult {
    if key.code == KeyCode::Esc {
        panel.close_form();
        return SettingsKeyResult::Handled;
    }
    if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('s') {
        let _ = panel.submit_form(ctx.now);
        return SettingsKeyResult::Handled;
    }

    let Some(focus) = panel.flow().form().map(|f| f.focus) else {
        return SettingsKeyResult::Ignored;
    };
    if key.code == KeyCode::Enter && focus.is_last() {
        let _ = panel.submit_form(ctx.now);
        return SettingsKeyResult::Handled;
    }

    let Some(form) = panel.form_mut() else {
        return SettingsKeyResult::Ignored;
    };
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus = focus.next(),
        KeyCode::BackTab | KeyCode::Up => form.focus = focus.prev(),
        KeyCode::Left if focus == FormField::ModelType => form.cycle_model_type(false),
        KeyCode::Right if focus == FormField::ModelType => form.cycle_model_type(true),
        KeyCode::Char(' ') if focus == FormField::Enabled => form.toggle_enabled(),
        KeyCode::Enter if focus == FormField::Enabled => form.toggle_enabled(),
        KeyCode::Enter => form.focus = focus.next(),
        KeyCode::Backspace => form.backspace(),
        _ if is_paste(&key) => {
            if let Some(text) = ctx.clipboard_text {
                form.insert_str(text.trim_end_matches(['\r', '\n']));
            }
        }
        _ => {
            if let Some(c) = is_typing_key(&key) {
                form.insert_str(c.encode_utf8(&mut [0; 4]));
            }
        }
    }
    SettingsKeyResult::Handled
}

fn handle_navigation_key<S: SettingsService>(
    panel: &mut SettingsPanel<S>,
    state: &mut SettingsState,
    key: KeyEvent,
    ctx: &KeyContext,
) -> SettingsKeyResult {
    // Modal-wide shortcuts
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => return SettingsKeyResult::Close,
        (KeyModifiers::NONE, KeyCode::Tab) => {
            panel.next_tab();
            state.reset_tab_state();
            return SettingsKeyResult::Handled;
        }
        (_, KeyCode::BackTab) => {
            panel.prev_tab();
            state.reset_tab_state();
            return SettingsKeyResult::Handled;
        }
        (KeyModifiers::CONTROL, KeyCode::Char('e')) => {
            let _ = panel.export_to(ctx.export_dir, ctx.now);
            return SettingsKeyResult::Handled;
        }
        (KeyModifiers::CONTROL, KeyCode::Char('o')) => {
            panel.clear_import_error();
            state.input_mode = InputMode::ImportPath {
                buffer: String::new(),
            };
            return SettingsKeyResult::Handled;
        }
        (KeyModifiers::CONTROL, KeyCode::Char('r')) => {
            panel.request_reset();
            return SettingsKeyResult::Handled;
        }
        _ => {}
    }

    match panel.active_tab() {
        SettingsTab::LocalModels => handle_models_key(panel, state, key, ctx),
        tab => handle_fields_key(panel, state, tab, key),
    }
}

fn handle_fields_key<S: SettingsService>(
    panel: &mut SettingsPanel<S>,
    state: &mut SettingsState,
    tab: SettingsTab,
    key: KeyEvent,
) -> SettingsKeyResult {
    let count = SettingField::for_tab(tab).len();
    let Some(field) = state.selected_field(tab) else {
        return SettingsKeyResult::Ignored;
    };

    match key.code {
        KeyCode::Up => state.select_prev(),
        KeyCode::Down => state.select_next(count),
        KeyCode::Enter | KeyCode::Char(' ') if field == SettingField::AutoSave => {
            let next = if panel.settings().auto_save { "off" } else { "on" };
            let _ = panel.update_field(field, next);
        }
        KeyCode::Left | KeyCode::Right if field == SettingField::Theme => {
            let current = panel.settings().theme;
            let next = if key.code == KeyCode::Left {
                current.prev()
            } else {
                current.next()
            };
            let _ = panel.update_field(field, &next.to_string());
        }
        KeyCode::Enter if field.is_text() => {
            debug!(?field, "Editing setting");
            state.input_mode = InputMode::EditingField {
                field,
                buffer: display_value(field, panel.settings()),
            };
        }
        _ => return SettingsKeyResult::Ignored,
    }
    SettingsKeyResult::Handled
}

fn handle_models_key<S: SettingsService>(
    panel: &mut SettingsPanel<S>,
    state: &mut SettingsState,
    key: KeyEvent,
    ctx: &KeyContext,
) -> SettingsKeyResult {
    let count = panel.settings().local_models.len();
    state.clamp_model_index(count);
    let selected_id = panel
        .settings()
        .local_models
        .get(state.model_index)
        .map(|m| m.id.clone());

    match (key.code, selected_id) {
        (KeyCode::Up, _) => state.model_index = state.model_index.saturating_sub(1),
        (KeyCode::Down, _) => {
            if state.model_index + 1 < count {
                state.model_index += 1;
            }
        }
        (KeyCode::Char('a'), _) => panel.begin_create(),
        (KeyCode::Char('e') | KeyCode::Enter, Some(id)) => {
            panel.begin_edit(&id);
        }
        (KeyCode::Char('d') | KeyCode::Delete, Some(id)) => {
            panel.request_delete(&id);
        }
        (KeyCode::Char(' '), Some(id)) => {
            let _ = panel.toggle_model_enabled(&id, ctx.now);
        }
        _ => return SettingsKeyResult::Ignored,
    }
    SettingsKeyResult::Handled
}
