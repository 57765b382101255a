//! Settings modal for the TUI
//!
//! Renders a [`SettingsPanel`] as a centered overlay with four tabs:
//! - General: max tokens, temperature, timeout, auto-save
//! - API: hosted provider API key
//! - Local Models: local model endpoints, add/edit/delete
//! - Appearance: theme

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::panel::{
    display_value, ModelFlow, NoticeKind, SettingField, SettingsPanel, SettingsTab,
};
use crate::settings::SettingsService;
use crate::tui::hit_test::{ClickTarget, HitTestRegistry};
use crate::tui::theme::{dim_background, Theme};

mod api;
mod appearance;
mod dialogs;
mod general;
mod keys;
mod local_models;

pub use keys::{handle_settings_key, handle_settings_paste, KeyContext, SettingsKeyResult};

// ─────────────────────────────────────────────────────────────────────────────
// Settings State
// ─────────────────────────────────────────────────────────────────────────────

/// What keystrokes currently feed into
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputMode {
    #[default]
    Navigation,
    /// Typing a new value for a preference
    EditingField { field: SettingField, buffer: String },
    /// Typing the path of a settings file to import
    ImportPath { buffer: String },
}

/// Widget-level state of the settings modal. The panel owns everything else.
#[derive(Debug, Default)]
pub struct SettingsState {
    /// Selected preference row on General/API/Appearance
    pub selected_index: usize,
    /// Selected entry in the local model list
    pub model_index: usize,
    pub input_mode: InputMode,
}

impl SettingsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset state when switching tabs
    pub fn reset_tab_state(&mut self) {
        self.selected_index = 0;
        self.input_mode = InputMode::Navigation;
    }

    /// Preference under the cursor on `tab`
    pub fn selected_field(&self, tab: SettingsTab) -> Option<SettingField> {
        SettingField::for_tab(tab).get(self.selected_index).copied()
    }

    pub fn select_prev(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn select_next(&mut self, count: usize) {
        if self.selected_index + 1 < count {
            self.selected_index += 1;
        }
    }

    /// Keep the model cursor inside a list of `count` entries
    pub fn clamp_model_index(&mut self, count: usize) {
        if count == 0 {
            self.model_index = 0;
        } else if self.model_index >= count {
            self.model_index = count - 1;
        }
    }

    pub fn is_typing(&self) -> bool {
        !matches!(self.input_mode, InputMode::Navigation)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main Render Function
// ─────────────────────────────────────────────────────────────────────────────

/// Render the settings overlay
pub fn render_settings<S: SettingsService>(
    frame: &mut Frame,
    area: Rect,
    panel: &SettingsPanel<S>,
    state: &SettingsState,
    theme: &Theme,
    hits: &mut HitTestRegistry,
) {
    // Dim the entire background first to create modal overlay effect
    dim_background(frame, area, theme);

    let overlay_area = centered_rect(80, 80, area);
    frame.render_widget(Clear, overlay_area);
    hits.register_modal(area, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(
            " ⚙ Settings ",
            Style::default()
                .fg(theme.header)
                .add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(theme.panel_background).fg(theme.text));

    let inner_area = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Tab bar
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status line
            Constraint::Length(1), // Footer
        ])
        .split(inner_area);

    render_tab_bar(frame, chunks[0], panel.active_tab(), theme, hits);

    match panel.active_tab() {
        SettingsTab::General => {
            general::render_general_tab(frame, chunks[1], panel, state, theme, hits)
        }
        SettingsTab::Api => api::render_api_tab(frame, chunks[1], panel, state, theme, hits),
        SettingsTab::LocalModels => {
            local_models::render_local_models_tab(frame, chunks[1], panel, state, theme, hits)
        }
        SettingsTab::Appearance => {
            appearance::render_appearance_tab(frame, chunks[1], panel, state, theme, hits)
        }
    }

    render_status_line(frame, chunks[2], panel, theme);
    render_footer(frame, chunks[3], panel, state, theme);

    // Dialogs sit on top of everything inside the modal
    match panel.flow() {
        ModelFlow::Creating(form) | ModelFlow::Editing { form, .. } => {
            let editing = matches!(panel.flow(), ModelFlow::Editing { .. });
            dialogs::render_model_form(frame, overlay_area, form, editing, theme, hits);
        }
        ModelFlow::BulkConfirmPending { staged } => {
            dialogs::render_bulk_confirm(frame, overlay_area, staged, theme, hits);
        }
        ModelFlow::Idle => {}
    }
    if let Some(pending) = panel.pending() {
        dialogs::render_confirmation(frame, overlay_area, pending, theme, hits);
    }
    if let InputMode::ImportPath { buffer } = &state.input_mode {
        dialogs::render_import_prompt(frame, overlay_area, buffer, theme);
    }
}

/// Render the tab bar at the top of the settings panel
fn render_tab_bar(
    frame: &mut Frame,
    area: Rect,
    active: SettingsTab,
    theme: &Theme,
    hits: &mut HitTestRegistry,
) {
    let tab_titles: Vec<Line> = SettingsTab::all()
        .iter()
        .map(|tab| {
            let style = if *tab == active {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text_muted)
            };
            Line::from(Span::styled(tab.display_name(), style))
        })
        .collect();

    let tabs = Tabs::new(tab_titles)
        .select(active.index())
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::styled(" │ ", Style::default().fg(theme.border)));

    frame.render_widget(tabs, area);

    // Each tab's target covers its padding plus the divider that follows it
    let mut x_offset = area.x;
    for tab in SettingsTab::all() {
        let width = tab.display_name().width() as u16 + 5;
        hits.register(
            Rect::new(x_offset, area.y, width.min(area.right().saturating_sub(x_offset)), 1),
            ClickTarget::Tab(*tab),
        );
        x_offset = x_offset.saturating_add(width);
    }
}

/// Notice, import error, or field error, in that order of priority
fn render_status_line<S: SettingsService>(
    frame: &mut Frame,
    area: Rect,
    panel: &SettingsPanel<S>,
    theme: &Theme,
) {
    let line = if let Some(notice) = panel.notice() {
        let (icon, color) = match notice.kind {
            NoticeKind::Success => ("✓ ", theme.success),
            NoticeKind::Error => ("✗ ", theme.error),
        };
        Line::from(vec![
            Span::styled(icon, Style::default().fg(color)),
            Span::styled(notice.text.clone(), Style::default().fg(color)),
        ])
    } else if let Some(message) = panel.import_error() {
        Line::from(Span::styled(
            format!("✗ {}", message),
            Style::default().fg(theme.error),
        ))
    } else if let Some(message) = panel.field_error() {
        Line::from(Span::styled(
            format!("⚠ {}", message),
            Style::default().fg(theme.warning),
        ))
    } else {
        Line::from("")
    };

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

/// Render footer with keyboard hints (context-sensitive based on active tab)
fn render_footer<S: SettingsService>(
    frame: &mut Frame,
    area: Rect,
    panel: &SettingsPanel<S>,
    state: &SettingsState,
    theme: &Theme,
) {
    let key = |text: &'static str| Span::styled(text, Style::default().fg(theme.accent));
    let hint = |text: &'static str| Span::styled(text, Style::default().fg(theme.text_muted));

    let spans = if state.is_typing() {
        vec![
            key("Enter"),
            hint(" save  "),
            key("Ctrl+V"),
            hint(" paste  "),
            key("Esc"),
            hint(" cancel"),
        ]
    } else if panel.active_tab() == SettingsTab::LocalModels {
        vec![
            key("a"),
            hint(" add  "),
            key("e"),
            hint(" edit  "),
            key("d"),
            hint(" delete  "),
            key("Space"),
            hint(" enable  "),
            key("Tab"),
            hint(" tabs  "),
            key("Esc"),
            hint(" close"),
        ]
    } else {
        vec![
            key("Tab"),
            hint("/"),
            key("Shift+Tab"),
            hint(" switch tabs  "),
            key("↑↓"),
            hint(" navigate  "),
            key("Enter"),
            hint(" edit  "),
            key("^E"),
            hint(" export  "),
            key("^O"),
            hint(" import  "),
            key("^R"),
            hint(" reset  "),
            key("Esc"),
            hint(" close"),
        ]
    };

    let footer = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(footer, area);
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared row rendering
// ─────────────────────────────────────────────────────────────────────────────

/// One preference row: selector, label, value (or the edit buffer), description
pub(super) fn render_field_row(
    frame: &mut Frame,
    area: Rect,
    field: SettingField,
    value: Vec<Span<'static>>,
    description: &str,
    selected: bool,
    theme: &Theme,
) {
    let header_style = if selected {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.header)
    };
    let selector = if selected { "▶ " } else { "  " };

    let mut first = vec![
        Span::styled(selector, header_style),
        Span::styled(format!("{:<26}", field.label()), header_style),
    ];
    first.extend(value);

    let lines = vec![
        Line::from(first),
        Line::from(Span::styled(
            format!("    {}", description),
            Style::default().fg(theme.text_muted),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

/// Value spans for a text field, showing the edit buffer while editing
pub(super) fn text_value<S: SettingsService>(
    panel: &SettingsPanel<S>,
    state: &SettingsState,
    field: SettingField,
    theme: &Theme,
) -> Vec<Span<'static>> {
    match &state.input_mode {
        InputMode::EditingField { field: editing, buffer } if *editing == field => vec![
            Span::styled(buffer.clone(), Style::default().fg(theme.accent)),
            Span::styled("│", Style::default().fg(theme.accent)),
        ],
        _ => vec![Span::styled(
            display_value(field, panel.settings()),
            Style::default().fg(theme.text),
        )],
    }
}

/// Split `area` into two-line rows, registering each as a click target
pub(super) fn field_rows(area: Rect, count: usize, hits: &mut HitTestRegistry) -> Vec<Rect> {
    let mut constraints: Vec<Constraint> = (0..count)
        .flat_map(|_| [Constraint::Length(2), Constraint::Length(1)])
        .collect();
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    (0..count)
        .map(|i| {
            let row = chunks[i * 2];
            hits.register(row, ClickTarget::SettingRow(i));
            row
        })
        .collect()
}

/// Create a centered rectangle with the given percentage of width and height
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
