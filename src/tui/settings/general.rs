//! General settings tab
//!
//! Max tokens, temperature, request timeout, and conversation auto-save.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    Frame,
};

use super::{field_rows, render_field_row, text_value, SettingsState};
use crate::panel::{SettingField, SettingsPanel, SettingsTab};
use crate::settings::SettingsService;
use crate::tui::hit_test::HitTestRegistry;
use crate::tui::theme::Theme;

/// Render the General settings tab content
pub fn render_general_tab<S: SettingsService>(
    frame: &mut Frame,
    area: Rect,
    panel: &SettingsPanel<S>,
    state: &SettingsState,
    theme: &Theme,
    hits: &mut HitTestRegistry,
) {
    let fields = SettingField::for_tab(SettingsTab::General);
    let rows = field_rows(area, fields.len(), hits);

    for (idx, (field, row)) in fields.iter().zip(rows).enumerate() {
        let selected = idx == state.selected_index;
        let value = match field {
            SettingField::AutoSave => vec![render_toggle(panel.settings().auto_save, theme)],
            _ => text_value(panel, state, *field, theme),
        };
        render_field_row(frame, row, *field, value, describe(*field), selected, theme);
    }
}

fn describe(field: SettingField) -> &'static str {
    match field {
        SettingField::MaxTokens => "Upper limit on tokens generated per response",
        SettingField::Temperature => "Higher values give more varied responses",
        SettingField::TimeoutSeconds => "How long to wait for a response before giving up",
        SettingField::AutoSave => "Save conversations as they happen",
        _ => "",
    }
}

/// Render a toggle switch
fn render_toggle(enabled: bool, theme: &Theme) -> Span<'static> {
    if enabled {
        Span::styled(
            "[●━━] ON",
            Style::default()
                .fg(theme.success)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("[━━○] OFF", Style::default().fg(theme.text_muted))
    }
}
