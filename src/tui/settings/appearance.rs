//! Appearance settings tab

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    Frame,
};

use super::{field_rows, render_field_row, SettingsState};
use crate::panel::{SettingField, SettingsPanel};
use crate::settings::{SettingsService, ThemeMode};
use crate::tui::hit_test::HitTestRegistry;
use crate::tui::theme::Theme;

pub fn render_appearance_tab<S: SettingsService>(
    frame: &mut Frame,
    area: Rect,
    panel: &SettingsPanel<S>,
    state: &SettingsState,
    theme: &Theme,
    hits: &mut HitTestRegistry,
) {
    let rows = field_rows(area, 1, hits);
    let Some(row) = rows.first().copied() else {
        return;
    };

    let selected = state.selected_index == 0;
    let current = panel.settings().theme;
    let mut value = Vec::new();
    for mode in ThemeMode::all() {
        let active = *mode == current;
        let style = if active {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };
        value.push(Span::styled(if active { "(●)" } else { "( )" }, style));
        value.push(Span::styled(format!(" {}   ", mode.display_name()), style));
    }

    render_field_row(
        frame,
        row,
        SettingField::Theme,
        value,
        "←/→ to change. System follows the dark palette in the terminal.",
        selected,
        theme,
    );
}
