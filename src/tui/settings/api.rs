//! API settings tab

use ratatui::{layout::Rect, style::Style, text::Span, Frame};

use super::{field_rows, render_field_row, InputMode, SettingsState};
use crate::panel::{SettingField, SettingsPanel};
use crate::settings::SettingsService;
use crate::tui::hit_test::HitTestRegistry;
use crate::tui::theme::Theme;

pub fn render_api_tab<S: SettingsService>(
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

    let value = match &state.input_mode {
        InputMode::EditingField {
            field: SettingField::ApiKey,
            buffer,
        } => vec![
            Span::styled(
                "•".repeat(buffer.chars().count().min(40)),
                Style::default().fg(theme.accent),
            ),
            Span::styled("│", Style::default().fg(theme.accent)),
        ],
        _ if panel.settings().api_key.is_empty() => vec![Span::styled(
            "(not set, press Enter to add)",
            Style::default().fg(theme.text_muted),
        )],
        _ => vec![Span::styled(
            mask_key(&panel.settings().api_key),
            Style::default().fg(theme.text),
        )],
    };

    render_field_row(
        frame,
        row,
        SettingField::ApiKey,
        value,
        "Key for the hosted provider. Stored locally in the settings database.",
        state.selected_index == 0,
        theme,
    );
}

/// Show the first and last few characters of a key
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 16 {
        let head: String = chars[..8].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        "••••••••".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("sk-proj-abcdefghijklmnop"), "sk-proj-...mnop");
        assert_eq!(mask_key("short"), "••••••••");
    }
}
