//! Local Models settings tab
//!
//! Lists configured local model endpoints in display order. Adding, editing,
//! and deleting go through dialogs drawn on top of this list.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::SettingsState;
use crate::panel::SettingsPanel;
use crate::settings::{LocalModelConfig, SettingsService};
use crate::tui::hit_test::{ClickTarget, HitTestRegistry};
use crate::tui::theme::Theme;

pub fn render_local_models_tab<S: SettingsService>(
    frame: &mut Frame,
    area: Rect,
    panel: &SettingsPanel<S>,
    state: &SettingsState,
    theme: &Theme,
    hits: &mut HitTestRegistry,
) {
    let models = &panel.settings().local_models;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Summary + add button
            Constraint::Min(3),    // Model list
        ])
        .split(area);

    let enabled = models.iter().filter(|m| m.enabled).count();
    let add_label = "[ + Add model ]";
    let summary = Line::from(vec![
        Span::styled(
            format!("  {} models configured", models.len()),
            Style::default().fg(theme.text),
        ),
        Span::styled(" • ", Style::default().fg(theme.text_muted)),
        Span::styled(
            format!("{} enabled", enabled),
            Style::default().fg(if enabled > 0 {
                theme.success
            } else {
                theme.text_muted
            }),
        ),
    ]);
    frame.render_widget(Paragraph::new(summary), chunks[0]);

    let add_width = add_label.chars().count() as u16;
    let add_area = Rect::new(
        chunks[0].right().saturating_sub(add_width),
        chunks[0].y,
        add_width.min(chunks[0].width),
        1,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(add_label, Style::default().fg(theme.accent))),
        add_area,
    );
    hits.register(add_area, ClickTarget::AddModel);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(" Local Models ", Style::default().fg(theme.header)));
    let inner = block.inner(chunks[1]);
    frame.render_widget(block, chunks[1]);

    if models.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "  No local models configured. Press 'a' to add one.",
            Style::default().fg(theme.text_muted),
        )));
        frame.render_widget(msg, inner);
        return;
    }

    let selected = state.model_index.min(models.len() - 1);
    let items: Vec<ListItem> = models
        .iter()
        .enumerate()
        .map(|(idx, model)| model_item(model, idx == selected, theme))
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(selected));
    frame.render_stateful_widget(List::new(items), inner, &mut list_state);

    // Rows scroll with the list; register only the visible ones
    let offset = list_state.offset();
    for (row, idx) in (offset..models.len()).take(inner.height as usize).enumerate() {
        hits.register(
            Rect::new(inner.x, inner.y + row as u16, inner.width, 1),
            ClickTarget::ModelRow(idx),
        );
    }
}

fn model_item(model: &LocalModelConfig, is_selected: bool, theme: &Theme) -> ListItem<'static> {
    let selector = if is_selected { "▶ " } else { "  " };
    let name_style = if is_selected {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else if !model.enabled {
        Style::default().fg(theme.text_muted)
    } else {
        Style::default().fg(theme.text)
    };

    let status = if model.enabled {
        Span::styled(" ✓", Style::default().fg(theme.success))
    } else {
        Span::styled(" [DISABLED]", Style::default().fg(theme.error))
    };

    ListItem::new(Line::from(vec![
        Span::styled(selector, Style::default().fg(theme.accent)),
        Span::styled(format!("{:<24}", model.name), name_style),
        Span::styled(
            format!("{:<18}", model.model_type.display_name()),
            Style::default().fg(theme.text_muted),
        ),
        Span::styled(model.endpoint.clone(), Style::default().fg(theme.text_muted)),
        status,
    ]))
}
