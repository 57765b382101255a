//! Main UI rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::app::StorePanel;
use super::hit_test::HitTestRegistry;
use super::settings::{render_settings, SettingsState};
use super::theme::Theme;
use crate::panel::format_seconds;
use crate::settings::Settings;

/// Render the host screen and, when open, the settings modal on top
pub fn render(
    frame: &mut Frame,
    snapshot: &Settings,
    panel: Option<&StorePanel>,
    state: &SettingsState,
    theme: &Theme,
    status: Option<&str>,
    hits: &mut HitTestRegistry,
) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background).fg(theme.text)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Toolbar
            Constraint::Min(0),    // Summary
            Constraint::Length(1), // Status
        ])
        .split(area);

    render_toolbar(frame, chunks[0], theme);
    // The open panel holds the freshest snapshot
    let current = panel.map(|p| p.settings()).unwrap_or(snapshot);
    render_summary(frame, chunks[1], current, theme);
    render_status(frame, chunks[2], status, theme);

    if let Some(panel) = panel {
        render_settings(frame, area, panel, state, theme, hits);
    }
}

fn render_toolbar(frame: &mut Frame, area: Rect, theme: &Theme) {
    let toolbar = Paragraph::new(Line::from(vec![
        Span::styled(
            "💬 Chat",
            Style::default()
                .fg(theme.header)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", Style::default().fg(theme.text_muted)),
        Span::styled("F2", Style::default().fg(theme.accent)),
        Span::styled(" settings  ", Style::default().fg(theme.text_muted)),
        Span::styled("Ctrl+Q", Style::default().fg(theme.accent)),
        Span::styled(" quit", Style::default().fg(theme.text_muted)),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme.border)),
    );
    frame.render_widget(toolbar, area);
}

fn render_summary(frame: &mut Frame, area: Rect, settings: &Settings, theme: &Theme) {
    let label = Style::default().fg(theme.text_muted);
    let value = Style::default().fg(theme.text);
    let enabled = settings.local_models.iter().filter(|m| m.enabled).count();

    let row = |name: &'static str, text: String| {
        Line::from(vec![
            Span::styled(format!("  {:<14}", name), label),
            Span::styled(text, value),
        ])
    };

    let lines = vec![
        Line::from(""),
        row("Max tokens", settings.max_tokens.to_string()),
        row("Temperature", settings.temperature.to_string()),
        row(
            "Timeout",
            format!("{}s", format_seconds(settings.timeout_ms)),
        ),
        row(
            "Auto save",
            if settings.auto_save { "on" } else { "off" }.to_string(),
        ),
        row("Theme", settings.theme.display_name().to_string()),
        row(
            "API key",
            if settings.api_key.is_empty() {
                "not set".to_string()
            } else {
                "set".to_string()
            },
        ),
        row(
            "Local models",
            format!("{} ({} enabled)", settings.local_models.len(), enabled),
        ),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_status(frame: &mut Frame, area: Rect, status: Option<&str>, theme: &Theme) {
    let Some(status) = status else {
        return;
    };
    frame.render_widget(
        Paragraph::new(Span::styled(status.to_string(), Style::default().fg(theme.error)))
            .alignment(Alignment::Center),
        area,
    );
}
