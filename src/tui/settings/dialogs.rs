//! Dialogs drawn over the settings modal: the model form, the bulk
//! confirmation list, yes/no prompts, and the import path prompt.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::centered_rect;
use crate::panel::{Confirmation, FormField, ModelForm};
use crate::settings::LocalModelConfig;
use crate::tui::hit_test::{ClickTarget, HitTestRegistry};
use crate::tui::theme::Theme;

fn dialog_block<'a>(title: String, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme.header)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(theme.panel_background).fg(theme.text))
}

/// Clear and frame a dialog, returning its inner area
fn open_dialog(
    frame: &mut Frame,
    area: Rect,
    title: String,
    theme: &Theme,
    hits: &mut HitTestRegistry,
) -> Rect {
    frame.render_widget(Clear, area);
    let block = dialog_block(title, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    hits.register(area, ClickTarget::ModalContent);
    inner
}

/// `[ Yes ]  [ No ]` style button row, registered for clicks
fn render_buttons(
    frame: &mut Frame,
    area: Rect,
    yes: &str,
    no: &str,
    theme: &Theme,
    hits: &mut HitTestRegistry,
) {
    let yes_label = format!("[ {} ]", yes);
    let no_label = format!("[ {} ]", no);
    let yes_width = yes_label.chars().count() as u16;
    let no_width = no_label.chars().count() as u16;
    let total = yes_width + 2 + no_width;
    let start = area.x + area.width.saturating_sub(total) / 2;

    let yes_area = Rect::new(start, area.y, yes_width.min(area.width), 1);
    let no_area = Rect::new(
        start + yes_width + 2,
        area.y,
        no_width.min(area.right().saturating_sub(start + yes_width + 2)),
        1,
    );

    frame.render_widget(
        Paragraph::new(Span::styled(
            yes_label,
            Style::default()
                .fg(theme.success)
                .add_modifier(Modifier::BOLD),
        )),
        yes_area,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(no_label, Style::default().fg(theme.text_muted))),
        no_area,
    );
    hits.register(yes_area, ClickTarget::DialogYes);
    hits.register(no_area, ClickTarget::DialogNo);
}

// ─────────────────────────────────────────────────────────────────────────────
// Model form
// ─────────────────────────────────────────────────────────────────────────────

pub fn render_model_form(
    frame: &mut Frame,
    area: Rect,
    form: &ModelForm,
    editing: bool,
    theme: &Theme,
    hits: &mut HitTestRegistry,
) {
    let dialog = centered_rect(70, 70, area);
    let title = if editing {
        " Edit Local Model "
    } else {
        " Add Local Model "
    };
    let inner = open_dialog(frame, dialog, title.to_string(), theme, hits);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(FormField::all().len() as u16), // Fields
            Constraint::Length(1),                              // Spacer
            Constraint::Length(2),                              // Hint / error
            Constraint::Min(0),
            Constraint::Length(1), // Buttons
        ])
        .split(inner);

    let lines: Vec<Line> = FormField::all()
        .iter()
        .map(|field| form_line(form, *field, theme))
        .collect();
    frame.render_widget(Paragraph::new(lines), chunks[0]);

    let hint = if let Some(error) = &form.error {
        Line::from(Span::styled(
            format!("⚠ {}", error),
            Style::default().fg(theme.error),
        ))
    } else if editing {
        Line::from(Span::styled(
            "Tab/↑↓ move between fields • ←→ change type • Ctrl+S save",
            Style::default().fg(theme.text_muted),
        ))
    } else {
        Line::from(Span::styled(
            "Separate names with commas to add several models at once • Ctrl+S save",
            Style::default().fg(theme.text_muted),
        ))
    };
    frame.render_widget(Paragraph::new(hint).wrap(Wrap { trim: true }), chunks[2]);

    render_buttons(frame, chunks[4], "Save", "Cancel", theme, hits);
}

fn form_line(form: &ModelForm, field: FormField, theme: &Theme) -> Line<'static> {
    let focused = form.focus == field;
    let label_style = if focused {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.header)
    };
    let selector = if focused { "▶ " } else { "  " };
    let cursor = if focused && field.is_text() { "│" } else { "" };

    let value = match field {
        FormField::Name => form.name.clone(),
        FormField::ModelType => format!("◀ {} ▶", form.model_type.display_name()),
        FormField::Endpoint => form.endpoint.clone(),
        FormField::Description => form.description.clone(),
        FormField::Enabled => if form.enabled { "[x]" } else { "[ ]" }.to_string(),
        FormField::ApiKey => "•".repeat(form.api_key.chars().count().min(40)),
    };

    Line::from(vec![
        Span::styled(selector, label_style),
        Span::styled(format!("{:<13}", field.label()), label_style),
        Span::styled(value, Style::default().fg(theme.text)),
        Span::styled(cursor, Style::default().fg(theme.accent)),
    ])
}

// ─────────────────────────────────────────────────────────────────────────────
// Bulk confirmation
// ─────────────────────────────────────────────────────────────────────────────

pub fn render_bulk_confirm(
    frame: &mut Frame,
    area: Rect,
    staged: &[LocalModelConfig],
    theme: &Theme,
    hits: &mut HitTestRegistry,
) {
    let dialog = centered_rect(60, 60, area);
    let inner = open_dialog(
        frame,
        dialog,
        format!(" Add {} Models? ", staged.len()),
        theme,
        hits,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Explanation
            Constraint::Min(1),    // Staged names
            Constraint::Length(1), // Buttons
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(
            "The following models will be created with the same settings:",
            Style::default().fg(theme.text_muted),
        ))
        .wrap(Wrap { trim: true }),
        chunks[0],
    );

    let items: Vec<ListItem> = staged
        .iter()
        .map(|model| {
            ListItem::new(Line::from(vec![
                Span::styled("  • ", Style::default().fg(theme.accent)),
                Span::styled(model.name.clone(), Style::default().fg(theme.text)),
            ]))
        })
        .collect();
    frame.render_widget(List::new(items), chunks[1]);

    render_buttons(frame, chunks[2], "Add all (Enter)", "Cancel (Esc)", theme, hits);
}

// ─────────────────────────────────────────────────────────────────────────────
// Yes/no confirmation
// ─────────────────────────────────────────────────────────────────────────────

pub fn render_confirmation(
    frame: &mut Frame,
    area: Rect,
    pending: &Confirmation,
    theme: &Theme,
    hits: &mut HitTestRegistry,
) {
    let dialog = centered_rect(50, 30, area);
    let inner = open_dialog(
        frame,
        dialog,
        format!(" {} ", pending.title()),
        theme,
        hits,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    frame.render_widget(
        Paragraph::new(pending.prompt())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        chunks[0],
    );
    render_buttons(frame, chunks[1], "Yes (y)", "No (n)", theme, hits);
}

// ─────────────────────────────────────────────────────────────────────────────
// Import prompt
// ─────────────────────────────────────────────────────────────────────────────

pub fn render_import_prompt(frame: &mut Frame, area: Rect, buffer: &str, theme: &Theme) {
    let dialog = centered_rect(70, 25, area);
    frame.render_widget(Clear, dialog);
    let block = dialog_block(" Import Settings ".to_string(), theme);
    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);

    let lines = vec![
        Line::from(Span::styled(
            "Path to a chat-settings .json file:",
            Style::default().fg(theme.text_muted),
        )),
        Line::from(vec![
            Span::styled(buffer.to_string(), Style::default().fg(theme.accent)),
            Span::styled("│", Style::default().fg(theme.accent)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Enter import • Ctrl+V paste • Esc cancel",
            Style::default().fg(theme.text_muted),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
