//! TUI color palettes for each theme mode

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Block,
    Frame,
};

use crate::settings::ThemeMode;

/// TUI color theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub panel_background: Color,
    pub text: Color,
    pub text_muted: Color,
    pub header: Color,
    pub border: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    /// Background behind the modal
    pub dim: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Palette for a theme preference. `System` uses the dark palette since
    /// the terminal background cannot be queried reliably.
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark | ThemeMode::System => Self::dark(),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(30, 30, 30),
            panel_background: Color::Rgb(37, 37, 38),
            text: Color::Rgb(212, 212, 212),
            text_muted: Color::Rgb(128, 128, 128),
            header: Color::Rgb(230, 230, 230),
            border: Color::Rgb(60, 60, 60),
            accent: Color::Rgb(0, 122, 204),
            success: Color::Rgb(72, 185, 100),
            warning: Color::Rgb(255, 193, 7),
            error: Color::Rgb(244, 67, 54),
            dim: Color::Rgb(18, 18, 18),
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::Rgb(250, 250, 250),
            panel_background: Color::Rgb(255, 255, 255),
            text: Color::Rgb(36, 41, 47),
            text_muted: Color::Rgb(110, 119, 129),
            header: Color::Rgb(20, 20, 20),
            border: Color::Rgb(208, 215, 222),
            accent: Color::Rgb(9, 105, 218),
            success: Color::Rgb(26, 127, 55),
            warning: Color::Rgb(154, 103, 0),
            error: Color::Rgb(207, 34, 46),
            dim: Color::Rgb(200, 200, 200),
        }
    }
}

/// Paint the whole area with the dim color so an overlay stands out
pub fn dim_background(frame: &mut Frame, area: Rect, theme: &Theme) {
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.dim).fg(theme.text_muted)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_uses_dark_palette() {
        assert_eq!(Theme::for_mode(ThemeMode::System), Theme::dark());
        assert_eq!(Theme::for_mode(ThemeMode::Light), Theme::light());
        assert_ne!(Theme::light(), Theme::dark());
    }
}
