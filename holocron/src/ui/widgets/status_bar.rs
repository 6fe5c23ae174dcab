//! Status bar widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::app::InputMode;
use crate::ui::theme::HolocronTheme;

/// Mode badge, status message and favorites counts.
pub struct StatusBarWidget<'a> {
    mode: InputMode,
    theme: &'a HolocronTheme,
    message: Option<&'a str>,
    favorites: (usize, usize),
    loading: bool,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(mode: InputMode, theme: &'a HolocronTheme) -> Self {
        Self {
            mode,
            theme,
            message: None,
            favorites: (0, 0),
            loading: false,
        }
    }

    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }

    /// Character and starship favorite counts.
    pub fn favorites(mut self, characters: usize, starships: usize) -> Self {
        self.favorites = (characters, starships);
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mode = match self.mode {
            InputMode::Normal => " NORMAL ",
            InputMode::Search => " SEARCH ",
            InputMode::Command => " COMMAND ",
        };

        let mut spans = vec![
            Span::styled(
                mode,
                Style::default()
                    .fg(Color::Black)
                    .bg(self.theme.mode_color(self.mode))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                format!("♥ {} characters, {} starships", self.favorites.0, self.favorites.1),
                self.theme.heart_style(),
            ),
        ];

        if self.loading {
            spans.push(Span::styled("  loading", self.theme.muted_style()));
        }

        match self.message {
            Some(message) if message.starts_with("Failed") => {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(message, self.theme.error_style()));
            }
            Some(message) => {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(message, self.theme.text_style()));
            }
            None => {
                spans.push(Span::styled("  ? for help", self.theme.muted_style()));
            }
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
