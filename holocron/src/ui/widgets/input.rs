//! Input field widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::app::InputMode;
use crate::ui::theme::HolocronTheme;

/// Search box and command line
pub struct InputWidget<'a> {
    content: &'a str,
    cursor_position: usize,
    theme: &'a HolocronTheme,
    placeholder: &'a str,
    mode: InputMode,
}

impl<'a> InputWidget<'a> {
    pub fn new(content: &'a str, theme: &'a HolocronTheme) -> Self {
        Self {
            content,
            cursor_position: content.chars().count(),
            theme,
            placeholder: "Press / to search",
            mode: InputMode::Normal,
        }
    }

    pub fn cursor_position(mut self, pos: usize) -> Self {
        self.cursor_position = pos;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn mode(mut self, mode: InputMode) -> Self {
        self.mode = mode;
        self
    }
}

impl Widget for InputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let is_active = self.mode != InputMode::Normal;
        let is_command = self.mode == InputMode::Command;
        let prompt_style = Style::default().fg(self.theme.mode_color(self.mode));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(is_active));

        let inner = block.inner(area);
        block.render(area, buf);

        let line = if !is_active {
            Line::from(vec![
                Span::styled("/ ", prompt_style),
                Span::styled(self.placeholder, self.theme.muted_style()),
            ])
        } else {
            let prefix = if is_command { ":" } else { "/ " };
            let display_content = if is_command && self.content.starts_with(':') {
                &self.content[1..]
            } else {
                self.content
            };

            let adjusted_cursor = if is_command && self.cursor_position > 0 {
                self.cursor_position.saturating_sub(1)
            } else {
                self.cursor_position
            };

            // Use character-based slicing for unicode safety
            let before_cursor: String = display_content.chars().take(adjusted_cursor).collect();
            let at_cursor = display_content
                .chars()
                .nth(adjusted_cursor)
                .map(|c| c.to_string())
                .unwrap_or_else(|| " ".to_string());
            let after_cursor: String = display_content.chars().skip(adjusted_cursor + 1).collect();

            Line::from(vec![
                Span::styled(prefix, prompt_style),
                Span::raw(before_cursor),
                Span::styled(
                    at_cursor,
                    Style::default().add_modifier(Modifier::UNDERLINED | Modifier::BOLD),
                ),
                Span::raw(after_cursor),
            ])
        };

        Paragraph::new(line).render(inner, buf);
    }
}
