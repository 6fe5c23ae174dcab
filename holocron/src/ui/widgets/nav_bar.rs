//! Navigation bar widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use swapi::Collection;

use crate::app::SECTIONS;
use crate::ui::theme::HolocronTheme;

/// The fixed row of sections across the top of the window.
pub struct NavBarWidget<'a> {
    active: Collection,
    theme: &'a HolocronTheme,
    can_go_back: bool,
}

impl<'a> NavBarWidget<'a> {
    pub fn new(active: Collection, theme: &'a HolocronTheme) -> Self {
        Self {
            active,
            theme,
            can_go_back: false,
        }
    }

    pub fn can_go_back(mut self, can_go_back: bool) -> Self {
        self.can_go_back = can_go_back;
        self
    }
}

impl Widget for NavBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(" Holocron ", self.theme.heading_style()))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans = Vec::new();
        if self.can_go_back {
            spans.push(Span::styled("← Esc  ", self.theme.muted_style()));
        }
        for (i, section) in SECTIONS.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(format!("{} ", i + 1), self.theme.muted_style()));
            spans.push(Span::styled(
                section.title(),
                self.theme.nav_style(*section == self.active),
            ));
        }

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}
