//! Listing widget: rows, hearts and the pagination strip

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use holocron_core::{ListDisplay, ListView};

use crate::ui::layout::list_areas;
use crate::ui::theme::HolocronTheme;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub struct ListWidget<'a> {
    view: &'a ListView,
    display: &'a ListDisplay,
    theme: &'a HolocronTheme,
    selected: usize,
    frame: u8,
}

impl<'a> ListWidget<'a> {
    pub fn new(view: &'a ListView, display: &'a ListDisplay, theme: &'a HolocronTheme) -> Self {
        Self {
            view,
            display,
            theme,
            selected: 0,
            frame: 0,
        }
    }

    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    /// Animation frame for the loading spinner.
    pub fn frame(mut self, frame: u8) -> Self {
        self.frame = frame;
        self
    }

    fn title(&self) -> String {
        let section = self.view.collection().title();
        if self.view.favorites_only() {
            format!(" {section} · favorites ")
        } else if self.view.is_searching() {
            format!(" {section} · search \"{}\" ", self.view.search().trim())
        } else {
            format!(" {section} · page {} ", self.view.page())
        }
    }

    fn pagination_line(&self) -> Line<'static> {
        let mut spans = Vec::new();
        if self.view.show_prev() {
            spans.push(Span::styled("‹ prev (p)  ", self.theme.label_style()));
        }
        for page in self.view.page_buttons() {
            spans.push(Span::styled(
                format!(" {page} "),
                self.theme.page_button_style(page == self.view.page()),
            ));
            spans.push(Span::raw(" "));
        }
        if self.view.show_next() {
            spans.push(Span::styled(" next (n) ›", self.theme.label_style()));
        }
        Line::from(spans)
    }
}

impl Widget for ListWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(self.title(), self.theme.heading_style()))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(true));
        let inner = block.inner(area);
        block.render(area, buf);

        let (rows_area, pagination_area) = list_areas(inner, self.view.show_pagination());

        match self.display {
            ListDisplay::Loading => {
                let spinner = SPINNER[self.frame as usize % SPINNER.len()];
                Paragraph::new(Span::styled(
                    format!("{spinner} Loading..."),
                    self.theme.muted_style(),
                ))
                .render(rows_area, buf);
            }
            ListDisplay::Empty(message) => {
                Paragraph::new(Span::styled(*message, self.theme.muted_style()))
                    .render(rows_area, buf);
            }
            ListDisplay::Entries(rows) => {
                let height = rows_area.height.max(1) as usize;
                let offset = self.selected.saturating_sub(height - 1);
                let lines: Vec<Line> = rows
                    .iter()
                    .enumerate()
                    .skip(offset)
                    .take(height)
                    .map(|(i, row)| {
                        let heart = if row.favourited {
                            Span::styled("♥ ", self.theme.heart_style())
                        } else {
                            Span::raw("  ")
                        };
                        Line::from(vec![
                            heart,
                            Span::styled(
                                row.entry.name.clone(),
                                self.theme.row_style(i == self.selected),
                            ),
                        ])
                    })
                    .collect();
                Paragraph::new(lines).render(rows_area, buf);
            }
        }

        if let Some(area) = pagination_area {
            Paragraph::new(self.pagination_line()).render(area, buf);
        }
    }
}
