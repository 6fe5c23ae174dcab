//! Detail widget: the primary record, its artwork link and related groups

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use holocron_core::detail::has_detail_screen;
use holocron_core::DetailView;

use crate::ui::theme::HolocronTheme;

pub struct DetailWidget<'a> {
    view: &'a DetailView,
    image_url: &'a str,
    theme: &'a HolocronTheme,
    selected: usize,
    favourited: Option<bool>,
}

impl<'a> DetailWidget<'a> {
    pub fn new(view: &'a DetailView, image_url: &'a str, theme: &'a HolocronTheme) -> Self {
        Self {
            view,
            image_url,
            theme,
            selected: 0,
            favourited: None,
        }
    }

    /// Index of the highlighted link among the navigable related entries.
    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    pub fn favourited(mut self, favourited: Option<bool>) -> Self {
        self.favourited = favourited;
        self
    }

    /// Body lines, plus the line index of the highlighted link.
    fn lines(&self) -> (Vec<Line<'static>>, usize) {
        let theme = self.theme;
        let mut lines = vec![Line::from(vec![
            Span::styled("Image: ", theme.label_style()),
            Span::styled(self.image_url.to_string(), theme.muted_style()),
        ])];

        let Some(primary) = self.view.primary() else {
            let message = if self.view.is_loading() {
                "Loading..."
            } else {
                "Could not load this record"
            };
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(message, theme.muted_style())));
            return (lines, 0);
        };

        lines.push(Line::from(""));
        for fact in primary.facts() {
            lines.push(Line::from(vec![
                Span::styled(format!("{}: ", fact.label), theme.label_style()),
                Span::styled(fact.value, theme.text_style()),
            ]));
        }

        if self.view.is_related_loading() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Loading related records...",
                theme.muted_style(),
            )));
            return (lines, 0);
        }

        let mut link = 0;
        let mut selected_line = 0;
        for group in self.view.groups() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(group.title, theme.heading_style())));
            if group.entries.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {}", group.empty_message),
                    theme.muted_style(),
                )));
                continue;
            }
            for entry in group.entries {
                let navigable = entry
                    .reference
                    .as_ref()
                    .is_some_and(|r| has_detail_screen(r.collection));
                if navigable {
                    let is_selected = link == self.selected;
                    if is_selected {
                        selected_line = lines.len();
                    }
                    lines.push(Line::from(vec![
                        Span::raw("  "),
                        Span::styled(entry.name, theme.link_style(is_selected)),
                    ]));
                    link += 1;
                } else {
                    lines.push(Line::from(vec![
                        Span::raw("  "),
                        Span::styled(entry.name, theme.text_style()),
                    ]));
                }
            }
        }

        (lines, selected_line)
    }
}

impl Widget for DetailWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut title = vec![Span::styled(
            format!(
                " {} ",
                self.view.primary().map(|p| p.title()).unwrap_or("...")
            ),
            self.theme.heading_style(),
        )];
        match self.favourited {
            Some(true) => title.push(Span::styled("♥ ", self.theme.heart_style())),
            Some(false) => title.push(Span::styled("♡ ", self.theme.muted_style())),
            None => {}
        }

        let block = Block::default()
            .title(Line::from(title))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(true));

        let (lines, selected_line) = self.lines();
        let visible = block.inner(area).height.max(1) as usize;
        let scroll = selected_line.saturating_sub(visible.saturating_sub(2));

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((scroll.min(u16::MAX as usize) as u16, 0))
            .render(area, buf);
    }
}
