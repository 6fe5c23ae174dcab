//! Render orchestration for the browser TUI

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use holocron_core::ListDisplay;

use crate::app::{App, InputMode, Screen};
use crate::ui::layout::{centered_rect_fixed, AppLayout};
use crate::ui::widgets::{DetailWidget, InputWidget, ListWidget, NavBarWidget, StatusBarWidget};

/// Overlay types
#[derive(Debug, Clone)]
pub enum Overlay {
    Help,
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let layout = AppLayout::calculate(area);

    let nav = NavBarWidget::new(app.screen().section(), &app.theme).can_go_back(app.can_go_back());
    frame.render_widget(nav, layout.nav_area);

    render_body(frame, app, layout.body_area);
    render_input(frame, app, layout.input_area);
    render_status_bar(frame, app, layout.status_bar);

    if let Some(overlay) = app.overlay() {
        render_overlay(frame, app, overlay, area);
    }
}

fn render_body(frame: &mut Frame, app: &App, area: Rect) {
    match app.screen() {
        Screen::List(view) => {
            let display = app.list_display().unwrap_or(ListDisplay::Loading);
            let widget = ListWidget::new(view, &display, &app.theme)
                .selected(app.selected())
                .frame(app.animation_frame);
            frame.render_widget(widget, area);
        }
        Screen::Detail(view) => {
            let image_url = app.browser.image_url(view.target());
            let widget = DetailWidget::new(view, &image_url, &app.theme)
                .selected(app.selected())
                .favourited(app.primary_favourited());
            frame.render_widget(widget, area);
        }
    }
}

/// Render the input area
fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let placeholder = match app.list_view() {
        Some(view) if view.show_search() => "Press / to search",
        Some(_) => "Search is hidden while showing favorites",
        None => "Enter opens a link, Esc goes back",
    };

    let input_widget = InputWidget::new(app.input_buffer(), &app.theme)
        .cursor_position(app.cursor_position())
        .mode(app.input_mode)
        .placeholder(placeholder);

    frame.render_widget(input_widget, area);
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let favorites = app.browser.favorites();
    let status_widget = StatusBarWidget::new(app.input_mode, &app.theme)
        .message(app.status_message())
        .favorites(favorites.characters.len(), favorites.starships.len())
        .loading(app.is_loading());

    frame.render_widget(status_widget, area);
}

fn render_overlay(frame: &mut Frame, app: &App, overlay: &Overlay, area: Rect) {
    match overlay {
        Overlay::Help => render_help_overlay(frame, app, area),
    }
}

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        title,
        Style::default().add_modifier(Modifier::UNDERLINED),
    ))
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_fixed(56, 28, area);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(Span::styled(
            " Holocron - Help ",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section("Navigation:"),
        Line::from("  1-4 / Tab      Characters, Films, Starships, Vehicles"),
        Line::from("  j/k or ↑/↓     Move the cursor"),
        Line::from("  g/G            First/last entry"),
        Line::from("  Enter / l      Open the selected entry"),
        Line::from("  Esc / h / ⌫    Back to the previous screen"),
        Line::from(""),
        section("Listings:"),
        Line::from("  /              Search (sent after 500ms of quiet)"),
        Line::from("  n/p            Next/previous page"),
        Line::from("  f              Favorites only on/off"),
        Line::from("  Space          Favorite/unfavorite"),
        Line::from(""),
        section("Commands:"),
        Line::from("  :page N        Jump to page N"),
        Line::from("  :search TEXT   Search now"),
        Line::from("  :films etc.    Open a section"),
        Line::from("  :w             Save favorites"),
        Line::from("  :q / :wq       Quit / save and quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc or q to close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use holocron_core::testing::{self, BASE};
    use holocron_core::{Browser, BrowserConfig, MockTransport};
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::loader::Loader;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test]
    async fn test_renders_listing_with_pagination() {
        let transport = MockTransport::new().respond(
            format!("{BASE}/people/?page=1"),
            testing::page(
                vec![testing::person(1, "Luke Skywalker")],
                Some("https://swapi.dev/api/people/?page=2"),
            ),
        );
        let browser = Browser::with_transport(Arc::new(transport), BrowserConfig::new())
            .await
            .unwrap();
        let (loader, mut rx) = Loader::channel(browser.client().clone());
        let mut app = App::new(browser, loader);
        app.apply_loaded(rx.recv().await.unwrap());

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("Characters · page 1"));
        assert!(text.contains("Luke Skywalker"));
        assert!(text.contains("next (n)"));
        assert!(!text.contains("prev (p)"));
    }
}
