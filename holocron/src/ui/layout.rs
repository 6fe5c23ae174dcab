//! Screen layout calculation

use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};

/// Regions of the main window, top to bottom.
#[derive(Debug, Clone, Copy)]
pub struct AppLayout {
    pub nav_area: Rect,
    pub body_area: Rect,
    pub input_area: Rect,
    pub status_bar: Rect,
}

impl AppLayout {
    pub fn calculate(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Navigation bar
                Constraint::Min(5),    // Body
                Constraint::Length(3), // Search / command input
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        Self {
            nav_area: chunks[0],
            body_area: chunks[1],
            input_area: chunks[2],
            status_bar: chunks[3],
        }
    }
}

/// Split a listing body into its rows and the pagination strip.
pub fn list_areas(area: Rect, with_pagination: bool) -> (Rect, Option<Rect>) {
    if !with_pagination {
        return (area, None);
    }
    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);
    (chunks[0], Some(chunks[1]))
}

/// A rectangle of at most `width` x `height`, centered in `area`.
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_fills_window() {
        let layout = AppLayout::calculate(Rect::new(0, 0, 80, 24));

        assert_eq!(layout.nav_area.height, 3);
        assert_eq!(layout.status_bar.y, 23);
        assert_eq!(layout.body_area.height, 24 - 3 - 3 - 1);
    }

    #[test]
    fn test_centered_rect_is_clamped() {
        let rect = centered_rect_fixed(60, 30, Rect::new(0, 0, 40, 20));

        assert_eq!(rect.width, 40);
        assert_eq!(rect.height, 20);

        let rect = centered_rect_fixed(20, 10, Rect::new(0, 0, 40, 20));
        assert_eq!((rect.x, rect.y), (10, 5));
    }
}
