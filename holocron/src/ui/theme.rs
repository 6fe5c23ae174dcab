//! Color theme and styling for the browser

use ratatui::style::{Color, Modifier, Style};

/// Browser UI color theme
#[derive(Debug, Clone)]
pub struct HolocronTheme {
    // Base colors
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,

    // Navigation
    pub nav_active: Color,
    pub nav_inactive: Color,

    // Content
    pub heading: Color,
    pub label: Color,
    pub link: Color,
    pub heart: Color,
    pub muted: Color,
    pub error: Color,

    // Modes
    pub normal_mode: Color,
    pub search_mode: Color,
    pub command_mode: Color,
}

impl Default for HolocronTheme {
    fn default() -> Self {
        Self {
            foreground: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Yellow,

            nav_active: Color::Yellow,
            nav_inactive: Color::Gray,

            heading: Color::Yellow,
            label: Color::Cyan,
            link: Color::LightBlue,
            heart: Color::LightRed,
            muted: Color::DarkGray,
            error: Color::Red,

            normal_mode: Color::Blue,
            search_mode: Color::Green,
            command_mode: Color::Magenta,
        }
    }
}

impl HolocronTheme {
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.foreground)
    }

    /// Get border style
    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }

    pub fn heading_style(&self) -> Style {
        Style::default()
            .fg(self.heading)
            .add_modifier(Modifier::BOLD)
    }

    pub fn label_style(&self) -> Style {
        Style::default().fg(self.label)
    }

    /// Style for an entry that opens another screen
    pub fn link_style(&self, selected: bool) -> Style {
        let style = Style::default().fg(self.link);
        if selected {
            style.add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            style
        }
    }

    pub fn row_style(&self, selected: bool) -> Style {
        if selected {
            Style::default()
                .fg(self.foreground)
                .add_modifier(Modifier::REVERSED)
        } else {
            self.text_style()
        }
    }

    pub fn heart_style(&self) -> Style {
        Style::default().fg(self.heart)
    }

    /// Placeholder, empty-state and loading text
    pub fn muted_style(&self) -> Style {
        Style::default()
            .fg(self.muted)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn nav_style(&self, active: bool) -> Style {
        if active {
            Style::default()
                .fg(self.nav_active)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(self.nav_inactive)
        }
    }

    /// Current page button vs the others
    pub fn page_button_style(&self, current: bool) -> Style {
        if current {
            Style::default()
                .fg(self.heading)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(self.foreground)
        }
    }

    pub fn mode_color(&self, mode: crate::app::InputMode) -> Color {
        match mode {
            crate::app::InputMode::Normal => self.normal_mode,
            crate::app::InputMode::Search => self.search_mode,
            crate::app::InputMode::Command => self.command_mode,
        }
    }
}
