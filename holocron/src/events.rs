//! Event handling for the browser TUI

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::{App, InputMode, SECTIONS};

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
}

/// Handle a terminal event
pub fn handle_event(app: &mut App, event: Event) -> EventResult {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> EventResult {
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            app.select_prev();
            EventResult::NeedsRedraw
        }
        MouseEventKind::ScrollDown => {
            app.select_next();
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    if app.has_overlay() {
        return handle_overlay_key(app, key);
    }

    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Search => handle_search_mode(app, key),
        InputMode::Command => handle_command_mode(app, key),
    }
}

/// Handle keys in NORMAL mode (vim-style navigation and hotkeys)
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> EventResult {
    app.clear_status();
    match key.code {
        KeyCode::Char('/') => app.enter_search_mode(),
        KeyCode::Char(':') => app.enter_command_mode(),
        KeyCode::Char('?') | KeyCode::F(1) => app.toggle_help(),
        KeyCode::Char('q') => return EventResult::Quit,

        // Sections
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            app.open_section(SECTIONS[index]);
        }
        KeyCode::Tab | KeyCode::BackTab => {
            let current = app.screen().section();
            let index = SECTIONS.iter().position(|s| *s == current).unwrap_or(0);
            let next = if key.code == KeyCode::Tab {
                (index + 1) % SECTIONS.len()
            } else {
                (index + SECTIONS.len() - 1) % SECTIONS.len()
            };
            app.open_section(SECTIONS[next]);
        }

        // Cursor
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => app.open_selected(),
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h') | KeyCode::Left => {
            if !app.go_back() {
                app.set_status("Nothing to go back to");
            }
        }

        // Listing controls
        KeyCode::Char('n') | KeyCode::PageDown => app.next_page(),
        KeyCode::Char('p') | KeyCode::PageUp => app.prev_page(),
        KeyCode::Char('f') => app.toggle_favorites_only(),
        KeyCode::Char(' ') => app.toggle_favourite(),

        _ => return EventResult::Continue,
    }
    if app.should_quit {
        EventResult::Quit
    } else {
        EventResult::NeedsRedraw
    }
}

/// Handle keys in SEARCH mode (typing into the search box)
fn handle_search_mode(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        // Leave the box; a pending search still fires
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.clear_input();
        }
        KeyCode::Enter => app.submit_search(),

        KeyCode::Left => app.cursor_left(),
        KeyCode::Right => app.cursor_right(),
        KeyCode::Home => app.cursor_home(),
        KeyCode::End => app.cursor_end(),
        KeyCode::Backspace => {
            app.backspace();
            app.queue_search();
        }
        KeyCode::Delete => {
            app.delete();
            app.queue_search();
        }
        KeyCode::Char(c) => {
            app.type_char(c);
            app.queue_search();
        }

        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

/// Handle keys in COMMAND mode (: commands)
fn handle_command_mode(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.clear_input();
            EventResult::NeedsRedraw
        }

        KeyCode::Enter => {
            let command = app.input_buffer().to_string();
            app.clear_input();
            app.input_mode = InputMode::Normal;

            if command.len() > 1 {
                app.process_command(&command);
            }

            if app.should_quit {
                EventResult::Quit
            } else {
                EventResult::NeedsRedraw
            }
        }

        KeyCode::Left => {
            if app.cursor_position() > 1 {
                app.cursor_left();
            }
            EventResult::NeedsRedraw
        }
        KeyCode::Right => {
            app.cursor_right();
            EventResult::NeedsRedraw
        }
        KeyCode::Backspace => {
            if app.cursor_position() > 1 {
                app.backspace();
            } else {
                // Backspace on just ":" exits command mode
                app.input_mode = InputMode::Normal;
                app.clear_input();
            }
            EventResult::NeedsRedraw
        }

        KeyCode::Char(c) => {
            app.type_char(c);
            EventResult::NeedsRedraw
        }

        _ => EventResult::Continue,
    }
}

fn handle_overlay_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Enter => {
            app.close_overlay();
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}
