//! Main application state and logic

use holocron_core::detail::has_detail_screen;
use holocron_core::list_view::DisplayEntry;
use holocron_core::{
    Browser, Debouncer, DetailView, EntityRef, FavouriteRecord, ListDisplay, ListEntry, ListQuery,
    ListView, LoadGuard,
};
use swapi::Collection;
use tokio::time::Instant;

use crate::loader::{LoadResult, Loaded, Loader};
use crate::ui::theme::HolocronTheme;
use crate::ui::Overlay;

/// Sections on the navigation bar, in order.
pub const SECTIONS: [Collection; 4] = [
    Collection::People,
    Collection::Films,
    Collection::Starships,
    Collection::Vehicles,
];

/// Vim-style input modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Normal mode - navigation and hotkeys (default)
    #[default]
    Normal,
    /// Search mode - typing into the listing's search box
    Search,
    /// Command mode - entering : commands
    Command,
}

/// What the body of the window shows.
#[derive(Debug, Clone)]
pub enum Screen {
    List(ListView),
    Detail(DetailView),
}

impl Screen {
    /// The navigation bar section this screen belongs to.
    pub fn section(&self) -> Collection {
        match self {
            Screen::List(view) => view.collection(),
            Screen::Detail(view) => view.target().collection,
        }
    }
}

/// A screen on the back stack, with its cursor.
#[derive(Debug, Clone)]
struct Visit {
    screen: Screen,
    selected: usize,
}

/// Main application state
pub struct App {
    pub browser: Browser,
    loader: Loader,
    guard: LoadGuard,
    debouncer: Debouncer<String>,

    // UI state
    pub theme: HolocronTheme,
    screen: Screen,
    selected: usize,
    history: Vec<Visit>,
    overlay: Option<Overlay>,

    // Input state
    pub input_mode: InputMode,
    input_buffer: String,
    cursor_position: usize,

    // Status
    status_message: Option<String>,
    pub should_quit: bool,
    pub pending_save: bool,
    /// Announce the next save in the status bar (explicit `:w`)
    pub report_save: bool,
    pub quit_after_save: bool,

    // Animation
    pub animation_frame: u8,
}

impl App {
    /// Create the application on the characters list and start loading it.
    pub fn new(browser: Browser, loader: Loader) -> Self {
        let debouncer = Debouncer::new(browser.config().debounce);
        let mut app = Self {
            browser,
            loader,
            guard: LoadGuard::new(),
            debouncer,
            theme: HolocronTheme::default(),
            screen: Screen::List(ListView::new(Collection::People)),
            selected: 0,
            history: Vec::new(),
            overlay: None,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            cursor_position: 0,
            status_message: None,
            should_quit: false,
            pending_save: false,
            report_save: false,
            quit_after_save: false,
            animation_frame: 0,
        };
        app.start_current();
        app
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Switch to a section's listing.
    pub fn open_section(&mut self, collection: Collection) {
        if matches!(&self.screen, Screen::List(view) if view.collection() == collection) {
            return;
        }
        self.navigate(Screen::List(ListView::new(collection)));
    }

    /// Open a detail screen.
    pub fn open(&mut self, target: EntityRef) {
        if !has_detail_screen(target.collection) {
            self.set_status(format!("{} have no detail page", target.collection.title()));
            return;
        }
        self.navigate(Screen::Detail(DetailView::new(target)));
    }

    fn navigate(&mut self, screen: Screen) {
        let previous = std::mem::replace(&mut self.screen, screen);
        self.history.push(Visit {
            screen: previous,
            selected: self.selected,
        });
        self.selected = 0;
        self.leave_search_mode();
        self.guard.begin();
        self.start_current();
    }

    /// Return to the previous screen. Returns false at the start of history.
    pub fn go_back(&mut self) -> bool {
        let Some(visit) = self.history.pop() else {
            return false;
        };
        self.screen = visit.screen;
        self.selected = visit.selected;
        self.leave_search_mode();
        // Drop whatever is still in flight for the screen being left.
        self.guard.begin();
        self.resume_current();
        self.clamp_selection();
        true
    }

    /// Open whatever the cursor is on.
    pub fn open_selected(&mut self) {
        let Some(entry) = self.rows().into_iter().nth(self.selected) else {
            return;
        };
        match entry.reference {
            Some(target) => self.open(target),
            None => self.set_status(format!("{} has no detail page", entry.name)),
        }
    }

    fn start_current(&mut self) {
        match &mut self.screen {
            Screen::List(view) => {
                let query = view.start();
                let collection = view.collection();
                self.fetch_list(collection, query);
            }
            Screen::Detail(view) => {
                let target = view.target().clone();
                self.fetch_detail(target);
            }
        }
    }

    /// Re-issue a load that was interrupted when the screen was left.
    fn resume_current(&mut self) {
        match &self.screen {
            Screen::List(view) if view.is_loading() => {
                let query = view.query();
                let collection = view.collection();
                self.fetch_list(collection, query);
            }
            Screen::Detail(view) if view.is_loading() || view.is_related_loading() => {
                let target = view.target().clone();
                self.fetch_detail(target);
            }
            _ => {}
        }
    }

    fn fetch_list(&mut self, collection: Collection, query: Option<ListQuery>) {
        if let Some(query) = query {
            let ticket = self.guard.begin();
            self.loader.list(ticket, collection, query);
        }
    }

    fn fetch_detail(&mut self, target: EntityRef) {
        let ticket = self.guard.begin();
        self.loader.detail(ticket, target);
    }

    /// Apply a finished fetch if it still belongs to the current screen.
    pub fn apply_loaded(&mut self, loaded: Loaded) {
        let Some(result) = self.guard.accept(loaded.ticket, loaded.result) else {
            return;
        };

        match result {
            LoadResult::List { collection, result } => {
                let Screen::List(view) = &mut self.screen else {
                    return;
                };
                if view.collection() != collection {
                    return;
                }
                match result {
                    Ok(page) => view.apply(page),
                    Err(e) => {
                        view.fail();
                        tracing::warn!(error = %e, collection = collection.path(), "list load failed");
                        self.set_status(format!("Failed to load {}", collection.title()));
                    }
                }
            }
            LoadResult::Primary(result) => {
                let Screen::Detail(view) = &mut self.screen else {
                    return;
                };
                match result {
                    Ok(primary) => view.apply_primary(primary),
                    Err(e) => {
                        view.fail_primary();
                        tracing::warn!(error = %e, "detail load failed");
                        self.set_status(format!("Failed to load: {e}"));
                    }
                }
            }
            LoadResult::Related(related) => {
                let Screen::Detail(view) = &mut self.screen else {
                    return;
                };
                let failed = related.failed;
                view.apply_related(related);
                if failed > 0 {
                    self.set_status(format!("{failed} related entries could not be loaded"));
                }
            }
        }
        self.clamp_selection();
    }

    // =========================================================================
    // Rows and selection
    // =========================================================================

    pub fn list_view(&self) -> Option<&ListView> {
        match &self.screen {
            Screen::List(view) => Some(view),
            Screen::Detail(_) => None,
        }
    }

    pub fn detail_view(&self) -> Option<&DetailView> {
        match &self.screen {
            Screen::Detail(view) => Some(view),
            Screen::List(_) => None,
        }
    }

    /// What the listing body shows, with heart state from the right store.
    pub fn list_display(&self) -> Option<ListDisplay> {
        let view = self.list_view()?;
        let store = view
            .favorite_kind()
            .map(|kind| self.browser.favorites().store(kind));
        Some(view.display(store))
    }

    /// Selectable rows: listing entries, or the navigable related entries.
    pub fn rows(&self) -> Vec<ListEntry> {
        match &self.screen {
            Screen::List(_) => match self.list_display() {
                Some(ListDisplay::Entries(rows)) => {
                    rows.into_iter().map(|DisplayEntry { entry, .. }| entry).collect()
                }
                _ => Vec::new(),
            },
            Screen::Detail(view) => view
                .groups()
                .into_iter()
                .flat_map(|group| group.entries)
                .filter(|entry| {
                    entry
                        .reference
                        .as_ref()
                        .is_some_and(|r| has_detail_screen(r.collection))
                })
                .collect(),
        }
    }

    pub fn select_next(&mut self) {
        let count = self.rows().len();
        if count > 0 {
            self.selected = (self.selected + 1).min(count - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.rows().len().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.rows().len().saturating_sub(1));
    }

    // =========================================================================
    // Favorites
    // =========================================================================

    /// Whether the detail screen's record is a favorite, if it can be one.
    pub fn primary_favourited(&self) -> Option<bool> {
        let (kind, record) = self.detail_view()?.primary()?.favourite()?;
        Some(self.browser.favorites().store(kind).contains(&record))
    }

    /// Flip the heart on the selected row, or on the detail screen's record.
    pub fn toggle_favourite(&mut self) {
        let target = match &self.screen {
            Screen::List(view) => {
                let row = self.rows().into_iter().nth(self.selected);
                view.favorite_kind().zip(row).and_then(|(kind, entry)| {
                    let id = entry.id()?.to_string();
                    Some((kind, FavouriteRecord::new(id, entry.name)))
                })
            }
            Screen::Detail(view) => view.primary().and_then(|p| p.favourite()),
        };
        let Some((kind, record)) = target else {
            self.set_status("Only characters and starships can be favorites");
            return;
        };

        let name = record.name.clone();
        if self.browser.toggle_favourite(kind, record) {
            self.set_status(format!("Added {name} to favorites"));
        } else {
            self.set_status(format!("Removed {name} from favorites"));
        }
        self.pending_save = true;
        self.clamp_selection();
    }

    /// Switch the listing between all records and favorites only.
    pub fn toggle_favorites_only(&mut self) {
        let Screen::List(view) = &mut self.screen else {
            return;
        };
        if view.favorite_kind().is_none() {
            let title = view.collection().title();
            self.set_status(format!("{title} cannot be favorited"));
            return;
        }
        let query = view.set_favorites_only(!view.favorites_only());
        let collection = view.collection();
        self.selected = 0;
        self.leave_search_mode();
        self.fetch_list(collection, query);
    }

    // =========================================================================
    // Pagination and search
    // =========================================================================

    pub fn next_page(&mut self) {
        if let Screen::List(view) = &mut self.screen {
            let query = view.next_page();
            let collection = view.collection();
            self.selected = 0;
            self.fetch_list(collection, query);
        }
    }

    pub fn prev_page(&mut self) {
        if let Screen::List(view) = &mut self.screen {
            let query = view.prev_page();
            let collection = view.collection();
            self.selected = 0;
            self.fetch_list(collection, query);
        }
    }

    pub fn goto_page(&mut self, page: u32) {
        if let Screen::List(view) = &mut self.screen {
            if !view.show_pagination() {
                self.set_status("Pagination is hidden while searching or showing favorites");
                return;
            }
            let query = view.set_page(page);
            let collection = view.collection();
            self.selected = 0;
            self.fetch_list(collection, query);
        }
    }

    /// Focus the search box of the current listing.
    pub fn enter_search_mode(&mut self) {
        let Some(view) = self.list_view().filter(|v| v.show_search()) else {
            return;
        };
        let text = view.search().to_string();
        self.set_input(text);
        self.input_mode = InputMode::Search;
    }

    fn leave_search_mode(&mut self) {
        self.debouncer.cancel();
        if self.input_mode == InputMode::Search {
            self.input_mode = InputMode::Normal;
            self.clear_input();
        }
    }

    /// The search box changed; restart the quiet period.
    pub fn queue_search(&mut self) {
        self.debouncer
            .push(self.input_buffer.clone(), Instant::now());
    }

    /// Run the typed search now instead of waiting for the quiet period.
    pub fn submit_search(&mut self) {
        self.debouncer.cancel();
        let text = std::mem::take(&mut self.input_buffer);
        self.cursor_position = 0;
        self.input_mode = InputMode::Normal;
        self.apply_search(text);
    }

    fn apply_search(&mut self, text: String) {
        if let Screen::List(view) = &mut self.screen {
            let query = view.set_search(text);
            let collection = view.collection();
            if query.is_some() {
                self.selected = 0;
            }
            self.fetch_list(collection, query);
        }
    }

    /// When the pending search fires, if one is waiting.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Tick for animations and the search timer
    pub fn tick(&mut self, now: Instant) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
        if let Some(text) = self.debouncer.poll(now) {
            self.apply_search(text);
        }
    }

    pub fn is_loading(&self) -> bool {
        match &self.screen {
            Screen::List(view) => view.is_loading(),
            Screen::Detail(view) => view.is_loading() || view.is_related_loading(),
        }
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Enter command mode (starts with :)
    pub fn enter_command_mode(&mut self) {
        self.leave_search_mode();
        self.input_mode = InputMode::Command;
        self.input_buffer.clear();
        self.input_buffer.push(':');
        self.cursor_position = 1;
    }

    /// Process a colon command
    pub fn process_command(&mut self, command: &str) {
        let cmd = command.trim_start_matches(':').trim();
        let (name, rest) = cmd.split_once(' ').unwrap_or((cmd, ""));
        let rest = rest.trim();

        match name {
            "" => {}
            "q" | "quit" | "exit" => self.should_quit = true,
            "w" | "save" => self.request_save(false),
            "wq" => self.request_save(true),
            "help" | "h" => self.toggle_help(),
            "back" => {
                if !self.go_back() {
                    self.set_status("Nothing to go back to");
                }
            }
            "page" | "p" => match rest.parse::<u32>() {
                Ok(page) if page > 0 => self.goto_page(page),
                _ => self.set_status("Usage: :page N"),
            },
            "search" | "s" => self.apply_search(rest.to_string()),
            "favorites" | "fav" => self.toggle_favorites_only(),
            other => match Collection::from_path(other) {
                Some(collection) if SECTIONS.contains(&collection) => {
                    self.open_section(collection)
                }
                _ => self.set_status(format!("Unknown command: {other}")),
            },
        }
    }

    fn request_save(&mut self, then_quit: bool) {
        if self.browser.config().favorites_path.is_none() {
            self.set_status("No favorites file configured (start with --favorites <FILE>)");
            self.should_quit = then_quit;
            return;
        }
        self.set_status("Saving...");
        self.pending_save = true;
        self.report_save = true;
        self.quit_after_save = then_quit;
    }

    // =========================================================================
    // Overlay and status
    // =========================================================================

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        if matches!(self.overlay, Some(Overlay::Help)) {
            self.overlay = None;
        } else {
            self.overlay = Some(Overlay::Help);
        }
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    /// Set status message (always overwrites)
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    // =========================================================================
    // Input buffer
    // =========================================================================

    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Set input buffer content and move cursor to end (unicode-safe)
    pub fn set_input(&mut self, content: impl Into<String>) {
        self.input_buffer = content.into();
        self.cursor_position = self.input_buffer.chars().count();
    }

    pub fn clear_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }

    /// Handle a typed character (unicode-safe)
    pub fn type_char(&mut self, c: char) {
        let byte_pos = self
            .input_buffer
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.input_buffer.len());
        self.input_buffer.insert(byte_pos, c);
        self.cursor_position += 1;
    }

    /// Handle backspace (unicode-safe)
    pub fn backspace(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            if let Some((byte_pos, ch)) = self.input_buffer.char_indices().nth(self.cursor_position)
            {
                self.input_buffer
                    .replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
            }
        }
    }

    pub fn delete(&mut self) {
        if let Some((byte_pos, ch)) = self.input_buffer.char_indices().nth(self.cursor_position) {
            self.input_buffer
                .replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        let char_count = self.input_buffer.chars().count();
        self.cursor_position = (self.cursor_position + 1).min(char_count);
    }

    pub fn cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_position = self.input_buffer.chars().count();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use holocron_core::testing::{self, url, BASE};
    use holocron_core::{BrowserConfig, FavoriteKind, MockTransport};
    use tokio::sync::mpsc::UnboundedReceiver;

    use super::*;

    async fn app_with(transport: &MockTransport) -> (App, UnboundedReceiver<Loaded>) {
        let browser = Browser::with_transport(Arc::new(transport.clone()), BrowserConfig::new())
            .await
            .unwrap();
        let (loader, rx) = Loader::channel(browser.client().clone());
        (App::new(browser, loader), rx)
    }

    async fn drain(app: &mut App, rx: &mut UnboundedReceiver<Loaded>, count: usize) {
        for _ in 0..count {
            let loaded = rx.recv().await.expect("load result");
            app.apply_loaded(loaded);
        }
    }

    fn people() -> MockTransport {
        MockTransport::new().respond(
            format!("{BASE}/people/?page=1"),
            testing::page(
                vec![
                    testing::person(1, "Luke Skywalker"),
                    testing::person(4, "Darth Vader"),
                ],
                Some("https://swapi.dev/api/people/?page=2"),
            ),
        )
    }

    #[tokio::test]
    async fn test_starts_on_character_list() {
        let transport = people();
        let (mut app, mut rx) = app_with(&transport).await;
        assert!(app.is_loading());

        drain(&mut app, &mut rx, 1).await;

        assert!(!app.is_loading());
        let names: Vec<_> = app.rows().into_iter().map(|e| e.name).collect();
        assert_eq!(names, ["Luke Skywalker", "Darth Vader"]);
    }

    #[tokio::test]
    async fn test_result_for_abandoned_screen_is_dropped() {
        let transport = people().respond(
            format!("{BASE}/films/?page=1"),
            testing::page(vec![testing::film(1, "A New Hope")], None),
        );
        let (mut app, mut rx) = app_with(&transport).await;

        app.open_section(Collection::Films);
        drain(&mut app, &mut rx, 2).await;

        let view = app.list_view().unwrap();
        assert_eq!(view.collection(), Collection::Films);
        let names: Vec<_> = app.rows().into_iter().map(|e| e.name).collect();
        assert_eq!(names, ["A New Hope"]);
    }

    #[tokio::test]
    async fn test_back_restores_list_and_cursor() {
        let transport = people().respond(url("people", 4), testing::person(4, "Darth Vader"));
        let (mut app, mut rx) = app_with(&transport).await;
        drain(&mut app, &mut rx, 1).await;

        app.select_next();
        app.open_selected();
        assert!(matches!(app.screen(), Screen::Detail(v) if v.target().id == "4"));
        drain(&mut app, &mut rx, 2).await;
        assert_eq!(app.primary_favourited(), Some(false));

        assert!(app.go_back());
        assert!(matches!(app.screen(), Screen::List(_)));
        assert_eq!(app.selected(), 1);
        assert!(!app.is_loading());
        assert!(!app.go_back());
    }

    #[tokio::test(start_paused = true)]
    async fn test_typed_search_waits_for_quiet_period() {
        let search = format!("{BASE}/people/?search=lu");
        let transport = people().respond(
            &search,
            testing::page(vec![testing::person(1, "Luke Skywalker")], None),
        );
        let (mut app, mut rx) = app_with(&transport).await;
        drain(&mut app, &mut rx, 1).await;

        app.enter_search_mode();
        for c in ['l', 'u'] {
            app.type_char(c);
            app.queue_search();
            tokio::time::advance(Duration::from_millis(100)).await;
            app.tick(Instant::now());
        }
        assert_eq!(transport.request_count(&search), 0);

        tokio::time::advance(Duration::from_millis(400)).await;
        app.tick(Instant::now());
        drain(&mut app, &mut rx, 1).await;

        assert_eq!(transport.request_count(&search), 1);
        assert_eq!(app.list_view().unwrap().search(), "lu");
        assert_eq!(app.rows().len(), 1);
    }

    #[tokio::test]
    async fn test_heart_toggle_on_selected_row() {
        let transport = people();
        let (mut app, mut rx) = app_with(&transport).await;
        drain(&mut app, &mut rx, 1).await;

        app.toggle_favourite();

        let store = app.browser.favorites().store(FavoriteKind::Character);
        assert!(store.contains(&FavouriteRecord::new("1", "Luke Skywalker")));
        assert!(app.pending_save);

        app.toggle_favorites_only();
        let names: Vec<_> = app.rows().into_iter().map(|e| e.name).collect();
        assert_eq!(names, ["Luke Skywalker"]);
    }

    #[tokio::test]
    async fn test_page_abandoned_for_favorites_is_fetched_again() {
        let transport = people()
            .respond(
                format!("{BASE}/people/?page=2"),
                testing::page(vec![testing::person(11, "Anakin Skywalker")], None),
            )
            .respond(url("people", 1), testing::person(1, "Luke Skywalker"));
        let (mut app, mut rx) = app_with(&transport).await;
        drain(&mut app, &mut rx, 1).await;
        app.toggle_favourite();

        app.next_page();
        app.toggle_favorites_only();
        app.open_selected();
        // Page 2, then the detail's primary and related results.
        drain(&mut app, &mut rx, 3).await;

        assert!(app.go_back());
        app.toggle_favorites_only();
        assert!(app.is_loading());
        drain(&mut app, &mut rx, 1).await;

        let view = app.list_view().unwrap();
        assert_eq!(view.page(), 2);
        assert!(!view.is_loading());
        let names: Vec<_> = app.rows().into_iter().map(|e| e.name).collect();
        assert_eq!(names, ["Anakin Skywalker"]);
        assert_eq!(transport.request_count(&format!("{BASE}/people/?page=2")), 2);
    }

    #[tokio::test]
    async fn test_films_have_no_favorites_toggle() {
        let transport = MockTransport::new();
        let (mut app, _rx) = app_with(&transport).await;

        app.process_command(":films");
        app.toggle_favorites_only();

        assert!(!app.list_view().unwrap().favorites_only());
        assert_eq!(app.status_message(), Some("Films cannot be favorited"));
    }
}
