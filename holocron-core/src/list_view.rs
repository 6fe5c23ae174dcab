//! Listing screen state: search, pagination and the favorites-only toggle.
//!
//! `ListView` is a pure state machine. Transitions that need data return the
//! [`ListQuery`] to run; the caller performs the fetch and reports back with
//! [`ListView::apply`] or [`ListView::fail`].

use swapi::{Character, Collection, Film, Page, Resource, Starship, SwapiClient, Vehicle};

use crate::favorites::{FavoriteKind, FavoritesStore};
use crate::reference::EntityRef;

/// Message shown when the favorites-only view has nothing to show.
pub const NO_FAVORITES: &str = "No favorites yet";

/// Message shown when a listing or search returned nothing.
pub const NO_RESULTS: &str = "No results";

/// A fetch the view needs performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListQuery {
    /// One server page, 1-based.
    Page(u32),
    /// A server-side filtered search (single page).
    Search(String),
}

impl ListQuery {
    /// Run the query against the API for a collection.
    pub async fn fetch(
        &self,
        client: &SwapiClient,
        collection: Collection,
    ) -> Result<ListPage, swapi::Error> {
        match collection {
            Collection::People => self.fetch_as::<Character>(client, collection).await,
            Collection::Films => self.fetch_as::<Film>(client, collection).await,
            Collection::Starships => self.fetch_as::<Starship>(client, collection).await,
            Collection::Vehicles => self.fetch_as::<Vehicle>(client, collection).await,
            Collection::Planets => self.fetch_as::<swapi::Planet>(client, collection).await,
            Collection::Species => self.fetch_as::<swapi::Species>(client, collection).await,
        }
    }

    async fn fetch_as<T>(
        &self,
        client: &SwapiClient,
        collection: Collection,
    ) -> Result<ListPage, swapi::Error>
    where
        T: Resource + serde::de::DeserializeOwned,
    {
        let page: Page<T> = match self {
            ListQuery::Page(n) => client.page(collection, *n).await?,
            ListQuery::Search(q) => client.search(collection, q).await?,
        };
        Ok(ListPage::from_page(&page))
    }
}

/// One row of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub name: String,
    pub reference: Option<EntityRef>,
}

impl ListEntry {
    pub fn from_resource<R: Resource>(resource: &R) -> Self {
        Self {
            name: resource.name().to_string(),
            reference: EntityRef::from_url(resource.url()),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.reference.as_ref().map(|r| r.id.as_str())
    }
}

/// A decoded listing response, independent of the record type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPage {
    pub entries: Vec<ListEntry>,
    pub has_next: bool,
}

impl ListPage {
    pub fn from_page<R: Resource>(page: &Page<R>) -> Self {
        Self {
            entries: page.results.iter().map(ListEntry::from_resource).collect(),
            has_next: page.has_next(),
        }
    }
}

/// A row ready for display, with its favorite state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayEntry {
    pub entry: ListEntry,
    pub favourited: bool,
}

/// What the listing body should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListDisplay {
    Loading,
    Entries(Vec<DisplayEntry>),
    Empty(&'static str),
}

/// State for one section's listing screen.
#[derive(Debug, Clone)]
pub struct ListView {
    collection: Collection,
    search: String,
    favorites_only: bool,
    page: u32,
    loading: bool,
    entries: Vec<ListEntry>,
    has_next: bool,
    /// Issued but not yet answered.
    pending: Option<ListQuery>,
    /// The query whose response fills `entries`.
    loaded_query: Option<ListQuery>,
}

impl ListView {
    pub fn new(collection: Collection) -> Self {
        Self {
            collection,
            search: String::new(),
            favorites_only: false,
            page: 1,
            loading: false,
            entries: Vec::new(),
            has_next: false,
            pending: None,
            loaded_query: None,
        }
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn is_searching(&self) -> bool {
        !self.search.trim().is_empty()
    }

    pub fn favorites_only(&self) -> bool {
        self.favorites_only
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    /// Which favorites store backs this listing, if any.
    pub fn favorite_kind(&self) -> Option<FavoriteKind> {
        FavoriteKind::for_collection(self.collection)
    }

    /// The fetch matching the current state; `None` when showing favorites.
    pub fn query(&self) -> Option<ListQuery> {
        if self.favorites_only {
            None
        } else if self.is_searching() {
            Some(ListQuery::Search(self.search.trim().to_string()))
        } else {
            Some(ListQuery::Page(self.page))
        }
    }

    /// Initial load when the screen is entered.
    pub fn start(&mut self) -> Option<ListQuery> {
        self.request()
    }

    fn request(&mut self) -> Option<ListQuery> {
        let query = self.query();
        self.loading = query.is_some();
        self.pending = query.clone();
        query
    }

    /// Replace the search text. Re-fetches when the effective query changed.
    pub fn set_search(&mut self, text: impl Into<String>) -> Option<ListQuery> {
        if self.favorites_only {
            return None;
        }
        let text = text.into();
        if text.trim() == self.search.trim() {
            self.search = text;
            return None;
        }
        self.search = text;
        self.request()
    }

    pub fn clear_search(&mut self) -> Option<ListQuery> {
        self.set_search(String::new())
    }

    /// Jump to a page. Ignored while pagination is hidden or for page 0.
    pub fn set_page(&mut self, page: u32) -> Option<ListQuery> {
        if !self.show_pagination() || page == 0 || page == self.page {
            return None;
        }
        self.page = page;
        self.request()
    }

    pub fn next_page(&mut self) -> Option<ListQuery> {
        if !self.show_next() {
            return None;
        }
        self.set_page(self.page + 1)
    }

    pub fn prev_page(&mut self) -> Option<ListQuery> {
        if !self.show_prev() {
            return None;
        }
        self.set_page(self.page - 1)
    }

    /// Switch between all records and favorites only.
    ///
    /// Showing favorites never fetches. Switching back fetches unless the
    /// entries on hand already answer the current query.
    pub fn set_favorites_only(&mut self, on: bool) -> Option<ListQuery> {
        if on == self.favorites_only || (on && self.favorite_kind().is_none()) {
            return None;
        }
        self.favorites_only = on;
        if on {
            self.loading = false;
            None
        } else if self.loaded_query.is_some() && self.loaded_query == self.query() {
            None
        } else {
            self.request()
        }
    }

    /// Store a successful response.
    pub fn apply(&mut self, page: ListPage) {
        self.entries = page.entries;
        self.has_next = page.has_next;
        self.loading = false;
        self.loaded_query = self.pending.take().or_else(|| self.query());
    }

    /// Record a failed fetch: stop loading, keep whatever was there.
    pub fn fail(&mut self) {
        self.loading = false;
        self.pending = None;
    }

    pub fn show_search(&self) -> bool {
        !self.favorites_only
    }

    pub fn show_pagination(&self) -> bool {
        !self.favorites_only && !self.is_searching()
    }

    pub fn show_prev(&self) -> bool {
        self.show_pagination() && self.page > 1
    }

    pub fn show_next(&self) -> bool {
        self.show_pagination() && self.has_next
    }

    /// Page numbers on the button strip.
    pub fn page_buttons(&self) -> Vec<u32> {
        if self.page < 3 {
            return vec![1, 2, 3];
        }
        let mut buttons = vec![self.page - 1, self.page];
        if self.has_next {
            buttons.push(self.page + 1);
        }
        buttons
    }

    /// Body content, consulting the favorites store for heart state.
    pub fn display(&self, favorites: Option<&FavoritesStore>) -> ListDisplay {
        if self.favorites_only {
            let Some(store) = favorites.filter(|s| !s.is_empty()) else {
                return ListDisplay::Empty(NO_FAVORITES);
            };
            let entries = store
                .records()
                .iter()
                .map(|record| DisplayEntry {
                    entry: ListEntry {
                        name: record.name.clone(),
                        reference: Some(EntityRef::new(self.collection, record.id.clone())),
                    },
                    favourited: true,
                })
                .collect();
            return ListDisplay::Entries(entries);
        }

        if self.loading {
            return ListDisplay::Loading;
        }
        if self.entries.is_empty() {
            return ListDisplay::Empty(NO_RESULTS);
        }

        let entries = self
            .entries
            .iter()
            .map(|entry| DisplayEntry {
                favourited: is_favourited(entry, favorites),
                entry: entry.clone(),
            })
            .collect();
        ListDisplay::Entries(entries)
    }
}

fn is_favourited(entry: &ListEntry, favorites: Option<&FavoritesStore>) -> bool {
    let (Some(store), Some(id)) = (favorites, entry.id()) else {
        return false;
    };
    store.contains(&crate::favorites::FavouriteRecord::new(id, entry.name.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::FavouriteRecord;

    fn loaded_page(view: &mut ListView, has_next: bool) {
        view.apply(ListPage {
            entries: vec![ListEntry {
                name: "Luke Skywalker".into(),
                reference: Some(EntityRef::new(Collection::People, "1")),
            }],
            has_next,
        });
    }

    #[test]
    fn test_start_fetches_first_page() {
        let mut view = ListView::new(Collection::People);
        assert_eq!(view.start(), Some(ListQuery::Page(1)));
        assert!(view.is_loading());
        assert_eq!(view.display(None), ListDisplay::Loading);
    }

    #[test]
    fn test_prev_hidden_on_first_page() {
        let mut view = ListView::new(Collection::People);
        view.start();
        loaded_page(&mut view, true);
        assert!(!view.show_prev());
        assert!(view.show_next());
        assert_eq!(view.prev_page(), None);
    }

    #[test]
    fn test_next_hidden_on_last_page() {
        let mut view = ListView::new(Collection::People);
        view.start();
        loaded_page(&mut view, true);
        assert_eq!(view.set_page(9), Some(ListQuery::Page(9)));
        loaded_page(&mut view, false);
        assert!(!view.show_next());
        assert!(view.show_prev());
        assert_eq!(view.next_page(), None);
        assert_eq!(view.page_buttons(), vec![8, 9]);
    }

    #[test]
    fn test_page_buttons_window() {
        let mut view = ListView::new(Collection::People);
        view.start();
        loaded_page(&mut view, true);
        assert_eq!(view.page_buttons(), vec![1, 2, 3]);

        view.next_page();
        loaded_page(&mut view, true);
        assert_eq!(view.page(), 2);
        assert_eq!(view.page_buttons(), vec![1, 2, 3]);

        view.next_page();
        loaded_page(&mut view, true);
        assert_eq!(view.page_buttons(), vec![2, 3, 4]);
    }

    #[test]
    fn test_search_replaces_pagination() {
        let mut view = ListView::new(Collection::People);
        view.start();
        loaded_page(&mut view, true);

        assert_eq!(
            view.set_search("  ana "),
            Some(ListQuery::Search("ana".into()))
        );
        assert!(!view.show_pagination());
        assert_eq!(view.set_page(2), None);

        // Whitespace-only edits don't change the effective query.
        assert_eq!(view.set_search("ana"), None);

        assert_eq!(view.clear_search(), Some(ListQuery::Page(1)));
        assert!(view.show_pagination());
    }

    #[test]
    fn test_favorites_only_empty_store_never_fetches() {
        let mut view = ListView::new(Collection::People);
        assert_eq!(view.set_favorites_only(true), None);
        assert_eq!(view.query(), None);
        assert_eq!(view.start(), None);
        assert!(!view.show_search());
        assert!(!view.show_pagination());

        let store = FavoritesStore::new(FavoriteKind::Character);
        assert_eq!(view.display(Some(&store)), ListDisplay::Empty(NO_FAVORITES));
        assert_eq!(view.display(None), ListDisplay::Empty(NO_FAVORITES));
    }

    #[test]
    fn test_favorites_only_lists_store_contents() {
        let mut view = ListView::new(Collection::Starships);
        view.set_favorites_only(true);
        let mut store = FavoritesStore::new(FavoriteKind::Starship);
        store.add(FavouriteRecord::new("10", "Millennium Falcon"));

        let ListDisplay::Entries(rows) = view.display(Some(&store)) else {
            panic!("expected entries");
        };
        assert_eq!(rows.len(), 1);
        assert!(rows[0].favourited);
        assert_eq!(rows[0].entry.id(), Some("10"));
    }

    #[test]
    fn test_leaving_favorites_refetches_only_when_empty() {
        let mut view = ListView::new(Collection::People);
        view.set_favorites_only(true);
        assert_eq!(view.set_favorites_only(false), Some(ListQuery::Page(1)));
        loaded_page(&mut view, false);

        view.set_favorites_only(true);
        assert_eq!(view.set_favorites_only(false), None);
    }

    #[test]
    fn test_leaving_favorites_refetches_unanswered_page() {
        let mut view = ListView::new(Collection::People);
        view.start();
        loaded_page(&mut view, true);

        assert_eq!(view.next_page(), Some(ListQuery::Page(2)));
        view.set_favorites_only(true);
        assert!(!view.is_loading());

        assert_eq!(view.set_favorites_only(false), Some(ListQuery::Page(2)));
        assert!(view.is_loading());
    }

    #[test]
    fn test_films_have_no_favorites_toggle() {
        let mut view = ListView::new(Collection::Films);
        assert_eq!(view.set_favorites_only(true), None);
        assert!(!view.favorites_only());
    }

    #[test]
    fn test_heart_state_follows_store() {
        let mut view = ListView::new(Collection::People);
        view.start();
        loaded_page(&mut view, false);
        let mut store = FavoritesStore::new(FavoriteKind::Character);

        let ListDisplay::Entries(rows) = view.display(Some(&store)) else {
            panic!("expected entries");
        };
        assert!(!rows[0].favourited);

        store.add(FavouriteRecord::new("1", "Luke Skywalker"));
        let ListDisplay::Entries(rows) = view.display(Some(&store)) else {
            panic!("expected entries");
        };
        assert!(rows[0].favourited);
    }

    #[test]
    fn test_failure_keeps_previous_entries() {
        let mut view = ListView::new(Collection::People);
        view.start();
        loaded_page(&mut view, true);
        view.next_page();
        view.fail();
        assert!(!view.is_loading());
        assert_eq!(view.entries().len(), 1);
    }
}
