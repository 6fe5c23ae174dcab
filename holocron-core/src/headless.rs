//! Headless browsing for scripted and automated use.
//!
//! `HeadlessBrowser` drives the same list and detail state machines as the
//! terminal UI, but sequentially: every call performs its fetch and returns a
//! plain snapshot of what a screen would show.
//!
//! # Example
//!
//! ```ignore
//! use holocron_core::{BrowserConfig, HeadlessBrowser};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut browser = HeadlessBrowser::open(BrowserConfig::new()).await?;
//!     let people = browser.search("skywalker").await?;
//!     println!("{people:?}");
//!     Ok(())
//! }
//! ```

use swapi::Collection;

use crate::browser::{Browser, BrowserError};
use crate::config::BrowserConfig;
use crate::detail::{DetailView, Fact, RelatedGroup};
use crate::favorites::{FavoriteKind, FavouriteRecord};
use crate::list_view::{ListDisplay, ListQuery, ListView};
use crate::reference::EntityRef;

/// What a listing screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSnapshot {
    pub collection: Collection,
    pub page: u32,
    pub search: Option<String>,
    pub favorites_only: bool,
    pub display: ListDisplay,
    /// Empty when pagination is hidden.
    pub page_buttons: Vec<u32>,
    pub show_prev: bool,
    pub show_next: bool,
}

/// What a detail screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailSnapshot {
    pub target: EntityRef,
    pub title: String,
    pub image_url: String,
    pub facts: Vec<Fact>,
    pub groups: Vec<RelatedGroup>,
    /// Related entries that could not be loaded.
    pub failed: usize,
    /// Favorite state, for entities that can be favorited.
    pub favourited: Option<bool>,
}

/// A sequential, text-friendly browser.
pub struct HeadlessBrowser {
    browser: Browser,
    list: ListView,
}

impl HeadlessBrowser {
    pub fn new(browser: Browser) -> Self {
        Self {
            browser,
            list: ListView::new(Collection::People),
        }
    }

    pub async fn open(config: BrowserConfig) -> Result<Self, BrowserError> {
        Ok(Self::new(Browser::open(config).await?))
    }

    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    pub fn browser_mut(&mut self) -> &mut Browser {
        &mut self.browser
    }

    pub fn list_view(&self) -> &ListView {
        &self.list
    }

    /// Show a page of a section.
    pub async fn list(
        &mut self,
        collection: Collection,
        page: u32,
    ) -> Result<ListSnapshot, BrowserError> {
        if self.list.collection() != collection
            || self.list.is_searching()
            || self.list.favorites_only()
        {
            self.list = ListView::new(collection);
        }
        let query = if self.list.entries().is_empty() && page == self.list.page() {
            self.list.start()
        } else {
            self.list.set_page(page)
        };
        self.run(query).await
    }

    /// Search the current section. An empty query returns to pagination.
    pub async fn search(&mut self, text: &str) -> Result<ListSnapshot, BrowserError> {
        let query = self.list.set_search(text);
        self.run(query).await
    }

    pub async fn next_page(&mut self) -> Result<ListSnapshot, BrowserError> {
        let query = self.list.next_page();
        self.run(query).await
    }

    pub async fn prev_page(&mut self) -> Result<ListSnapshot, BrowserError> {
        let query = self.list.prev_page();
        self.run(query).await
    }

    pub async fn favorites_only(&mut self, on: bool) -> Result<ListSnapshot, BrowserError> {
        let query = self.list.set_favorites_only(on);
        self.run(query).await
    }

    async fn run(&mut self, query: Option<ListQuery>) -> Result<ListSnapshot, BrowserError> {
        if let Some(query) = query {
            match self.browser.list(self.list.collection(), &query).await {
                Ok(page) => self.list.apply(page),
                Err(e) => {
                    self.list.fail();
                    return Err(e);
                }
            }
        }
        Ok(self.snapshot())
    }

    /// The listing as it currently stands.
    pub fn snapshot(&self) -> ListSnapshot {
        let store = self
            .list
            .favorite_kind()
            .map(|kind| self.browser.favorites().store(kind));
        ListSnapshot {
            collection: self.list.collection(),
            page: self.list.page(),
            search: self
                .list
                .is_searching()
                .then(|| self.list.search().trim().to_string()),
            favorites_only: self.list.favorites_only(),
            display: self.list.display(store),
            page_buttons: if self.list.show_pagination() {
                self.list.page_buttons()
            } else {
                Vec::new()
            },
            show_prev: self.list.show_prev(),
            show_next: self.list.show_next(),
        }
    }

    /// Open a detail screen and wait for its relations.
    pub async fn show(&self, target: &EntityRef) -> Result<DetailSnapshot, BrowserError> {
        let mut view = DetailView::new(target.clone());
        let (primary, related) = self.browser.detail(target).await?;

        let title = primary.title().to_string();
        let facts = primary.facts();
        let favourited = primary
            .favourite()
            .map(|(kind, record)| self.browser.favorites().store(kind).contains(&record));

        view.apply_primary(primary);
        let failed = related.failed;
        view.apply_related(related);

        Ok(DetailSnapshot {
            target: target.clone(),
            title,
            image_url: self.browser.image_url(target),
            facts,
            groups: view.groups(),
            failed,
            favourited,
        })
    }

    /// Add or remove a favorite and persist the change.
    pub async fn set_favourite(
        &mut self,
        kind: FavoriteKind,
        record: FavouriteRecord,
        on: bool,
    ) -> Result<bool, BrowserError> {
        let store = self.browser.favorites_mut().store_mut(kind);
        let changed = if on {
            store.add(record)
        } else {
            store.remove(record)
        };
        if changed {
            self.browser.save_favorites().await?;
        }
        Ok(changed)
    }

    pub fn favourites(&self, kind: FavoriteKind) -> &[FavouriteRecord] {
        self.browser.favorites().store(kind).records()
    }

    /// Whether any favorite of this kind carries the name, whatever its id.
    pub fn favourites_contain_name(&self, kind: FavoriteKind, name: &str) -> bool {
        self.browser.favorites().store(kind).contains_name(name)
    }
}
