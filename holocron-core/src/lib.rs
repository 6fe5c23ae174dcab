//! Browsing engine for the Star Wars reference API.
//!
//! This crate provides:
//! - Resource URL resolution and artwork links
//! - Concurrent resolution of a record's related records
//! - Character and starship favorites with optional JSON persistence
//! - Listing state (search, pagination, favorites-only) and input debouncing
//! - A headless browser for scripted use
//!
//! # Quick Start
//!
//! ```ignore
//! use holocron_core::{Browser, BrowserConfig, EntityRef};
//! use swapi::Collection;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let browser = Browser::open(BrowserConfig::new()).await?;
//!
//!     let (film, related) = browser.detail(&EntityRef::new(Collection::Films, "1")).await?;
//!     println!("{} ({} related groups)", film.title(), related.bundle.groups().len());
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod browser;
pub mod config;
pub mod debounce;
pub mod detail;
pub mod favorites;
pub mod guard;
pub mod headless;
pub mod list_view;
pub mod persist;
pub mod reference;
pub mod testing;

// Primary public API
pub use aggregate::{aggregate, Aggregation, Related};
pub use browser::{Browser, BrowserError};
pub use config::BrowserConfig;
pub use debounce::Debouncer;
pub use detail::{DetailView, Primary, RelatedBundle, RelatedGroup};
pub use favorites::{FavoriteKind, Favorites, FavoritesAction, FavoritesStore, FavouriteRecord};
pub use guard::{LoadGuard, Ticket};
pub use headless::{DetailSnapshot, HeadlessBrowser, ListSnapshot};
pub use list_view::{ListDisplay, ListEntry, ListPage, ListQuery, ListView};
pub use reference::{image_url, resource_id, EntityRef};
pub use testing::MockTransport;
