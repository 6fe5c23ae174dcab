//! Browser configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::debounce::SEARCH_DEBOUNCE;
use crate::reference::IMAGE_BASE;

/// Configuration for a browsing session.
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// API root; `None` uses the client's default (or `SWAPI_BASE_URL`).
    pub base_url: Option<String>,

    /// Artwork host root.
    pub image_base: String,

    /// Quiet period before a typed search is sent.
    pub debounce: Duration,

    /// Where favorites are persisted; `None` keeps them in memory only.
    pub favorites_path: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            image_base: IMAGE_BASE.to_string(),
            debounce: SEARCH_DEBOUNCE,
            favorites_path: None,
        }
    }
}

impl BrowserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_image_base(mut self, url: impl Into<String>) -> Self {
        self.image_base = url.into();
        self
    }

    pub fn with_debounce(mut self, window: Duration) -> Self {
        self.debounce = window;
        self
    }

    pub fn with_favorites_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.favorites_path = Some(path.into());
        self
    }
}
