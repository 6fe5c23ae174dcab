//! Resource URL handling.
//!
//! The API links records to each other by URL (`.../people/42/`). These
//! helpers turn such a URL into the numeric id used for navigation and image
//! lookups.

use serde::{Deserialize, Serialize};
use swapi::Collection;

/// Default host serving artwork for every resource.
pub const IMAGE_BASE: &str = "https://starwars-visualguide.com/assets/img";

/// Last non-empty path segment of a resource URL.
///
/// `https://swapi.dev/api/people/42/` yields `Some("42")`. Returns `None` for
/// input with no path segments at all; anything else is returned as-is.
pub fn resource_id(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    path.rsplit('/').find(|segment| !segment.is_empty())
}

/// Image folder used by the artwork host for a collection.
pub fn image_folder(collection: Collection) -> &'static str {
    match collection {
        Collection::People => "characters",
        other => other.path(),
    }
}

/// Artwork URL for a resource on the default image host.
pub fn image_url(collection: Collection, id: &str) -> String {
    image_url_with_base(IMAGE_BASE, collection, id)
}

pub fn image_url_with_base(base: &str, collection: Collection, id: &str) -> String {
    format!(
        "{}/{}/{id}.jpg",
        base.trim_end_matches('/'),
        image_folder(collection)
    )
}

/// A navigable reference to a single resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub collection: Collection,
    pub id: String,
}

impl EntityRef {
    pub fn new(collection: Collection, id: impl Into<String>) -> Self {
        Self {
            collection,
            id: id.into(),
        }
    }

    /// Parse `.../<collection>/<id>/` into a reference.
    pub fn from_url(url: &str) -> Option<Self> {
        let path = url.split(['?', '#']).next().unwrap_or_default();
        let mut segments = path.rsplit('/').filter(|s| !s.is_empty());
        let id = segments.next()?;
        let collection = Collection::from_path(segments.next()?)?;
        Some(Self::new(collection, id))
    }

    pub fn image_url(&self) -> String {
        image_url(self.collection, &self.id)
    }
}
