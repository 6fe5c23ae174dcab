//! Related-entity resolution for detail screens.
//!
//! A primary record (a film, starship, vehicle or character) links to other
//! records by URL. [`aggregate`] fetches every distinct linked URL at once,
//! waits for all of them to settle, and groups the decoded records back into
//! the primary's relation categories.

use std::collections::HashMap;

use futures::future::join_all;
use serde::de::DeserializeOwned;
use swapi::{Character, Film, Planet, Species, Starship, SwapiClient, Vehicle};

/// Raw responses keyed by URL, consumed per relation category.
#[derive(Debug, Default)]
pub struct Resolved {
    values: HashMap<String, serde_json::Value>,
    failed: usize,
}

impl Resolved {
    /// Decode the records for `urls`, in order, skipping anything that
    /// failed to load or does not match `T`'s shape.
    pub fn take<T: DeserializeOwned>(&mut self, urls: &[String]) -> Vec<T> {
        let mut out = Vec::with_capacity(urls.len());
        for url in urls {
            let Some(value) = self.values.get(url) else {
                continue;
            };
            match serde_json::from_value(value.clone()) {
                Ok(record) => out.push(record),
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "related record has unexpected shape");
                    self.failed += 1;
                }
            }
        }
        out
    }
}

/// A record whose relation URLs can be resolved into a typed bundle.
pub trait Related {
    type Bundle: Default;

    /// Every relation URL, across all categories, in declaration order.
    fn related_urls(&self) -> Vec<&str>;

    /// Group resolved records into the bundle.
    fn assemble(&self, resolved: &mut Resolved) -> Self::Bundle;
}

/// Outcome of resolving a primary record's relations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation<B> {
    pub bundle: B,
    /// True while fetches are outstanding.
    pub loading: bool,
    /// Entries omitted because their fetch or decode failed.
    pub failed: usize,
}

impl<B> Aggregation<B> {
    /// State to show while the fetches are in flight.
    pub fn pending() -> Self
    where
        B: Default,
    {
        Self::pending_with(B::default())
    }

    pub fn pending_with(bundle: B) -> Self {
        Self {
            bundle,
            loading: true,
            failed: 0,
        }
    }

    pub fn map<C>(self, f: impl FnOnce(B) -> C) -> Aggregation<C> {
        Aggregation {
            bundle: f(self.bundle),
            loading: self.loading,
            failed: self.failed,
        }
    }
}

/// Resolve every relation of `primary`.
///
/// With no primary there is nothing to fetch and an empty, settled result is
/// returned. A failed fetch drops only its own entry.
pub async fn aggregate<T: Related>(
    client: &SwapiClient,
    primary: Option<&T>,
) -> Aggregation<T::Bundle> {
    let Some(primary) = primary else {
        return Aggregation::default();
    };

    let mut distinct: Vec<&str> = Vec::new();
    for url in primary.related_urls() {
        if !distinct.contains(&url) {
            distinct.push(url);
        }
    }

    let results = join_all(
        distinct
            .iter()
            .map(|url| async move { (*url, client.get::<serde_json::Value>(url).await) }),
    )
    .await;

    let mut resolved = Resolved::default();
    for (url, result) in results {
        match result {
            Ok(value) => {
                resolved.values.insert(url.to_string(), value);
            }
            Err(e) => {
                tracing::debug!(url, error = %e, "related fetch failed");
                resolved.failed += 1;
            }
        }
    }

    let bundle = primary.assemble(&mut resolved);
    Aggregation {
        bundle,
        loading: false,
        failed: resolved.failed,
    }
}

fn chain<'a>(lists: &[&'a Vec<String>]) -> Vec<&'a str> {
    lists
        .iter()
        .flat_map(|list| list.iter().map(String::as_str))
        .collect()
}

/// Relations shown on a film screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilmRelations {
    pub characters: Vec<Character>,
    pub planets: Vec<Planet>,
    pub starships: Vec<Starship>,
    pub vehicles: Vec<Vehicle>,
    pub species: Vec<Species>,
}

impl Related for Film {
    type Bundle = FilmRelations;

    fn related_urls(&self) -> Vec<&str> {
        chain(&[
            &self.characters,
            &self.planets,
            &self.starships,
            &self.vehicles,
            &self.species,
        ])
    }

    fn assemble(&self, resolved: &mut Resolved) -> FilmRelations {
        FilmRelations {
            characters: resolved.take(&self.characters),
            planets: resolved.take(&self.planets),
            starships: resolved.take(&self.starships),
            vehicles: resolved.take(&self.vehicles),
            species: resolved.take(&self.species),
        }
    }
}

/// Relations shown on starship and vehicle screens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CraftRelations {
    pub films: Vec<Film>,
    pub pilots: Vec<Character>,
}

impl Related for Starship {
    type Bundle = CraftRelations;

    fn related_urls(&self) -> Vec<&str> {
        chain(&[&self.films, &self.pilots])
    }

    fn assemble(&self, resolved: &mut Resolved) -> CraftRelations {
        CraftRelations {
            films: resolved.take(&self.films),
            pilots: resolved.take(&self.pilots),
        }
    }
}

impl Related for Vehicle {
    type Bundle = CraftRelations;

    fn related_urls(&self) -> Vec<&str> {
        chain(&[&self.films, &self.pilots])
    }

    fn assemble(&self, resolved: &mut Resolved) -> CraftRelations {
        CraftRelations {
            films: resolved.take(&self.films),
            pilots: resolved.take(&self.pilots),
        }
    }
}

/// Relations shown on a character screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharacterRelations {
    pub films: Vec<Film>,
    pub species: Vec<Species>,
    pub starships: Vec<Starship>,
    pub vehicles: Vec<Vehicle>,
}

impl Related for Character {
    type Bundle = CharacterRelations;

    fn related_urls(&self) -> Vec<&str> {
        chain(&[&self.films, &self.species, &self.starships, &self.vehicles])
    }

    fn assemble(&self, resolved: &mut Resolved) -> CharacterRelations {
        CharacterRelations {
            films: resolved.take(&self.films),
            species: resolved.take(&self.species),
            starships: resolved.take(&self.starships),
            vehicles: resolved.take(&self.vehicles),
        }
    }
}
