//! Wire schemas for the API's resources.
//!
//! Fields mirror the JSON the API returns. Unknown fields are ignored and
//! missing ones fall back to empty values, so a sparse record still decodes.

use serde::{Deserialize, Serialize};

/// A top-level API collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    People,
    Films,
    Starships,
    Vehicles,
    Planets,
    Species,
}

impl Collection {
    /// Path segment under the API root.
    pub fn path(self) -> &'static str {
        match self {
            Collection::People => "people",
            Collection::Films => "films",
            Collection::Starships => "starships",
            Collection::Vehicles => "vehicles",
            Collection::Planets => "planets",
            Collection::Species => "species",
        }
    }

    pub fn from_path(segment: &str) -> Option<Self> {
        match segment {
            "people" => Some(Collection::People),
            "films" => Some(Collection::Films),
            "starships" => Some(Collection::Starships),
            "vehicles" => Some(Collection::Vehicles),
            "planets" => Some(Collection::Planets),
            "species" => Some(Collection::Species),
            _ => None,
        }
    }

    /// Human-readable section title.
    pub fn title(self) -> &'static str {
        match self {
            Collection::People => "Characters",
            Collection::Films => "Films",
            Collection::Starships => "Starships",
            Collection::Vehicles => "Vehicles",
            Collection::Planets => "Planets",
            Collection::Species => "Species",
        }
    }
}

/// Common accessors for every resource record.
pub trait Resource {
    const COLLECTION: Collection;

    /// Display name (a film's title).
    fn name(&self) -> &str;

    /// The resource's own canonical URL.
    fn url(&self) -> &str;
}

/// One page of a listing or search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Whether the server reported another page after this one.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// A person (the API's `people` collection).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Character {
    pub name: String,
    pub height: String,
    pub mass: String,
    pub hair_color: String,
    pub skin_color: String,
    pub eye_color: String,
    pub birth_year: String,
    pub gender: String,
    pub homeworld: String,
    pub films: Vec<String>,
    pub species: Vec<String>,
    pub starships: Vec<String>,
    pub vehicles: Vec<String>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Film {
    pub title: String,
    pub episode_id: u32,
    pub opening_crawl: String,
    pub director: String,
    pub producer: String,
    pub release_date: String,
    pub characters: Vec<String>,
    pub planets: Vec<String>,
    pub starships: Vec<String>,
    pub vehicles: Vec<String>,
    pub species: Vec<String>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Starship {
    pub name: String,
    pub model: String,
    pub manufacturer: String,
    pub cost_in_credits: String,
    pub length: String,
    pub max_atmosphering_speed: String,
    pub crew: String,
    pub passengers: String,
    pub cargo_capacity: String,
    pub consumables: String,
    pub hyperdrive_rating: String,
    #[serde(rename = "MGLT")]
    pub mglt: String,
    pub starship_class: String,
    pub films: Vec<String>,
    pub pilots: Vec<String>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vehicle {
    pub name: String,
    pub model: String,
    pub manufacturer: String,
    pub cost_in_credits: String,
    pub length: String,
    pub max_atmosphering_speed: String,
    pub crew: String,
    pub passengers: String,
    pub cargo_capacity: String,
    pub consumables: String,
    pub vehicle_class: String,
    pub films: Vec<String>,
    pub pilots: Vec<String>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Planet {
    pub name: String,
    pub climate: String,
    pub terrain: String,
    pub population: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Species {
    pub name: String,
    pub classification: String,
    pub language: String,
    pub url: String,
}

macro_rules! named_resource {
    ($ty:ty, $collection:expr, $name:ident) => {
        impl Resource for $ty {
            const COLLECTION: Collection = $collection;

            fn name(&self) -> &str {
                &self.$name
            }

            fn url(&self) -> &str {
                &self.url
            }
        }
    };
}

named_resource!(Character, Collection::People, name);
named_resource!(Film, Collection::Films, title);
named_resource!(Starship, Collection::Starships, name);
named_resource!(Vehicle, Collection::Vehicles, name);
named_resource!(Planet, Collection::Planets, name);
named_resource!(Species, Collection::Species, name);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collection_paths_round_trip() {
        for c in [
            Collection::People,
            Collection::Films,
            Collection::Starships,
            Collection::Vehicles,
            Collection::Planets,
            Collection::Species,
        ] {
            assert_eq!(Collection::from_path(c.path()), Some(c));
        }
        assert_eq!(Collection::from_path("droids"), None);
    }

    #[test]
    fn test_starship_mglt_rename() {
        let ship: Starship = serde_json::from_value(json!({
            "name": "X-wing",
            "MGLT": "100",
            "hyperdrive_rating": "1.0",
            "pilots": ["https://swapi.dev/api/people/1/"]
        }))
        .unwrap();
        assert_eq!(ship.mglt, "100");
        assert_eq!(ship.pilots.len(), 1);
        assert!(ship.films.is_empty());
    }

    #[test]
    fn test_film_display_name_is_title() {
        let film = Film {
            title: "A New Hope".to_string(),
            url: "https://swapi.dev/api/films/1/".to_string(),
            ..Default::default()
        };
        assert_eq!(film.name(), "A New Hope");
        assert_eq!(Film::COLLECTION, Collection::Films);
    }
}
