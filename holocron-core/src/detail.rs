//! Detail screens: one primary record plus its resolved relations.

use swapi::{Character, Collection, Film, Resource, Starship, SwapiClient, Vehicle};

use crate::aggregate::{
    aggregate, Aggregation, CharacterRelations, CraftRelations, FilmRelations,
};
use crate::browser::BrowserError;
use crate::favorites::{FavoriteKind, FavouriteRecord};
use crate::list_view::ListEntry;
use crate::reference::{image_url_with_base, EntityRef};

/// The record a detail screen is centred on.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    Character(Character),
    Film(Film),
    Starship(Starship),
    Vehicle(Vehicle),
}

/// A labelled scalar shown on a detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fact {
    pub label: &'static str,
    pub value: String,
}

fn fact(label: &'static str, value: impl Into<String>) -> Fact {
    Fact {
        label,
        value: value.into(),
    }
}

impl Primary {
    /// Fetch the record a reference points at.
    pub async fn fetch(client: &SwapiClient, target: &EntityRef) -> Result<Self, BrowserError> {
        let id = target.id.as_str();
        Ok(match target.collection {
            Collection::People => Primary::Character(client.person(id).await?),
            Collection::Films => Primary::Film(client.film(id).await?),
            Collection::Starships => Primary::Starship(client.starship(id).await?),
            Collection::Vehicles => Primary::Vehicle(client.vehicle(id).await?),
            other => return Err(BrowserError::NoDetailScreen(other)),
        })
    }

    pub fn collection(&self) -> Collection {
        match self {
            Primary::Character(_) => Collection::People,
            Primary::Film(_) => Collection::Films,
            Primary::Starship(_) => Collection::Starships,
            Primary::Vehicle(_) => Collection::Vehicles,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Primary::Character(c) => c.name(),
            Primary::Film(f) => f.name(),
            Primary::Starship(s) => s.name(),
            Primary::Vehicle(v) => v.name(),
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Primary::Character(c) => c.url(),
            Primary::Film(f) => f.url(),
            Primary::Starship(s) => s.url(),
            Primary::Vehicle(v) => v.url(),
        }
    }

    /// The favorite record for this entity, when its collection has a store.
    pub fn favourite(&self) -> Option<(FavoriteKind, FavouriteRecord)> {
        let kind = FavoriteKind::for_collection(self.collection())?;
        let record = match self {
            Primary::Character(c) => FavouriteRecord::from_resource(c),
            Primary::Starship(s) => FavouriteRecord::from_resource(s),
            _ => None,
        }?;
        Some((kind, record))
    }

    /// Scalar fields in display order.
    pub fn facts(&self) -> Vec<Fact> {
        match self {
            Primary::Character(c) => vec![
                fact("Height", format!("{} cm", c.height)),
                fact("Mass", format!("{} kg", c.mass)),
                fact("Hair color", &c.hair_color),
                fact("Skin color", &c.skin_color),
                fact("Eye color", &c.eye_color),
                fact("Birth year", &c.birth_year),
                fact("Gender", &c.gender),
            ],
            Primary::Film(f) => vec![
                fact("Episode", f.episode_id.to_string()),
                fact("Release date", &f.release_date),
                fact("Director", &f.director),
                fact("Producer", &f.producer),
                fact("Synopsis", f.opening_crawl.split_whitespace().collect::<Vec<_>>().join(" ")),
            ],
            Primary::Starship(s) => vec![
                fact("Model", &s.model),
                fact("Manufacturer", &s.manufacturer),
                fact("Class", &s.starship_class),
                fact("Price", credits(&s.cost_in_credits)),
                fact("Speed", format!("{} km/h", s.max_atmosphering_speed)),
                fact("Hyperdrive rating", &s.hyperdrive_rating),
                fact("MGLT", &s.mglt),
                fact("Length", format!("{} m", s.length)),
                fact("Cargo capacity", format!("{} kg", s.cargo_capacity)),
                fact("Crew", &s.crew),
                fact("Passengers", &s.passengers),
            ],
            Primary::Vehicle(v) => vec![
                fact("Model", &v.model),
                fact("Manufacturer", &v.manufacturer),
                fact("Class", &v.vehicle_class),
                fact("Price", credits(&v.cost_in_credits)),
                fact("Speed", format!("{} km/h", v.max_atmosphering_speed)),
                fact("Length", format!("{} m", v.length)),
                fact("Cargo capacity", format!("{} kg", v.cargo_capacity)),
                fact("Crew", &v.crew),
                fact("Passengers", &v.passengers),
            ],
        }
    }

    /// Resolve every relation of this record.
    pub async fn resolve(&self, client: &SwapiClient) -> Aggregation<RelatedBundle> {
        match self {
            Primary::Character(c) => aggregate(client, Some(c))
                .await
                .map(RelatedBundle::Character),
            Primary::Film(f) => aggregate(client, Some(f)).await.map(RelatedBundle::Film),
            Primary::Starship(s) => aggregate(client, Some(s)).await.map(RelatedBundle::Craft),
            Primary::Vehicle(v) => aggregate(client, Some(v)).await.map(RelatedBundle::Craft),
        }
    }
}

fn credits(cost: &str) -> String {
    match cost {
        "" | "unknown" => cost.to_string(),
        _ => format!("{cost} credits"),
    }
}

/// Resolved relations for any primary kind.
#[derive(Debug, Clone, PartialEq)]
pub enum RelatedBundle {
    Character(CharacterRelations),
    Film(FilmRelations),
    Craft(CraftRelations),
}

/// One titled list of related records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedGroup {
    pub title: &'static str,
    pub entries: Vec<ListEntry>,
    /// Shown instead of the list when it is empty.
    pub empty_message: &'static str,
}

fn group<R: Resource>(title: &'static str, records: &[R]) -> RelatedGroup {
    RelatedGroup {
        title,
        entries: records.iter().map(ListEntry::from_resource).collect(),
        empty_message: "None",
    }
}

impl RelatedBundle {
    pub fn groups(&self) -> Vec<RelatedGroup> {
        match self {
            RelatedBundle::Character(r) => vec![
                group("Films", &r.films),
                group("Species", &r.species),
                group("Starships", &r.starships),
                group("Vehicles", &r.vehicles),
            ],
            RelatedBundle::Film(r) => vec![
                group("Characters", &r.characters),
                group("Planets", &r.planets),
                group("Vehicles", &r.vehicles),
                group("Starships", &r.starships),
                group("Species", &r.species),
            ],
            RelatedBundle::Craft(r) => vec![
                group("Films", &r.films),
                RelatedGroup {
                    empty_message: "No pilots available",
                    ..group("Pilots", &r.pilots)
                },
            ],
        }
    }
}

/// Whether a collection has its own detail screen to navigate to.
pub fn has_detail_screen(collection: Collection) -> bool {
    matches!(
        collection,
        Collection::People | Collection::Films | Collection::Starships | Collection::Vehicles
    )
}

/// State for one detail screen.
#[derive(Debug, Clone)]
pub struct DetailView {
    target: EntityRef,
    primary: Option<Primary>,
    loading: bool,
    related: Option<Aggregation<RelatedBundle>>,
}

impl DetailView {
    /// A screen for `target`, waiting on its primary fetch.
    pub fn new(target: EntityRef) -> Self {
        Self {
            target,
            primary: None,
            loading: true,
            related: None,
        }
    }

    pub fn target(&self) -> &EntityRef {
        &self.target
    }

    pub fn primary(&self) -> Option<&Primary> {
        self.primary.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_related_loading(&self) -> bool {
        self.related.as_ref().is_some_and(|r| r.loading)
    }

    pub fn related(&self) -> Option<&Aggregation<RelatedBundle>> {
        self.related.as_ref()
    }

    pub fn image_url(&self, image_base: &str) -> String {
        image_url_with_base(image_base, self.target.collection, &self.target.id)
    }

    /// Store the primary record; its relations are now pending.
    pub fn apply_primary(&mut self, primary: Primary) {
        self.primary = Some(primary);
        self.loading = false;
        self.related = Some(Aggregation::pending_with(RelatedBundle::empty_for(
            self.target.collection,
        )));
    }

    pub fn fail_primary(&mut self) {
        self.loading = false;
    }

    pub fn apply_related(&mut self, related: Aggregation<RelatedBundle>) {
        self.related = Some(related);
    }

    /// Groups to render; empty until relations settle.
    pub fn groups(&self) -> Vec<RelatedGroup> {
        match &self.related {
            Some(r) if !r.loading => r.bundle.groups(),
            _ => Vec::new(),
        }
    }
}

impl RelatedBundle {
    fn empty_for(collection: Collection) -> Self {
        match collection {
            Collection::Films => RelatedBundle::Film(FilmRelations::default()),
            Collection::Starships | Collection::Vehicles => {
                RelatedBundle::Craft(CraftRelations::default())
            }
            _ => RelatedBundle::Character(CharacterRelations::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn falcon() -> Starship {
        Starship {
            name: "Millennium Falcon".into(),
            model: "YT-1300 light freighter".into(),
            cost_in_credits: "100000".into(),
            url: "https://swapi.dev/api/starships/10/".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_starship_facts() {
        let facts = Primary::Starship(falcon()).facts();
        assert_eq!(facts[0], fact("Model", "YT-1300 light freighter"));
        let price = facts.iter().find(|f| f.label == "Price").unwrap();
        assert_eq!(price.value, "100000 credits");
    }

    #[test]
    fn test_unknown_cost_has_no_unit() {
        assert_eq!(credits("unknown"), "unknown");
        assert_eq!(credits(""), "");
    }

    #[test]
    fn test_empty_pilots_message() {
        let groups = RelatedBundle::Craft(CraftRelations::default()).groups();
        assert_eq!(groups[1].title, "Pilots");
        assert!(groups[1].entries.is_empty());
        assert_eq!(groups[1].empty_message, "No pilots available");
    }

    #[test]
    fn test_detail_view_lifecycle() {
        let mut view = DetailView::new(EntityRef::new(Collection::Starships, "10"));
        assert!(view.is_loading());
        assert!(!view.is_related_loading());

        view.apply_primary(Primary::Starship(falcon()));
        assert!(!view.is_loading());
        assert!(view.is_related_loading());
        assert!(view.groups().is_empty());

        view.apply_related(Aggregation {
            bundle: RelatedBundle::Craft(CraftRelations::default()),
            loading: false,
            failed: 0,
        });
        assert!(!view.is_related_loading());
        assert_eq!(view.groups().len(), 2);
        assert_eq!(
            view.image_url("https://starwars-visualguide.com/assets/img"),
            "https://starwars-visualguide.com/assets/img/starships/10.jpg"
        );
    }

    #[test]
    fn test_failed_primary_stops_loading() {
        let mut view = DetailView::new(EntityRef::new(Collection::Films, "99"));
        view.fail_primary();
        assert!(!view.is_loading());
        assert!(view.primary().is_none());
    }

    #[test]
    fn test_favourite_only_for_characters_and_starships() {
        let (kind, record) = Primary::Starship(falcon()).favourite().unwrap();
        assert_eq!(kind, FavoriteKind::Starship);
        assert_eq!(record, FavouriteRecord::new("10", "Millennium Falcon"));
        assert!(Primary::Film(Film::default()).favourite().is_none());
    }
}
