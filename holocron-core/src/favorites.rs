//! Favorite characters and starships.
//!
//! Each store is a reducer-style container: every change goes through
//! [`FavoritesAction`] and the pure [`reduce`] function. Readers either borrow
//! the current records or subscribe to a `watch` channel that receives the new
//! state after every committed change.

use serde::{Deserialize, Serialize};
use swapi::{Collection, Resource};
use tokio::sync::watch;

use crate::reference::resource_id;

/// A user-local favorite mark. Identity is the `(id, name)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FavouriteRecord {
    pub id: String,
    pub name: String,
}

impl FavouriteRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Build a record from an API resource, using the id embedded in its URL.
    pub fn from_resource<R: Resource>(resource: &R) -> Option<Self> {
        let id = resource_id(resource.url())?;
        Some(Self::new(id, resource.name()))
    }

    fn matches(&self, other: &FavouriteRecord) -> bool {
        self.id == other.id && self.name == other.name
    }
}

/// Which of the two favorites stores a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FavoriteKind {
    Character,
    Starship,
}

impl FavoriteKind {
    pub fn collection(self) -> Collection {
        match self {
            FavoriteKind::Character => Collection::People,
            FavoriteKind::Starship => Collection::Starships,
        }
    }

    /// The store backing a collection's favorites toggle, if it has one.
    pub fn for_collection(collection: Collection) -> Option<Self> {
        match collection {
            Collection::People => Some(FavoriteKind::Character),
            Collection::Starships => Some(FavoriteKind::Starship),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "character" | "characters" | "person" | "people" => Some(FavoriteKind::Character),
            "starship" | "starships" | "ship" => Some(FavoriteKind::Starship),
            _ => None,
        }
    }
}

/// A change to a favorites store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoritesAction {
    /// Append unless an identical `(id, name)` record is already present.
    Add(FavouriteRecord),
    /// Delete records matching both id and name.
    Remove(FavouriteRecord),
}

/// Compute the next state for an action.
pub fn reduce(state: &[FavouriteRecord], action: &FavoritesAction) -> Vec<FavouriteRecord> {
    match action {
        FavoritesAction::Add(record) => {
            if state.iter().any(|r| r.matches(record)) {
                return state.to_vec();
            }
            let mut next = state.to_vec();
            next.push(record.clone());
            next
        }
        FavoritesAction::Remove(record) => state
            .iter()
            .filter(|r| r.name != record.name || r.id != record.id)
            .cloned()
            .collect(),
    }
}

/// One favorites container.
#[derive(Debug)]
pub struct FavoritesStore {
    kind: FavoriteKind,
    records: Vec<FavouriteRecord>,
    tx: watch::Sender<Vec<FavouriteRecord>>,
}

impl FavoritesStore {
    pub fn new(kind: FavoriteKind) -> Self {
        Self::with_records(kind, Vec::new())
    }

    /// Create a store seeded with records (duplicates are collapsed).
    pub fn with_records(kind: FavoriteKind, records: Vec<FavouriteRecord>) -> Self {
        let records = records
            .into_iter()
            .fold(Vec::new(), |state, r| reduce(&state, &FavoritesAction::Add(r)));
        let (tx, _rx) = watch::channel(records.clone());
        Self { kind, records, tx }
    }

    /// Apply an action. Returns true when the state changed.
    pub fn dispatch(&mut self, action: FavoritesAction) -> bool {
        let next = reduce(&self.records, &action);
        if next.len() == self.records.len() {
            return false;
        }
        tracing::debug!(kind = ?self.kind, ?action, "favorites changed");
        self.records = next;
        self.tx.send_replace(self.records.clone());
        true
    }

    pub fn add(&mut self, record: FavouriteRecord) -> bool {
        self.dispatch(FavoritesAction::Add(record))
    }

    pub fn remove(&mut self, record: FavouriteRecord) -> bool {
        self.dispatch(FavoritesAction::Remove(record))
    }

    /// Add the record if absent, remove it if present. Returns the new membership.
    pub fn toggle(&mut self, record: FavouriteRecord) -> bool {
        if self.contains(&record) {
            self.remove(record);
            false
        } else {
            self.add(record);
            true
        }
    }

    pub fn contains(&self, record: &FavouriteRecord) -> bool {
        self.records.iter().any(|r| r.matches(record))
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.records.iter().any(|r| r.name == name)
    }

    pub fn records(&self) -> &[FavouriteRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Receive the full record list after every committed change.
    pub fn subscribe(&self) -> watch::Receiver<Vec<FavouriteRecord>> {
        self.tx.subscribe()
    }
}

/// The character and starship stores, created together and passed explicitly.
#[derive(Debug)]
pub struct Favorites {
    pub characters: FavoritesStore,
    pub starships: FavoritesStore,
}

impl Default for Favorites {
    fn default() -> Self {
        Self::new()
    }
}

impl Favorites {
    pub fn new() -> Self {
        Self {
            characters: FavoritesStore::new(FavoriteKind::Character),
            starships: FavoritesStore::new(FavoriteKind::Starship),
        }
    }

    pub fn store(&self, kind: FavoriteKind) -> &FavoritesStore {
        match kind {
            FavoriteKind::Character => &self.characters,
            FavoriteKind::Starship => &self.starships,
        }
    }

    pub fn store_mut(&mut self, kind: FavoriteKind) -> &mut FavoritesStore {
        match kind {
            FavoriteKind::Character => &mut self.characters,
            FavoriteKind::Starship => &mut self.starships,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str, name: &str) -> FavouriteRecord {
        FavouriteRecord::new(id, name)
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut store = FavoritesStore::new(FavoriteKind::Character);
        assert!(store.add(rec("1", "Luke Skywalker")));
        let once = store.records().to_vec();
        assert!(!store.add(rec("1", "Luke Skywalker")));
        assert_eq!(store.records(), once.as_slice());
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut store = FavoritesStore::new(FavoriteKind::Starship);
        store.add(rec("10", "Millennium Falcon"));
        store.add(rec("9", "Death Star"));
        store.add(rec("12", "X-wing"));
        let names: Vec<_> = store.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Millennium Falcon", "Death Star", "X-wing"]);
    }

    #[test]
    fn test_add_same_name_different_id_is_distinct() {
        let mut store = FavoritesStore::new(FavoriteKind::Character);
        store.add(rec("1", "A"));
        store.add(rec("2", "A"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_remove_only_exact_pair() {
        let mut store = FavoritesStore::new(FavoriteKind::Character);
        store.add(rec("1", "A"));
        store.add(rec("2", "A"));
        store.remove(rec("1", "A"));
        assert_eq!(store.records(), [rec("2", "A")].as_slice());
    }

    #[test]
    fn test_remove_partial_match_keeps_record() {
        let state = vec![rec("1", "A"), rec("2", "B")];
        let next = reduce(&state, &FavoritesAction::Remove(rec("1", "B")));
        assert_eq!(next, state);
    }

    #[test]
    fn test_toggle() {
        let mut store = FavoritesStore::new(FavoriteKind::Starship);
        assert!(store.toggle(rec("10", "Millennium Falcon")));
        assert!(store.contains(&rec("10", "Millennium Falcon")));
        assert!(!store.toggle(rec("10", "Millennium Falcon")));
        assert!(store.is_empty());
    }

    #[test]
    fn test_contains_name_ignores_id() {
        let mut store = FavoritesStore::new(FavoriteKind::Character);
        store.add(rec("1", "Luke Skywalker"));
        assert!(store.contains_name("Luke Skywalker"));
        assert!(!store.contains(&rec("2", "Luke Skywalker")));
        assert!(!store.contains_name("Leia Organa"));
    }

    #[test]
    fn test_subscribers_see_committed_changes_only() {
        let mut store = FavoritesStore::new(FavoriteKind::Character);
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        store.add(rec("1", "Luke Skywalker"));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);

        store.add(rec("1", "Luke Skywalker"));
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_with_records_collapses_duplicates() {
        let store = FavoritesStore::with_records(
            FavoriteKind::Character,
            vec![rec("1", "A"), rec("1", "A"), rec("2", "B")],
        );
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_from_resource_uses_url_id() {
        let ship = swapi::Starship {
            name: "X-wing".to_string(),
            url: "https://swapi.dev/api/starships/12/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            FavouriteRecord::from_resource(&ship),
            Some(rec("12", "X-wing"))
        );
    }

    #[test]
    fn test_stores_are_independent() {
        let mut favorites = Favorites::new();
        favorites.store_mut(FavoriteKind::Character).add(rec("1", "A"));
        assert_eq!(favorites.characters.len(), 1);
        assert!(favorites.starships.is_empty());
    }

    #[test]
    fn test_kind_lookup() {
        assert_eq!(
            FavoriteKind::for_collection(Collection::People),
            Some(FavoriteKind::Character)
        );
        assert_eq!(FavoriteKind::for_collection(Collection::Films), None);
        assert_eq!(FavoriteKind::parse("Ship"), Some(FavoriteKind::Starship));
    }
}
