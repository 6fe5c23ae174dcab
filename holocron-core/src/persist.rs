//! Favorites persistence.
//!
//! Favorites live in memory for the session. When a favorites file is
//! configured they are also written to and restored from pretty-printed JSON.

use crate::favorites::{FavoriteKind, Favorites, FavoritesStore, FavouriteRecord};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tokio::fs;

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Current favorites file version.
const SAVE_VERSION: u32 = 1;

/// Both favorites stores as written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedFavorites {
    /// Save format version for compatibility checking.
    pub version: u32,

    /// When the file was written (seconds since the Unix epoch).
    pub saved_at: String,

    #[serde(default)]
    pub characters: Vec<FavouriteRecord>,

    #[serde(default)]
    pub starships: Vec<FavouriteRecord>,
}

impl SavedFavorites {
    /// Snapshot the current stores.
    pub fn from_favorites(favorites: &Favorites) -> Self {
        Self {
            version: SAVE_VERSION,
            saved_at: timestamp_now(),
            characters: favorites.characters.records().to_vec(),
            starships: favorites.starships.records().to_vec(),
        }
    }

    /// Rebuild the stores in saved order.
    pub fn into_favorites(self) -> Favorites {
        Favorites {
            characters: FavoritesStore::with_records(FavoriteKind::Character, self.characters),
            starships: FavoritesStore::with_records(FavoriteKind::Starship, self.starships),
        }
    }

    /// Save to a JSON file.
    pub async fn save_json(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).await?;
        tracing::info!(
            path = %path.display(),
            characters = self.characters.len(),
            starships = self.starships.len(),
            "favorites saved"
        );
        Ok(())
    }

    /// Load from a JSON file.
    pub async fn load_json(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let content = fs::read_to_string(path).await?;
        let saved: Self = serde_json::from_str(&content)?;

        if saved.version != SAVE_VERSION {
            return Err(PersistError::VersionMismatch {
                expected: SAVE_VERSION,
                found: saved.version,
            });
        }

        Ok(saved)
    }
}

/// Load favorites from `path`, starting empty if the file does not exist yet.
pub async fn load_favorites(path: impl AsRef<Path>) -> Result<Favorites, PersistError> {
    let path = path.as_ref();
    match SavedFavorites::load_json(path).await {
        Ok(saved) => {
            tracing::info!(path = %path.display(), "favorites loaded");
            Ok(saved.into_favorites())
        }
        Err(PersistError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            Ok(Favorites::new())
        }
        Err(e) => Err(e),
    }
}

/// Write both stores to `path`.
pub async fn save_favorites(
    favorites: &Favorites,
    path: impl AsRef<Path>,
) -> Result<(), PersistError> {
    SavedFavorites::from_favorites(favorites).save_json(path).await
}

fn timestamp_now() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}", now.as_secs())
}
