//! Browser - the primary public API for browsing the dataset.
//!
//! Wraps the API client, both favorites stores and their persistence into a
//! single value that front ends (the TUI and headless mode) drive.

use std::sync::Arc;

use swapi::{Collection, SwapiClient, Transport};
use thiserror::Error;

use crate::aggregate::Aggregation;
use crate::config::BrowserConfig;
use crate::detail::{Primary, RelatedBundle};
use crate::favorites::{FavoriteKind, Favorites, FavouriteRecord};
use crate::list_view::{ListPage, ListQuery};
use crate::persist::{self, PersistError};
use crate::reference::EntityRef;

/// Errors from Browser operations.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("API error: {0}")]
    Api(#[from] swapi::Error),

    #[error("Persistence error: {0}")]
    Persist(#[from] PersistError),

    #[error("{} have no detail screen", .0.title())]
    NoDetailScreen(Collection),
}

/// A browsing session.
pub struct Browser {
    client: SwapiClient,
    favorites: Favorites,
    config: BrowserConfig,
}

impl Browser {
    /// Open a session over HTTP, restoring favorites if a file is configured.
    pub async fn open(config: BrowserConfig) -> Result<Self, BrowserError> {
        let client = SwapiClient::from_env()?;
        Self::with_client(client, config).await
    }

    /// Open a session over a custom transport.
    pub async fn with_transport(
        transport: Arc<dyn Transport>,
        config: BrowserConfig,
    ) -> Result<Self, BrowserError> {
        Self::with_client(SwapiClient::with_transport(transport), config).await
    }

    pub async fn with_client(
        client: SwapiClient,
        config: BrowserConfig,
    ) -> Result<Self, BrowserError> {
        let client = match &config.base_url {
            Some(base) => client.with_base_url(base.clone()),
            None => client,
        };
        let favorites = match &config.favorites_path {
            Some(path) => persist::load_favorites(path).await?,
            None => Favorites::new(),
        };
        tracing::info!(base_url = client.base_url(), "browser ready");
        Ok(Self {
            client,
            favorites,
            config,
        })
    }

    pub fn client(&self) -> &SwapiClient {
        &self.client
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn favorites_mut(&mut self) -> &mut Favorites {
        &mut self.favorites
    }

    /// Flip a record's favorite state. Returns the new membership.
    pub fn toggle_favourite(&mut self, kind: FavoriteKind, record: FavouriteRecord) -> bool {
        self.favorites.store_mut(kind).toggle(record)
    }

    /// Persist favorites if a file is configured. Returns whether anything was written.
    pub async fn save_favorites(&self) -> Result<bool, BrowserError> {
        let Some(path) = &self.config.favorites_path else {
            return Ok(false);
        };
        persist::save_favorites(&self.favorites, path).await?;
        Ok(true)
    }

    /// Run a listing query.
    pub async fn list(
        &self,
        collection: Collection,
        query: &ListQuery,
    ) -> Result<ListPage, BrowserError> {
        Ok(query.fetch(&self.client, collection).await?)
    }

    /// Fetch a primary record and resolve its relations.
    pub async fn detail(
        &self,
        target: &EntityRef,
    ) -> Result<(Primary, Aggregation<RelatedBundle>), BrowserError> {
        let primary = Primary::fetch(&self.client, target).await?;
        let related = primary.resolve(&self.client).await;
        Ok((primary, related))
    }

    pub fn image_url(&self, target: &EntityRef) -> String {
        crate::reference::image_url_with_base(&self.config.image_base, target.collection, &target.id)
    }
}
