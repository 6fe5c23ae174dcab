//! Minimal Star Wars API client.
//!
//! This crate provides a focused client for the public Star Wars reference API with:
//! - Typed schemas for people, films, starships, vehicles, planets and species
//! - Paginated listings and server-side search
//! - A pluggable [`Transport`] so callers can run without the network

mod entity;

pub use entity::{
    Character, Collection, Film, Page, Planet, Resource, Species, Starship, Vehicle,
};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

const API_BASE: &str = "https://swapi.dev/api";

/// Errors that can occur when using the API client.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}) for {url}")]
    Api { status: u16, url: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// True when the server reported that the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Api { status: 404, .. })
    }
}

/// Something that can GET a URL and hand back its JSON body.
///
/// The HTTP implementation is [`HttpTransport`]; tests plug in an in-memory one.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<serde_json::Value, Error>;
}

/// Transport backed by a `reqwest` client.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, url: &str) -> Result<serde_json::Value, Error> {
        tracing::debug!(url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            tracing::debug!(url, status, "request failed");
            return Err(Error::Api {
                status,
                url: url.to_string(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| Error::Parse(e.to_string()))
    }
}

/// Star Wars API client.
#[derive(Clone)]
pub struct SwapiClient {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl SwapiClient {
    /// Create a client talking to the public API over HTTP.
    pub fn new() -> Result<Self, Error> {
        Ok(Self::with_transport(Arc::new(HttpTransport::new()?)))
    }

    /// Create a client over an arbitrary transport, pointed at the public API.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base_url: API_BASE.to_string(),
        }
    }

    /// Create an HTTP client, honouring `SWAPI_BASE_URL` when it is set.
    pub fn from_env() -> Result<Self, Error> {
        let client = Self::new()?;
        Ok(match std::env::var("SWAPI_BASE_URL") {
            Ok(base) if !base.trim().is_empty() => client.with_base_url(base),
            _ => client,
        })
    }

    /// Point the client at a different API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch an absolute URL and decode it into `T`.
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, Error> {
        let value = self.transport.get_json(url).await?;
        serde_json::from_value(value).map_err(|e| {
            tracing::warn!(url, error = %e, "unexpected response shape");
            Error::Parse(e.to_string())
        })
    }

    /// `{base}/{collection}/`
    pub fn collection_url(&self, collection: Collection) -> String {
        format!("{}/{}/", self.base_url, collection.path())
    }

    /// `{base}/{collection}/?page={page}`
    pub fn page_url(&self, collection: Collection, page: u32) -> String {
        format!("{}?page={page}", self.collection_url(collection))
    }

    /// `{base}/{collection}/?search={query}`, with the query form-encoded.
    pub fn search_url(&self, collection: Collection, query: &str) -> Result<String, Error> {
        let url = reqwest::Url::parse_with_params(
            &self.collection_url(collection),
            &[("search", query)],
        )
        .map_err(|e| Error::Config(format!("Invalid base URL: {e}")))?;
        Ok(url.to_string())
    }

    /// `{base}/{collection}/{id}/`
    pub fn resource_url(&self, collection: Collection, id: &str) -> String {
        format!("{}/{}/{id}/", self.base_url, collection.path())
    }

    /// Fetch one server-side page of a collection.
    pub async fn page<T: DeserializeOwned>(
        &self,
        collection: Collection,
        page: u32,
    ) -> Result<Page<T>, Error> {
        self.get(&self.page_url(collection, page)).await
    }

    /// Run a server-side search over a collection.
    pub async fn search<T: DeserializeOwned>(
        &self,
        collection: Collection,
        query: &str,
    ) -> Result<Page<T>, Error> {
        self.get(&self.search_url(collection, query)?).await
    }

    /// Fetch a single resource by its numeric id.
    pub async fn resource<T: DeserializeOwned>(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<T, Error> {
        self.get(&self.resource_url(collection, id)).await
    }

    pub async fn people_page(&self, page: u32) -> Result<Page<Character>, Error> {
        self.page(Collection::People, page).await
    }

    pub async fn search_people(&self, query: &str) -> Result<Page<Character>, Error> {
        self.search(Collection::People, query).await
    }

    pub async fn person(&self, id: &str) -> Result<Character, Error> {
        self.resource(Collection::People, id).await
    }

    pub async fn film(&self, id: &str) -> Result<Film, Error> {
        self.resource(Collection::Films, id).await
    }

    pub async fn starship(&self, id: &str) -> Result<Starship, Error> {
        self.resource(Collection::Starships, id).await
    }

    pub async fn vehicle(&self, id: &str) -> Result<Vehicle, Error> {
        self.resource(Collection::Vehicles, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    struct FixedTransport(HashMap<String, serde_json::Value>);

    #[async_trait]
    impl Transport for FixedTransport {
        async fn get_json(&self, url: &str) -> Result<serde_json::Value, Error> {
            self.0.get(url).cloned().ok_or_else(|| Error::Api {
                status: 404,
                url: url.to_string(),
            })
        }
    }

    fn client_with(entries: Vec<(&str, serde_json::Value)>) -> SwapiClient {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        SwapiClient::with_transport(Arc::new(FixedTransport(map)))
    }

    #[test]
    fn test_url_building() {
        let client = client_with(vec![]).with_base_url("http://localhost:8000/api/");
        assert_eq!(client.base_url(), "http://localhost:8000/api");
        assert_eq!(
            client.page_url(Collection::People, 2),
            "http://localhost:8000/api/people/?page=2"
        );
        assert_eq!(
            client.resource_url(Collection::Starships, "9"),
            "http://localhost:8000/api/starships/9/"
        );
    }

    #[test]
    fn test_search_url_is_encoded() {
        let client = client_with(vec![]);
        assert_eq!(
            client.search_url(Collection::People, "ana").unwrap(),
            "https://swapi.dev/api/people/?search=ana"
        );
        assert_eq!(
            client.search_url(Collection::People, "luke sky&x").unwrap(),
            "https://swapi.dev/api/people/?search=luke+sky%26x"
        );
    }

    #[tokio::test]
    async fn test_people_page_decodes() {
        let client = client_with(vec![(
            "https://swapi.dev/api/people/?page=1",
            json!({
                "count": 82,
                "next": "https://swapi.dev/api/people/?page=2",
                "previous": null,
                "results": [
                    {"name": "Luke Skywalker", "url": "https://swapi.dev/api/people/1/",
                     "films": ["https://swapi.dev/api/films/1/"]}
                ]
            }),
        )]);

        let page = client.people_page(1).await.unwrap();
        assert_eq!(page.count, 82);
        assert!(page.has_next());
        assert!(page.previous.is_none());
        assert_eq!(page.results[0].name, "Luke Skywalker");
        assert_eq!(page.results[0].films.len(), 1);
        assert!(page.results[0].starships.is_empty());
    }

    #[tokio::test]
    async fn test_search_people_decodes_filtered_page() {
        let client = client_with(vec![(
            "https://swapi.dev/api/people/?search=darth+vader",
            json!({
                "count": 1,
                "next": null,
                "previous": null,
                "results": [
                    {"name": "Darth Vader", "url": "https://swapi.dev/api/people/4/"}
                ]
            }),
        )]);

        let page = client.search_people("darth vader").await.unwrap();
        assert_eq!(page.count, 1);
        assert!(!page.has_next());
        assert_eq!(page.results[0].name, "Darth Vader");
        assert!(page.results[0].films.is_empty());
    }

    #[tokio::test]
    async fn test_missing_resource_is_not_found() {
        let client = client_with(vec![]);
        let err = client.film("99").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_shape_mismatch_is_parse_error() {
        let client = client_with(vec![(
            "https://swapi.dev/api/people/?page=1",
            json!({"detail": "nope"}),
        )]);
        let err = client.people_page(1).await.unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
