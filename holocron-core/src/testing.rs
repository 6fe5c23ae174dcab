//! Testing utilities.
//!
//! This module provides tools for exercising the browser without the network:
//! - `MockTransport`, an in-memory [`Transport`] with scripted responses
//! - JSON fixture builders shaped like real API records

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use swapi::{Error, SwapiClient, Transport};

/// A scripted reply for one URL.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Json(Value),
    Status(u16),
    NetworkError,
}

#[derive(Debug, Default)]
struct MockState {
    responses: HashMap<String, MockResponse>,
    delays: HashMap<String, Duration>,
    requests: Vec<String>,
}

/// A transport that answers from a table and records every request.
///
/// Unknown URLs answer with a 404. Clones share the same table and log.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Answer `url` with a JSON body.
    pub fn respond(self, url: impl Into<String>, body: Value) -> Self {
        self.state()
            .responses
            .insert(url.into(), MockResponse::Json(body));
        self
    }

    /// Answer `url` with an HTTP error status.
    pub fn status(self, url: impl Into<String>, status: u16) -> Self {
        self.state()
            .responses
            .insert(url.into(), MockResponse::Status(status));
        self
    }

    /// Fail `url` as if the connection dropped.
    pub fn fail(self, url: impl Into<String>) -> Self {
        self.state()
            .responses
            .insert(url.into(), MockResponse::NetworkError);
        self
    }

    /// Hold the reply for `url` back for `delay` (tokio time).
    pub fn delay(self, url: impl Into<String>, delay: Duration) -> Self {
        self.state().delays.insert(url.into(), delay);
        self
    }

    /// Every URL requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.state().requests.clone()
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.state().requests.iter().filter(|r| *r == url).count()
    }

    /// A client wired to this transport.
    pub fn client(&self) -> SwapiClient {
        SwapiClient::with_transport(Arc::new(self.clone()))
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get_json(&self, url: &str) -> Result<Value, Error> {
        let (response, delay) = {
            let mut state = self.state();
            state.requests.push(url.to_string());
            (
                state.responses.get(url).cloned(),
                state.delays.get(url).copied(),
            )
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match response {
            Some(MockResponse::Json(body)) => Ok(body),
            Some(MockResponse::Status(status)) => Err(Error::Api {
                status,
                url: url.to_string(),
            }),
            Some(MockResponse::NetworkError) => Err(Error::Network("connection reset".into())),
            None => Err(Error::Api {
                status: 404,
                url: url.to_string(),
            }),
        }
    }
}

/// Default API root used by fixtures.
pub const BASE: &str = "https://swapi.dev/api";

/// `{BASE}/{collection}/{id}/`
pub fn url(collection: &str, id: u32) -> String {
    format!("{BASE}/{collection}/{id}/")
}

pub fn person(id: u32, name: &str) -> Value {
    json!({
        "name": name,
        "height": "172",
        "mass": "77",
        "gender": "male",
        "films": [],
        "species": [],
        "starships": [],
        "vehicles": [],
        "url": url("people", id),
    })
}

pub fn film(id: u32, title: &str) -> Value {
    json!({
        "title": title,
        "episode_id": id,
        "opening_crawl": "It is a period of civil war.",
        "director": "George Lucas",
        "producer": "Gary Kurtz, Rick McCallum",
        "release_date": "1977-05-25",
        "characters": [],
        "planets": [],
        "starships": [],
        "vehicles": [],
        "species": [],
        "url": url("films", id),
    })
}

pub fn starship(id: u32, name: &str) -> Value {
    json!({
        "name": name,
        "model": "YT-1300 light freighter",
        "manufacturer": "Corellian Engineering Corporation",
        "cost_in_credits": "100000",
        "MGLT": "75",
        "starship_class": "Light freighter",
        "films": [],
        "pilots": [],
        "url": url("starships", id),
    })
}

pub fn vehicle(id: u32, name: &str) -> Value {
    json!({
        "name": name,
        "model": "Digger Crawler",
        "vehicle_class": "wheeled",
        "films": [],
        "pilots": [],
        "url": url("vehicles", id),
    })
}

pub fn planet(id: u32, name: &str) -> Value {
    json!({"name": name, "climate": "arid", "url": url("planets", id)})
}

pub fn species(id: u32, name: &str) -> Value {
    json!({"name": name, "classification": "mammal", "url": url("species", id)})
}

/// A listing page body.
pub fn page(results: Vec<Value>, next: Option<&str>) -> Value {
    json!({
        "count": results.len(),
        "next": next,
        "previous": null,
        "results": results,
    })
}

/// Set `field` on a record to a list of URLs.
pub fn with_links(mut record: Value, field: &str, urls: &[String]) -> Value {
    record[field] = json!(urls);
    record
}
