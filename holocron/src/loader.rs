//! Background fetches for the event loop.
//!
//! Every fetch runs on its own task and reports back over a channel, tagged
//! with the [`Ticket`] that was current when it started. The loop owns all
//! state and decides whether a result still applies.

use holocron_core::{
    Aggregation, BrowserError, EntityRef, ListPage, ListQuery, Primary, RelatedBundle, Ticket,
};
use swapi::{Collection, SwapiClient};
use tokio::sync::mpsc;

/// A finished fetch.
#[derive(Debug)]
pub enum LoadResult {
    List {
        collection: Collection,
        result: Result<ListPage, swapi::Error>,
    },
    Primary(Result<Primary, BrowserError>),
    Related(Aggregation<RelatedBundle>),
}

#[derive(Debug)]
pub struct Loaded {
    pub ticket: Ticket,
    pub result: LoadResult,
}

pub struct Loader {
    client: SwapiClient,
    tx: mpsc::UnboundedSender<Loaded>,
}

impl Loader {
    pub fn channel(client: SwapiClient) -> (Self, mpsc::UnboundedReceiver<Loaded>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { client, tx }, rx)
    }

    /// Fetch one listing page or search.
    pub fn list(&self, ticket: Ticket, collection: Collection, query: ListQuery) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tracing::debug!(?query, collection = collection.path(), "loading list");
            let result = query.fetch(&client, collection).await;
            let _ = tx.send(Loaded {
                ticket,
                result: LoadResult::List { collection, result },
            });
        });
    }

    /// Fetch a primary record, then its relations. Both results share `ticket`.
    pub fn detail(&self, ticket: Ticket, target: EntityRef) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tracing::debug!(collection = target.collection.path(), id = %target.id, "loading detail");
            let primary = match Primary::fetch(&client, &target).await {
                Ok(primary) => primary,
                Err(e) => {
                    let _ = tx.send(Loaded {
                        ticket,
                        result: LoadResult::Primary(Err(e)),
                    });
                    return;
                }
            };
            let _ = tx.send(Loaded {
                ticket,
                result: LoadResult::Primary(Ok(primary.clone())),
            });
            let related = primary.resolve(&client).await;
            let _ = tx.send(Loaded {
                ticket,
                result: LoadResult::Related(related),
            });
        });
    }
}
