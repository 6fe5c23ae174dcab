//! Related-entity resolution against a scripted transport.

use std::time::Duration;

use holocron_core::aggregate::{aggregate, Aggregation, CraftRelations, FilmRelations};
use holocron_core::testing::{self, url, MockTransport};
use swapi::{Film, Starship};

fn decode<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> T {
    serde_json::from_value(value).expect("fixture decodes")
}

#[tokio::test]
async fn test_one_failure_out_of_three_still_completes() {
    let pilots = vec![url("people", 1), url("people", 2), url("people", 3)];
    let transport = MockTransport::new()
        .respond(url("people", 1), testing::person(1, "Luke Skywalker"))
        .fail(url("people", 2))
        .respond(url("people", 3), testing::person(3, "Han Solo"));
    let client = transport.client();

    let ship: Starship = decode(testing::with_links(
        testing::starship(10, "Millennium Falcon"),
        "pilots",
        &pilots,
    ));

    let result = aggregate(&client, Some(&ship)).await;

    assert!(!result.loading);
    assert_eq!(result.failed, 1);
    let names: Vec<_> = result.bundle.pilots.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Luke Skywalker", "Han Solo"]);
    assert_eq!(transport.requests().len(), 3);
}

#[tokio::test]
async fn test_missing_primary_fetches_nothing() {
    let transport = MockTransport::new();
    let client = transport.client();

    let result: Aggregation<CraftRelations> = aggregate::<Starship>(&client, None).await;

    assert!(!result.loading);
    assert!(result.bundle.films.is_empty());
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_categories_keep_url_order_and_share_fetches() {
    let luke = url("people", 1);
    let leia = url("people", 5);
    let tatooine = url("planets", 1);

    let film = testing::with_links(testing::film(1, "A New Hope"), "characters", &[leia.clone(), luke.clone()]);
    let film = testing::with_links(film, "planets", &[tatooine.clone()]);
    // The same URL listed twice is fetched once.
    let film: Film = decode(testing::with_links(film, "species", &[luke.clone(), luke.clone()]));

    let transport = MockTransport::new()
        .respond(&luke, testing::person(1, "Luke Skywalker"))
        .respond(&leia, testing::person(5, "Leia Organa"))
        .respond(&tatooine, testing::planet(1, "Tatooine"));
    let client = transport.client();

    let result: Aggregation<FilmRelations> = aggregate(&client, Some(&film)).await;

    let names: Vec<_> = result
        .bundle
        .characters
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, ["Leia Organa", "Luke Skywalker"]);
    assert_eq!(result.bundle.planets[0].name, "Tatooine");
    assert_eq!(transport.request_count(&luke), 1);
    assert_eq!(transport.requests().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_fetches_run_concurrently() {
    let films = vec![url("films", 1), url("films", 2), url("films", 3)];
    let mut transport = MockTransport::new();
    for (i, u) in films.iter().enumerate() {
        transport = transport
            .respond(u, testing::film(i as u32 + 1, "Film"))
            .delay(u, Duration::from_millis(300));
    }
    let client = transport.client();
    let ship: Starship = decode(testing::with_links(
        testing::starship(10, "Millennium Falcon"),
        "films",
        &films,
    ));

    let start = tokio::time::Instant::now();
    let result = aggregate(&client, Some(&ship)).await;
    let elapsed = start.elapsed();

    assert_eq!(result.bundle.films.len(), 3);
    assert!(elapsed < Duration::from_millis(600), "took {elapsed:?}");
}
