//! Search debouncing under tokio's paused clock.

use std::time::Duration;

use holocron_core::debounce::SEARCH_DEBOUNCE;
use holocron_core::Debouncer;
use tokio::time::{self, Instant};

#[tokio::test(start_paused = true)]
async fn test_typing_burst_emits_once_after_last_key() {
    let mut debouncer = Debouncer::new(SEARCH_DEBOUNCE);
    let start = Instant::now();

    // Keys at 0ms, 100ms and 200ms.
    for text in ["a", "an", "ana"] {
        debouncer.push(text.to_string(), Instant::now());
        assert_eq!(debouncer.poll(Instant::now()), None);
        time::advance(Duration::from_millis(100)).await;
    }

    let mut emitted = Vec::new();
    while debouncer.is_pending() {
        let deadline = debouncer.deadline().unwrap();
        time::sleep_until(deadline).await;
        if let Some(text) = debouncer.poll(Instant::now()) {
            emitted.push((text, Instant::now() - start));
        }
    }

    assert_eq!(emitted.len(), 1);
    let (text, at) = &emitted[0];
    assert_eq!(text, "ana");
    assert!(*at >= Duration::from_millis(700) && *at < Duration::from_millis(702));
}

#[tokio::test(start_paused = true)]
async fn test_pause_between_bursts_emits_each() {
    let mut debouncer = Debouncer::new(SEARCH_DEBOUNCE);

    debouncer.push("luke", Instant::now());
    time::advance(Duration::from_millis(600)).await;
    assert_eq!(debouncer.poll(Instant::now()), Some("luke"));

    debouncer.push("leia", Instant::now());
    time::advance(Duration::from_millis(499)).await;
    assert_eq!(debouncer.poll(Instant::now()), None);
    time::advance(Duration::from_millis(1)).await;
    assert_eq!(debouncer.poll(Instant::now()), Some("leia"));
    assert!(!debouncer.is_pending());
}
