//! Time-based coalescing of rapid input.
//!
//! Each [`Debouncer::push`] cancels whatever was pending and restarts the
//! quiet-period timer. Only when the timer expires does [`Debouncer::poll`]
//! hand out the most recent value.

use std::time::Duration;

use tokio::time::Instant;

/// Quiet period before a search is issued.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Replace the pending value and restart the timer from `now`.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.window));
    }

    /// Take the pending value if its timer has expired by `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((_, deadline)) if now >= deadline => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// When the pending value fires, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending value without firing it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_last_value_fires() {
        let start = Instant::now();
        let ms = Duration::from_millis;
        let mut d = Debouncer::default();

        d.push("a", start);
        d.push("an", start + ms(100));
        d.push("ana", start + ms(200));

        assert_eq!(d.poll(start + ms(600)), None);
        assert_eq!(d.deadline(), Some(start + ms(700)));
        assert_eq!(d.poll(start + ms(700)), Some("ana"));
        assert_eq!(d.poll(start + ms(2000)), None);
    }

    #[test]
    fn test_cancel_drops_pending() {
        let start = Instant::now();
        let mut d = Debouncer::new(Duration::from_millis(50));
        d.push(1, start);
        assert!(d.is_pending());
        assert_eq!(d.cancel(), Some(1));
        assert_eq!(d.poll(start + Duration::from_secs(1)), None);
    }
}
