//! Discarding responses that arrive after their screen moved on.
//!
//! Loads are never cancelled. Instead each one carries the [`Ticket`] that was
//! current when it started, and the result is applied only if that ticket is
//! still current when it comes back.

/// Identifies one load generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct LoadGuard {
    generation: u64,
}

impl LoadGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, invalidating every earlier ticket.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        Ticket(self.generation)
    }

    pub fn current(&self) -> Ticket {
        Ticket(self.generation)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }

    /// Pass `value` through only if `ticket` is still current.
    pub fn accept<T>(&self, ticket: Ticket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            tracing::debug!(
                ticket = ticket.0,
                current = self.generation,
                "dropping stale response"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_invalidates_earlier_tickets() {
        let mut guard = LoadGuard::new();
        let first = guard.begin();
        assert!(guard.is_current(first));

        let second = guard.begin();
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
        assert_eq!(guard.current(), second);
    }

    #[test]
    fn test_accept_drops_stale() {
        let mut guard = LoadGuard::new();
        let old = guard.begin();
        let new = guard.begin();
        assert_eq!(guard.accept(old, "late"), None);
        assert_eq!(guard.accept(new, "fresh"), Some("fresh"));
    }
}
