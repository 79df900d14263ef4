use std::cell::Cell;
use std::rc::Rc;

/// Monotonic request counter. Each fetch takes a ticket before it starts and
/// only applies its response while that ticket is still the latest one.
#[derive(Clone, Debug, Default)]
pub struct RequestGeneration {
    current: Rc<Cell<u64>>,
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> u64 {
        let ticket = self.current.get().wrapping_add(1);
        self.current.set(ticket);
        ticket
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.current.get() == ticket
    }

    /// Makes every outstanding ticket stale without starting a new request.
    pub fn invalidate(&self) {
        self.next();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_ticket_is_current() {
        let generation = RequestGeneration::new();
        let first = generation.next();
        let second = generation.next();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }

    #[test]
    fn clones_share_the_counter() {
        let generation = RequestGeneration::new();
        let shared = generation.clone();
        let ticket = generation.next();
        shared.invalidate();
        assert!(!generation.is_current(ticket));
    }
}
