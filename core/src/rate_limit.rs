//! Call-frequency limiters for scroll and resize handlers
//!
//! Both limiters are clock-injected: callers pass `now_ms` (the UI feeds
//! `performance.now()`), so the same logic runs in the browser and in tests.

/// Leading-edge throttle: the first call fires, later calls are dropped until
/// `interval_ms` has elapsed since the last fired call.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval_ms: f64,
    last_fired: Option<f64>,
}

impl Throttle {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms as f64,
            last_fired: None,
        }
    }

    /// Whether a call at `now_ms` would be admitted, without recording it.
    pub fn is_open(&self, now_ms: f64) -> bool {
        !matches!(self.last_fired, Some(last) if now_ms - last < self.interval_ms)
    }

    /// Returns true if the call at `now_ms` should run.
    pub fn admit(&mut self, now_ms: f64) -> bool {
        if !self.is_open(now_ms) {
            return false;
        }
        self.last_fired = Some(now_ms);
        true
    }

    pub fn reset(&mut self) {
        self.last_fired = None;
    }
}

/// Handle for one scheduled debounce callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket(u64);

/// Trailing-edge debounce.
///
/// Every `trigger` supersedes the previous one. The caller sleeps for
/// [`Debounce::wait_ms`] and then calls [`Debounce::fire`] with its ticket;
/// only the latest ticket fires, and only once.
#[derive(Debug, Clone)]
pub struct Debounce {
    wait_ms: u32,
    generation: u64,
    pending: bool,
}

impl Debounce {
    pub fn new(wait_ms: u32) -> Self {
        Self {
            wait_ms,
            generation: 0,
            pending: false,
        }
    }

    pub fn wait_ms(&self) -> u32 {
        self.wait_ms
    }

    pub fn trigger(&mut self) -> DebounceTicket {
        self.generation += 1;
        self.pending = true;
        DebounceTicket(self.generation)
    }

    /// Consume a ticket after the wait. True only for the most recent ticket.
    pub fn fire(&mut self, ticket: DebounceTicket) -> bool {
        if self.pending && ticket.0 == self.generation {
            self.pending = false;
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Drop any scheduled call.
    pub fn cancel(&mut self) {
        self.pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throttle_fires_leading_call_and_drops_within_interval() {
        let mut throttle = Throttle::new(100);
        assert!(throttle.admit(0.0));
        assert!(!throttle.admit(50.0));
        assert!(!throttle.admit(99.9));
        assert!(throttle.admit(100.0));
        assert!(!throttle.admit(150.0));
        assert!(throttle.admit(250.0));
    }

    #[test]
    fn throttle_reset_allows_immediate_call() {
        let mut throttle = Throttle::new(100);
        assert!(throttle.admit(10.0));
        throttle.reset();
        assert!(throttle.admit(11.0));
    }

    #[test]
    fn debounce_only_latest_ticket_fires() {
        let mut debounce = Debounce::new(250);
        let first = debounce.trigger();
        let second = debounce.trigger();
        assert!(!debounce.fire(first));
        assert!(debounce.fire(second));
        assert!(!debounce.fire(second), "a ticket fires at most once");
        assert!(!debounce.is_pending());
    }

    #[test]
    fn debounce_cancel_drops_pending_call() {
        let mut debounce = Debounce::new(250);
        let ticket = debounce.trigger();
        debounce.cancel();
        assert!(!debounce.fire(ticket));
    }
}
