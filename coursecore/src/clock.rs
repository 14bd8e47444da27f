//! Injected time source.
//!
//! Aggregate mutators take [`Timestamp`] values from their caller instead of
//! reading the wall clock inline, so a test can drive time explicitly. The
//! service layer owns a [`Clock`] and threads its output through.

use crate::types::Timestamp;
use std::sync::{Arc, Mutex};

/// A source of timestamps for audit fields.
pub trait Clock: Send + Sync {
    /// Returns the current moment according to this clock.
    fn now(&self) -> Timestamp;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Deterministic clock for tests: returns a fixed instant until advanced.
#[derive(Debug, Clone)]
pub struct FixedClock {
    current: Arc<Mutex<Timestamp>>,
}

impl FixedClock {
    /// Creates a clock pinned at the given instant.
    pub fn new(at: Timestamp) -> Self {
        Self {
            current: Arc::new(Mutex::new(at)),
        }
    }

    /// Moves the clock to a new instant.
    pub fn set(&self, at: Timestamp) {
        *self.current.lock().expect("clock mutex poisoned") = at;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.current.lock().expect("clock mutex poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn fixed_clock_returns_the_pinned_instant() {
        let at = Timestamp::new(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
        let clock = FixedClock::new(at);
        assert_eq!(clock.now(), at);
        assert_eq!(clock.now(), at);
    }

    #[test]
    fn fixed_clock_can_be_advanced() {
        let start = Timestamp::new(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
        let later = Timestamp::new(Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).unwrap());
        let clock = FixedClock::new(start);
        clock.set(later);
        assert_eq!(clock.now(), later);
    }

    #[test]
    fn clones_share_the_same_instant() {
        let start = Timestamp::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let later = Timestamp::new(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        let clock = FixedClock::new(start);
        let clone = clock.clone();
        clock.set(later);
        assert_eq!(clone.now(), later);
    }
}
