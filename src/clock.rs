//! Clock sources
//!
//! Expiration timestamps are absolute epoch milliseconds, compared against a [`Clock`].

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// Millisecond time source
pub trait Clock: Send + Sync {
    /// Current time in milliseconds
    fn millis(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    /// Create a clock reading `millis`
    pub fn new(millis: i64) -> Self {
        Self {
            now: AtomicI64::new(millis),
        }
    }

    /// Set the current reading
    pub fn set(&self, millis: i64) {
        self.now.store(millis, Ordering::SeqCst);
    }

    /// Move forward by `millis`
    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(1_000);
        assert_eq!(clock.millis(), 1_000);

        clock.advance(500);
        assert_eq!(clock.millis(), 1_500);

        clock.set(42);
        assert_eq!(clock.millis(), 42);
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let clock = SystemClock;
        let first = clock.millis();
        assert!(first > 0);
        assert!(clock.millis() >= first);
    }
}
