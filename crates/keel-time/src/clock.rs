//! Clock sources for timed values

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Millisecond clock
/// INVARIANT: `now_ms` MUST be monotonically non-decreasing
pub trait Clock {
    fn now_ms(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

/// Wall-independent clock anchored at construction
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    /// Reference to monotonic OS clock
    reference: Instant,
}

impl MonotonicClock {
    /// Create a clock reading zero now
    pub fn new() -> Self {
        MonotonicClock {
            reference: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.reference.elapsed()
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Hand-driven clock for deterministic tests and replays
///
/// Clones share the same time source.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(ms: u64) -> Self {
        ManualClock {
            now: Arc::new(AtomicU64::new(ms)),
        }
    }

    /// Advance by `ms`, returning the new time
    pub fn advance(&self, ms: u64) -> u64 {
        let previous = self.now.fetch_add(ms, Ordering::SeqCst);
        previous.saturating_add(ms)
    }

    pub fn advance_by(&self, dt: Duration) -> u64 {
        self.advance(u64::try_from(dt.as_millis()).unwrap_or(u64::MAX))
    }

    /// Jump to `ms`. Only allowed to move forward.
    pub fn set(&self, ms: u64) {
        self.now.fetch_max(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic_clock_advances() {
        let clock = MonotonicClock::new();
        let t1 = clock.now_ms();
        std::thread::sleep(Duration::from_millis(10));
        let t2 = clock.now_ms();
        assert!(t2 >= t1 + 10);
    }

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        handle.advance(250);
        assert_eq!(clock.now_ms(), 250);
        assert_eq!(clock.advance_by(Duration::from_millis(50)), 300);
    }

    #[test]
    fn test_manual_clock_never_moves_back() {
        let clock = ManualClock::starting_at(1000);
        clock.set(400);
        assert_eq!(clock.now_ms(), 1000);
        clock.set(1500);
        assert_eq!(clock.now_ms(), 1500);
    }
}
