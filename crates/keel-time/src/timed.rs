//! Timed values - values that expire after a lifespan
//!
//! A [`TimedVar`] is either Fresh (holding a value) or Expired (empty). Expiry
//! is evaluated lazily at the start of every query; there is no background
//! timer.
//!
//! - Epoch: starts at construction and at every `set_value`
//! - Lifespan `0` means the value never expires
//! - Expired once `now - created_at > lifespan` (strictly greater)
//!
//! ```rust
//! use keel_time::{ManualClock, TimedVar};
//!
//! let clock = ManualClock::new();
//! let mut last_input = TimedVar::with_clock("down", clock.clone()).lifespan(300);
//!
//! clock.advance(200);
//! assert_eq!(last_input.get_value(), Some(&"down"));
//!
//! clock.advance(200);
//! assert_eq!(last_input.get_value(), None);
//! assert!(last_input.is_expired());
//! ```

use std::fmt;

use crate::clock::{Clock, MonotonicClock};

/// Timed value configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimedVarConfig {
    /// Lifespan in milliseconds, 0 = never expires
    pub lifespan_ms: u64,
}

impl Default for TimedVarConfig {
    fn default() -> Self {
        TimedVarConfig { lifespan_ms: 0 }
    }
}

impl TimedVarConfig {
    /// Window for chaining inputs into a combo
    pub fn input_buffer() -> Self {
        TimedVarConfig { lifespan_ms: 250 }
    }

    /// Short-lived status effects and hit flashes
    pub fn transient() -> Self {
        TimedVarConfig { lifespan_ms: 100 }
    }
}

/// Value with a lazily-checked expiry
#[derive(Clone, Debug)]
pub struct TimedVar<T, C: Clock = MonotonicClock> {
    value: Option<T>,
    /// Epoch start, reset to 0 on expiry
    created_at: u64,
    /// Lifespan in ms, 0 = never expires
    lifespan: u64,
    expired: bool,
    clock: C,
}

impl<T> TimedVar<T> {
    /// Fresh value that never expires, on the process monotonic clock
    pub fn new(value: T) -> Self {
        Self::with_clock(value, MonotonicClock::new())
    }

    /// Fresh value expiring after `lifespan_ms`
    pub fn with_lifespan(value: T, lifespan_ms: u64) -> Self {
        Self::new(value).lifespan(lifespan_ms)
    }
}

impl<T, C: Clock> TimedVar<T, C> {
    pub fn with_clock(value: T, clock: C) -> Self {
        let created_at = clock.now_ms();
        TimedVar {
            value: Some(value),
            created_at,
            lifespan: 0,
            expired: false,
            clock,
        }
    }

    pub fn from_config(value: T, config: &TimedVarConfig, clock: C) -> Self {
        Self::with_clock(value, clock).lifespan(config.lifespan_ms)
    }

    /// Expired, empty slot; fill it with [`set_value`](Self::set_value)
    pub fn empty(clock: C) -> Self {
        TimedVar {
            value: None,
            created_at: 0,
            lifespan: 0,
            expired: true,
            clock,
        }
    }

    /// Builder form of [`set_lifespan`](Self::set_lifespan)
    pub fn lifespan(mut self, lifespan_ms: u64) -> Self {
        self.set_lifespan(lifespan_ms);
        self
    }

    /// Set the lifespan and restart the epoch timer
    pub fn set_lifespan(&mut self, lifespan_ms: u64) {
        self.lifespan = lifespan_ms;
        self.created_at = self.clock.now_ms();
        self.expired = self.value.is_none();
    }

    /// Store a value and start a new epoch
    pub fn set_value(&mut self, value: T) {
        self.value = Some(value);
        self.created_at = self.clock.now_ms();
        self.expired = false;
    }

    /// Replace the value within the current epoch. No-op once expired.
    ///
    /// Returns whether the value was replaced.
    pub fn mut_value(&mut self, value: T) -> bool {
        self.update(|slot| *slot = value)
    }

    /// Edit the value in place within the current epoch. No-op once expired.
    pub fn update<F: FnOnce(&mut T)>(&mut self, f: F) -> bool {
        self.refresh();
        match self.value.as_mut() {
            Some(slot) if !self.expired => {
                f(slot);
                true
            }
            _ => false,
        }
    }

    pub fn get_value(&mut self) -> Option<&T> {
        self.refresh();
        self.value.as_ref()
    }

    pub fn get_cloned(&mut self) -> Option<T>
    where
        T: Clone,
    {
        self.get_value().cloned()
    }

    pub fn is_expired(&mut self) -> bool {
        self.refresh();
        self.expired
    }

    /// Read the value if still fresh, then expire unconditionally
    pub fn take(&mut self) -> Option<T> {
        self.refresh();
        self.consume()
    }

    /// As [`take`](Self::take), but judged against `lifespan_ms` for this call
    /// only. The stored lifespan is not changed.
    pub fn take_timed(&mut self, lifespan_ms: u64) -> Option<T> {
        if !self.expired && self.is_past(lifespan_ms, self.clock.now_ms()) {
            self.expire();
        }
        self.consume()
    }

    pub fn force_expiration(&mut self) {
        self.expire();
    }

    /// Milliseconds left in the epoch
    ///
    /// `None` for an infinite lifespan, `Some(0)` once expired.
    pub fn time_ms_until_expiration(&mut self) -> Option<u64> {
        self.refresh();
        if self.expired {
            return Some(0);
        }
        if self.lifespan == 0 {
            return None;
        }
        let deadline = self.created_at.saturating_add(self.lifespan);
        Some(deadline.saturating_sub(self.clock.now_ms()))
    }

    #[inline]
    pub fn lifespan_ms(&self) -> u64 {
        self.lifespan
    }

    #[inline]
    pub fn created_at_ms(&self) -> u64 {
        self.created_at
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    #[inline]
    fn is_past(&self, lifespan: u64, now: u64) -> bool {
        lifespan > 0 && now.saturating_sub(self.created_at) > lifespan
    }

    /// Whether a query made now would find the value expired
    fn would_be_expired(&self) -> bool {
        self.expired || self.is_past(self.lifespan, self.clock.now_ms())
    }

    fn refresh(&mut self) {
        if !self.expired && self.is_past(self.lifespan, self.clock.now_ms()) {
            self.expire();
        }
    }

    fn consume(&mut self) -> Option<T> {
        let value = if self.expired { None } else { self.value.take() };
        self.expire();
        value
    }

    fn expire(&mut self) {
        if !self.expired {
            tracing::trace!(lifespan_ms = self.lifespan, "timed value expired");
        }
        self.value = None;
        self.created_at = 0;
        self.expired = true;
    }
}

impl<T: fmt::Display, C: Clock> fmt::Display for TimedVar<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) if !self.would_be_expired() => {
                if self.lifespan == 0 {
                    write!(f, "TimedVar({})", value)
                } else {
                    write!(f, "TimedVar({}, {}ms)", value, self.lifespan)
                }
            }
            _ => f.write_str("TimedVar(expired)"),
        }
    }
}
