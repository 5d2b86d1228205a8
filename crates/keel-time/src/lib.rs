//! Keel Time - Clocks and timed values
//!
//! This crate implements lazily-expiring values:
//! - `Clock`: millisecond monotonic time source
//! - `MonotonicClock` / `ManualClock`
//! - `TimedVar`: a value that empties itself after its lifespan

pub mod clock;
pub mod timed;

pub use clock::*;
pub use timed::*;
