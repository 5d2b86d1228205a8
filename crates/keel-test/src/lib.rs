//! Keel Test Harness
//!
//! Scenario and instrumentation helpers for exercising the keel crates:
//! - Combo-input buffer driven by a manual clock
//! - Recording report sink for ordering assertions

pub mod combo;
pub mod sink;

pub use combo::*;
pub use sink::*;
