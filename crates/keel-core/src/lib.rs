//! Keel Core - Structured reports and combinators
//!
//! This crate defines the value types shared by the other keel crates:
//! - Error kinds (host-reserved and custom ranges)
//! - Reports with details and cause chains, plus severity sinks
//! - `Option` / `Result` extensions (dictionary form, loud unwraps, report upgrades)
//! - File and JSON helpers that fail with reports

pub mod kind;
pub mod report;
pub mod sink;
pub mod option;
pub mod result;
pub mod fs;
pub mod logging;

pub use kind::*;
pub use report::*;
pub use sink::{ReportSink, Severity, TracingSink};
pub use option::{arr_get, dict_get, from_dict, DictFormError, Lookup, OptionExt};
pub use result::{ErrMatches, IntoReport, ResultExt};
pub use fs::{open_file, parse_json_file, parse_json_str, read_file_text, FileMode};
pub use logging::{init_logging, LoggingConfig, LoggingError};

/// Result type for keel operations
pub type KeelResult<T> = Result<T, Report>;
