//! Structured error reports
//!
//! A [`ReportBuilder`] accumulates context at the failure site. [`ReportBuilder::build`]
//! freezes it into an immutable [`Report`] that can be surfaced, matched, and logged.
//!
//! ```rust
//! use keel_core::{HostError, Report};
//! use serde_json::json;
//!
//! let report = Report::builder(HostError::FileNotFound)
//!     .msg("loading save slot")
//!     .info("path", json!("user://slot1.save"))
//!     .build();
//!
//! assert_eq!(report.kind(), HostError::FileNotFound);
//! assert_eq!(report.detail("path"), Some(&json!("user://slot1.save")));
//! ```

use std::error::Error as StdError;
use std::fmt;

use serde_json::{Map, Value};

use crate::kind::ErrorKind;
use crate::sink::{self, ReportSink, Severity};

/// Ordered detail map attached to a report
pub type Details = Map<String, Value>;

/// What caused a report
#[derive(Clone, Debug, PartialEq)]
pub enum Cause {
    /// Another structured report
    Report(Box<Report>),
    /// An arbitrary host value
    Value(Value),
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cause::Report(report) => fmt::Display::fmt(report, f),
            Cause::Value(Value::String(s)) => f.write_str(s),
            Cause::Value(value) => write!(f, "{}", value),
        }
    }
}

/// Immutable structured error
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    kind: ErrorKind,
    message: Option<String>,
    details: Details,
    cause: Option<Cause>,
}

impl Report {
    /// Report with no message, details, or cause
    pub fn new(kind: impl Into<ErrorKind>) -> Self {
        Report {
            kind: kind.into(),
            message: None,
            details: Details::new(),
            cause: None,
        }
    }

    pub fn builder(kind: impl Into<ErrorKind>) -> ReportBuilder {
        ReportBuilder {
            inner: Report::new(kind),
        }
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn details(&self) -> &Details {
        &self.details
    }

    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.get(key)
    }

    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    /// Whether the kind is host-reserved
    pub fn is_host_error(&self) -> bool {
        self.kind.is_host()
    }

    /// Iterate this report and every report below it in the causal chain
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    /// Deepest report in the causal chain
    pub fn root_cause(&self) -> &Report {
        self.chain().last().unwrap_or(self)
    }

    /// Reopen for further context. The original report is left untouched.
    pub fn to_builder(&self) -> ReportBuilder {
        ReportBuilder {
            inner: self.clone(),
        }
    }

    /// Emit through the process-wide sink
    pub fn report(&self, severity: Severity) {
        let sink = sink::current();
        self.report_to(sink.as_ref(), severity);
    }

    /// Emit through an explicit sink. `Fatal` emits, then halts.
    pub fn report_to(&self, sink: &dyn ReportSink, severity: Severity) {
        sink.emit(severity, self);
        if severity == Severity::Fatal {
            sink.halt(self);
        }
    }

    /// Emit at a raw numeric level through the process-wide sink
    pub fn report_level(&self, level: i64) {
        let sink = sink::current();
        self.report_level_to(sink.as_ref(), level);
    }

    /// Emit at a raw numeric level. Levels outside `0..=3` are flagged with a
    /// warning and routed to the error sink.
    pub fn report_level_to(&self, sink: &dyn ReportSink, level: i64) {
        match Severity::from_level(level) {
            Some(severity) => self.report_to(sink, severity),
            None => {
                let notice = Report::builder(crate::HostError::ParameterRangeError)
                    .msg("invalid report level")
                    .info("level", Value::from(level))
                    .build();
                sink.emit(Severity::Warning, &notice);
                sink.emit(Severity::Error, self);
            }
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(message) = &self.message {
            write!(f, "{}: ", message)?;
        }
        let details = serde_json::to_string(&self.details).map_err(|_| fmt::Error)?;
        write!(f, "{} {}", self.kind, details)?;
        if let Some(cause) = &self.cause {
            write!(f, "\nCaused by: {}", cause)?;
        }
        Ok(())
    }
}

impl StdError for Report {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.cause {
            Some(Cause::Report(report)) => Some(report.as_ref()),
            _ => None,
        }
    }
}

/// Iterator over a causal chain, see [`Report::chain`]
pub struct Chain<'a> {
    next: Option<&'a Report>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Report;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = match &current.cause {
            Some(Cause::Report(report)) => Some(report.as_ref()),
            _ => None,
        };
        Some(current)
    }
}

/// Mutable accumulator for a [`Report`]
///
/// A cause must be an already-built report, so a report can never appear in
/// its own causal chain.
#[derive(Clone, Debug)]
#[must_use]
pub struct ReportBuilder {
    inner: Report,
}

impl ReportBuilder {
    pub fn with_details(mut self, details: Details) -> Self {
        self.inner.details = details;
        self
    }

    pub fn msg(mut self, message: impl Into<String>) -> Self {
        self.inner.message = Some(message.into());
        self
    }

    pub fn cause(mut self, cause: Report) -> Self {
        self.inner.cause = Some(Cause::Report(Box::new(cause)));
        self
    }

    pub fn cause_value(mut self, cause: impl Into<Value>) -> Self {
        self.inner.cause = Some(Cause::Value(cause.into()));
        self
    }

    /// Add or overwrite a detail entry
    pub fn info(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.inner.details.insert(key.into(), value.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.inner.kind
    }

    pub fn build(self) -> Report {
        self.inner
    }

    /// Build and emit through the process-wide sink
    pub fn report(self, severity: Severity) -> Report {
        let report = self.build();
        report.report(severity);
        report
    }
}

impl From<ReportBuilder> for Report {
    fn from(builder: ReportBuilder) -> Self {
        builder.build()
    }
}
