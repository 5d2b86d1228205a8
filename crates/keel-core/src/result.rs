//! Result extensions
//!
//! `Result<T, E>` already carries the Ok/Err algebra. This module adds the
//! seam into structured reports ([`IntoReport`], [`ResultExt::report`]),
//! branch matching that looks through a report, and the loud unwrap family.

use std::fmt;

use serde_json::Value;

use crate::kind::{host_error_string, ErrorKind, HostError};
use crate::report::{Report, ReportBuilder};
use crate::sink::{self, ReportSink, Severity};

/// Upgrade an error payload into a [`Report`]. `Report` maps to itself.
pub trait IntoReport {
    fn into_report(self) -> Report;
}

impl IntoReport for Report {
    fn into_report(self) -> Report {
        self
    }
}

impl IntoReport for ReportBuilder {
    fn into_report(self) -> Report {
        self.build()
    }
}

impl IntoReport for ErrorKind {
    fn into_report(self) -> Report {
        Report::new(self)
    }
}

impl IntoReport for HostError {
    fn into_report(self) -> Report {
        Report::new(self)
    }
}

/// Raw numeric code, classified by range
impl IntoReport for i64 {
    fn into_report(self) -> Report {
        Report::new(ErrorKind::from_code(self))
    }
}

impl IntoReport for String {
    fn into_report(self) -> Report {
        Report::builder(HostError::Failed).msg(self).build()
    }
}

impl IntoReport for &str {
    fn into_report(self) -> Report {
        Report::builder(HostError::Failed).msg(self).build()
    }
}

impl IntoReport for Value {
    fn into_report(self) -> Report {
        match self {
            Value::Number(n) => match n.as_i64() {
                Some(code) => Report::new(ErrorKind::from_code(code)),
                None => Report::builder(HostError::Failed)
                    .cause_value(Value::Number(n))
                    .build(),
            },
            Value::String(message) => message.into_report(),
            other => Report::builder(HostError::Failed).cause_value(other).build(),
        }
    }
}

impl IntoReport for std::io::Error {
    fn into_report(self) -> Report {
        Report::builder(HostError::from(self.kind()))
            .msg(self.to_string())
            .build()
    }
}

impl IntoReport for serde_json::Error {
    fn into_report(self) -> Report {
        Report::builder(HostError::ParseError)
            .info("line", self.line())
            .info("column", self.column())
            .info("message", self.to_string())
            .build()
    }
}

impl IntoReport for crate::option::DictFormError {
    fn into_report(self) -> Report {
        Report::from(self)
    }
}

/// Equality against an error payload, looking one level into a [`Report`]
pub trait ErrMatches<V: ?Sized> {
    fn err_matches(&self, value: &V) -> bool;
}

impl ErrMatches<Report> for Report {
    fn err_matches(&self, value: &Report) -> bool {
        self == value
    }
}

impl ErrMatches<ErrorKind> for Report {
    fn err_matches(&self, value: &ErrorKind) -> bool {
        self.kind() == *value
    }
}

impl ErrMatches<HostError> for Report {
    fn err_matches(&self, value: &HostError) -> bool {
        self.kind() == *value
    }
}

impl ErrMatches<i64> for Report {
    fn err_matches(&self, value: &i64) -> bool {
        self.kind().code() == *value
    }
}

impl ErrMatches<str> for Report {
    fn err_matches(&self, value: &str) -> bool {
        self.message() == Some(value)
    }
}

impl ErrMatches<ErrorKind> for HostError {
    fn err_matches(&self, value: &ErrorKind) -> bool {
        *value == *self
    }
}

impl ErrMatches<HostError> for ErrorKind {
    fn err_matches(&self, value: &HostError) -> bool {
        *self == *value
    }
}

impl ErrMatches<i64> for ErrorKind {
    fn err_matches(&self, value: &i64) -> bool {
        self.code() == *value
    }
}

impl ErrMatches<str> for String {
    fn err_matches(&self, value: &str) -> bool {
        self == value
    }
}

impl ErrMatches<str> for Value {
    fn err_matches(&self, value: &str) -> bool {
        self.as_str() == Some(value)
    }
}

impl ErrMatches<i64> for Value {
    fn err_matches(&self, value: &i64) -> bool {
        self.as_i64() == Some(*value)
    }
}

macro_rules! err_matches_self {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ErrMatches<$ty> for $ty {
                fn err_matches(&self, value: &$ty) -> bool {
                    self == value
                }
            }
        )*
    };
}

err_matches_self!(ErrorKind, HostError, String, Value, i64, i32, u32, u64, bool);

pub trait ResultExt<T, E> {
    /// Unwrap, terminating with a warning on `Err`. Prototype use only.
    fn fatal_unwrap(self) -> T
    where
        E: fmt::Debug;

    /// Unwrap the error, terminating with a warning on `Ok`
    fn fatal_unwrap_err(self) -> E
    where
        T: fmt::Debug;

    /// Assert `Ok` in debug builds; release builds project to `Option`
    fn debug_expect(self, msg: &str) -> Option<T>;

    /// Assert `Err` in debug builds; release builds project to `Option`
    fn debug_expect_err(self, msg: &str) -> Option<E>;

    /// Ok-branch equality; `false` on `Err`
    fn matches<V: ?Sized>(&self, value: &V) -> bool
    where
        T: PartialEq<V>;

    /// Err-branch equality; `false` on `Ok`
    fn matches_err<V: ?Sized>(&self, value: &V) -> bool
    where
        E: ErrMatches<V>;

    fn into_report(self) -> Result<T, Report>
    where
        E: IntoReport;

    fn into_report_with<F>(self, ctor: F) -> Result<T, Report>
    where
        F: FnOnce(E) -> Report;

    /// Upgrade the error and emit it through the process-wide sink
    fn report(self, severity: Severity) -> Result<T, Report>
    where
        E: IntoReport;

    fn report_to(self, sink: &dyn ReportSink, severity: Severity) -> Result<T, Report>
    where
        E: IntoReport;

    /// Replace a numeric host code with its human string. Other payloads are
    /// left as they are.
    fn stringify_err(self) -> Result<T, Value>
    where
        E: Into<Value>;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    #[track_caller]
    fn fatal_unwrap(self) -> T
    where
        E: fmt::Debug,
    {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(error = ?err, "fatal_unwrap on Err; propagate with `?` instead");
                panic!("called `fatal_unwrap` on an `Err` value: {:?}", err)
            }
        }
    }

    #[track_caller]
    fn fatal_unwrap_err(self) -> E
    where
        T: fmt::Debug,
    {
        match self {
            Err(err) => err,
            Ok(value) => {
                tracing::warn!(value = ?value, "fatal_unwrap_err on Ok");
                panic!("called `fatal_unwrap_err` on an `Ok` value: {:?}", value)
            }
        }
    }

    #[track_caller]
    fn debug_expect(self, msg: &str) -> Option<T> {
        debug_assert!(self.is_ok(), "{}", msg);
        self.ok()
    }

    #[track_caller]
    fn debug_expect_err(self, msg: &str) -> Option<E> {
        debug_assert!(self.is_err(), "{}", msg);
        self.err()
    }

    fn matches<V: ?Sized>(&self, value: &V) -> bool
    where
        T: PartialEq<V>,
    {
        matches!(self, Ok(ok) if ok == value)
    }

    fn matches_err<V: ?Sized>(&self, value: &V) -> bool
    where
        E: ErrMatches<V>,
    {
        matches!(self, Err(err) if err.err_matches(value))
    }

    fn into_report(self) -> Result<T, Report>
    where
        E: IntoReport,
    {
        self.map_err(IntoReport::into_report)
    }

    fn into_report_with<F>(self, ctor: F) -> Result<T, Report>
    where
        F: FnOnce(E) -> Report,
    {
        self.map_err(ctor)
    }

    fn report(self, severity: Severity) -> Result<T, Report>
    where
        E: IntoReport,
    {
        let sink = sink::current();
        self.report_to(sink.as_ref(), severity)
    }

    fn report_to(self, sink: &dyn ReportSink, severity: Severity) -> Result<T, Report>
    where
        E: IntoReport,
    {
        let result = self.into_report();
        if let Err(report) = &result {
            report.report_to(sink, severity);
        }
        result
    }

    fn stringify_err(self) -> Result<T, Value>
    where
        E: Into<Value>,
    {
        self.map_err(|err| {
            let payload: Value = err.into();
            match payload.as_i64().and_then(host_error_string) {
                Some(text) => Value::String(text.to_string()),
                None => {
                    tracing::warn!(payload = %payload, "stringify_err: not a host error code");
                    payload
                }
            }
        })
    }
}
