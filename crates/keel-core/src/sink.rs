//! Severity sinks for surfaced reports

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::report::Report;

/// Report severity
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Plain print
    Info = 0,
    Warning = 1,
    Error = 2,
    /// Emit at error level, then halt
    Fatal = 3,
}

impl Severity {
    pub fn from_level(level: i64) -> Option<Severity> {
        match level {
            0 => Some(Severity::Info),
            1 => Some(Severity::Warning),
            2 => Some(Severity::Error),
            3 => Some(Severity::Fatal),
            _ => None,
        }
    }

    #[inline]
    pub fn level(self) -> i64 {
        self as u8 as i64
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        };
        f.write_str(name)
    }
}

/// Destination for surfaced reports
pub trait ReportSink: Send + Sync {
    /// Record a report at the given severity
    fn emit(&self, severity: Severity, report: &Report);

    /// Terminate after a fatal report has been emitted
    fn halt(&self, report: &Report) -> ! {
        panic!("fatal report: {}", report)
    }
}

/// Default sink, routes into `tracing`
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn emit(&self, severity: Severity, report: &Report) {
        let code = report.kind().code();
        match severity {
            Severity::Info => tracing::info!(code, "{}", report),
            Severity::Warning => tracing::warn!(code, "{}", report),
            Severity::Error => tracing::error!(code, "{}", report),
            Severity::Fatal => tracing::error!(code, fatal = true, "{}", report),
        }
    }
}

static SINK: RwLock<Option<Arc<dyn ReportSink>>> = parking_lot::const_rwlock(None);

/// Replace the process-wide sink, returning the previous one
pub fn set_sink(sink: Arc<dyn ReportSink>) -> Option<Arc<dyn ReportSink>> {
    SINK.write().replace(sink)
}

/// Restore the default [`TracingSink`]
pub fn reset_sink() -> Option<Arc<dyn ReportSink>> {
    SINK.write().take()
}

/// Currently installed sink
pub fn current() -> Arc<dyn ReportSink> {
    match SINK.read().as_ref() {
        Some(sink) => Arc::clone(sink),
        None => Arc::new(TracingSink),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HostError;
    use parking_lot::Mutex;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl ReportSink for Recorder {
        fn emit(&self, severity: Severity, report: &Report) {
            self.events
                .lock()
                .push(format!("{} {}", severity, report.kind().code()));
        }

        fn halt(&self, report: &Report) -> ! {
            self.events.lock().push("halt".to_string());
            panic!("halted: {}", report)
        }
    }

    #[test]
    fn test_severity_levels() {
        for level in 0..=3 {
            assert_eq!(Severity::from_level(level).map(Severity::level), Some(level));
        }
        assert_eq!(Severity::from_level(4), None);
        assert_eq!(Severity::from_level(-1), None);
    }

    #[test]
    fn test_non_fatal_routing() {
        let sink = Recorder::default();
        let report = Report::new(HostError::Busy);
        report.report_to(&sink, Severity::Info);
        report.report_to(&sink, Severity::Warning);
        report.report_to(&sink, Severity::Error);
        assert_eq!(
            *sink.events.lock(),
            vec!["info 44", "warning 44", "error 44"]
        );
    }

    #[test]
    fn test_fatal_emits_before_halt() {
        let sink = Recorder::default();
        let report = Report::new(HostError::Bug);
        let outcome = catch_unwind(AssertUnwindSafe(|| report.report_to(&sink, Severity::Fatal)));
        assert!(outcome.is_err());
        assert_eq!(*sink.events.lock(), vec!["fatal 47", "halt"]);
    }

    #[test]
    fn test_out_of_range_level_falls_back_to_error() {
        let sink = Recorder::default();
        let report = Report::new(HostError::Locked);
        report.report_level_to(&sink, 9);
        assert_eq!(*sink.events.lock(), vec!["warning 5", "error 23"]);
    }
}
