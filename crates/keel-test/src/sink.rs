//! Recording sink for report routing assertions

use parking_lot::Mutex;

use keel_core::{Report, ReportSink, Severity};

/// Event observed by a [`RecordingSink`]
#[derive(Clone, Debug, PartialEq)]
pub enum SinkEvent {
    Emitted(Severity, Report),
    Halted(Report),
}

/// Sink that records every emission and halt, in order
///
/// `halt` panics after recording, so fatal reports can be observed under
/// `catch_unwind`.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SinkEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().clone()
    }

    /// Severities of emitted reports, in order
    pub fn severities(&self) -> Vec<Severity> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Emitted(severity, _) => Some(*severity),
                SinkEvent::Halted(_) => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl ReportSink for RecordingSink {
    fn emit(&self, severity: Severity, report: &Report) {
        self.events
            .lock()
            .push(SinkEvent::Emitted(severity, report.clone()));
    }

    fn halt(&self, report: &Report) -> ! {
        self.events.lock().push(SinkEvent::Halted(report.clone()));
        panic!("halted on fatal report: {}", report)
    }
}
