//! Diagnostics collaborator handed to every pipeline component.
//!
//! Components never log through a process-wide handle; they hold an
//! `Arc<dyn Diagnostics>` given to them by whoever builds them.

use std::fmt;
use std::sync::{Arc, Mutex};

/// Severity of a diagnostic record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        };
        f.write_str(s)
    }
}

/// A sink for stage messages, null-count reports and model scores.
pub trait Diagnostics: Send + Sync {
    fn emit(&self, severity: Severity, component: &str, message: &str);

    fn debug(&self, component: &str, message: &str) {
        self.emit(Severity::Debug, component, message);
    }

    fn info(&self, component: &str, message: &str) {
        self.emit(Severity::Info, component, message);
    }

    fn warn(&self, component: &str, message: &str) {
        self.emit(Severity::Warn, component, message);
    }

    fn error(&self, component: &str, message: &str) {
        self.emit(Severity::Error, component, message);
    }
}

pub type SharedDiagnostics = Arc<dyn Diagnostics>;

/// Forwards records to the installed `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl TracingDiagnostics {
    pub fn shared() -> SharedDiagnostics {
        Arc::new(TracingDiagnostics)
    }
}

impl Diagnostics for TracingDiagnostics {
    fn emit(&self, severity: Severity, component: &str, message: &str) {
        match severity {
            Severity::Debug => tracing::debug!(component, "{}", message),
            Severity::Info => tracing::info!(component, "{}", message),
            Severity::Warn => tracing::warn!(component, "{}", message),
            Severity::Error => tracing::error!(component, "{}", message),
        }
    }
}

/// One captured diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub severity: Severity,
    pub component: String,
    pub message: String,
}

/// Keeps every record in memory. Used to inspect what a run reported.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    records: Mutex<Vec<Record>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Arc<Self> {
        Arc::new(RecordingDiagnostics::default())
    }

    pub fn records(&self) -> Vec<Record> {
        self.records
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records().into_iter().map(|r| r.message).collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.records().iter().any(|r| r.message.contains(needle))
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn emit(&self, severity: Severity, component: &str, message: &str) {
        if let Ok(mut records) = self.records.lock() {
            records.push(Record {
                severity,
                component: component.to_string(),
                message: message.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_keeps_order_and_severity() {
        let diag = RecordingDiagnostics::new();
        diag.info("loader", "first");
        diag.warn("auditor", "second");

        let records = diag.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message, "first");
        assert_eq!(records[1].severity, Severity::Warn);
        assert_eq!(records[1].component, "auditor");
        assert!(diag.contains("sec"));
    }
}
