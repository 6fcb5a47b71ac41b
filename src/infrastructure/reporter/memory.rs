//! In-memory reporter for tests and embedding

use std::sync::Mutex;

use crate::domain::ports::{ReportLevel, Reporter};

/// One recorded message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub level: ReportLevel,
    pub message: String,
}

/// Records every message instead of printing it
#[derive(Debug, Default)]
pub struct MemoryReporter {
    reports: Mutex<Vec<Report>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<Report> {
        self.reports.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Messages at `level`, in order
    pub fn messages(&self, level: ReportLevel) -> Vec<String> {
        self.reports()
            .into_iter()
            .filter(|r| r.level == level)
            .map(|r| r.message)
            .collect()
    }

    pub fn count(&self, level: ReportLevel) -> usize {
        self.messages(level).len()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.reports().iter().any(|r| r.message.contains(needle))
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, level: ReportLevel, message: &str) {
        if let Ok(mut reports) = self.reports.lock() {
            reports.push(Report {
                level,
                message: message.to_string(),
            });
        }
    }
}
