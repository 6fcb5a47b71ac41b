//! Reporter port - user-visible outcome messages

/// Severity of a reported message
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportLevel {
    Success,
    Error,
    Info,
}

/// Renders outcomes to the user.
///
/// Message text is produced by the core and must be printed unchanged;
/// implementations only decide decoration and destination.
pub trait Reporter {
    fn report(&self, level: ReportLevel, message: &str);

    fn success(&self, message: &str) {
        self.report(ReportLevel::Success, message);
    }

    fn error(&self, message: &str) {
        self.report(ReportLevel::Error, message);
    }

    fn info(&self, message: &str) {
        self.report(ReportLevel::Info, message);
    }
}

impl<T: Reporter + ?Sized> Reporter for &T {
    fn report(&self, level: ReportLevel, message: &str) {
        (**self).report(level, message);
    }
}
