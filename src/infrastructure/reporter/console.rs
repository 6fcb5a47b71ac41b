//! Console reporter
//!
//! Text mode prints `<icon> <message>` lines, errors to stderr. JSON mode
//! prints one NDJSON object per message to stdout for CI consumption.

use std::io::{self, Write};
use std::sync::Mutex;

use crossterm::style::{Color, Stylize};
use is_terminal::IsTerminal;

use crate::domain::ports::{ReportLevel, Reporter};

mod icons {
    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const INFO: &str = "⟳";
}

mod icons_ascii {
    pub const SUCCESS: &str = "[OK]";
    pub const ERROR: &str = "[FAIL]";
    pub const INFO: &str = "[~]";
}

fn icon(level: ReportLevel, unicode: bool) -> &'static str {
    match (unicode, level) {
        (true, ReportLevel::Success) => icons::SUCCESS,
        (true, ReportLevel::Error) => icons::ERROR,
        (true, ReportLevel::Info) => icons::INFO,
        (false, ReportLevel::Success) => icons_ascii::SUCCESS,
        (false, ReportLevel::Error) => icons_ascii::ERROR,
        (false, ReportLevel::Info) => icons_ascii::INFO,
    }
}

fn color(level: ReportLevel) -> Color {
    match level {
        ReportLevel::Success => Color::Green,
        ReportLevel::Error => Color::Red,
        ReportLevel::Info => Color::Cyan,
    }
}

/// When to colorize text output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Rendering switches for [`ConsoleReporter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConsoleOptions {
    pub json: bool,
    pub color: bool,
    pub unicode: bool,
    /// Prefix text lines with `[HH:MM:SS]`
    pub timestamps: bool,
}

impl ConsoleOptions {
    /// Detect color and unicode support for stdout.
    pub fn detect(json: bool, mode: ColorMode) -> Self {
        Self::detect_impl(
            json,
            mode,
            |key| std::env::var(key).ok(),
            io::stdout().is_terminal(),
        )
    }

    fn detect_impl(
        json: bool,
        mode: ColorMode,
        get_env: impl Fn(&str) -> Option<String>,
        is_tty: bool,
    ) -> Self {
        let term_is_dumb = get_env("TERM")
            .map(|t| t.eq_ignore_ascii_case("dumb"))
            .unwrap_or(false);
        let color = match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => is_tty && !term_is_dumb && get_env("NO_COLOR").is_none(),
        };
        Self {
            json,
            color: color && !json,
            unicode: !term_is_dumb,
            timestamps: false,
        }
    }

    pub fn with_timestamps(mut self, timestamps: bool) -> Self {
        self.timestamps = timestamps;
        self
    }
}

type Sink = Mutex<Box<dyn Write + Send>>;

/// Reporter writing to the terminal
pub struct ConsoleReporter {
    options: ConsoleOptions,
    out: Sink,
    err: Sink,
}

impl ConsoleReporter {
    pub fn new(options: ConsoleOptions) -> Self {
        Self::with_writers(options, io::stdout(), io::stderr())
    }

    /// Reporter writing to custom sinks (for testing)
    pub fn with_writers<O, E>(options: ConsoleOptions, out: O, err: E) -> Self
    where
        O: Write + Send + 'static,
        E: Write + Send + 'static,
    {
        Self {
            options,
            out: Mutex::new(Box::new(out)),
            err: Mutex::new(Box::new(err)),
        }
    }

    fn render(&self, level: ReportLevel, message: &str) -> String {
        if self.options.json {
            return serde_json::json!({ "event": level, "message": message }).to_string();
        }

        let icon = icon(level, self.options.unicode);
        let icon = if self.options.color {
            format!("{}", icon.with(color(level)))
        } else {
            icon.to_string()
        };

        if self.options.timestamps {
            let now = chrono::Local::now().format("%H:%M:%S");
            format!("[{now}] {icon} {message}")
        } else {
            format!("{icon} {message}")
        }
    }

    fn sink(&self, level: ReportLevel) -> &Sink {
        if level == ReportLevel::Error && !self.options.json {
            &self.err
        } else {
            &self.out
        }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, level: ReportLevel, message: &str) {
        let line = self.render(level, message);
        if let Ok(mut writer) = self.sink(level).lock() {
            let _ = writeln!(writer, "{line}");
            let _ = writer.flush();
        }
    }
}
