use std::fmt::{self, Display};

use chrono::Local;
use colored::{ColoredString, Colorize};

/// Severity of a log message. Every severity is always emitted, there is no filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Debug,
    Notice,
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    /// Fixed-width four character tag written between brackets.
    pub const fn tag(self) -> &'static str {
        match self {
            Severity::Debug => "DEBG",
            Severity::Notice => "NOTI",
            Severity::Info => "INFO",
            Severity::Warning => "WARN",
            Severity::Error => "ERR ",
            Severity::Critical => "CRIT",
        }
    }

    /// Console color of a severity. Sinks never receive colors.
    pub fn paint(self, text: &str) -> ColoredString {
        match self {
            Severity::Debug => text.bright_cyan(),
            Severity::Notice => text.bright_green(),
            Severity::Info => text.bright_white(),
            Severity::Warning => text.bright_yellow(),
            Severity::Error => text.bright_red(),
            Severity::Critical => text.bright_magenta(),
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Severity::Error,
            log::Level::Warn => Severity::Warning,
            log::Level::Info => Severity::Info,
            log::Level::Debug | log::Level::Trace => Severity::Debug,
        }
    }
}

const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Builds `DD-MM-YYYY HH:MM:SS [TAGG]: message`, terminated by a newline.
pub(crate) fn format_line<M: Display + ?Sized>(severity: Severity, message: &M) -> String {
    let time = Local::now().format(TIMESTAMP_FORMAT);
    let mut line = format!("{time} [{severity}]: {message}");
    if !line.ends_with('\n') {
        line.push('\n');
    }
    line
}

/// Colors the text of a line, leaving its terminator uncolored.
pub(crate) fn paint_line(severity: Severity, line: &str) -> String {
    let text = line.strip_suffix('\n').unwrap_or(line);
    format!("{}\n", severity.paint(text))
}
