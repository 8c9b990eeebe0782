//! Terminal output and the diagnostics channel.
//!
//! Library code never prints directly; it reports through a [`Reporter`].
//! The CLI uses [`Printer`], which writes Cargo-style status lines to stderr
//! (stdout is reserved for generated output). Tests use [`MemoryReporter`].

use std::cell::RefCell;
use std::io::{self, IsTerminal, Write};

/// ANSI escape codes.
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Width for right-aligned verb column.
const VERB_WIDTH: usize = 12;

/// Severity of a reported message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Status,
    Info,
    Warning,
    Error,
}

/// Host diagnostics channel.
///
/// `verb` is a short label ("Reading", "Wrote"); `message` carries the detail.
pub trait Reporter {
    fn report(&self, level: Level, verb: &str, message: &str);

    fn status(&self, verb: &str, message: &str) {
        self.report(Level::Status, verb, message);
    }

    fn info(&self, verb: &str, message: &str) {
        self.report(Level::Info, verb, message);
    }

    fn warning(&self, verb: &str, message: &str) {
        self.report(Level::Warning, verb, message);
    }

    fn error(&self, verb: &str, message: &str) {
        self.report(Level::Error, verb, message);
    }
}

/// Terminal-aware status printer.
///
/// Colour is enabled when stderr is a terminal.
pub struct Printer {
    color: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// Format a string as dim/grey.
    pub fn dim(&self, text: &str) -> String {
        if self.color {
            format!("{DIM}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Format a string as bold.
    pub fn bold(&self, text: &str) -> String {
        if self.color {
            format!("{BOLD}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Format a diagnostic severity label with colour.
    pub fn severity(&self, label: &str, is_error: bool) -> String {
        let color = if is_error { RED } else { YELLOW };
        if self.color {
            format!("{BOLD}{color}{label}{RESET}")
        } else {
            label.to_string()
        }
    }

    fn print_line(&self, color: &str, verb: &str, message: &str) {
        let mut stderr = io::stderr().lock();
        if self.color {
            let _ = writeln!(
                stderr,
                "{BOLD}{color}{verb:>VERB_WIDTH$}{RESET} {message}"
            );
        } else {
            let _ = writeln!(stderr, "{verb:>VERB_WIDTH$} {message}");
        }
    }
}

impl Reporter for Printer {
    fn report(&self, level: Level, verb: &str, message: &str) {
        let color = match level {
            Level::Status => GREEN,
            Level::Info => CYAN,
            Level::Warning => YELLOW,
            Level::Error => RED,
        };
        self.print_line(color, verb, message);
    }
}

/// A message captured by [`MemoryReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub level: Level,
    pub verb: String,
    pub message: String,
}

/// Reporter that keeps every message in memory.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    records: RefCell<Vec<Record>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured messages, oldest first.
    pub fn records(&self) -> Vec<Record> {
        self.records.borrow().clone()
    }

    /// Messages reported at `level`.
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.records
            .borrow()
            .iter()
            .filter(|r| r.level == level)
            .map(|r| r.message.clone())
            .collect()
    }

    pub fn error_count(&self) -> usize {
        self.messages(Level::Error).len()
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, level: Level, verb: &str, message: &str) {
        self.records.borrow_mut().push(Record {
            level,
            verb: verb.to_string(),
            message: message.to_string(),
        });
    }
}

/// Pluralize a count: `plural(1, "entry", "entries")` → "1 entry".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// Return a relative display path when possible, absolute otherwise.
pub fn display_path(path: &std::path::Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            if s.is_empty() {
                return ".".to_string();
            }
            return s;
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_singular() {
        assert_eq!(plural(1, "entry", "entries"), "1 entry");
    }

    #[test]
    fn test_plural_zero() {
        assert_eq!(plural(0, "bundle", "bundles"), "0 bundles");
    }

    #[test]
    fn test_display_path_absolute() {
        use std::path::Path;
        let p = Path::new("/nonexistent/path/to/manifest.json");
        assert_eq!(display_path(p), "/nonexistent/path/to/manifest.json");
    }

    #[test]
    fn test_memory_reporter_captures_levels() {
        let reporter = MemoryReporter::new();
        reporter.info("Reading", "manifest.json");
        reporter.error("Failed", "sheet.json missing");
        reporter.warning("Skipped", "format");

        assert_eq!(reporter.records().len(), 3);
        assert_eq!(reporter.error_count(), 1);
        assert_eq!(reporter.messages(Level::Error), vec!["sheet.json missing"]);
        assert_eq!(reporter.records()[0].verb, "Reading");
    }
}
