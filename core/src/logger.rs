//! Logging abstraction for testable output.
//!
//! The harness reports progress through a `Logger` handed down from the
//! binary, so tests can capture exactly what a run printed.

use std::io::Write;
use std::sync::{Arc, RwLock};

/// Verbosity level for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Per-file results and the final verdict (always shown).
    Normal,
    /// Every action and command line (-v).
    Verbose,
    /// Captured subject output (-vv).
    Debug,
}

impl Verbosity {
    /// Create verbosity from CLI flag count.
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    }
}

pub trait Logger {
    fn log(&self, level: Verbosity, message: &str);

    fn info(&self, message: &str) {
        self.log(Verbosity::Normal, message);
    }

    fn verbose(&self, message: &str) {
        self.log(Verbosity::Verbose, message);
    }

    fn debug(&self, message: &str) {
        self.log(Verbosity::Debug, message);
    }
}

/// Logger that writes to stderr.
#[derive(Debug)]
pub struct StderrLogger {
    level: Verbosity,
}

impl StderrLogger {
    pub fn new(level: Verbosity) -> Self {
        Self { level }
    }
}

impl Logger for StderrLogger {
    fn log(&self, level: Verbosity, message: &str) {
        if level <= self.level {
            let _ = writeln!(std::io::stderr(), "{}", message);
        }
    }
}

/// A captured log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: Verbosity,
    pub message: String,
}

/// Mock logger for tests; captures every message regardless of level.
#[derive(Debug, Clone, Default)]
pub struct MockLogger {
    messages: Arc<RwLock<Vec<LogEntry>>>,
}

impl MockLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.messages.read().map(|m| m.clone()).unwrap_or_default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries().into_iter().map(|e| e.message).collect()
    }

    pub fn messages_at_level(&self, level: Verbosity) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|e| e.level == level)
            .map(|e| e.message)
            .collect()
    }

    pub fn contains(&self, substring: &str) -> bool {
        self.messages().iter().any(|m| m.contains(substring))
    }

    pub fn count_containing(&self, substring: &str) -> usize {
        self.messages().iter().filter(|m| m.contains(substring)).count()
    }
}

impl Logger for MockLogger {
    fn log(&self, level: Verbosity, message: &str) {
        if let Ok(mut messages) = self.messages.write() {
            messages.push(LogEntry { level, message: message.to_string() });
        }
    }
}

/// A no-op logger that discards all messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _level: Verbosity, _message: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_ordering() {
        assert!(Verbosity::Normal < Verbosity::Verbose);
        assert!(Verbosity::Verbose < Verbosity::Debug);
    }

    #[test]
    fn test_verbosity_from_count() {
        assert_eq!(Verbosity::from_count(0), Verbosity::Normal);
        assert_eq!(Verbosity::from_count(1), Verbosity::Verbose);
        assert_eq!(Verbosity::from_count(2), Verbosity::Debug);
        assert_eq!(Verbosity::from_count(9), Verbosity::Debug);
    }

    #[test]
    fn test_mock_logger_captures_all_levels() {
        let logger = MockLogger::new();
        logger.info("file passed");
        logger.verbose("[SUBJECT] tinyZZZ -c --gzip a b");
        logger.debug("stdout");

        assert_eq!(logger.entries().len(), 3);
        assert_eq!(logger.messages_at_level(Verbosity::Normal), vec!["file passed".to_string()]);
        assert!(logger.contains("--gzip"));
        assert_eq!(logger.count_containing("passed"), 1);
    }

    #[test]
    fn test_mock_logger_clones_share_storage() {
        let logger = MockLogger::new();
        let clone = logger.clone();
        clone.info("shared");
        assert!(logger.contains("shared"));
    }
}
