//! Console narration for extraction runs.
//!
//! Every message goes through a [`Logger`]: it is printed with a level prefix
//! (warnings and errors on stderr) and kept in a bounded in-memory history,
//! readable through [`Logger::history`].

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::config::MAX_LOG_ENTRIES;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Log message
    pub message: String,
    /// Nesting depth (per-file lines sit under the file they belong to)
    #[serde(default)]
    pub indent: u8,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Info, message: message.into(), indent: 0 }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Success, message: message.into(), indent: 0 }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Warning, message: message.into(), indent: 0 }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Error, message: message.into(), indent: 0 }
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    /// Text as printed to the console.
    pub fn render(&self) -> String {
        let prefix = match self.level {
            LogLevel::Info => "",
            LogLevel::Success => "✓ ",
            LogLevel::Warning => "[WARN] ",
            LogLevel::Error => "[ERROR] ",
        };
        format!("{}{}{}", "  ".repeat(self.indent as usize), prefix, self.message)
    }
}

/// Global logger
pub static LOGGER: Lazy<Logger> = Lazy::new(Logger::new);

/// Prints entries and remembers the most recent ones.
pub struct Logger {
    quiet: AtomicBool,
    capacity: usize,
    history: Mutex<VecDeque<LogEntry>>,
}

impl Logger {
    pub fn new() -> Self {
        Self::with_capacity(MAX_LOG_ENTRIES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            quiet: AtomicBool::new(false),
            capacity,
            history: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Stop printing; entries are still recorded.
    pub fn set_quiet(&self, quiet: bool) {
        self.quiet.store(quiet, Ordering::Relaxed);
    }

    /// Print and record an entry
    pub fn log(&self, entry: LogEntry) {
        if !self.quiet.load(Ordering::Relaxed) {
            match entry.level {
                LogLevel::Warning | LogLevel::Error => eprintln!("{}", entry.render()),
                LogLevel::Info | LogLevel::Success => println!("{}", entry.render()),
            }
        }

        if self.capacity == 0 {
            return;
        }
        if let Ok(mut history) = self.history.lock() {
            if history.len() == self.capacity {
                history.pop_front();
            }
            history.push_back(entry);
        }
    }

    /// Recorded entries, oldest first.
    pub fn history(&self) -> Vec<LogEntry> {
        self.history
            .lock()
            .map(|h| h.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenient logging functions
pub fn log_info(msg: impl Into<String>) {
    LOGGER.log(LogEntry::info(msg));
}

pub fn log_success(msg: impl Into<String>) {
    LOGGER.log(LogEntry::success(msg));
}

pub fn log_error(msg: impl Into<String>) {
    LOGGER.log(LogEntry::error(msg));
}

pub fn log_info_indent(msg: impl Into<String>, indent: u8) {
    LOGGER.log(LogEntry::info(msg).with_indent(indent));
}

pub fn log_warning_indent(msg: impl Into<String>, indent: u8) {
    LOGGER.log(LogEntry::warning(msg).with_indent(indent));
}

pub fn log_error_indent(msg: impl Into<String>, indent: u8) {
    LOGGER.log(LogEntry::error(msg).with_indent(indent));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_prefixes() {
        assert_eq!(LogEntry::info("hi").render(), "hi");
        assert_eq!(LogEntry::warning("w").with_indent(1).render(), "  [WARN] w");
        assert_eq!(LogEntry::error("e").render(), "[ERROR] e");
    }

    #[test]
    fn test_history_is_bounded() {
        let logger = Logger::with_capacity(2);
        logger.set_quiet(true);
        logger.log(LogEntry::info("one"));
        logger.log(LogEntry::info("two"));
        logger.log(LogEntry::info("three"));

        let messages: Vec<String> = logger.history().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["two", "three"]);
    }

    #[test]
    fn test_entry_json_shape() {
        let json = serde_json::to_value(LogEntry::success("done")).unwrap();
        assert_eq!(json["level"], "success");
        assert_eq!(json["indent"], 0);
    }
}
