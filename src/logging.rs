//! Log sink
//!
//! The dispatcher reports what it did as `(level, source, message)` triples.
//! Sinks decide where those lines go: `tracing`, an in-memory buffer served
//! to the presentation layer, or both.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use tracing::{debug, error, info, warn};

/// Level taxonomy of dispatcher log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Informational
    Info,
    /// A run finished successfully
    Success,
    /// Something looked wrong but was handled
    Warn,
    /// An agent reported a failure
    Error,
    /// Diagnostic detail
    Debug,
}

impl LogLevel {
    /// Get the lowercase label for the level
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Success => "success",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Debug => "debug",
        }
    }
}

/// Destination for dispatcher log lines
///
/// Sinks have no feedback into registry state.
pub trait LogSink {
    /// Record one log line
    fn log(&mut self, level: LogLevel, source: &str, message: &str);
}

impl<S: LogSink + ?Sized> LogSink for &mut S {
    fn log(&mut self, level: LogLevel, source: &str, message: &str) {
        (**self).log(level, source, message);
    }
}

/// Sink that forwards every line to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&mut self, level: LogLevel, source: &str, message: &str) {
        match level {
            LogLevel::Info => info!(source = %source, "{}", message),
            LogLevel::Success => info!(source = %source, outcome = "success", "{}", message),
            LogLevel::Warn => warn!(source = %source, "{}", message),
            LogLevel::Error => error!(source = %source, "{}", message),
            LogLevel::Debug => debug!(source = %source, "{}", message),
        }
    }
}

/// One buffered log line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogLine {
    /// Severity of the line
    pub level: LogLevel,
    /// Agent (or component) the line is about
    pub source: String,
    /// Human-readable text
    pub message: String,
    /// When the line was recorded
    pub at: DateTime<Utc>,
}

/// Bounded buffer of recent log lines
pub struct LogBuffer {
    /// Buffered lines, oldest first
    lines: VecDeque<LogLine>,
    /// Maximum number of lines to keep (0 = unlimited)
    max_lines: usize,
}

impl LogBuffer {
    /// Create a new buffer keeping at most `max_lines` lines
    pub fn new(max_lines: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            max_lines,
        }
    }

    /// Add a line, dropping the oldest one when full
    pub fn push(&mut self, line: LogLine) {
        self.lines.push_back(line);
        if self.max_lines > 0 && self.lines.len() > self.max_lines {
            self.lines.pop_front();
        }
    }

    /// Buffered lines, oldest first
    pub fn lines(&self) -> impl Iterator<Item = &LogLine> {
        self.lines.iter()
    }

    /// Number of buffered lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Clear all lines
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new(1000) // Default to 1000 lines
    }
}

impl LogSink for LogBuffer {
    fn log(&mut self, level: LogLevel, source: &str, message: &str) {
        self.push(LogLine {
            level,
            source: source.to_string(),
            message: message.to_string(),
            at: Utc::now(),
        });
    }
}

/// Sink that forwards every line to two sinks
pub struct Tee<A, B> {
    first: A,
    second: B,
}

impl<A: LogSink, B: LogSink> Tee<A, B> {
    /// Combine two sinks
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: LogSink, B: LogSink> LogSink for Tee<A, B> {
    fn log(&mut self, level: LogLevel, source: &str, message: &str) {
        self.first.log(level, source, message);
        self.second.log(level, source, message);
    }
}
