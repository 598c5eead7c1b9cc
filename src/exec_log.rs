//! Execution log: what a run printed, kept for remote callers.

use alloc::string::String;
use core::fmt;
use core::time::Duration;

use crate::config::MAX_LOG_BYTES;

/// Line terminator used in the log.
pub const LINE_END: &str = "\r\n";

/// Marker appended once when the log hits its size cap.
pub const TRUNCATED: &str = " -> (log truncated)";

/// Append-only run log. Every line ends in CRLF.
///
/// The text never grows past `capacity` bytes: the first line that would
/// not fit is replaced by [`TRUNCATED`] and later lines are dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionLog {
    text: String,
    lines: usize,
    capacity: usize,
    truncated: bool,
}

impl Default for ExecutionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionLog {
    pub const fn new() -> Self {
        Self::with_capacity(MAX_LOG_BYTES)
    }

    pub const fn with_capacity(capacity: usize) -> Self {
        Self {
            text: String::new(),
            lines: 0,
            capacity,
            truncated: false,
        }
    }

    pub fn push(&mut self, line: &str) {
        if self.truncated {
            return;
        }
        let reserve = TRUNCATED.len() + LINE_END.len();
        if self.text.len() + line.len() + LINE_END.len() + reserve > self.capacity {
            self.truncated = true;
            self.append(TRUNCATED);
        } else {
            self.append(line);
        }
    }

    fn append(&mut self, line: &str) {
        self.text.push_str(line);
        self.text.push_str(LINE_END);
        self.lines += 1;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.lines = 0;
        self.truncated = false;
    }

    /// Whether lines were dropped at the size cap.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines == 0
    }

    /// Logged lines without their terminators.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split_terminator(LINE_END)
    }
}

/// Human-readable duration: seconds from 1 s up, milliseconds below,
/// two decimals either way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Elapsed(pub Duration);

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0.as_secs_f64();
        if secs >= 1.0 {
            write!(f, "{:.2} seconds", secs)
        } else {
            write!(f, "{:.2} milliseconds", secs * 1000.0)
        }
    }
}
