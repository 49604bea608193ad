//! Game event logger with verbosity levels
//!
//! The loop owns one logger per game; there is no global logging state, so
//! games batched in parallel cannot interleave or share anything. Capture
//! mode buffers entries in memory for tests instead of printing.

use serde::{Deserialize, Serialize};

/// Verbosity level for game output
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
)]
pub enum VerbosityLevel {
    /// Silent - no output during game
    Silent = 0,
    /// Minimal - only game outcome
    Minimal = 1,
    /// Normal - one line per executed move (default)
    #[default]
    Normal = 2,
    /// Verbose - moves plus state detail
    Verbose = 3,
}

/// A captured log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct GameLogger {
    verbosity: VerbosityLevel,
    capture: bool,
    buffer: Vec<LogEntry>,
}

impl GameLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        GameLogger {
            verbosity,
            ..Self::default()
        }
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    /// Buffer entries in memory instead of printing (for tests)
    pub fn enable_capture(&mut self) {
        self.capture = true;
    }

    pub fn is_capturing(&self) -> bool {
        self.capture
    }

    /// Captured entries, in log order
    pub fn logs(&self) -> &[LogEntry] {
        &self.buffer
    }

    pub fn clear_logs(&mut self) {
        self.buffer.clear();
    }

    pub fn minimal(&mut self, message: &str) {
        self.log(VerbosityLevel::Minimal, message);
    }

    pub fn normal(&mut self, message: &str) {
        self.log(VerbosityLevel::Normal, message);
    }

    pub fn verbose(&mut self, message: &str) {
        self.log(VerbosityLevel::Verbose, message);
    }

    fn log(&mut self, level: VerbosityLevel, message: &str) {
        if self.capture {
            self.buffer.push(LogEntry {
                level,
                message: message.to_string(),
            });
            return;
        }
        if level <= self.verbosity {
            if level == VerbosityLevel::Minimal {
                println!("{message}");
            } else {
                println!("  {message}");
            }
        }
    }
}
