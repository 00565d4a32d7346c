//! Logging system for the NanoRender engine
//!
//! - Pluggable logger via the `Logger` trait
//! - Severity levels with a global minimum filter (see `Engine::set_min_severity`)
//! - Colored console output by default
//! - File and line information on ERROR entries

use colored::*;
use std::fmt;
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Logger trait for custom logging implementations
///
/// Implement this to route engine logs elsewhere (file, in-game console,
/// diagnostics overlay, test capture).
///
/// # Example
///
/// ```no_run
/// use nano_render::nre::log::{Logger, LogEntry};
///
/// struct OverlayLogger;
///
/// impl Logger for OverlayLogger {
///     fn log(&self, entry: &LogEntry) {
///         // Push into the overlay's ring buffer...
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Log an entry
    fn log(&self, entry: &LogEntry);
}

/// Log entry containing all information about a log message
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level
    pub severity: LogSeverity,

    /// Timestamp when the log was created
    pub timestamp: SystemTime,

    /// Source module (e.g., "nre::RenderGraph", "nre::HeadlessBackend")
    pub source: String,

    /// Log message
    pub message: String,

    /// Source file (only for detailed ERROR logs)
    pub file: Option<&'static str>,

    /// Source line (only for detailed ERROR logs)
    pub line: Option<u32>,
}

/// Log severity levels, ordered from most to least verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogSeverity {
    /// Per-frame chatter (deferred passes, callback timings)
    Trace,

    /// Development information (pass toggles, declarations)
    Debug,

    /// Lifecycle events (backend init/shutdown)
    Info,

    /// Potential issues
    Warn,

    /// Failures, reported with file:line
    Error,
}

impl LogSeverity {
    /// Fixed-width label used by the console logger
    pub fn label(&self) -> &'static str {
        match self {
            LogSeverity::Trace => "TRACE",
            LogSeverity::Debug => "DEBUG",
            LogSeverity::Info => "INFO ",
            LogSeverity::Warn => "WARN ",
            LogSeverity::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label().trim_end())
    }
}

/// Console logger used until `Engine::set_logger` replaces it
///
/// `[YYYY-MM-DD HH:MM:SS.mmm] [SEVERITY] [source] message`, with
/// ` (file:line)` appended when the entry carries a location. Warn and Error
/// go to stderr.
pub struct DefaultLogger;

impl DefaultLogger {
    fn format_line(entry: &LogEntry) -> String {
        let local: DateTime<Local> = entry.timestamp.into();
        let label = entry.severity.label();
        let label = match entry.severity {
            LogSeverity::Trace => label.bright_black(),
            LogSeverity::Debug => label.cyan(),
            LogSeverity::Info => label.green(),
            LogSeverity::Warn => label.yellow(),
            LogSeverity::Error => label.red().bold(),
        };

        let mut text = format!("[{}] [{}] [{}] {}",
            local.format("%Y-%m-%d %H:%M:%S%.3f"), label, entry.source.bright_blue(), entry.message);
        if let (Some(file), Some(line)) = (entry.file, entry.line) {
            text.push_str(&format!(" ({}:{})", file, line));
        }
        text
    }
}

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        let text = Self::format_line(entry);
        if entry.severity >= LogSeverity::Warn {
            eprintln!("{}", text);
        } else {
            println!("{}", text);
        }
    }
}

// ===== LOGGING MACROS =====

/// Log at a given severity; the level macros below forward here
///
/// ```ignore
/// engine_log!(Debug, "nre::RenderGraph", "Pass {} disabled", handle);
/// ```
#[macro_export]
macro_rules! engine_log {
    ($severity:ident, $source:expr, $($arg:tt)*) => {
        $crate::nre::Engine::log($crate::nre::log::LogSeverity::$severity, $source, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! engine_trace {
    ($source:expr, $($arg:tt)*) => { $crate::engine_log!(Trace, $source, $($arg)*) };
}

#[macro_export]
macro_rules! engine_debug {
    ($source:expr, $($arg:tt)*) => { $crate::engine_log!(Debug, $source, $($arg)*) };
}

#[macro_export]
macro_rules! engine_info {
    ($source:expr, $($arg:tt)*) => { $crate::engine_log!(Info, $source, $($arg)*) };
}

#[macro_export]
macro_rules! engine_warn {
    ($source:expr, $($arg:tt)*) => { $crate::engine_log!(Warn, $source, $($arg)*) };
}

/// Error entries also carry the call site
#[macro_export]
macro_rules! engine_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::nre::Engine::log_detailed(
            $crate::nre::log::LogSeverity::Error, $source, format!($($arg)*), file!(), line!())
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
