/// NanoRender Engine - process-wide logging facade
///
/// Holds the global logger and severity filter used by the `engine_*!`
/// macros. Everything else (backend, frame graph, caches) is owned by
/// the caller; only logging is global.

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Entries below this severity are dropped before reaching the logger
static MIN_SEVERITY: RwLock<LogSeverity> = RwLock::new(LogSeverity::Info);

fn logger() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

// ===== PUBLIC API =====

/// Engine logging facade
///
/// # Example
///
/// ```no_run
/// use nano_render::nre::{Engine, log::{Logger, LogEntry, LogSeverity}};
///
/// struct FileLogger;
/// impl Logger for FileLogger {
///     fn log(&self, entry: &LogEntry) {
///         // Write to file...
///     }
/// }
///
/// Engine::set_logger(FileLogger);
/// Engine::set_min_severity(LogSeverity::Trace);
/// ```
pub struct Engine;

impl Engine {
    /// Replace the global logger
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = self::logger().write() {
            *lock = Box::new(logger);
        }
    }

    /// Restore the default console logger
    pub fn reset_logger() {
        if let Ok(mut lock) = self::logger().write() {
            *lock = Box::new(DefaultLogger);
        }
    }

    /// Set the minimum severity forwarded to the logger
    pub fn set_min_severity(severity: LogSeverity) {
        if let Ok(mut lock) = MIN_SEVERITY.write() {
            *lock = severity;
        }
    }

    /// Current minimum severity
    pub fn min_severity() -> LogSeverity {
        MIN_SEVERITY.read().map(|s| *s).unwrap_or(LogSeverity::Info)
    }

    /// Whether an entry of this severity would be forwarded
    pub fn is_enabled(severity: LogSeverity) -> bool {
        severity >= Self::min_severity()
    }

    /// Log without source location (used by engine_info!, engine_warn!, ...)
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        Self::dispatch(severity, source, message, None, None);
    }

    /// Log with file:line (used by engine_error!)
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        Self::dispatch(severity, source, message, Some(file), Some(line));
    }

    fn dispatch(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: Option<&'static str>,
        line: Option<u32>,
    ) {
        if !Self::is_enabled(severity) {
            return;
        }
        if let Ok(lock) = logger().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file,
                line,
            });
        }
    }
}
