//! Unit tests for log.rs
//!
//! Tests LogSeverity, LogEntry and DefaultLogger.

use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
use std::time::SystemTime;
use chrono::{DateTime, Local};

fn entry(severity: LogSeverity, file: Option<&'static str>, line: Option<u32>) -> LogEntry {
    LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: "nre::test".to_string(),
        message: "message".to_string(),
        file,
        line,
    }
}

// ============================================================================
// LOG SEVERITY TESTS
// ============================================================================

#[test]
fn test_log_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_log_severity_labels_are_fixed_width() {
    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        assert_eq!(severity.label().len(), 5);
    }
}

#[test]
fn test_log_severity_display_is_trimmed() {
    assert_eq!(LogSeverity::Info.to_string(), "INFO");
    assert_eq!(LogSeverity::Warn.to_string(), "WARN");
    assert_eq!(LogSeverity::Error.to_string(), "ERROR");
}

// ============================================================================
// LOG ENTRY TESTS
// ============================================================================

#[test]
fn test_log_entry_without_file_line() {
    let e = entry(LogSeverity::Info, None, None);
    assert_eq!(e.severity, LogSeverity::Info);
    assert_eq!(e.source, "nre::test");
    assert!(e.file.is_none());
    assert!(e.line.is_none());
}

#[test]
fn test_log_entry_clone_keeps_location() {
    let e1 = entry(LogSeverity::Error, Some("render_graph.rs"), Some(42));
    let e2 = e1.clone();
    assert_eq!(e2.file, Some("render_graph.rs"));
    assert_eq!(e2.line, Some(42));
    assert_eq!(e1.message, e2.message);
}

// ============================================================================
// DEFAULT LOGGER TESTS
// ============================================================================

#[test]
fn test_default_logger_all_severities() {
    let logger = DefaultLogger;
    logger.log(&entry(LogSeverity::Trace, None, None));
    logger.log(&entry(LogSeverity::Debug, None, None));
    logger.log(&entry(LogSeverity::Info, None, None));
    logger.log(&entry(LogSeverity::Warn, None, None));
    logger.log(&entry(LogSeverity::Error, Some("log_tests.rs"), Some(1)));
}

#[test]
fn test_default_logger_line_starts_with_full_timestamp() {
    let e = entry(LogSeverity::Info, None, None);
    let local: DateTime<Local> = e.timestamp.into();
    let expected = format!("[{}]", local.format("%Y-%m-%d %H:%M:%S%.3f"));

    let line = DefaultLogger::format_line(&e);
    assert!(line.starts_with(&expected), "got {}", line);
    assert!(line.ends_with("message"));
}

#[test]
fn test_default_logger_line_carries_location() {
    let line = DefaultLogger::format_line(&entry(LogSeverity::Error, Some("log_tests.rs"), Some(7)));
    assert!(line.ends_with("message (log_tests.rs:7)"));
}

#[test]
fn test_default_logger_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DefaultLogger>();
}
