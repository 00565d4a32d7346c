//! Integration tests for Engine logging system
//!
//! These tests verify the logging facade, the severity filter and the log
//! entries emitted by the frame graph and driver. No GPU required.
//!
//! Run with: cargo test --test logging_integration_tests

use nano_render::nre::{Engine, EngineConfig, Error, FrameDriver};
use nano_render::nre::backend::ApiType;
use nano_render::nre::frame_graph::{RenderGraph, RenderPass, ResourceDesc, ResourceKind};
use nano_render::nre::handle::{Handle, PassHandle, ResourceHandle};
use nano_render::nre::log::{Logger, LogEntry, LogSeverity};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

/// Install a capturing logger with the given threshold
fn capture(min: LogSeverity) -> Arc<Mutex<Vec<LogEntry>>> {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);
    Engine::set_min_severity(min);
    entries
}

fn restore() {
    Engine::reset_logger();
    Engine::set_min_severity(LogSeverity::Info);
}

// ============================================================================
// FACADE TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_custom_logger() {
    let entries = capture(LogSeverity::Info);

    Engine::log(LogSeverity::Info, "test::module", "Test info message".to_string());
    Engine::log(LogSeverity::Warn, "test::module", "Test warning message".to_string());
    Engine::log(LogSeverity::Error, "test::module", "Test error message".to_string());

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 3);
        assert_eq!(captured[0].severity, LogSeverity::Info);
        assert_eq!(captured[0].source, "test::module");
        assert_eq!(captured[0].message, "Test info message");
        assert_eq!(captured[1].severity, LogSeverity::Warn);
        assert_eq!(captured[2].severity, LogSeverity::Error);
        assert_eq!(captured[2].file, None);
    }

    restore();
}

#[test]
#[serial]
fn test_integration_error_logging_with_location() {
    let entries = capture(LogSeverity::Info);

    Engine::log_detailed(
        LogSeverity::Error,
        "test::error",
        "Critical error occurred".to_string(),
        "test_file.rs",
        42,
    );

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].file, Some("test_file.rs"));
        assert_eq!(captured[0].line, Some(42));
    }

    restore();
}

#[test]
#[serial]
fn test_integration_min_severity_filter() {
    let entries = capture(LogSeverity::Warn);

    Engine::log(LogSeverity::Trace, "test", "Trace message".to_string());
    Engine::log(LogSeverity::Debug, "test", "Debug message".to_string());
    Engine::log(LogSeverity::Info, "test", "Info message".to_string());
    Engine::log(LogSeverity::Warn, "test", "Warn message".to_string());
    Engine::log(LogSeverity::Error, "test", "Error message".to_string());

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 2);
        assert_eq!(captured[0].severity, LogSeverity::Warn);
        assert_eq!(captured[1].severity, LogSeverity::Error);
    }
    assert!(!Engine::is_enabled(LogSeverity::Info));

    restore();
}

#[test]
#[serial]
fn test_integration_all_severities_at_trace() {
    let entries = capture(LogSeverity::Trace);

    Engine::log(LogSeverity::Trace, "test", "Trace message".to_string());
    Engine::log(LogSeverity::Debug, "test", "Debug message".to_string());
    Engine::log(LogSeverity::Info, "test", "Info message".to_string());

    assert_eq!(entries.lock().unwrap().len(), 3);

    restore();
}

#[test]
#[serial]
fn test_integration_logger_reset() {
    let entries = capture(LogSeverity::Info);
    Engine::log(LogSeverity::Info, "test", "Message 1".to_string());

    restore();

    // Goes to the default logger, not captured
    Engine::log(LogSeverity::Info, "test", "Message 2".to_string());
    assert_eq!(entries.lock().unwrap().len(), 1);
}

// ============================================================================
// FRAME GRAPH / DRIVER LOGGING
// ============================================================================

#[test]
#[serial]
fn test_integration_declaration_failure_logged_as_error() {
    let entries = capture(LogSeverity::Info);

    let mut graph = RenderGraph::new();
    let result = graph.declare_pass(
        RenderPass::new("Broken")
            .read(ResourceHandle::NULL)
            .execute(|_| Ok(())),
    );
    assert!(matches!(result, Err(Error::UndeclaredResource(_))));

    {
        let captured = entries.lock().unwrap();
        let errors: Vec<&LogEntry> = captured
            .iter()
            .filter(|e| e.severity == LogSeverity::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].source, "nre::RenderGraph");
        assert!(errors[0].message.contains("Broken"));
        assert!(errors[0].file.is_some());
        assert!(errors[0].line.is_some());
    }

    restore();
}

#[test]
#[serial]
fn test_integration_deferral_logged_at_trace() {
    let entries = capture(LogSeverity::Trace);

    let mut graph = RenderGraph::new();
    let color = graph.declare_resource(ResourceDesc::new("Color", ResourceKind::ColorTarget));
    graph
        .declare_pass(
            RenderPass::new("Early")
                .write(color)
                .depends_on(PassHandle::NULL)
                .execute(|_| Ok(())),
        )
        .unwrap();
    graph
        .declare_pass(
            RenderPass::new("Orphan")
                .depends_on(PassHandle::from_raw(77))
                .execute(|_| Ok(())),
        )
        .unwrap();

    let mut driver = FrameDriver::new(EngineConfig {
        min_log_severity: LogSeverity::Trace,
        ..EngineConfig::default()
    })
    .unwrap();
    driver.render_frame(&mut graph, None).unwrap();

    {
        let captured = entries.lock().unwrap();
        assert!(captured.iter().any(|e| e.severity == LogSeverity::Trace
            && e.message.contains("'Orphan' deferred")));
        assert!(!captured.iter().any(|e| e.message.contains("'Early' deferred")));
    }

    drop(driver);
    restore();
}

#[test]
#[serial]
fn test_integration_driver_applies_min_severity() {
    let entries = capture(LogSeverity::Trace);

    let driver = FrameDriver::new(EngineConfig {
        min_log_severity: LogSeverity::Error,
        ..EngineConfig::default()
    })
    .unwrap();
    assert_eq!(Engine::min_severity(), LogSeverity::Error);
    drop(driver);

    // Startup and backend lifecycle entries are below Error
    assert!(entries.lock().unwrap().is_empty());

    restore();
}

#[test]
#[serial]
fn test_integration_statistics_header_counts_rendered_frames() {
    let entries = capture(LogSeverity::Info);

    let mut graph = RenderGraph::new();
    let color = graph.declare_resource(ResourceDesc::new("Color", ResourceKind::ColorTarget));
    graph
        .declare_pass(RenderPass::new("Geometry").write(color).execute(|_| Ok(())))
        .unwrap();

    let mut driver = FrameDriver::new(EngineConfig::default()).unwrap();
    for _ in 0..6 {
        driver.render_frame(&mut graph, None).unwrap();
    }
    entries.lock().unwrap().clear();
    driver.log_statistics(&graph);

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured[0].message, "After 6 frames: 1 passes");
        assert!(captured.iter().any(|e| e.message.contains("Geometry")));
    }

    drop(driver);
    restore();
}

#[test]
#[serial]
fn test_integration_unavailable_backend_logged() {
    let entries = capture(LogSeverity::Info);

    let result = FrameDriver::new(EngineConfig {
        api: ApiType::Metal,
        min_log_severity: LogSeverity::Info,
        ..EngineConfig::default()
    });
    assert!(matches!(result, Err(Error::InitializationFailed(_))));

    {
        let captured = entries.lock().unwrap();
        assert!(captured.iter().any(|e| e.severity == LogSeverity::Error
            && e.message.contains("Metal backend is disabled")));
    }

    restore();
}
