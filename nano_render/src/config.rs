/// Engine configuration

use glam::Vec4;
use crate::backend::ApiType;
use crate::log::LogSeverity;

/// Startup configuration consumed by `FrameDriver::new`
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Application name (reported in backend logs)
    pub app_name: String,
    /// Backend selected by the factory
    pub api: ApiType,
    /// Initial viewport width in pixels
    pub width: u32,
    /// Initial viewport height in pixels
    pub height: u32,
    /// Clear color applied once the backend is initialized
    pub clear_color: Vec4,
    /// Enable validation/debug layers where the backend supports them
    pub enable_validation: bool,
    /// Minimum severity forwarded to the global logger
    ///
    /// `FrameDriver::new` installs it process-wide through
    /// `Engine::set_min_severity`, affecting every driver and logger.
    pub min_log_severity: LogSeverity,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            app_name: "NanoRender Engine".to_string(),
            api: ApiType::Headless,
            width: 1280,
            height: 720,
            clear_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            enable_validation: cfg!(debug_assertions),
            min_log_severity: LogSeverity::Info,
        }
    }
}
