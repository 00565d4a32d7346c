//! Error types for the NanoRender engine
//!
//! This module defines the error types used throughout the engine,
//! including backend access, asset caching, and frame graph declaration.

use std::fmt;

/// Result type for NanoRender engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// NanoRender engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (OpenGL, Vulkan, headless, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (mesh, texture, shader, cached asset, etc.)
    InvalidResource(String),

    /// Initialization failed (backend factory, driver, subsystems)
    InitializationFailed(String),

    /// Pass declaration rejected (e.g. no execute callback)
    InvalidPass(String),

    /// Pass declaration references a resource the graph does not know
    UndeclaredResource(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::InvalidPass(msg) => write!(f, "Invalid pass: {}", msg),
            Error::UndeclaredResource(msg) => write!(f, "Undeclared resource: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Log an error and build an `Error` of the given variant
///
/// ```ignore
/// return Err(engine_err!("nre::RenderGraph", InvalidPass,
///     "pass '{}' has no execute callback", name));
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $variant:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::nre::Error::$variant(message)
    }};
}

/// Log an error and return early with `Error::BackendError`
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, BackendError, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
