/*!
# NanoRender Engine

Core of the NanoRender rendering engine: a frame graph that orders render
passes from their declared resource accesses and runs them once per frame.

## Architecture

- **RenderGraph**: pass table, logical resource table and per-frame scheduler
- **RenderPass**: builder describing one unit of per-frame GPU work
- **FrameDriver**: owns the backend and brackets each frame
- **Backend**: GPU device contract (headless implementation included)
- **Registry / AssetCache**: handle-keyed and weak, name-keyed storage
- **Engine**: process-wide logging facade

Passes run in declaration order. A pass must be declared after every pass it
depends on, or it is skipped for the frame.
*/

// Internal modules
mod error;
mod engine;
mod config;
mod driver;
pub mod log;
pub mod utils;
pub mod backend;
pub mod resource;
pub mod frame_graph;

// Main nre namespace module
pub mod nre {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging facade
    pub use crate::engine::Engine;

    // Startup configuration and frame loop
    pub use crate::config::EngineConfig;
    pub use crate::driver::FrameDriver;

    // Logging sub-module (types only, macros stay at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Backend contract and headless implementation
    pub mod backend {
        pub use crate::backend::*;
    }

    // Registries and caches
    pub mod resource {
        pub use crate::resource::*;
    }

    // Frame graph
    pub mod frame_graph {
        pub use crate::frame_graph::*;
    }

    // Handles
    pub mod handle {
        pub use crate::utils::handle::*;
    }
}

// Re-export math library at crate root
pub use glam;
