//! Resource management module
//!
//! Handle-keyed registries and weak asset caches shared by the engine.

mod asset_cache;
mod registry;

pub use asset_cache::{AssetCache, MeshCache};
pub use registry::Registry;
