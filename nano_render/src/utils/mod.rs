//! Small shared utilities

pub mod handle;

pub use handle::{Handle, HandleAllocator, PassHandle, ResourceHandle, AssetHandle};
