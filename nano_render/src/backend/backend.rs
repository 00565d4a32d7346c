/// Backend trait - the GPU device contract consumed by pass bodies

use std::sync::Arc;
use glam::Vec4;

use crate::error::Result;
use crate::engine_err;
use super::headless_backend::HeadlessBackend;
use super::types::{
    ApiType, BackendCapabilities, Mesh, MeshData, Shader, ShaderDesc,
    Texture, TextureDesc, Viewport,
};

/// Graphics backend
///
/// One implementation per graphics API, selected at startup through
/// `create_backend`. The frame graph never calls into the backend itself;
/// the driver brackets each frame with `begin_frame`/`end_frame`, and pass
/// bodies reach the backend through `FrameRenderContext::backend`.
///
/// Backends are assumed to have single-thread context affinity: every call
/// must come from the thread that owns the graph.
pub trait Backend: Send {
    /// API implemented by this backend
    fn api_type(&self) -> ApiType;

    /// Acquire the device/context
    fn initialize(&mut self) -> Result<()>;

    /// Release the device/context
    fn shutdown(&mut self);

    /// Start recording a frame
    fn begin_frame(&mut self) -> Result<()>;

    /// Finish and present a frame
    fn end_frame(&mut self) -> Result<()>;

    /// Optional features of the device
    fn capabilities(&self) -> BackendCapabilities;

    /// Upload a mesh
    fn create_mesh(&mut self, data: &MeshData) -> Result<Arc<dyn Mesh>>;

    /// Compile a shader program
    fn create_shader(&mut self, desc: &ShaderDesc) -> Result<Arc<dyn Shader>>;

    /// Allocate a texture
    fn create_texture(&mut self, desc: &TextureDesc) -> Result<Arc<dyn Texture>>;

    /// Set the active viewport
    fn set_viewport(&mut self, viewport: Viewport);

    /// Set the color used to clear the backbuffer
    fn set_clear_color(&mut self, color: Vec4);
}

/// Create a backend for the requested API
///
/// Native GPU backends live in their own crates; only the headless backend
/// is compiled into the core.
///
/// # Errors
///
/// Returns `Error::InitializationFailed` for APIs that are not available
/// in this build.
pub fn create_backend(api: ApiType) -> Result<Box<dyn Backend>> {
    match api {
        ApiType::Headless => Ok(Box::new(HeadlessBackend::new())),
        ApiType::OpenGL | ApiType::Vulkan | ApiType::DirectX12 | ApiType::Metal => {
            Err(engine_err!("nre::Backend", InitializationFailed,
                "{} backend is disabled in this build", api))
        }
    }
}
