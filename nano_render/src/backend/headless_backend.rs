/// Headless backend (no GPU)
///
/// Implements the full `Backend` contract without touching a graphics API.
/// Every call is validated and recorded in a shared `HeadlessState`, so a
/// driver or test can inspect what pass bodies asked the device to do.

use std::sync::{Arc, Mutex, MutexGuard};
use glam::Vec4;

use crate::error::Result;
use crate::{engine_bail, engine_err, engine_info};
use super::backend::Backend;
use super::types::{
    ApiType, BackendCapabilities, Mesh, MeshData, Shader, ShaderDesc, ShaderStage,
    Texture, TextureDesc, Viewport,
};

// ============================================================================
// Headless resources
// ============================================================================

#[derive(Debug)]
pub struct HeadlessMesh {
    vertex_count: u32,
    index_count: u32,
    byte_size: usize,
}

impl HeadlessMesh {
    /// Bytes that a real backend would have uploaded
    pub fn byte_size(&self) -> usize {
        self.byte_size
    }
}

impl Mesh for HeadlessMesh {
    fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    fn index_count(&self) -> u32 {
        self.index_count
    }
}

#[derive(Debug)]
pub struct HeadlessShader {
    name: String,
    stages: Vec<ShaderStage>,
}

impl Shader for HeadlessShader {
    fn name(&self) -> &str {
        &self.name
    }

    fn stages(&self) -> Vec<ShaderStage> {
        self.stages.clone()
    }
}

#[derive(Debug)]
pub struct HeadlessTexture {
    desc: TextureDesc,
}

impl Texture for HeadlessTexture {
    fn desc(&self) -> &TextureDesc {
        &self.desc
    }
}

// ============================================================================
// Recorded state
// ============================================================================

/// Everything the headless backend has been asked to do
#[derive(Debug, Clone, Default)]
pub struct HeadlessState {
    pub initialized: bool,
    pub in_frame: bool,
    pub frames_begun: u64,
    pub frames_ended: u64,
    pub meshes_created: u32,
    pub shaders_created: u32,
    pub textures_created: u32,
    pub viewport: Viewport,
    pub clear_color: Vec4,
}

// ============================================================================
// HeadlessBackend
// ============================================================================

pub struct HeadlessBackend {
    state: Arc<Mutex<HeadlessState>>,
    capabilities: BackendCapabilities,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(HeadlessState::default())),
            capabilities: BackendCapabilities::empty(),
        }
    }

    /// Report the given capabilities instead of none
    pub fn with_capabilities(mut self, capabilities: BackendCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Shared view of the recorded state (stays valid after the backend is boxed)
    pub fn state_handle(&self) -> Arc<Mutex<HeadlessState>> {
        self.state.clone()
    }

    /// Snapshot of the recorded state
    pub fn snapshot(&self) -> HeadlessState {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, HeadlessState> {
        // A panic inside a pass body can poison the lock; the counters are still usable
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn require_initialized(&self, operation: &str) -> Result<()> {
        if !self.lock().initialized {
            engine_bail!("nre::HeadlessBackend", "{}: backend not initialized", operation);
        }
        Ok(())
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for HeadlessBackend {
    fn api_type(&self) -> ApiType {
        ApiType::Headless
    }

    fn initialize(&mut self) -> Result<()> {
        let mut state = self.lock();
        if state.initialized {
            return Err(engine_err!("nre::HeadlessBackend", InitializationFailed,
                "backend already initialized"));
        }
        state.initialized = true;
        drop(state);
        engine_info!("nre::HeadlessBackend", "Headless backend initialized");
        Ok(())
    }

    fn shutdown(&mut self) {
        let mut state = self.lock();
        if state.initialized {
            state.initialized = false;
            state.in_frame = false;
            drop(state);
            engine_info!("nre::HeadlessBackend", "Headless backend shut down");
        }
    }

    fn begin_frame(&mut self) -> Result<()> {
        self.require_initialized("begin_frame")?;
        let mut state = self.lock();
        if state.in_frame {
            drop(state);
            engine_bail!("nre::HeadlessBackend", "begin_frame called while a frame is in flight");
        }
        state.in_frame = true;
        state.frames_begun += 1;
        Ok(())
    }

    fn end_frame(&mut self) -> Result<()> {
        self.require_initialized("end_frame")?;
        let mut state = self.lock();
        if !state.in_frame {
            drop(state);
            engine_bail!("nre::HeadlessBackend", "end_frame called without begin_frame");
        }
        state.in_frame = false;
        state.frames_ended += 1;
        Ok(())
    }

    fn capabilities(&self) -> BackendCapabilities {
        self.capabilities
    }

    fn create_mesh(&mut self, data: &MeshData) -> Result<Arc<dyn Mesh>> {
        self.require_initialized("create_mesh")?;
        if data.is_empty() {
            return Err(engine_err!("nre::HeadlessBackend", InvalidResource,
                "create_mesh: empty vertex or index data"));
        }
        self.lock().meshes_created += 1;
        Ok(Arc::new(HeadlessMesh {
            vertex_count: data.vertices.len() as u32,
            index_count: data.indices.len() as u32,
            byte_size: data.vertex_bytes().len() + data.index_bytes().len(),
        }))
    }

    fn create_shader(&mut self, desc: &ShaderDesc) -> Result<Arc<dyn Shader>> {
        self.require_initialized("create_shader")?;
        if desc.sources.is_empty() {
            return Err(engine_err!("nre::HeadlessBackend", InvalidResource,
                "create_shader: '{}' has no sources", desc.name));
        }
        self.lock().shaders_created += 1;
        Ok(Arc::new(HeadlessShader {
            name: desc.name.clone(),
            stages: desc.sources.iter().map(|s| s.stage).collect(),
        }))
    }

    fn create_texture(&mut self, desc: &TextureDesc) -> Result<Arc<dyn Texture>> {
        self.require_initialized("create_texture")?;
        if desc.width == 0 || desc.height == 0 {
            return Err(engine_err!("nre::HeadlessBackend", InvalidResource,
                "create_texture: invalid size {}x{}", desc.width, desc.height));
        }
        self.lock().textures_created += 1;
        Ok(Arc::new(HeadlessTexture { desc: *desc }))
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.lock().viewport = viewport;
    }

    fn set_clear_color(&mut self, color: Vec4) {
        self.lock().clear_color = color;
    }
}

#[cfg(test)]
#[path = "headless_backend_tests.rs"]
mod tests;
