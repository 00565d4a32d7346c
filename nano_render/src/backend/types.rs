/// Backend-facing descriptors and resource traits

use std::fmt;
use bitflags::bitflags;
use bytemuck::{Pod, Zeroable};

// ============================================================================
// API selection
// ============================================================================

/// Graphics API a backend implements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiType {
    OpenGL,
    Vulkan,
    DirectX12,
    Metal,
    /// No GPU: records calls only
    Headless,
}

impl fmt::Display for ApiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ApiType::OpenGL => "OpenGL",
            ApiType::Vulkan => "Vulkan",
            ApiType::DirectX12 => "DirectX 12",
            ApiType::Metal => "Metal",
            ApiType::Headless => "Headless",
        };
        f.write_str(name)
    }
}

bitflags! {
    /// Optional device features reported by a backend
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BackendCapabilities: u32 {
        const RAY_TRACING = 1 << 0;
        const SHADER_FLOAT64 = 1 << 1;
        const MESH_SHADERS = 1 << 2;
    }
}

// ============================================================================
// Mesh
// ============================================================================

/// Interleaved vertex layout uploaded by `Backend::create_mesh`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// CPU-side mesh data
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Whether there is nothing to upload
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    /// Raw vertex bytes as they would be uploaded
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index bytes as they would be uploaded
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// GPU mesh created by a backend
pub trait Mesh: Send + Sync + fmt::Debug {
    fn vertex_count(&self) -> u32;
    fn index_count(&self) -> u32;
}

// ============================================================================
// Shader
// ============================================================================

/// Pipeline stage a shader source targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Compute,
}

/// One stage of shader source
#[derive(Debug, Clone)]
pub struct ShaderSource {
    pub stage: ShaderStage,
    pub source: String,
    pub entry_point: String,
}

impl ShaderSource {
    pub fn new(stage: ShaderStage, source: impl Into<String>) -> Self {
        Self {
            stage,
            source: source.into(),
            entry_point: "main".to_string(),
        }
    }
}

/// Shader program descriptor
#[derive(Debug, Clone)]
pub struct ShaderDesc {
    pub name: String,
    pub sources: Vec<ShaderSource>,
}

/// GPU shader program created by a backend
pub trait Shader: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;
    fn stages(&self) -> Vec<ShaderStage>;
}

// ============================================================================
// Texture
// ============================================================================

/// Texel format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    Rgba8,
    Rgba16F,
    Depth24Stencil8,
}

/// Texture descriptor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureDesc {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub generate_mipmaps: bool,
}

impl Default for TextureDesc {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
            format: TextureFormat::Rgba8,
            generate_mipmaps: true,
        }
    }
}

impl TextureDesc {
    /// Number of mip levels a full chain would have for this size
    pub fn mip_levels(&self) -> u32 {
        if !self.generate_mipmaps {
            return 1;
        }
        32 - self.width.max(self.height).max(1).leading_zeros()
    }
}

/// GPU texture created by a backend
pub trait Texture: Send + Sync + fmt::Debug {
    fn desc(&self) -> &TextureDesc;
}

// ============================================================================
// Viewport
// ============================================================================

/// Viewport rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Full-surface viewport anchored at the origin
    pub fn from_size(width: u32, height: u32) -> Self {
        Self { x: 0, y: 0, width, height }
    }
}
