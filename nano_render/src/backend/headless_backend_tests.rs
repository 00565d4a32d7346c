/// Tests for HeadlessBackend and the backend factory

use super::*;
use crate::backend::create_backend;
use crate::backend::types::{ShaderSource, TextureFormat, Vertex};
use crate::error::Error;

fn initialized() -> HeadlessBackend {
    let mut backend = HeadlessBackend::new();
    backend.initialize().unwrap();
    backend
}

fn triangle() -> MeshData {
    MeshData {
        vertices: vec![Vertex::default(); 3],
        indices: vec![0, 1, 2],
    }
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_initialize_and_shutdown() {
    let mut backend = HeadlessBackend::new();
    assert!(!backend.snapshot().initialized);
    backend.initialize().unwrap();
    assert!(backend.snapshot().initialized);
    backend.shutdown();
    assert!(!backend.snapshot().initialized);
}

#[test]
fn test_double_initialize_fails() {
    let mut backend = initialized();
    assert!(matches!(backend.initialize(), Err(Error::InitializationFailed(_))));
}

#[test]
fn test_frame_bracketing() {
    let mut backend = initialized();
    backend.begin_frame().unwrap();
    assert!(backend.snapshot().in_frame);
    backend.end_frame().unwrap();

    let state = backend.snapshot();
    assert!(!state.in_frame);
    assert_eq!(state.frames_begun, 1);
    assert_eq!(state.frames_ended, 1);
}

#[test]
fn test_nested_begin_frame_fails() {
    let mut backend = initialized();
    backend.begin_frame().unwrap();
    assert!(matches!(backend.begin_frame(), Err(Error::BackendError(_))));
}

#[test]
fn test_end_frame_without_begin_fails() {
    let mut backend = initialized();
    assert!(backend.end_frame().is_err());
}

#[test]
fn test_frame_before_initialize_fails() {
    let mut backend = HeadlessBackend::new();
    assert!(backend.begin_frame().is_err());
}

// ============================================================================
// Resource creation
// ============================================================================

#[test]
fn test_create_mesh_counts_bytes() {
    let mut backend = initialized();
    let mesh = backend.create_mesh(&triangle()).unwrap();
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.index_count(), 3);
    assert_eq!(backend.snapshot().meshes_created, 1);
    // 3 vertices * 8 floats * 4 bytes + 3 indices * 4 bytes
    assert_eq!(triangle().vertex_bytes().len() + triangle().index_bytes().len(), 108);
}

#[test]
fn test_create_mesh_rejects_empty_data() {
    let mut backend = initialized();
    let result = backend.create_mesh(&MeshData::default());
    assert!(matches!(result, Err(Error::InvalidResource(_))));
    assert_eq!(backend.snapshot().meshes_created, 0);
}

#[test]
fn test_create_shader() {
    let mut backend = initialized();
    let desc = ShaderDesc {
        name: "basic".to_string(),
        sources: vec![
            ShaderSource::new(ShaderStage::Vertex, "void main() {}"),
            ShaderSource::new(ShaderStage::Fragment, "void main() {}"),
        ],
    };
    let shader = backend.create_shader(&desc).unwrap();
    assert_eq!(shader.name(), "basic");
    assert_eq!(shader.stages(), vec![ShaderStage::Vertex, ShaderStage::Fragment]);
}

#[test]
fn test_create_texture_rejects_zero_size() {
    let mut backend = initialized();
    let desc = TextureDesc { width: 0, ..TextureDesc::default() };
    assert!(backend.create_texture(&desc).is_err());

    let desc = TextureDesc {
        width: 256,
        height: 128,
        format: TextureFormat::Rgba16F,
        generate_mipmaps: true,
    };
    let texture = backend.create_texture(&desc).unwrap();
    assert_eq!(texture.desc().mip_levels(), 9);
}

#[test]
fn test_viewport_and_clear_color_recorded() {
    let mut backend = initialized();
    backend.set_viewport(Viewport::from_size(800, 600));
    backend.set_clear_color(Vec4::new(0.1, 0.2, 0.3, 1.0));
    let state = backend.snapshot();
    assert_eq!(state.viewport.width, 800);
    assert_eq!(state.clear_color, Vec4::new(0.1, 0.2, 0.3, 1.0));
}

#[test]
fn test_capabilities() {
    let backend = HeadlessBackend::new()
        .with_capabilities(BackendCapabilities::RAY_TRACING | BackendCapabilities::MESH_SHADERS);
    assert!(backend.capabilities().contains(BackendCapabilities::RAY_TRACING));
    assert!(!backend.capabilities().contains(BackendCapabilities::SHADER_FLOAT64));
}

#[test]
fn test_state_handle_is_shared() {
    let backend = HeadlessBackend::new();
    let state = backend.state_handle();
    let mut boxed: Box<dyn Backend> = Box::new(backend);
    boxed.initialize().unwrap();
    assert!(state.lock().unwrap().initialized);
}

// ============================================================================
// Factory
// ============================================================================

#[test]
fn test_factory_headless() {
    let backend = create_backend(ApiType::Headless).unwrap();
    assert_eq!(backend.api_type(), ApiType::Headless);
}

#[test]
fn test_factory_native_apis_disabled() {
    for api in [ApiType::OpenGL, ApiType::Vulkan, ApiType::DirectX12, ApiType::Metal] {
        match create_backend(api) {
            Err(Error::InitializationFailed(msg)) => assert!(msg.contains("disabled")),
            _ => panic!("{} should not be available", api),
        }
    }
}
