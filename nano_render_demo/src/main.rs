//! NanoRender demo
//!
//! Builds a Uniforms -> Geometry -> Overlay frame graph on the headless
//! backend, runs a few frames, toggles the overlay and prints the pass
//! statistics.

use std::sync::Arc;

use nano_render::engine_info;
use nano_render::nre::{EngineConfig, FrameDriver, Result};
use nano_render::nre::backend::{Mesh, MeshData, Vertex};
use nano_render::nre::frame_graph::{RenderGraph, RenderPass, ResourceDesc, ResourceKind};
use nano_render::nre::log::LogSeverity;
use nano_render::nre::resource::MeshCache;

const FRAMES: u64 = 6;

/// Per-frame application data handed to passes through the context
#[derive(Default)]
struct SceneState {
    /// Uniform values "uploaded" by the Uniforms pass
    time: f32,
    draw_calls: u32,
}

fn triangle() -> MeshData {
    MeshData {
        vertices: vec![
            Vertex { position: [-0.5, -0.5, 0.0], normal: [0.0, 0.0, 1.0], uv: [0.0, 0.0] },
            Vertex { position: [0.5, -0.5, 0.0], normal: [0.0, 0.0, 1.0], uv: [1.0, 0.0] },
            Vertex { position: [0.0, 0.5, 0.0], normal: [0.0, 0.0, 1.0], uv: [0.5, 1.0] },
        ],
        indices: vec![0, 1, 2],
    }
}

fn build_graph(graph: &mut RenderGraph) -> Result<()> {
    let ubo = graph.declare_resource(ResourceDesc::new("UBO", ResourceKind::UniformBuffer));
    let color = graph.declare_resource(ResourceDesc::new("Color", ResourceKind::ColorTarget));
    let depth = graph.declare_resource(ResourceDesc::transient("Depth", ResourceKind::DepthTarget));

    graph.declare_pass(
        RenderPass::new("Uniforms")
            .write(ubo)
            .execute(|ctx| {
                let elapsed = ctx.elapsed_seconds as f32;
                if let Some(scene) = ctx.user_data_mut::<SceneState>() {
                    scene.time = elapsed;
                }
                Ok(())
            }),
    )?;

    let mut meshes = MeshCache::new();
    let mut mesh: Option<Arc<dyn Mesh>> = None;
    graph.declare_pass(
        RenderPass::new("Geometry")
            .read(ubo)
            .write(color)
            .write(depth)
            .setup(move |ctx| {
                if mesh.is_none() {
                    mesh = Some(meshes.load_from_generator("triangle", &mut *ctx.backend, triangle)?);
                }
                Ok(())
            })
            .execute(|ctx| {
                if let Some(scene) = ctx.user_data_mut::<SceneState>() {
                    scene.draw_calls += 1;
                }
                Ok(())
            }),
    )?;

    graph.declare_pass(
        RenderPass::new("Overlay")
            .read(depth)
            .write(color)
            .measure_time(false)
            .execute(|_| Ok(())),
    )?;

    Ok(())
}

fn main() -> Result<()> {
    let config = EngineConfig {
        app_name: "NanoRender Example".to_string(),
        width: 800,
        height: 600,
        min_log_severity: LogSeverity::Debug,
        ..EngineConfig::default()
    };
    let mut driver = FrameDriver::new(config)?;

    let mut graph = RenderGraph::new();
    build_graph(&mut graph)?;

    let overlay = graph.find_pass("Overlay");
    let mut scene = SceneState::default();

    for frame in 0..FRAMES {
        if frame == FRAMES / 2 {
            if let Some(overlay) = overlay {
                graph.set_pass_enabled(overlay, false);
            }
        }
        let report = driver.render_frame(&mut graph, Some(&mut scene))?;
        engine_info!("demo", "Frame {}: {} executed, {} deferred, {} disabled ({:.3} ms)",
            report.frame_index, report.executed.len(), report.deferred.len(),
            report.disabled.len(), report.total_duration_ms);
    }

    driver.log_statistics(&graph);
    engine_info!("demo", "{} draw calls, uniforms at t={:.3}s", scene.draw_calls, scene.time);

    driver.shutdown();
    Ok(())
}
