/// Render pass declaration.
///
/// A pass is a unit of per-frame GPU work. It is described with a builder
/// and handed to `RenderGraph::declare_pass`, which validates it and infers
/// extra dependencies from its resource accesses.

use std::fmt;
use crate::error::Result;
use crate::utils::{PassHandle, ResourceHandle};
use super::frame_context::FrameRenderContext;

/// Boxed pass callback
pub type PassCallback = Box<dyn FnMut(&mut FrameRenderContext<'_>) -> Result<()> + Send>;

/// Builder for a pass declaration
///
/// # Example
///
/// ```
/// use nano_render::nre::frame_graph::{RenderGraph, RenderPass, ResourceDesc, ResourceKind};
///
/// let mut graph = RenderGraph::new();
/// let color = graph.declare_resource(ResourceDesc::new("Color", ResourceKind::ColorTarget));
///
/// let geometry = graph.declare_pass(
///     RenderPass::new("Geometry")
///         .write(color)
///         .execute(|ctx| {
///             // ctx.backend.create_mesh(...) etc.
///             Ok(())
///         }),
/// ).unwrap();
/// assert!(graph.is_pass_enabled(geometry));
/// ```
pub struct RenderPass {
    pub(crate) name: String,
    pub(crate) setup: Option<PassCallback>,
    pub(crate) execute: Option<PassCallback>,
    pub(crate) reads: Vec<ResourceHandle>,
    pub(crate) writes: Vec<ResourceHandle>,
    pub(crate) dependencies: Vec<PassHandle>,
    pub(crate) enabled: bool,
    pub(crate) measure_time: bool,
}

impl RenderPass {
    /// Start a pass declaration (enabled, timed, no accesses)
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            setup: None,
            execute: None,
            reads: Vec::new(),
            writes: Vec::new(),
            dependencies: Vec::new(),
            enabled: true,
            measure_time: true,
        }
    }

    /// Callback run before `execute` each frame (not timed)
    pub fn setup<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&mut FrameRenderContext<'_>) -> Result<()> + Send + 'static,
    {
        self.setup = Some(Box::new(callback));
        self
    }

    /// Main pass body (required)
    pub fn execute<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&mut FrameRenderContext<'_>) -> Result<()> + Send + 'static,
    {
        self.execute = Some(Box::new(callback));
        self
    }

    /// Declare a read of `resource`
    pub fn read(mut self, resource: ResourceHandle) -> Self {
        push_unique(&mut self.reads, resource);
        self
    }

    /// Declare a write of `resource`
    pub fn write(mut self, resource: ResourceHandle) -> Self {
        push_unique(&mut self.writes, resource);
        self
    }

    /// Require `pass` to have executed earlier in the same frame
    pub fn depends_on(mut self, pass: PassHandle) -> Self {
        push_unique(&mut self.dependencies, pass);
        self
    }

    /// Initial enabled state
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Whether to time the execute callback (otherwise duration is 0)
    pub fn measure_time(mut self, measure_time: bool) -> Self {
        self.measure_time = measure_time;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reads(&self) -> &[ResourceHandle] {
        &self.reads
    }

    pub fn writes(&self) -> &[ResourceHandle] {
        &self.writes
    }

    /// Explicit dependencies declared so far
    pub fn dependencies(&self) -> &[PassHandle] {
        &self.dependencies
    }

    pub fn has_execute(&self) -> bool {
        self.execute.is_some()
    }
}

impl fmt::Debug for RenderPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderPass")
            .field("name", &self.name)
            .field("has_setup", &self.setup.is_some())
            .field("has_execute", &self.execute.is_some())
            .field("reads", &self.reads)
            .field("writes", &self.writes)
            .field("dependencies", &self.dependencies)
            .field("enabled", &self.enabled)
            .field("measure_time", &self.measure_time)
            .finish()
    }
}

/// Set insertion that keeps first-seen order
pub(crate) fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if !items.contains(&item) {
        items.push(item);
    }
}
