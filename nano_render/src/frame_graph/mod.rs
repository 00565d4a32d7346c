/// Frame graph: logical resources, passes and the per-frame scheduler
mod frame_context;
mod render_graph;
mod render_pass;
mod resource_table;
mod statistics;

pub use frame_context::FrameRenderContext;
pub use render_graph::RenderGraph;
pub use render_pass::{PassCallback, RenderPass};
pub use resource_table::{ResourceDesc, ResourceKind, ResourceRecord};
pub use statistics::{FrameReport, PassStatistics};
