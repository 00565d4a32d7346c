/// Render graph - pass table, resource hazards and the per-frame scheduler.
///
/// Passes are declared once per graph build and executed every frame in
/// declaration order. Dependencies come from two places:
///
/// - explicit `depends_on` handles
/// - resource hazards inferred at declaration time: reading a resource
///   depends on its last writer (read-after-write), writing it depends on
///   its last writer too (write-after-write), and the writer then becomes
///   the new last writer
///
/// Write-after-read is NOT tracked: a pass writing a resource does not wait
/// for earlier readers of that resource. Declare an explicit dependency when
/// that ordering matters.
///
/// # Ordering contract
///
/// The scheduler performs a single linear scan; there is no topological
/// sort and no cycle detection. A pass runs only if every dependency has
/// already run earlier in the same scan, so a pass must be declared after
/// everything it depends on. A pass declared too early is silently skipped
/// every frame (visible only as `FrameReport::deferred` and unchanged
/// statistics).
///
/// # Errors inside passes
///
/// An error returned by a `setup` or `execute` callback aborts the rest of
/// the frame's scan and is returned unchanged from `execute`. One failing
/// pass drops every pass after it for that frame.
///
/// # Threading
///
/// The graph is `Send` but performs no locking. Declaration and execution
/// must not overlap; share it across threads behind a `Mutex`.

use std::time::Instant;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::Result;
use crate::utils::{Handle, HandleAllocator, PassHandle, ResourceHandle};
use crate::{engine_debug, engine_err, engine_trace, engine_warn};
use super::frame_context::FrameRenderContext;
use super::render_pass::{push_unique, PassCallback, RenderPass};
use super::resource_table::{ResourceDesc, ResourceRecord, ResourceTable};
use super::statistics::{FrameReport, PassStatistics};

/// A registered pass with its resolved dependencies
struct PassRecord {
    handle: PassHandle,
    name: String,
    setup: Option<PassCallback>,
    execute: PassCallback,
    reads: Vec<ResourceHandle>,
    writes: Vec<ResourceHandle>,
    /// Explicit dependencies plus those inferred from resource hazards
    dependencies: Vec<PassHandle>,
    enabled: bool,
    measure_time: bool,
    last_duration_ms: f64,
}

pub struct RenderGraph {
    passes: Vec<PassRecord>,
    /// Same order and indices as `passes`
    statistics: Vec<PassStatistics>,
    pass_index: FxHashMap<PassHandle, usize>,
    pass_ids: HandleAllocator<PassHandle>,
    resources: ResourceTable,
}

impl RenderGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self {
            passes: Vec::new(),
            statistics: Vec::new(),
            pass_index: FxHashMap::default(),
            pass_ids: HandleAllocator::new(),
            resources: ResourceTable::new(),
        }
    }

    // ===== DECLARATION =====

    /// Declare a logical resource
    ///
    /// Names are not checked for uniqueness.
    pub fn declare_resource(&mut self, desc: ResourceDesc) -> ResourceHandle {
        let name = desc.name.clone();
        let handle = self.resources.declare(desc);
        engine_debug!("nre::RenderGraph", "Declared resource '{}' as {}", name, handle);
        handle
    }

    /// Declare a pass
    ///
    /// Resolves the pass's dependencies from its resource accesses and
    /// records it as last writer of every resource it writes.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidPass` if the pass has no execute callback
    /// - `Error::UndeclaredResource` if a read or write names a resource
    ///   this graph does not know (including the null handle)
    ///
    /// The graph is left untouched when an error is returned.
    pub fn declare_pass(&mut self, pass: RenderPass) -> Result<PassHandle> {
        let RenderPass {
            name,
            setup,
            execute,
            reads,
            writes,
            mut dependencies,
            enabled,
            measure_time,
        } = pass;

        let Some(execute) = execute else {
            return Err(engine_err!("nre::RenderGraph", InvalidPass,
                "pass '{}' has no execute callback", name));
        };
        for (access, list) in [("reads", &reads), ("writes", &writes)] {
            if let Some(missing) = list.iter().find(|r| !self.resources.contains(**r)) {
                return Err(engine_err!("nre::RenderGraph", UndeclaredResource,
                    "pass '{}' {} {} which is not declared in this graph", name, access, missing));
            }
        }

        let handle = self.pass_ids.allocate();

        for &resource in &reads {
            if let Some(writer) = self.resources.last_writer(resource) {
                push_unique(&mut dependencies, writer);
            }
        }
        for &resource in &writes {
            if let Some(writer) = self.resources.last_writer(resource) {
                push_unique(&mut dependencies, writer);
            }
            self.resources.set_last_writer(resource, handle);
        }

        engine_debug!("nre::RenderGraph", "Declared pass '{}' as {} (depends on {:?})",
            name, handle, dependencies);

        self.pass_index.insert(handle, self.passes.len());
        self.statistics.push(PassStatistics {
            handle,
            name: name.clone(),
            enabled,
            last_duration_ms: 0.0,
        });
        self.passes.push(PassRecord {
            handle,
            name,
            setup,
            execute,
            reads,
            writes,
            dependencies,
            enabled,
            measure_time,
            last_duration_ms: 0.0,
        });

        Ok(handle)
    }

    // ===== ENABLE / DISABLE =====

    /// Enable or disable a pass (no-op for null or unknown handles)
    pub fn set_pass_enabled(&mut self, handle: PassHandle, enabled: bool) {
        let Some(index) = self.index_of(handle) else {
            return;
        };
        self.passes[index].enabled = enabled;
        self.statistics[index].enabled = enabled;
        engine_debug!("nre::RenderGraph", "Pass '{}' {}",
            self.passes[index].name, if enabled { "enabled" } else { "disabled" });
    }

    /// Whether a pass is enabled (false for null or unknown handles)
    pub fn is_pass_enabled(&self, handle: PassHandle) -> bool {
        self.index_of(handle)
            .map(|index| self.passes[index].enabled)
            .unwrap_or(false)
    }

    // ===== LIFECYCLE =====

    /// Drop every pass, resource and statistic and restart handle numbering
    ///
    /// Handles issued before the clear do not match any handle issued
    /// after it.
    pub fn clear(&mut self) {
        self.passes.clear();
        self.statistics.clear();
        self.pass_index.clear();
        self.pass_ids.reset();
        self.resources.clear();
        engine_debug!("nre::RenderGraph", "Graph cleared");
    }

    // ===== EXECUTION =====

    /// Run one frame
    ///
    /// Scans passes in declaration order. Disabled passes are skipped. An
    /// enabled pass whose dependencies have not all run earlier in this
    /// scan is deferred (not retried this frame). Otherwise `setup` runs,
    /// then `execute`, which is timed when the pass measures time.
    ///
    /// # Errors
    ///
    /// The first error returned by a pass callback; passes after it do not
    /// run this frame.
    pub fn execute(&mut self, context: &mut FrameRenderContext<'_>) -> Result<FrameReport> {
        let mut report = FrameReport {
            frame_index: context.frame_index,
            ..FrameReport::default()
        };
        let mut executed: FxHashSet<PassHandle> = FxHashSet::default();

        for (index, record) in self.passes.iter_mut().enumerate() {
            if !record.enabled {
                report.disabled.push(record.handle);
                continue;
            }

            let blocker = record.dependencies
                .iter()
                .copied()
                .filter(|dependency| dependency.is_valid())
                .find(|dependency| !executed.contains(dependency));
            if let Some(blocker) = blocker {
                engine_trace!("nre::RenderGraph", "Frame {}: pass '{}' deferred, {} has not run",
                    context.frame_index, record.name, blocker);
                report.deferred.push(record.handle);
                continue;
            }

            if let Err(error) = Self::run_pass(record, context) {
                engine_warn!("nre::RenderGraph", "Frame {}: pass '{}' failed, aborting frame: {}",
                    context.frame_index, record.name, error);
                return Err(error);
            }

            executed.insert(record.handle);
            report.executed.push(record.handle);
            report.total_duration_ms += record.last_duration_ms;

            let stats = &mut self.statistics[index];
            debug_assert_eq!(stats.handle, record.handle);
            stats.name.clone_from(&record.name);
            stats.enabled = record.enabled;
            stats.last_duration_ms = record.last_duration_ms;
        }

        Ok(report)
    }

    fn run_pass(record: &mut PassRecord, context: &mut FrameRenderContext<'_>) -> Result<()> {
        if let Some(setup) = record.setup.as_mut() {
            setup(context)?;
        }

        if record.measure_time {
            let start = Instant::now();
            (record.execute)(context)?;
            record.last_duration_ms = start.elapsed().as_secs_f64() * 1000.0;
        } else {
            (record.execute)(context)?;
            record.last_duration_ms = 0.0;
        }
        Ok(())
    }

    // ===== INSPECTION =====

    /// Per-pass statistics in declaration order
    pub fn statistics(&self) -> &[PassStatistics] {
        &self.statistics
    }

    pub fn pass_statistics(&self, handle: PassHandle) -> Option<&PassStatistics> {
        self.index_of(handle).map(|index| &self.statistics[index])
    }

    pub fn pass_count(&self) -> usize {
        self.passes.len()
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Pass handles in declaration order
    pub fn pass_handles(&self) -> Vec<PassHandle> {
        self.passes.iter().map(|record| record.handle).collect()
    }

    pub fn pass_name(&self, handle: PassHandle) -> Option<&str> {
        self.index_of(handle).map(|index| self.passes[index].name.as_str())
    }

    /// First pass declared with this name
    pub fn find_pass(&self, name: &str) -> Option<PassHandle> {
        self.passes.iter().find(|record| record.name == name).map(|record| record.handle)
    }

    /// Resolved dependencies (explicit + inferred)
    pub fn pass_dependencies(&self, handle: PassHandle) -> Option<&[PassHandle]> {
        self.index_of(handle).map(|index| self.passes[index].dependencies.as_slice())
    }

    pub fn pass_reads(&self, handle: PassHandle) -> Option<&[ResourceHandle]> {
        self.index_of(handle).map(|index| self.passes[index].reads.as_slice())
    }

    pub fn pass_writes(&self, handle: PassHandle) -> Option<&[ResourceHandle]> {
        self.index_of(handle).map(|index| self.passes[index].writes.as_slice())
    }

    pub fn resource_desc(&self, handle: ResourceHandle) -> Option<&ResourceDesc> {
        self.resources.get(handle).map(|record| &record.desc)
    }

    /// Declared resources in declaration order
    pub fn resources(&self) -> &[ResourceRecord] {
        self.resources.records()
    }

    /// Handle the next successful `declare_pass` will return
    ///
    /// Lets a caller name a pass before declaring it, e.g. to express an
    /// explicit dependency on a pass that is declared later.
    pub fn next_pass_handle(&self) -> PassHandle {
        self.pass_ids.peek_next()
    }

    /// Pass currently recorded as last writer of a resource
    pub fn last_writer(&self, handle: ResourceHandle) -> Option<PassHandle> {
        self.resources.last_writer(handle)
    }

    fn index_of(&self, handle: PassHandle) -> Option<usize> {
        if handle.is_null() {
            return None;
        }
        self.pass_index.get(&handle).copied()
    }
}

impl Default for RenderGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "render_graph_tests.rs"]
mod tests;
