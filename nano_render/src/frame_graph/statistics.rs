/// Statistics published by `RenderGraph::execute`.

use crate::utils::PassHandle;

/// UI-facing snapshot of one pass
///
/// Kept in declaration order, one entry per pass, refreshed each time the
/// pass runs. A pass that is disabled or deferred keeps its previous values
/// (zero if it never ran).
#[derive(Debug, Clone, PartialEq)]
pub struct PassStatistics {
    pub handle: PassHandle,
    pub name: String,
    pub enabled: bool,
    pub last_duration_ms: f64,
}

/// What happened during one `execute` call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Frame index taken from the context
    pub frame_index: u64,
    /// Passes that ran, in execution order
    pub executed: Vec<PassHandle>,
    /// Enabled passes skipped because a dependency had not run yet
    pub deferred: Vec<PassHandle>,
    /// Passes skipped because they are disabled
    pub disabled: Vec<PassHandle>,
    /// Sum of the measured execute durations
    pub total_duration_ms: f64,
}

impl FrameReport {
    pub fn was_executed(&self, pass: PassHandle) -> bool {
        self.executed.contains(&pass)
    }

    pub fn was_deferred(&self, pass: PassHandle) -> bool {
        self.deferred.contains(&pass)
    }
}
