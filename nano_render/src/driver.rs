/// Frame driver - owns the backend and runs a render graph once per frame
///
/// The driver brackets every `RenderGraph::execute` call with the backend's
/// `begin_frame`/`end_frame`, builds the `FrameRenderContext` and keeps the
/// frame counter and timer. The graph itself stays owned by the caller so it
/// can be rebuilt (`clear` + re-declare) between frames.

use std::any::Any;
use std::time::Instant;

use crate::backend::{create_backend, Backend, Viewport};
use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::error::Result;
use crate::frame_graph::{FrameRenderContext, FrameReport, RenderGraph};
use crate::{engine_bail, engine_debug, engine_info};

/// Wall-clock frame timer
struct FrameTimer {
    start: Instant,
    last: Instant,
}

impl FrameTimer {
    fn new() -> Self {
        let now = Instant::now();
        Self { start: now, last: now }
    }

    /// Advance to now; returns (delta, elapsed) in seconds
    fn tick(&mut self) -> (f64, f64) {
        let now = Instant::now();
        let delta = now.duration_since(self.last).as_secs_f64();
        self.last = now;
        (delta, now.duration_since(self.start).as_secs_f64())
    }
}

pub struct FrameDriver {
    backend: Box<dyn Backend>,
    frame_index: u64,
    timer: FrameTimer,
    running: bool,
}

impl FrameDriver {
    /// Create, initialize and configure the backend selected by `config`
    ///
    /// Also applies `config.min_log_severity` as the process-wide log
    /// threshold (`Engine::set_min_severity`), replacing whatever was set
    /// before.
    ///
    /// # Errors
    ///
    /// Fails if the backend cannot be created or initialized.
    pub fn new(config: EngineConfig) -> Result<Self> {
        Engine::set_min_severity(config.min_log_severity);
        engine_info!("nre::FrameDriver", "Starting '{}' on {} ({}x{}, validation {})",
            config.app_name, config.api, config.width, config.height,
            if config.enable_validation { "on" } else { "off" });

        let mut backend = create_backend(config.api)?;
        backend.initialize()?;
        backend.set_viewport(Viewport::from_size(config.width, config.height));
        backend.set_clear_color(config.clear_color);

        Ok(Self::from_initialized(backend))
    }

    /// Wrap a backend, initializing it
    ///
    /// # Errors
    ///
    /// Fails if the backend's `initialize` fails.
    pub fn with_backend(mut backend: Box<dyn Backend>) -> Result<Self> {
        backend.initialize()?;
        Ok(Self::from_initialized(backend))
    }

    fn from_initialized(backend: Box<dyn Backend>) -> Self {
        Self {
            backend,
            frame_index: 0,
            timer: FrameTimer::new(),
            running: true,
        }
    }

    /// Run one frame of `graph`
    ///
    /// `end_frame` is called even when a pass fails, so the backend is never
    /// left with a frame in flight. The frame counter advances either way.
    ///
    /// # Errors
    ///
    /// - the backend refused to begin or end the frame
    /// - a pass callback failed (that error wins over an `end_frame` error)
    pub fn render_frame(
        &mut self,
        graph: &mut RenderGraph,
        user_data: Option<&mut (dyn Any + 'static)>,
    ) -> Result<FrameReport> {
        if !self.running {
            engine_bail!("nre::FrameDriver", "render_frame called after shutdown");
        }

        let (delta, elapsed) = self.timer.tick();
        self.backend.begin_frame()?;

        let executed = {
            let mut context = FrameRenderContext::new(self.backend.as_mut())
                .with_timing(self.frame_index, delta, elapsed);
            if let Some(data) = user_data {
                context = context.with_user_data(data);
            }
            graph.execute(&mut context)
        };
        let ended = self.backend.end_frame();
        self.frame_index += 1;

        let report = executed?;
        ended?;
        Ok(report)
    }

    /// Log the graph's per-pass statistics table at Info
    pub fn log_statistics(&self, graph: &RenderGraph) {
        engine_info!("nre::FrameDriver", "After {} frames: {} passes", self.frame_index, graph.pass_count());
        for stats in graph.statistics() {
            engine_info!("nre::FrameDriver", "  {:<16} {:<8} {:>8.3} ms",
                stats.name,
                if stats.enabled { "enabled" } else { "disabled" },
                stats.last_duration_ms);
        }
    }

    /// Index the next rendered frame will carry
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    pub fn backend_mut(&mut self) -> &mut dyn Backend {
        self.backend.as_mut()
    }

    /// Shut the backend down (idempotent)
    pub fn shutdown(&mut self) {
        if self.running {
            self.running = false;
            self.backend.shutdown();
            engine_debug!("nre::FrameDriver", "Shut down after {} frames", self.frame_index);
        }
    }
}

impl Drop for FrameDriver {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
