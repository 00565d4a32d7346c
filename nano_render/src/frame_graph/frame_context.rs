/// Per-frame context forwarded to every pass callback.

use std::any::Any;
use crate::backend::Backend;

/// Frame state handed by reference to `setup`/`execute` callbacks
///
/// Built by the driver once per frame. The graph never reads these fields;
/// it only forwards the context.
pub struct FrameRenderContext<'a> {
    /// Active backend; pass bodies issue their GPU work through it
    pub backend: &'a mut dyn Backend,
    /// Monotonically increasing frame number
    pub frame_index: u64,
    /// Seconds since the previous frame
    pub delta_seconds: f64,
    /// Seconds since the driver started
    pub elapsed_seconds: f64,
    /// Opaque application data
    pub user_data: Option<&'a mut (dyn Any + 'static)>,
}

impl<'a> FrameRenderContext<'a> {
    /// Context for frame 0 with zero timings and no user data
    pub fn new(backend: &'a mut dyn Backend) -> Self {
        Self {
            backend,
            frame_index: 0,
            delta_seconds: 0.0,
            elapsed_seconds: 0.0,
            user_data: None,
        }
    }

    pub fn with_timing(mut self, frame_index: u64, delta_seconds: f64, elapsed_seconds: f64) -> Self {
        self.frame_index = frame_index;
        self.delta_seconds = delta_seconds;
        self.elapsed_seconds = elapsed_seconds;
        self
    }

    pub fn with_user_data(mut self, user_data: &'a mut (dyn Any + 'static)) -> Self {
        self.user_data = Some(user_data);
        self
    }

    /// Downcast the user data to `T`
    pub fn user_data_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.user_data.as_deref_mut()?.downcast_mut::<T>()
    }
}
