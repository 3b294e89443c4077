//! Scheduling context for ordering policy evaluation.

use crate::models::Tick;

/// Runtime scheduling state passed to ordering policies.
///
/// Rebuilt by the engine immediately before every selection step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulingContext {
    /// Current simulation tick.
    pub current_time: Tick,
    /// Number of processes in the ready set at this step.
    pub ready_count: usize,
}

impl SchedulingContext {
    /// Creates a context at the given tick.
    pub fn at_time(current_time: Tick) -> Self {
        Self {
            current_time,
            ..Default::default()
        }
    }

    /// Sets the ready-set size.
    pub fn with_ready_count(mut self, ready_count: usize) -> Self {
        self.ready_count = ready_count;
        self
    }

    /// Ticks elapsed since `since` (negative if `since` is in the future).
    #[inline]
    pub fn elapsed_since(&self, since: Tick) -> Tick {
        self.current_time - since
    }
}
