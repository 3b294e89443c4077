//! Built-in ordering policies.
//!
//! - **SJF**: shortest burst first, non-preemptive
//! - **PRIORITY+AGING**: lowest priority value first, with periodic
//!   promotion of long-waiting processes
//!
//! # Order Convention
//! `Less` means the left entry runs first.
//!
//! # References
//! - Silberschatz, Galvin & Gagne, "Operating System Concepts", Ch. 5
//!   (CPU Scheduling: SJF, Priority, Aging)

use std::cmp::Ordering;

use super::{OrderingPolicy, ReadyProcess, SchedulingContext};
use crate::models::{Tick, PRIORITY_FLOOR};

/// Aging interval used when none is configured (ticks).
pub const DEFAULT_AGING_INTERVAL: Tick = 4;

/// Shortest Job First.
///
/// Orders by burst length, shortest first. Equal bursts go to the
/// earlier arrival; anything still tied falls to the queue's
/// tie-breaker.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestBurstFirst;

impl OrderingPolicy for ShortestBurstFirst {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn compare(
        &self,
        a: &ReadyProcess,
        b: &ReadyProcess,
        _context: &SchedulingContext,
    ) -> Ordering {
        a.process
            .burst_time()
            .cmp(&b.process.burst_time())
            .then_with(|| a.process.arrival_time().cmp(&b.process.arrival_time()))
    }

    fn description(&self) -> &'static str {
        "Shortest Job First"
    }
}

/// Priority scheduling with aging.
///
/// Before every selection, each ready process that has waited at least
/// `aging_interval` ticks since arrival is promoted by one level,
/// never past [`PRIORITY_FLOOR`]. The check repeats at every selection
/// step, so a process still waiting after `k` steps past the threshold
/// collects up to `k` promotions.
///
/// Orders by effective priority (lower first), then earlier arrival.
///
/// A non-positive interval promotes every ready process at every step.
#[derive(Debug, Clone, Copy)]
pub struct PriorityWithAging {
    /// Ticks a process must wait before it becomes eligible for promotion.
    pub aging_interval: Tick,
}

impl PriorityWithAging {
    /// Creates the policy with the given aging interval.
    pub fn new(aging_interval: Tick) -> Self {
        Self { aging_interval }
    }
}

impl Default for PriorityWithAging {
    fn default() -> Self {
        Self::new(DEFAULT_AGING_INTERVAL)
    }
}

impl OrderingPolicy for PriorityWithAging {
    fn name(&self) -> &'static str {
        "PRIORITY+AGING"
    }

    fn compare(
        &self,
        a: &ReadyProcess,
        b: &ReadyProcess,
        _context: &SchedulingContext,
    ) -> Ordering {
        a.effective_priority
            .cmp(&b.effective_priority)
            .then_with(|| a.process.arrival_time().cmp(&b.process.arrival_time()))
    }

    fn age(&self, entry: &ReadyProcess, context: &SchedulingContext) -> Option<i32> {
        let waited = context.elapsed_since(entry.process.arrival_time());
        if waited >= self.aging_interval && entry.effective_priority > PRIORITY_FLOOR {
            Some((entry.effective_priority - 1).max(PRIORITY_FLOOR))
        } else {
            None
        }
    }

    fn uses_priority(&self) -> bool {
        true
    }

    fn description(&self) -> &'static str {
        "Priority with Aging"
    }
}
