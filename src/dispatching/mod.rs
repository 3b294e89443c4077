//! Ordering policies and the ready queue.
//!
//! An ordering policy decides which waiting process gets the CPU next.
//! Policies are plain comparators over [`ReadyProcess`] entries, applied
//! to the whole ready set right before each selection; nothing is kept
//! sorted between steps because admissions and aging can change the
//! answer every time.
//!
//! # Usage
//!
//! ```
//! use cpu_schedule::dispatching::{ReadyQueue, SchedulingContext, TieBreaker};
//! use cpu_schedule::dispatching::rules;
//! use cpu_schedule::models::Process;
//!
//! let mut queue = ReadyQueue::new(TieBreaker::ById);
//! queue.admit(Process::new(1, 0, 8, 1).unwrap());
//! queue.admit(Process::new(2, 0, 3, 1).unwrap());
//!
//! let ctx = SchedulingContext::at_time(0);
//! let next = queue.pop_best(&rules::ShortestBurstFirst, &ctx).unwrap();
//! assert_eq!(next.process.id(), 2);
//! ```

mod context;
mod queue;
pub mod rules;

pub use context::SchedulingContext;
pub use queue::{ReadyProcess, ReadyQueue, TieBreaker};

use std::cmp::Ordering;
use std::fmt::Debug;

/// A policy that orders ready processes.
///
/// # Order Convention
/// `compare(a, b) == Less` means **`a` runs before `b`**. Policies only
/// need to order by their own keys; the [`ReadyQueue`] applies the final
/// [`TieBreaker`] when a policy reports `Equal`.
pub trait OrderingPolicy: Send + Sync + Debug {
    /// Policy name (e.g., "SJF").
    fn name(&self) -> &'static str;

    /// Orders two ready entries given the current scheduling context.
    fn compare(
        &self,
        a: &ReadyProcess,
        b: &ReadyProcess,
        context: &SchedulingContext,
    ) -> Ordering;

    /// Returns the entry's new priority if it is due for a promotion.
    ///
    /// Called for every ready entry before each selection. The default
    /// never promotes.
    fn age(&self, _entry: &ReadyProcess, _context: &SchedulingContext) -> Option<i32> {
        None
    }

    /// Whether the policy orders by priority.
    fn uses_priority(&self) -> bool {
        false
    }

    /// Policy description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
