//! Ready queue: the set of arrived, unfinished processes.
//!
//! The queue is an explicit container re-sorted by the active policy at
//! every selection step, with a configurable final tie-breaker so that
//! selection is always deterministic.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{OrderingPolicy, SchedulingContext};
use crate::models::{Process, ProcessId, ScheduleEvent};

/// How ties are broken after the policy's own keys are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreaker {
    /// Lowest process ID first (default).
    #[default]
    ById,
    /// Earliest admitted into the ready set first; same-tick arrivals
    /// keep their workload order.
    AdmissionOrder,
}

impl TieBreaker {
    fn compare(self, a: &ReadyProcess, b: &ReadyProcess) -> Ordering {
        match self {
            Self::ById => a.process.id().cmp(&b.process.id()),
            Self::AdmissionOrder => a.sequence.cmp(&b.sequence),
        }
    }
}

impl FromStr for TieBreaker {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" | "by_id" => Ok(Self::ById),
            "admission" | "admission_order" => Ok(Self::AdmissionOrder),
            other => Err(format!(
                "unknown tie-breaker '{other}' (expected 'id' or 'admission')"
            )),
        }
    }
}

impl fmt::Display for TieBreaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ById => f.write_str("id"),
            Self::AdmissionOrder => f.write_str("admission"),
        }
    }
}

/// A process waiting in the ready set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadyProcess {
    /// The workload record (never modified).
    pub process: Process,
    /// Priority after aging; starts at the process's own priority.
    pub effective_priority: i32,
    /// Admission sequence number within the run.
    pub sequence: usize,
}

impl ReadyProcess {
    /// Wraps a process as the `sequence`-th admission of the run.
    pub fn new(process: Process, sequence: usize) -> Self {
        Self {
            effective_priority: process.priority(),
            process,
            sequence,
        }
    }

    /// Shortcut for `self.process.id()`.
    #[inline]
    pub fn id(&self) -> ProcessId {
        self.process.id()
    }
}

/// The ready set of one simulation.
#[derive(Debug, Clone, Default)]
pub struct ReadyQueue {
    entries: Vec<ReadyProcess>,
    next_sequence: usize,
    tie_breaker: TieBreaker,
}

impl ReadyQueue {
    /// Creates an empty queue.
    pub fn new(tie_breaker: TieBreaker) -> Self {
        Self {
            entries: Vec::new(),
            next_sequence: 0,
            tie_breaker,
        }
    }

    /// Moves a process into the ready set.
    pub fn admit(&mut self, process: Process) {
        let entry = ReadyProcess::new(process, self.next_sequence);
        self.next_sequence += 1;
        self.entries.push(entry);
    }

    /// Lets the policy promote waiting entries.
    ///
    /// Returns one [`ScheduleEvent::Aged`] per promotion applied.
    pub fn apply_aging(
        &mut self,
        policy: &dyn OrderingPolicy,
        context: &SchedulingContext,
    ) -> Vec<ScheduleEvent> {
        let mut aged = Vec::new();
        for entry in &mut self.entries {
            if let Some(to) = policy.age(entry, context) {
                if to != entry.effective_priority {
                    aged.push(ScheduleEvent::Aged {
                        id: entry.id(),
                        time: context.current_time,
                        from: entry.effective_priority,
                        to,
                    });
                    entry.effective_priority = to;
                }
            }
        }
        aged
    }

    /// Returns the index of the entry that runs next.
    pub fn select_best(
        &self,
        policy: &dyn OrderingPolicy,
        context: &SchedulingContext,
    ) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| self.compare(policy, a, b, context))
            .map(|(i, _)| i)
    }

    /// Removes and returns the entry that runs next.
    pub fn pop_best(
        &mut self,
        policy: &dyn OrderingPolicy,
        context: &SchedulingContext,
    ) -> Option<ReadyProcess> {
        let idx = self.select_best(policy, context)?;
        Some(self.entries.remove(idx))
    }

    /// Number of waiting entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is waiting.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over waiting entries in admission order.
    pub fn iter(&self) -> impl Iterator<Item = &ReadyProcess> {
        self.entries.iter()
    }

    fn compare(
        &self,
        policy: &dyn OrderingPolicy,
        a: &ReadyProcess,
        b: &ReadyProcess,
        context: &SchedulingContext,
    ) -> Ordering {
        policy
            .compare(a, b, context)
            .then_with(|| self.tie_breaker.compare(a, b))
    }
}
