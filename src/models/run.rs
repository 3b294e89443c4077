//! Simulation run (result) model.
//!
//! A run is the complete outcome of one engine invocation: the timing of
//! every process, in dispatch order, plus the event timeline that
//! produced it. Runs are independent values; nothing here points back
//! into the workload they were computed from.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::{Process, ProcessId, Tick};

/// Timing outcome of one process in a run.
///
/// # Invariants
/// - `finish_time == start_time + burst_time`
/// - `turnaround_time == finish_time - arrival_time`
/// - `waiting_time == turnaround_time - burst_time >= 0`
/// - `final_priority <= initial_priority`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedProcess {
    /// Process ID.
    pub id: ProcessId,
    /// Arrival tick (copied from the workload).
    pub arrival_time: Tick,
    /// Burst length in ticks (copied from the workload).
    pub burst_time: Tick,
    /// Priority at admission.
    pub initial_priority: i32,
    /// Priority at dispatch, after any aging promotions.
    pub final_priority: i32,
    /// Tick of the (only) dispatch.
    pub start_time: Tick,
    /// Tick at which the burst completed.
    pub finish_time: Tick,
    /// Ticks spent ready but not running.
    pub waiting_time: Tick,
    /// Ticks from arrival to completion.
    pub turnaround_time: Tick,
}

impl CompletedProcess {
    /// Builds the outcome for a process dispatched at `start_time`.
    ///
    /// Derived fields are computed here and nowhere else.
    pub fn new(process: &Process, final_priority: i32, start_time: Tick) -> Self {
        let finish_time = start_time + process.burst_time();
        let turnaround_time = finish_time - process.arrival_time();
        Self {
            id: process.id(),
            arrival_time: process.arrival_time(),
            burst_time: process.burst_time(),
            initial_priority: process.priority(),
            final_priority,
            start_time,
            finish_time,
            waiting_time: turnaround_time - process.burst_time(),
            turnaround_time,
        }
    }

    /// Number of aging promotions the process received.
    #[inline]
    pub fn promotions(&self) -> i32 {
        self.initial_priority - self.final_priority
    }
}

/// Lifecycle state of a process at a given tick.
///
/// Transitions are strictly `Unarrived → Ready → Running → Finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProcessState {
    /// Arrival tick not reached yet.
    Unarrived,
    /// Arrived and waiting for the CPU.
    Ready,
    /// Holding the CPU.
    Running,
    /// Burst completed.
    Finished,
}

/// Something that happened on the simulated clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScheduleEvent {
    /// Process moved from not-yet-arrived into the ready set.
    Admitted { id: ProcessId, time: Tick },
    /// Aging promoted a waiting process.
    Aged {
        id: ProcessId,
        time: Tick,
        from: i32,
        to: i32,
    },
    /// Process was selected and started running.
    Dispatched { id: ProcessId, time: Tick },
    /// Process finished its burst.
    Completed { id: ProcessId, time: Tick },
    /// CPU idle during `[from, to)`.
    Idle { from: Tick, to: Tick },
}

impl ScheduleEvent {
    /// Tick at which the event begins.
    pub fn time(&self) -> Tick {
        match *self {
            Self::Admitted { time, .. }
            | Self::Aged { time, .. }
            | Self::Dispatched { time, .. }
            | Self::Completed { time, .. } => time,
            Self::Idle { from, .. } => from,
        }
    }

    /// Process the event concerns, if any.
    pub fn process_id(&self) -> Option<ProcessId> {
        match *self {
            Self::Admitted { id, .. }
            | Self::Aged { id, .. }
            | Self::Dispatched { id, .. }
            | Self::Completed { id, .. } => Some(id),
            Self::Idle { .. } => None,
        }
    }
}

/// The outcome of one simulation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationRun {
    /// Name of the ordering policy that produced this run.
    pub policy: String,
    /// Whether the policy orders by priority (reports show the column).
    pub priority_driven: bool,
    /// Completed processes, in dispatch order.
    pub processes: Vec<CompletedProcess>,
    /// Event timeline, in clock order.
    pub events: Vec<ScheduleEvent>,
    /// Total ticks the CPU spent idle.
    pub idle_ticks: Tick,
    /// Clock value when the last process finished.
    pub makespan: Tick,
    /// Process IDs in workload order.
    #[serde(default)]
    pub input_order: Vec<ProcessId>,
}

impl SimulationRun {
    /// Creates an empty run for the named policy.
    pub fn new(policy: impl Into<String>, priority_driven: bool) -> Self {
        Self {
            policy: policy.into(),
            priority_driven,
            ..Default::default()
        }
    }

    /// Records the workload order used by [`completed`](Self::completed).
    pub fn with_input_order(mut self, ids: impl IntoIterator<Item = ProcessId>) -> Self {
        self.input_order = ids.into_iter().collect();
        self
    }

    /// Records a completed process and extends the makespan.
    pub fn add_completion(&mut self, completed: CompletedProcess) {
        self.makespan = self.makespan.max(completed.finish_time);
        self.processes.push(completed);
    }

    /// Appends to the timeline, coalescing adjacent idle spans.
    pub fn add_event(&mut self, event: ScheduleEvent) {
        if let ScheduleEvent::Idle { from, to } = event {
            self.idle_ticks += to - from;
            if let Some(ScheduleEvent::Idle { to: prev_to, .. }) = self.events.last_mut() {
                if *prev_to == from {
                    *prev_to = to;
                    return;
                }
            }
        }
        self.events.push(event);
    }

    /// Finds the outcome for a process.
    pub fn process(&self, id: ProcessId) -> Option<&CompletedProcess> {
        self.processes.iter().find(|p| p.id == id)
    }

    /// Process IDs in the order they were dispatched.
    pub fn dispatch_order(&self) -> Vec<ProcessId> {
        self.processes.iter().map(|p| p.id).collect()
    }

    /// Outcomes in workload order.
    ///
    /// IDs from the input order that have no outcome are skipped; outcomes
    /// missing from the input order follow in dispatch order.
    pub fn completed(&self) -> Vec<&CompletedProcess> {
        let by_id: HashMap<ProcessId, &CompletedProcess> =
            self.processes.iter().map(|p| (p.id, p)).collect();
        let listed: HashSet<ProcessId> = self.input_order.iter().copied().collect();

        self.input_order
            .iter()
            .filter_map(|id| by_id.get(id).copied())
            .chain(self.processes.iter().filter(|p| !listed.contains(&p.id)))
            .collect()
    }

    /// Outcomes sorted by arrival, then ID.
    pub fn by_arrival(&self) -> Vec<&CompletedProcess> {
        let mut sorted: Vec<&CompletedProcess> = self.processes.iter().collect();
        sorted.sort_by_key(|p| (p.arrival_time, p.id));
        sorted
    }

    /// Lifecycle state of a process at `tick`.
    ///
    /// Returns `None` for an ID that is not part of this run.
    pub fn state_at(&self, id: ProcessId, tick: Tick) -> Option<ProcessState> {
        let p = self.process(id)?;
        let state = if tick < p.arrival_time {
            ProcessState::Unarrived
        } else if tick < p.start_time {
            ProcessState::Ready
        } else if tick < p.finish_time {
            ProcessState::Running
        } else {
            ProcessState::Finished
        };
        Some(state)
    }

    /// Ticks the CPU spent running bursts.
    pub fn busy_ticks(&self) -> Tick {
        self.processes.iter().map(|p| p.burst_time).sum()
    }

    /// Number of completed processes.
    pub fn process_count(&self) -> usize {
        self.processes.len()
    }

    /// Whether the run contains no processes.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}
