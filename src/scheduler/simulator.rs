//! Time-stepped, non-preemptive single-CPU scheduling engine.
//!
//! # Algorithm
//!
//! 1. Start the clock at t=0 with every process not yet arrived.
//! 2. Admit every process whose arrival tick has been reached.
//! 3. If the ready set is non-empty: let the policy age the ready
//!    entries, select one by policy (then tie-breaker), and run it for
//!    its whole burst.
//! 4. Otherwise the CPU idles until the next arrival, recorded as one
//!    idle span.
//! 5. Repeat until nothing is pending or ready.
//!
//! # Complexity
//! O(n²) where n = processes: each selection scans the ready set once.
//! Idle gaps cost one step regardless of their length.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, info, instrument, trace};

use crate::dispatching::rules::{PriorityWithAging, ShortestBurstFirst};
use crate::dispatching::{OrderingPolicy, ReadyQueue, SchedulingContext, TieBreaker};
use crate::error::{ScheduleError, ScheduleResult};
use crate::models::{CompletedProcess, Process, ScheduleEvent, SimulationRun, Tick};
use crate::validation::validate_workload;

/// Non-preemptive single-CPU simulator.
///
/// The engine only reads the workload; every run produces a fresh
/// [`SimulationRun`], so the same workload can be simulated under any
/// number of policies for a like-for-like comparison.
///
/// # Example
///
/// ```
/// use cpu_schedule::models::Process;
/// use cpu_schedule::scheduler::Simulator;
///
/// let workload = vec![
///     Process::new(1, 0, 8, 1).unwrap(),
///     Process::new(2, 0, 3, 1).unwrap(),
/// ];
///
/// let run = Simulator::sjf().run(&workload).unwrap();
/// assert_eq!(run.dispatch_order(), vec![2, 1]);
/// assert_eq!(run.process(1).unwrap().waiting_time, 3);
/// ```
#[derive(Debug, Clone)]
pub struct Simulator {
    policy: Arc<dyn OrderingPolicy>,
    tie_breaker: TieBreaker,
}

impl Simulator {
    /// Creates a simulator driven by `policy`.
    pub fn new<P: OrderingPolicy + 'static>(policy: P) -> Self {
        Self::from_policy(Arc::new(policy))
    }

    /// Creates a simulator from a shared policy.
    pub fn from_policy(policy: Arc<dyn OrderingPolicy>) -> Self {
        Self {
            policy,
            tie_breaker: TieBreaker::default(),
        }
    }

    /// Shortest Job First simulator.
    pub fn sjf() -> Self {
        Self::new(ShortestBurstFirst)
    }

    /// Priority-with-aging simulator.
    pub fn priority_with_aging(aging_interval: Tick) -> Self {
        Self::new(PriorityWithAging::new(aging_interval))
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// The active ordering policy.
    pub fn policy(&self) -> &dyn OrderingPolicy {
        self.policy.as_ref()
    }

    /// Simulates the workload to completion.
    ///
    /// # Errors
    /// [`ScheduleError::InvalidWorkload`] if the workload fails
    /// validation (e.g., duplicate IDs, or a clock horizon beyond
    /// [`Tick::MAX`]). An empty workload is valid and yields an empty run.
    #[instrument(skip_all, fields(policy = self.policy.name(), processes = workload.len()))]
    pub fn run(&self, workload: &[Process]) -> ScheduleResult<SimulationRun> {
        validate_workload(workload).map_err(ScheduleError::invalid_workload)?;

        let policy = self.policy.as_ref();
        let mut run = SimulationRun::new(policy.name(), policy.uses_priority())
            .with_input_order(workload.iter().map(Process::id));
        let mut ready = ReadyQueue::new(self.tie_breaker);

        // Not-yet-arrived pool, front = next to arrive; same-tick arrivals keep workload order
        let mut pending: Vec<&Process> = workload.iter().collect();
        pending.sort_by_key(|p| p.arrival_time());
        let mut pending: VecDeque<&Process> = pending.into();

        let mut time: Tick = 0;

        loop {
            while let Some(&process) = pending.front() {
                if !process.has_arrived(time) {
                    break;
                }
                pending.pop_front();
                trace!(id = process.id(), time, "admitted");
                run.add_event(ScheduleEvent::Admitted {
                    id: process.id(),
                    time,
                });
                ready.admit(process.clone());
            }

            let context = SchedulingContext::at_time(time).with_ready_count(ready.len());

            for event in ready.apply_aging(policy, &context) {
                if let ScheduleEvent::Aged { id, from, to, .. } = event {
                    debug!(id, time, from, to, "aged");
                }
                run.add_event(event);
            }

            let Some(entry) = ready.pop_best(policy, &context) else {
                // Nothing ready: idle until the next arrival, or stop
                match pending.front() {
                    Some(next) => {
                        let to = next.arrival_time();
                        trace!(from = time, to, "cpu idle");
                        run.add_event(ScheduleEvent::Idle { from: time, to });
                        time = to;
                        continue;
                    }
                    None => break,
                }
            };

            let completed = CompletedProcess::new(&entry.process, entry.effective_priority, time);
            debug!(
                id = completed.id,
                start = completed.start_time,
                burst = completed.burst_time,
                priority = completed.final_priority,
                ready = context.ready_count,
                "dispatched"
            );
            run.add_event(ScheduleEvent::Dispatched {
                id: completed.id,
                time,
            });

            time = completed.finish_time;
            run.add_event(ScheduleEvent::Completed {
                id: completed.id,
                time,
            });
            run.add_completion(completed);
        }

        info!(
            completed = run.process_count(),
            makespan = run.makespan,
            idle_ticks = run.idle_ticks,
            "simulation complete"
        );

        Ok(run)
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::sjf()
    }
}
