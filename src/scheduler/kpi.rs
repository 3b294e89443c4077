//! Run quality metrics (KPIs).
//!
//! Computes standard CPU-scheduling performance indicators from a
//! completed simulation run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Avg Waiting | Mean of (turnaround - burst) |
//! | Avg Turnaround | Mean of (finish - arrival) |
//! | Max Waiting | Longest single wait |
//! | Makespan | Clock value at the last completion |
//! | CPU Utilization | Busy ticks / makespan |
//! | Throughput | Completions per tick |
//!
//! # Reference
//! Silberschatz, Galvin & Gagne, "Operating System Concepts", Ch. 5.2:
//! Scheduling Criteria

use serde::{Deserialize, Serialize};

use crate::models::{SimulationRun, Tick};

/// Run performance indicators.
///
/// Averages are `None` for an empty run ("no data") rather than a
/// division by zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    /// Number of completed processes.
    pub process_count: usize,
    /// Mean waiting time (ticks).
    pub average_waiting: Option<f64>,
    /// Mean turnaround time (ticks).
    pub average_turnaround: Option<f64>,
    /// Longest waiting time of any single process (ticks).
    pub max_waiting: Tick,
    /// Clock value when the last process finished.
    pub makespan: Tick,
    /// Ticks the CPU spent idle.
    pub idle_ticks: Tick,
    /// Fraction of the makespan the CPU was busy (0.0..1.0).
    pub cpu_utilization: f64,
    /// Completions per tick.
    pub throughput: f64,
}

impl RunMetrics {
    /// Computes metrics from a completed run.
    pub fn calculate(run: &SimulationRun) -> Self {
        let process_count = run.process_count();

        // Per-process values fit in a Tick; their sums may not
        let mut total_waiting: i128 = 0;
        let mut total_turnaround: i128 = 0;
        let mut max_waiting: Tick = 0;
        for p in &run.processes {
            total_waiting += i128::from(p.waiting_time);
            total_turnaround += i128::from(p.turnaround_time);
            max_waiting = max_waiting.max(p.waiting_time);
        }

        let mean = |total: i128| {
            if process_count == 0 {
                None
            } else {
                Some(total as f64 / process_count as f64)
            }
        };

        let (cpu_utilization, throughput) = if run.makespan <= 0 {
            (0.0, 0.0)
        } else {
            let horizon = run.makespan as f64;
            (
                run.busy_ticks() as f64 / horizon,
                process_count as f64 / horizon,
            )
        };

        Self {
            process_count,
            average_waiting: mean(total_waiting),
            average_turnaround: mean(total_turnaround),
            max_waiting,
            makespan: run.makespan,
            idle_ticks: run.idle_ticks,
            cpu_utilization,
            throughput,
        }
    }

    /// Whether any process contributed to the averages.
    pub fn has_data(&self) -> bool {
        self.process_count > 0
    }
}
