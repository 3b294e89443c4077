//! Scheduling engine and KPI evaluation.
//!
//! Provides the time-stepped simulator and run quality metrics.
//!
//! # Algorithm
//!
//! `Simulator` models one CPU on a discrete clock. Processes are admitted
//! when their arrival tick is reached, and each selection runs the chosen
//! process for its entire burst (non-preemptive). The ordering policy is
//! pluggable; see [`crate::dispatching::rules`].
//!
//! # KPI
//!
//! `RunMetrics` computes average waiting and turnaround times, plus
//! makespan, utilization and throughput.
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne, "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos, "Modern Operating Systems", Ch. 2.4

mod kpi;
mod simulator;

pub use kpi::RunMetrics;
pub use simulator::Simulator;
