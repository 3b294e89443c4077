//! Discrete-time CPU scheduling simulator.
//!
//! Simulates a single CPU running a batch of processes under a
//! non-preemptive ordering policy and reports per-process and aggregate
//! timing metrics. Two policies are built in: Shortest Job First and
//! Priority Scheduling with Aging.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `SimulationRun`,
//!   `CompletedProcess`, `ScheduleEvent`, `ProcessState`
//! - **`dispatching`**: `OrderingPolicy` trait, `ReadyQueue`, built-in rules
//! - **`scheduler`**: The time-stepped `Simulator` and `RunMetrics`
//! - **`workload`**: Seedable random workload generation and JSON loading
//! - **`config`**: Serde-backed settings with textbook defaults
//! - **`validation`**: Input integrity checks (IDs, arrival, burst, priority)
//! - **`report`**: Plain-text rendering of runs
//!
//! # Example
//!
//! ```
//! use cpu_schedule::models::Process;
//! use cpu_schedule::scheduler::{RunMetrics, Simulator};
//!
//! let workload = vec![
//!     Process::new(1, 0, 6, 3).unwrap(),
//!     Process::new(2, 1, 2, 1).unwrap(),
//! ];
//!
//! let sjf = Simulator::sjf().run(&workload).unwrap();
//! let aging = Simulator::priority_with_aging(4).run(&workload).unwrap();
//!
//! assert_eq!(RunMetrics::calculate(&sjf).average_waiting, Some(2.5));
//! assert_eq!(aging.dispatch_order(), vec![1, 2]);
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne, "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos, "Modern Operating Systems", Ch. 2.4

pub mod config;
pub mod dispatching;
pub mod error;
pub mod models;
pub mod report;
pub mod scheduler;
pub mod validation;
pub mod workload;

pub use error::{ScheduleError, ScheduleResult};
