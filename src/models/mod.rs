//! Scheduling domain models.
//!
//! Provides the workload record ([`Process`]) and the per-run outcome
//! types ([`SimulationRun`], [`CompletedProcess`]). Workload records are
//! never written to by the engine; every timing field lives on the run.
//!
//! # Lifecycle
//!
//! | Stage | Owner | Type |
//! |-------|-------|------|
//! | Generated / loaded | workload producer | `Process` |
//! | Waiting for the CPU | engine | `ReadyProcess` (dispatching) |
//! | Finished | run | `CompletedProcess` |

mod process;
mod run;

pub use process::{Process, ProcessId, Tick, PRIORITY_FLOOR};
pub use run::{CompletedProcess, ProcessState, ScheduleEvent, SimulationRun};
