//! Input validation for scheduling workloads.
//!
//! Checks structural integrity of processes before simulation. Detects:
//! - Duplicate process IDs
//! - Negative arrival times
//! - Non-positive burst times
//! - Priorities below the aging floor
//! - Workloads whose clock could run past the largest representable tick
//!
//! Field checks run when a [`Process`] is constructed, so a workload
//! built through the public API can only fail the collection-level
//! checks. Both layers report every problem they find.

use std::collections::HashSet;

use thiserror::Error;

use crate::models::{Process, ProcessId, Tick, PRIORITY_FLOOR};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two processes share the same ID.
    DuplicateId,
    /// A process arrives before t=0.
    NegativeArrival,
    /// A process requires zero or negative CPU time.
    NonPositiveBurst,
    /// A priority is numerically below [`PRIORITY_FLOOR`].
    PriorityBelowFloor,
    /// Latest arrival plus total burst does not fit in a [`Tick`].
    ClockOverflow,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Checks the fields of a single process.
///
/// Returns every problem found (empty = valid).
pub fn check_process_fields(
    id: ProcessId,
    arrival_time: Tick,
    burst_time: Tick,
    priority: i32,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if arrival_time < 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NegativeArrival,
            format!("Process {id} has negative arrival time {arrival_time}"),
        ));
    }

    if burst_time <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveBurst,
            format!("Process {id} has non-positive burst time {burst_time}"),
        ));
    }

    if priority < PRIORITY_FLOOR {
        errors.push(ValidationError::new(
            ValidationErrorKind::PriorityBelowFloor,
            format!("Process {id} has priority {priority} below floor {PRIORITY_FLOOR}"),
        ));
    }

    errors
}

/// Validates a workload before simulation.
///
/// Checks:
/// 1. No duplicate process IDs
/// 2. Every process passes the field checks
/// 3. The latest arrival plus the sum of all bursts fits in a [`Tick`]
///    (no finish time can exceed that bound)
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_workload(processes: &[Process]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for p in processes {
        if !ids.insert(p.id()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process ID: {}", p.id()),
            ));
        }
        errors.extend(check_process_fields(
            p.id(),
            p.arrival_time(),
            p.burst_time(),
            p.priority(),
        ));
    }

    if let Some(error) = check_clock_horizon(processes) {
        errors.push(error);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Rejects workloads whose completion tick would overflow.
fn check_clock_horizon(processes: &[Process]) -> Option<ValidationError> {
    let last_arrival = processes.iter().map(Process::arrival_time).max()?;
    let horizon = processes
        .iter()
        .try_fold(last_arrival, |acc, p| acc.checked_add(p.burst_time()));
    match horizon {
        Some(_) => None,
        None => Some(ValidationError::new(
            ValidationErrorKind::ClockOverflow,
            format!(
                "Workload cannot finish within {} ticks \
                 (latest arrival {last_arrival} plus total burst)",
                Tick::MAX
            ),
        )),
    }
}
