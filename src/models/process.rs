//! Process (workload record) model.
//!
//! A process is one schedulable unit of CPU work. The record only holds
//! what the workload producer knows up front: identity, arrival, burst
//! and priority. Timing results belong to a [`SimulationRun`], so the
//! same workload can be fed to any number of simulations unchanged.
//!
//! [`SimulationRun`]: super::SimulationRun

use serde::{Deserialize, Serialize};

use crate::validation::{self, ValidationError};

/// Process identifier, unique within a workload.
pub type ProcessId = u32;

/// Discrete simulation time (ticks since t=0).
pub type Tick = i64;

/// Best (numerically lowest) priority a process can hold.
///
/// Aging never promotes a process past this value.
pub const PRIORITY_FLOOR: i32 = 1;

/// A process to be scheduled.
///
/// Construction validates every field, and the fields are read-only
/// afterwards. Deserialization goes through the same checks.
///
/// # Priority Convention
/// **Lower value = higher priority.** `1` is the most urgent.
///
/// # Example
/// ```
/// use cpu_schedule::models::Process;
///
/// let p = Process::new(1, 0, 5, 3).unwrap();
/// assert_eq!(p.burst_time(), 5);
/// assert!(Process::new(2, -1, 5, 3).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawProcess", into = "RawProcess")]
pub struct Process {
    id: ProcessId,
    arrival_time: Tick,
    burst_time: Tick,
    priority: i32,
}

impl Process {
    /// Creates a process, rejecting malformed fields.
    ///
    /// Returns the first field problem found; use
    /// [`validation::check_process_fields`] to collect all of them.
    pub fn new(
        id: ProcessId,
        arrival_time: Tick,
        burst_time: Tick,
        priority: i32,
    ) -> Result<Self, ValidationError> {
        let mut errors =
            validation::check_process_fields(id, arrival_time, burst_time, priority);
        if !errors.is_empty() {
            return Err(errors.swap_remove(0));
        }
        Ok(Self {
            id,
            arrival_time,
            burst_time,
            priority,
        })
    }

    /// Unique identifier.
    #[inline]
    pub fn id(&self) -> ProcessId {
        self.id
    }

    /// Tick at which the process becomes eligible to run.
    #[inline]
    pub fn arrival_time(&self) -> Tick {
        self.arrival_time
    }

    /// Total CPU ticks required.
    #[inline]
    pub fn burst_time(&self) -> Tick {
        self.burst_time
    }

    /// Initial priority (lower = more urgent).
    #[inline]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Whether the process has arrived by `time`.
    #[inline]
    pub fn has_arrived(&self, time: Tick) -> bool {
        self.arrival_time <= time
    }
}

/// Unchecked wire shape of a [`Process`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawProcess {
    id: ProcessId,
    arrival_time: Tick,
    burst_time: Tick,
    priority: i32,
}

impl TryFrom<RawProcess> for Process {
    type Error = ValidationError;

    fn try_from(raw: RawProcess) -> Result<Self, Self::Error> {
        Process::new(raw.id, raw.arrival_time, raw.burst_time, raw.priority)
    }
}

impl From<Process> for RawProcess {
    fn from(p: Process) -> Self {
        Self {
            id: p.id,
            arrival_time: p.arrival_time,
            burst_time: p.burst_time,
            priority: p.priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_process_accessors() {
        let p = Process::new(7, 3, 4, 2).unwrap();
        assert_eq!(p.id(), 7);
        assert_eq!(p.arrival_time(), 3);
        assert_eq!(p.burst_time(), 4);
        assert_eq!(p.priority(), 2);
        assert!(!p.has_arrived(2));
        assert!(p.has_arrived(3));
    }

    #[test]
    fn test_negative_arrival_rejected() {
        let err = Process::new(1, -1, 5, 1).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::NegativeArrival);
    }

    #[test]
    fn test_non_positive_burst_rejected() {
        assert_eq!(
            Process::new(1, 0, 0, 1).unwrap_err().kind,
            ValidationErrorKind::NonPositiveBurst
        );
        assert_eq!(
            Process::new(1, 0, -3, 1).unwrap_err().kind,
            ValidationErrorKind::NonPositiveBurst
        );
    }

    #[test]
    fn test_priority_below_floor_rejected() {
        let err = Process::new(1, 0, 5, 0).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::PriorityBelowFloor);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Process = serde_json::from_str(
            r#"{"id":1,"arrival_time":0,"burst_time":5,"priority":3}"#,
        )
        .unwrap();
        assert_eq!(ok.burst_time(), 5);

        let bad = serde_json::from_str::<Process>(
            r#"{"id":1,"arrival_time":0,"burst_time":-2,"priority":3}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_serialize_shape() {
        let p = Process::new(2, 1, 3, 4).unwrap();
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["id"], 2);
        assert_eq!(json["arrival_time"], 1);
        assert_eq!(json["burst_time"], 3);
        assert_eq!(json["priority"], 4);
    }
}
