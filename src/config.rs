//! Simulation configuration.
//!
//! All settings have defaults matching the classic textbook setup (five
//! processes, arrivals in `[0, 10]`, bursts in `[1, 10]`, priorities in
//! `[1, 5]`, aging every 4 ticks, both algorithms). A JSON file may
//! override any subset of them:
//!
//! ```json
//! {
//!   "generator": { "process_count": 8, "seed": 42 },
//!   "aging_interval": 3,
//!   "algorithms": ["priority_aging"]
//! }
//! ```

use std::fmt;
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::dispatching::rules::{PriorityWithAging, ShortestBurstFirst, DEFAULT_AGING_INTERVAL};
use crate::dispatching::{OrderingPolicy, TieBreaker};
use crate::error::{ScheduleError, ScheduleResult};
use crate::models::{ProcessId, Tick, PRIORITY_FLOOR};
use crate::scheduler::Simulator;

/// Inclusive `[min, max]` bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: Copy + PartialOrd> Bounds<T> {
    /// Creates bounds (not checked; see [`GeneratorConfig::validate`]).
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Whether `min <= max`.
    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }

    /// Whether `value` lies within the bounds.
    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    /// As a range for sampling.
    pub fn range(&self) -> RangeInclusive<T> {
        self.min..=self.max
    }
}

impl<T: fmt::Display> fmt::Display for Bounds<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Random workload parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of processes to generate.
    pub process_count: usize,
    /// Arrival tick bounds.
    pub arrival: Bounds<Tick>,
    /// Burst length bounds.
    pub burst: Bounds<Tick>,
    /// Priority bounds (lower = more urgent).
    pub priority: Bounds<i32>,
    /// RNG seed. `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            process_count: 5,
            arrival: Bounds::new(0, 10),
            burst: Bounds::new(1, 10),
            priority: Bounds::new(1, 5),
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Checks that every bound is ordered and yields valid processes.
    pub fn validate(&self) -> ScheduleResult<()> {
        if !self.arrival.is_ordered() || !self.burst.is_ordered() || !self.priority.is_ordered() {
            return Err(ScheduleError::InvalidConfig(format!(
                "generator bounds must satisfy min <= max (arrival {}, burst {}, priority {})",
                self.arrival, self.burst, self.priority
            )));
        }
        if self.arrival.min < 0 {
            return Err(ScheduleError::InvalidConfig(format!(
                "arrival bounds {} allow negative arrival times",
                self.arrival
            )));
        }
        if self.burst.min < 1 {
            return Err(ScheduleError::InvalidConfig(format!(
                "burst bounds {} allow non-positive bursts",
                self.burst
            )));
        }
        if self.priority.min < PRIORITY_FLOOR {
            return Err(ScheduleError::InvalidConfig(format!(
                "priority bounds {} go below floor {PRIORITY_FLOOR}",
                self.priority
            )));
        }
        let count = ProcessId::try_from(self.process_count).map_err(|_| {
            ScheduleError::InvalidConfig(format!(
                "process count {} exceeds the largest process ID {}",
                self.process_count,
                ProcessId::MAX
            ))
        })?;
        // Latest possible arrival plus every burst at its maximum
        let horizon = Tick::from(count)
            .checked_mul(self.burst.max)
            .and_then(|busy| busy.checked_add(self.arrival.max));
        if horizon.is_none() {
            return Err(ScheduleError::InvalidConfig(format!(
                "{count} processes with arrival {} and burst {} can overflow the clock",
                self.arrival, self.burst
            )));
        }
        Ok(())
    }
}

/// A scheduling algorithm selectable from config or the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Non-preemptive Shortest Job First.
    Sjf,
    /// Non-preemptive priority scheduling with aging.
    PriorityAging,
}

impl Algorithm {
    /// Builds the ordering policy for this algorithm.
    pub fn policy(self, aging_interval: Tick) -> Arc<dyn OrderingPolicy> {
        match self {
            Self::Sjf => Arc::new(ShortestBurstFirst),
            Self::PriorityAging => Arc::new(PriorityWithAging::new(aging_interval)),
        }
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sjf" => Ok(Self::Sjf),
            "priority" | "aging" | "priority_aging" | "priority-aging" => Ok(Self::PriorityAging),
            other => Err(format!(
                "unknown algorithm '{other}' (expected 'sjf' or 'priority-aging')"
            )),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sjf => f.write_str("sjf"),
            Self::PriorityAging => f.write_str("priority-aging"),
        }
    }
}

/// Top-level simulation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Random workload parameters.
    pub generator: GeneratorConfig,
    /// Ticks a process waits before each aging promotion.
    pub aging_interval: Tick,
    /// Final tie-breaker for every policy.
    pub tie_breaker: TieBreaker,
    /// Algorithms to run, in order, each on the same workload.
    pub algorithms: Vec<Algorithm>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            aging_interval: DEFAULT_AGING_INTERVAL,
            tie_breaker: TieBreaker::default(),
            algorithms: vec![Algorithm::Sjf, Algorithm::PriorityAging],
        }
    }
}

impl SimulationConfig {
    /// Loads a config from a JSON file; missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> ScheduleResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ScheduleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Validates the whole configuration.
    pub fn validate(&self) -> ScheduleResult<()> {
        self.generator.validate()?;
        if self.algorithms.is_empty() {
            return Err(ScheduleError::InvalidConfig(
                "at least one algorithm must be selected".into(),
            ));
        }
        if self.aging_interval < 1 && self.algorithms.contains(&Algorithm::PriorityAging) {
            warn!(
                aging_interval = self.aging_interval,
                "non-positive aging interval promotes every ready process at every step"
            );
        }
        Ok(())
    }

    /// One simulator per configured algorithm, in order.
    pub fn simulators(&self) -> Vec<Simulator> {
        self.algorithms
            .iter()
            .map(|a| {
                Simulator::from_policy(a.policy(self.aging_interval))
                    .with_tie_breaker(self.tie_breaker)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.generator.process_count, 5);
        assert_eq!(config.generator.arrival, Bounds::new(0, 10));
        assert_eq!(config.generator.burst, Bounds::new(1, 10));
        assert_eq!(config.generator.priority, Bounds::new(1, 5));
        assert_eq!(config.aging_interval, 4);
        assert_eq!(
            config.algorithms,
            vec![Algorithm::Sjf, Algorithm::PriorityAging]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SimulationConfig = serde_json::from_str(
            r#"{"generator": {"process_count": 8, "seed": 42}, "algorithms": ["priority_aging"]}"#,
        )
        .unwrap();
        assert_eq!(config.generator.process_count, 8);
        assert_eq!(config.generator.seed, Some(42));
        assert_eq!(config.generator.burst, Bounds::new(1, 10));
        assert_eq!(config.aging_interval, 4);
        assert_eq!(config.algorithms, vec![Algorithm::PriorityAging]);
        assert_eq!(config.tie_breaker, TieBreaker::ById);
    }

    #[test]
    fn test_tie_breaker_json() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"tie_breaker": "admission_order"}"#).unwrap();
        assert_eq!(config.tie_breaker, TieBreaker::AdmissionOrder);
    }

    #[test]
    fn test_unordered_bounds_rejected() {
        let config = GeneratorConfig {
            burst: Bounds::new(5, 2),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ScheduleError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_invalid_field_bounds_rejected() {
        let negative_arrival = GeneratorConfig {
            arrival: Bounds::new(-1, 3),
            ..Default::default()
        };
        assert!(negative_arrival.validate().is_err());

        let zero_burst = GeneratorConfig {
            burst: Bounds::new(0, 3),
            ..Default::default()
        };
        assert!(zero_burst.validate().is_err());

        let zero_priority = GeneratorConfig {
            priority: Bounds::new(0, 3),
            ..Default::default()
        };
        assert!(zero_priority.validate().is_err());
    }

    #[test]
    fn test_process_count_beyond_id_range_rejected() {
        let config = GeneratorConfig {
            process_count: ProcessId::MAX as usize + 1,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ScheduleError::InvalidConfig(_))));

        let at_limit = GeneratorConfig {
            process_count: ProcessId::MAX as usize,
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn test_clock_overflow_bounds_rejected() {
        let config = GeneratorConfig {
            process_count: 2,
            burst: Bounds::new(1, Tick::MAX),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ScheduleError::InvalidConfig(_))));

        let single = GeneratorConfig {
            process_count: 1,
            arrival: Bounds::new(0, 0),
            burst: Bounds::new(1, Tick::MAX),
            ..Default::default()
        };
        assert!(single.validate().is_ok());
    }

    #[test]
    fn test_no_algorithms_rejected() {
        let config = SimulationConfig {
            algorithms: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_aging_interval_accepted() {
        let config = SimulationConfig {
            aging_interval: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_algorithm_parse_and_policy() {
        assert_eq!("SJF".parse::<Algorithm>(), Ok(Algorithm::Sjf));
        assert_eq!(
            "priority-aging".parse::<Algorithm>(),
            Ok(Algorithm::PriorityAging)
        );
        assert!("fcfs".parse::<Algorithm>().is_err());

        assert_eq!(Algorithm::Sjf.policy(4).name(), "SJF");
        assert!(Algorithm::PriorityAging.policy(4).uses_priority());
    }

    #[test]
    fn test_simulators_follow_algorithm_order() {
        let config = SimulationConfig {
            algorithms: vec![Algorithm::PriorityAging, Algorithm::Sjf],
            ..Default::default()
        };
        let names: Vec<&str> = config
            .simulators()
            .iter()
            .map(|s| s.policy().name())
            .collect();
        assert_eq!(names, vec!["PRIORITY+AGING", "SJF"]);
    }

    #[test]
    fn test_missing_file() {
        let err = SimulationConfig::from_json_file("/nonexistent/cpu-schedule.json").unwrap_err();
        assert!(matches!(err, ScheduleError::Io { .. }));
    }

    #[test]
    fn test_bounds_helpers() {
        let b = Bounds::new(1, 5);
        assert!(b.contains(1) && b.contains(5) && !b.contains(6));
        assert_eq!(b.range(), 1..=5);
        assert_eq!(b.to_string(), "[1, 5]");
    }
}
