//! Workload production: random generation and JSON loading.
//!
//! The generator is the only place randomness enters the crate. It is
//! isolated behind a seedable RNG so that a seed fully determines the
//! workload; the engine itself is deterministic.

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::error::{ScheduleError, ScheduleResult};
use crate::models::{Process, ProcessId};
use crate::validation::validate_workload;

/// Random workload generator.
///
/// # Example
///
/// ```
/// use cpu_schedule::config::GeneratorConfig;
/// use cpu_schedule::workload::WorkloadGenerator;
///
/// let config = GeneratorConfig { seed: Some(7), ..Default::default() };
/// let a = WorkloadGenerator::new(config.clone()).unwrap().generate().unwrap();
/// let b = WorkloadGenerator::new(config).unwrap().generate().unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct WorkloadGenerator<R = StdRng> {
    config: GeneratorConfig,
    rng: R,
}

impl WorkloadGenerator<StdRng> {
    /// Creates a generator seeded from `config.seed`, or from the OS.
    pub fn new(config: GeneratorConfig) -> ScheduleResult<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::from_rng(config, rng)
    }
}

impl<R: Rng> WorkloadGenerator<R> {
    /// Creates a generator drawing from an injected RNG.
    ///
    /// `config.seed` is ignored.
    pub fn from_rng(config: GeneratorConfig, rng: R) -> ScheduleResult<Self> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    /// The generator's configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Produces `process_count` processes with IDs `1..=n`.
    ///
    /// Each call continues the RNG stream, so repeated calls yield
    /// different workloads.
    ///
    /// # Errors
    /// [`ScheduleError::InvalidWorkload`] if a sampled process fails its
    /// field checks, which validated bounds rule out.
    pub fn generate(&mut self) -> ScheduleResult<Vec<Process>> {
        let count = ProcessId::try_from(self.config.process_count).map_err(|_| {
            ScheduleError::InvalidConfig(format!(
                "process count {} exceeds the largest process ID",
                self.config.process_count
            ))
        })?;
        let mut processes = Vec::with_capacity(self.config.process_count);
        for id in 1..=count {
            let (arrival, burst, priority) = self.sample();
            let process = Process::new(id, arrival, burst, priority)
                .map_err(|e| ScheduleError::invalid_workload(vec![e]))?;
            processes.push(process);
        }
        debug!(count = processes.len(), "generated workload");
        Ok(processes)
    }

    fn sample(&mut self) -> (i64, i64, i32) {
        let arrival = self.rng.random_range(self.config.arrival.range());
        let burst = self.rng.random_range(self.config.burst.range());
        let priority = self.rng.random_range(self.config.priority.range());
        (arrival, burst, priority)
    }
}

/// Loads a workload from a JSON array of processes.
///
/// Every process is field-checked while parsing, and the whole list is
/// validated afterwards.
pub fn load_workload(path: impl AsRef<Path>) -> ScheduleResult<Vec<Process>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ScheduleError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_workload(&text)
}

/// Parses a workload from JSON text.
pub fn parse_workload(json: &str) -> ScheduleResult<Vec<Process>> {
    let processes: Vec<Process> = serde_json::from_str(json)?;
    validate_workload(&processes).map_err(ScheduleError::invalid_workload)?;
    Ok(processes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Bounds;
    use rand::rngs::SmallRng;

    fn seeded(seed: u64, count: usize) -> GeneratorConfig {
        GeneratorConfig {
            process_count: count,
            seed: Some(seed),
            ..Default::default()
        }
    }

    #[test]
    fn test_generate_within_bounds() {
        let config = seeded(3, 200);
        let workload = WorkloadGenerator::new(config.clone()).unwrap().generate().unwrap();

        assert_eq!(workload.len(), 200);
        for p in &workload {
            assert!(config.arrival.contains(p.arrival_time()));
            assert!(config.burst.contains(p.burst_time()));
            assert!(config.priority.contains(p.priority()));
        }
    }

    #[test]
    fn test_ids_are_sequential() {
        let workload = WorkloadGenerator::new(seeded(1, 5)).unwrap().generate().unwrap();
        let ids: Vec<ProcessId> = workload.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_same_seed_same_workload() {
        let a = WorkloadGenerator::new(seeded(99, 10)).unwrap().generate().unwrap();
        let b = WorkloadGenerator::new(seeded(99, 10)).unwrap().generate().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_injected_rng() {
        let config = GeneratorConfig::default();
        let a = WorkloadGenerator::from_rng(config.clone(), SmallRng::seed_from_u64(5))
            .unwrap()
            .generate()
            .unwrap();
        let b = WorkloadGenerator::from_rng(config, SmallRng::seed_from_u64(5))
            .unwrap()
            .generate()
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_degenerate_bounds() {
        let config = GeneratorConfig {
            process_count: 3,
            arrival: Bounds::new(2, 2),
            burst: Bounds::new(4, 4),
            priority: Bounds::new(1, 1),
            seed: Some(0),
        };
        let workload = WorkloadGenerator::new(config).unwrap().generate().unwrap();
        assert!(workload
            .iter()
            .all(|p| p.arrival_time() == 2 && p.burst_time() == 4 && p.priority() == 1));
    }

    #[test]
    fn test_zero_count() {
        let workload = WorkloadGenerator::new(seeded(0, 0)).unwrap().generate().unwrap();
        assert!(workload.is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GeneratorConfig {
            burst: Bounds::new(0, 3),
            ..Default::default()
        };
        assert!(WorkloadGenerator::new(config).is_err());
    }

    #[test]
    fn test_parse_workload() {
        let workload = parse_workload(
            r#"[
                {"id": 1, "arrival_time": 0, "burst_time": 8, "priority": 2},
                {"id": 2, "arrival_time": 0, "burst_time": 3, "priority": 1}
            ]"#,
        )
        .unwrap();
        assert_eq!(workload.len(), 2);
        assert_eq!(workload[1].burst_time(), 3);
    }

    #[test]
    fn test_parse_workload_rejects_bad_fields() {
        let err = parse_workload(
            r#"[{"id": 1, "arrival_time": -4, "burst_time": 8, "priority": 2}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, ScheduleError::Json(_)));
    }

    #[test]
    fn test_parse_workload_rejects_duplicates() {
        let err = parse_workload(
            r#"[
                {"id": 1, "arrival_time": 0, "burst_time": 1, "priority": 1},
                {"id": 1, "arrival_time": 2, "burst_time": 1, "priority": 1}
            ]"#,
        )
        .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidWorkload { .. }));
    }
}
