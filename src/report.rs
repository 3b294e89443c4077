//! Plain-text and JSON rendering of simulation results.

use std::fmt;

use serde::Serialize;

use crate::error::{ScheduleError, ScheduleResult};
use crate::models::SimulationRun;
use crate::scheduler::RunMetrics;

/// A finished run together with its metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// Policy description shown in the header.
    pub title: String,
    /// The run.
    pub run: SimulationRun,
    /// Metrics computed from the run.
    pub metrics: RunMetrics,
}

impl RunReport {
    /// Computes metrics and wraps them with the run.
    pub fn new(title: impl Into<String>, run: SimulationRun) -> Self {
        let metrics = RunMetrics::calculate(&run);
        Self {
            title: title.into(),
            run,
            metrics,
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} Scheduling:", self.title)?;

        for p in self.run.by_arrival() {
            write!(
                f,
                "Process ID: {} Arrival: {} Burst: {}",
                p.id, p.arrival_time, p.burst_time
            )?;
            if self.run.priority_driven {
                write!(f, " Priority: {}", p.final_priority)?;
            }
            writeln!(
                f,
                " Start: {} Finish: {} Waiting: {} Turnaround: {}",
                p.start_time, p.finish_time, p.waiting_time, p.turnaround_time
            )?;
        }

        match (self.metrics.average_waiting, self.metrics.average_turnaround) {
            (Some(waiting), Some(turnaround)) => {
                writeln!(f, "Average Waiting Time: {waiting:.2}")?;
                writeln!(f, "Average Turnaround Time: {turnaround:.2}")?;
            }
            _ => writeln!(f, "Average Waiting Time: no data")?,
        }

        if self.metrics.has_data() {
            writeln!(
                f,
                "Makespan: {} Idle: {} CPU Utilization: {:.1}%",
                self.metrics.makespan,
                self.metrics.idle_ticks,
                self.metrics.cpu_utilization * 100.0
            )?;
        }

        Ok(())
    }
}

/// Renders reports as a pretty-printed JSON array.
pub fn to_json(reports: &[RunReport]) -> ScheduleResult<String> {
    serde_json::to_string_pretty(reports).map_err(ScheduleError::Output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Process;
    use crate::scheduler::Simulator;

    fn workload() -> Vec<Process> {
        vec![
            Process::new(1, 0, 8, 3).unwrap(),
            Process::new(2, 0, 3, 1).unwrap(),
        ]
    }

    #[test]
    fn test_sjf_report_lines() {
        let run = Simulator::sjf().run(&workload()).unwrap();
        let text = RunReport::new("Shortest Job First", run).to_string();

        assert!(text.starts_with("Shortest Job First Scheduling:\n"));
        assert!(text.contains(
            "Process ID: 1 Arrival: 0 Burst: 8 Start: 3 Finish: 11 Waiting: 3 Turnaround: 11"
        ));
        assert!(text.contains(
            "Process ID: 2 Arrival: 0 Burst: 3 Start: 0 Finish: 3 Waiting: 0 Turnaround: 3"
        ));
        assert!(text.contains("Average Waiting Time: 1.50"));
        assert!(text.contains("Average Turnaround Time: 7.00"));
        assert!(!text.contains("Priority:"));
    }

    #[test]
    fn test_priority_report_shows_priority() {
        let run = Simulator::priority_with_aging(4).run(&workload()).unwrap();
        let text = RunReport::new("Priority with Aging", run).to_string();
        assert!(text.contains("Process ID: 2 Arrival: 0 Burst: 3 Priority: 1 Start: 0"));
    }

    #[test]
    fn test_empty_report_no_data() {
        let run = Simulator::sjf().run(&[]).unwrap();
        let text = RunReport::new("Shortest Job First", run).to_string();
        assert!(text.contains("no data"));
        assert!(!text.contains("Makespan"));
    }

    #[test]
    fn test_report_json() {
        let run = Simulator::sjf().run(&workload()).unwrap();
        let json = serde_json::to_value(RunReport::new("SJF", run)).unwrap();
        assert_eq!(json["metrics"]["process_count"], 2);
        assert_eq!(json["run"]["processes"][0]["id"], 2);
        assert_eq!(json["run"]["input_order"], serde_json::json!([1, 2]));
    }

    #[test]
    fn test_to_json_array() {
        let sjf = Simulator::sjf().run(&workload()).unwrap();
        let prio = Simulator::priority_with_aging(4).run(&workload()).unwrap();
        let reports = vec![
            RunReport::new("Shortest Job First", sjf),
            RunReport::new("Priority with Aging", prio),
        ];
        let text = to_json(&reports).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
        assert_eq!(value[1]["title"], "Priority with Aging");
    }
}
