//! Command-line driver: generate (or load) one workload, run every
//! configured algorithm on it, and print the results.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cpu_schedule::config::{Algorithm, SimulationConfig};
use cpu_schedule::dispatching::TieBreaker;
use cpu_schedule::models::{Process, Tick};
use cpu_schedule::report::{self, RunReport};
use cpu_schedule::workload::{load_workload, WorkloadGenerator};
use cpu_schedule::ScheduleResult;

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "cpu-schedule")]
#[command(about = "Simulate non-preemptive SJF and priority-with-aging CPU scheduling", long_about = None)]
struct Args {
    /// JSON config file (missing fields take defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON workload file (array of processes) instead of a random one
    #[arg(short, long)]
    workload: Option<PathBuf>,

    /// Number of random processes to generate
    #[arg(short = 'n', long)]
    processes: Option<usize>,

    /// RNG seed for reproducible workloads
    #[arg(short, long)]
    seed: Option<u64>,

    /// Ticks a process waits before each aging promotion
    #[arg(long)]
    aging_interval: Option<Tick>,

    /// Algorithm to run (repeatable): sjf, priority-aging
    #[arg(short, long = "algorithm")]
    algorithms: Vec<Algorithm>,

    /// Final tie-breaker: id, admission
    #[arg(long)]
    tie_breaker: Option<TieBreaker>,

    /// Print runs and metrics as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn into_config(self) -> ScheduleResult<(SimulationConfig, Option<PathBuf>, bool)> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_json_file(path)?,
            None => SimulationConfig::default(),
        };

        if let Some(n) = self.processes {
            config.generator.process_count = n;
        }
        if self.seed.is_some() {
            config.generator.seed = self.seed;
        }
        if let Some(interval) = self.aging_interval {
            config.aging_interval = interval;
        }
        if !self.algorithms.is_empty() {
            config.algorithms = self.algorithms;
        }
        if let Some(tie_breaker) = self.tie_breaker {
            config.tie_breaker = tie_breaker;
        }

        config.validate()?;
        Ok((config, self.workload, self.json))
    }
}

fn run(args: Args) -> ScheduleResult<()> {
    let (config, workload_path, json) = args.into_config()?;

    let workload: Vec<Process> = match workload_path {
        Some(path) => load_workload(path)?,
        None => WorkloadGenerator::new(config.generator.clone())?.generate()?,
    };
    tracing::info!(
        processes = workload.len(),
        seed = ?config.generator.seed,
        algorithms = config.algorithms.len(),
        "workload ready"
    );

    let mut reports = Vec::with_capacity(config.algorithms.len());
    for simulator in config.simulators() {
        let run = simulator.run(&workload)?;
        reports.push(RunReport::new(simulator.policy().description(), run));
    }

    if json {
        println!("{}", report::to_json(&reports)?);
    } else {
        for (i, text) in reports.iter().enumerate() {
            if i > 0 {
                println!();
            }
            print!("{text}");
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "simulation failed");
            ExitCode::FAILURE
        }
    }
}
