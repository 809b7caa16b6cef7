//! Simulation engine: validation, discipline dispatch, and run results.
//!
//! # Algorithm
//!
//! 1. Validate every process (and the quantum when Round-Robin is selected).
//!    Nothing is mutated if validation fails.
//! 2. Build the policy for the selected discipline.
//! 3. Run it over the records in place and return the timeline.
//!
//! Re-running is always "reset and recompute": each policy reinitializes
//! the records it is given.

use std::fmt;

use log::info;
use serde::{Deserialize, Serialize};

use super::{Algorithm, RunKpi};
use crate::models::{ProcessRecord, Timeline};
use crate::validation::{validate_processes, validate_quantum, ValidationError};

/// Quantum used when none is configured.
pub const DEFAULT_QUANTUM: i64 = 2;

/// Why a run was rejected. Raised before any record is touched.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// One or more processes failed validation.
    InvalidProcess(Vec<ValidationError>),
    /// Round-Robin was selected with a quantum below 1.
    InvalidQuantum(i64),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::InvalidProcess(errors) => {
                write!(f, "invalid process input: ")?;
                for (i, e) in errors.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{e}")?;
                }
                Ok(())
            }
            SimulationError::InvalidQuantum(q) => {
                write!(f, "invalid quantum {q}: must be positive")
            }
        }
    }
}

impl std::error::Error for SimulationError {}

/// Input container for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRequest {
    /// Processes in submission order.
    pub processes: Vec<ProcessRecord>,
    /// Discipline to simulate.
    #[serde(default)]
    pub algorithm: Algorithm,
    /// Round-Robin time slice; ignored by the other disciplines.
    #[serde(default = "default_quantum")]
    pub quantum: i64,
}

fn default_quantum() -> i64 {
    DEFAULT_QUANTUM
}

impl RunRequest {
    /// Creates an FCFS request with the default quantum.
    pub fn new(processes: Vec<ProcessRecord>) -> Self {
        Self {
            processes,
            algorithm: Algorithm::default(),
            quantum: DEFAULT_QUANTUM,
        }
    }

    /// Sets the discipline.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sets the Round-Robin quantum.
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.quantum = quantum;
        self
    }
}

/// Output of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Discipline that produced this result.
    pub algorithm: Algorithm,
    /// Quantum in effect; `None` unless Round-Robin.
    pub quantum: Option<i64>,
    /// Records with completion, turnaround and waiting time populated.
    pub records: Vec<ProcessRecord>,
    /// Execution timeline, idle gaps included.
    pub timeline: Timeline,
    /// Aggregate metrics.
    pub kpi: RunKpi,
}

impl RunResult {
    /// Finds a record by pid.
    pub fn record(&self, pid: &str) -> Option<&ProcessRecord> {
        self.records.iter().find(|r| r.pid == pid)
    }

    /// Mean waiting time; `None` for an empty run.
    pub fn average_waiting_time(&self) -> Option<f64> {
        self.kpi.avg_waiting_time
    }

    /// Mean turnaround time; `None` for an empty run.
    pub fn average_turnaround_time(&self) -> Option<f64> {
        self.kpi.avg_turnaround_time
    }
}

/// Single-CPU scheduling simulator.
///
/// # Example
///
/// ```
/// use cpu_sched::models::ProcessRecord;
/// use cpu_sched::scheduler::{Algorithm, RunRequest, Simulator};
///
/// let request = RunRequest::new(vec![
///     ProcessRecord::new("P1", 0, 4),
///     ProcessRecord::new("P2", 0, 4),
/// ])
/// .with_algorithm(Algorithm::RoundRobin)
/// .with_quantum(2);
///
/// let result = Simulator::new().run_request(&request).unwrap();
/// assert_eq!(result.record("P1").unwrap().completion_time, Some(6));
/// assert_eq!(result.record("P2").unwrap().waiting_time, Some(4));
/// assert_eq!(result.average_waiting_time(), Some(3.0));
/// ```
#[derive(Debug, Clone)]
pub struct Simulator {
    quantum: i64,
}

impl Simulator {
    /// Creates a simulator with the default quantum.
    pub fn new() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
        }
    }

    /// Sets the Round-Robin quantum.
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.quantum = quantum;
        self
    }

    /// The configured quantum.
    pub fn quantum(&self) -> i64 {
        self.quantum
    }

    /// Validates, then simulates `processes` in place.
    ///
    /// On success every record holds its completion, turnaround and waiting
    /// time. On failure the records are left untouched.
    pub fn run(
        &self,
        processes: &mut [ProcessRecord],
        algorithm: Algorithm,
    ) -> Result<Timeline, SimulationError> {
        self.validate(processes, algorithm)?;

        let policy = algorithm.policy(self.quantum);
        info!(
            "Simulating {} processes with {}{}",
            processes.len(),
            policy.description(),
            if algorithm.uses_quantum() {
                format!(" (quantum {})", self.quantum)
            } else {
                String::new()
            }
        );

        Ok(policy.run(processes))
    }

    /// Runs a request on a copy of its processes.
    pub fn run_request(&self, request: &RunRequest) -> Result<RunResult, SimulationError> {
        let simulator = self.clone().with_quantum(request.quantum);
        let mut records = request.processes.clone();
        let timeline = simulator.run(&mut records, request.algorithm)?;
        Ok(simulator.package(request.algorithm, records, timeline))
    }

    /// Runs every discipline on copies of the same input.
    ///
    /// Results come back in [`Algorithm::ALL`] order.
    pub fn compare(&self, processes: &[ProcessRecord]) -> Result<Vec<RunResult>, SimulationError> {
        self.validate(processes, Algorithm::RoundRobin)?;

        Algorithm::ALL
            .iter()
            .map(|&algorithm| -> Result<RunResult, SimulationError> {
                let mut records = processes.to_vec();
                let timeline = self.run(&mut records, algorithm)?;
                Ok(self.package(algorithm, records, timeline))
            })
            .collect()
    }

    fn validate(
        &self,
        processes: &[ProcessRecord],
        algorithm: Algorithm,
    ) -> Result<(), SimulationError> {
        validate_processes(processes).map_err(SimulationError::InvalidProcess)?;
        if algorithm.uses_quantum() && validate_quantum(self.quantum).is_err() {
            return Err(SimulationError::InvalidQuantum(self.quantum));
        }
        Ok(())
    }

    fn package(
        &self,
        algorithm: Algorithm,
        records: Vec<ProcessRecord>,
        timeline: Timeline,
    ) -> RunResult {
        let kpi = RunKpi::calculate(&records, &timeline);
        RunResult {
            algorithm,
            quantum: algorithm.uses_quantum().then_some(self.quantum),
            records,
            timeline,
            kpi,
        }
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}
