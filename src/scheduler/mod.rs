//! Scheduling disciplines, the simulation engine, and run KPIs.
//!
//! Four single-CPU disciplines share one contract, [`SchedulingPolicy`]:
//! take the process records, write completion/turnaround/waiting into
//! them, and return the execution timeline.
//!
//! | Discipline | Preemptive | Selection |
//! |------------|-----------|-----------|
//! | FCFS | no | earliest arrival, then submission order |
//! | SJF | no | shortest burst, then arrival, then submission order |
//! | SRTF | yes | shortest remaining time, then submission order |
//! | RR | yes | FIFO ready queue, fixed quantum |
//!
//! # Usage
//!
//! ```
//! use cpu_sched::models::ProcessRecord;
//! use cpu_sched::scheduler::{Algorithm, Simulator};
//!
//! let mut procs = vec![
//!     ProcessRecord::new("P1", 0, 8),
//!     ProcessRecord::new("P2", 1, 4),
//!     ProcessRecord::new("P3", 2, 2),
//! ];
//! let timeline = Simulator::new().run(&mut procs, Algorithm::Sjf).unwrap();
//! assert_eq!(procs[2].completion_time, Some(10));
//! assert_eq!(timeline.makespan(), 14);
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod engine;
mod fcfs;
mod kpi;
mod round_robin;
mod sjf;
mod srtf;

pub use engine::{RunRequest, RunResult, SimulationError, Simulator, DEFAULT_QUANTUM};
pub use fcfs::Fcfs;
pub use kpi::{mean_turnaround_time, mean_waiting_time, RunKpi};
pub use round_robin::RoundRobin;
pub use sjf::Sjf;
pub use srtf::Srtf;

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::str::FromStr;

use crate::models::{ProcessRecord, Timeline};

/// A CPU scheduling discipline.
///
/// Implementations must:
/// - call `prepare_for_run` on every record before reading working fields,
/// - leave every record completed and consistent on return,
/// - emit blocks only through a `TimelineBuilder`.
///
/// Input is assumed valid (see [`crate::validation`]); [`Simulator`]
/// validates before dispatching to a policy.
pub trait SchedulingPolicy: Send + Sync + Debug {
    /// Short name (e.g., "FCFS", "RR").
    fn name(&self) -> &'static str;

    /// Simulates the records to completion and returns the timeline.
    fn run(&self, processes: &mut [ProcessRecord]) -> Timeline;

    /// Long name.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Discipline selector used at the request boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Algorithm {
    /// First-Come-First-Served.
    #[default]
    #[serde(rename = "FCFS")]
    Fcfs,
    /// Shortest-Job-First, non-preemptive.
    #[serde(rename = "SJF")]
    Sjf,
    /// Shortest-Remaining-Time-First, preemptive.
    #[serde(rename = "SRTF")]
    Srtf,
    /// Round-Robin with a fixed quantum.
    #[serde(rename = "RR")]
    RoundRobin,
}

impl Algorithm {
    /// Every discipline, in presentation order.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Fcfs,
        Algorithm::Sjf,
        Algorithm::Srtf,
        Algorithm::RoundRobin,
    ];

    /// Short name, identical to the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Fcfs => "FCFS",
            Algorithm::Sjf => "SJF",
            Algorithm::Srtf => "SRTF",
            Algorithm::RoundRobin => "RR",
        }
    }

    /// Whether a running process can be interrupted.
    pub fn is_preemptive(self) -> bool {
        matches!(self, Algorithm::Srtf | Algorithm::RoundRobin)
    }

    /// Whether the discipline consumes the quantum.
    pub fn uses_quantum(self) -> bool {
        matches!(self, Algorithm::RoundRobin)
    }

    /// Builds the policy for this selector. `quantum` is ignored unless RR.
    pub fn policy(self, quantum: i64) -> Box<dyn SchedulingPolicy> {
        match self {
            Algorithm::Fcfs => Box::new(Fcfs),
            Algorithm::Sjf => Box::new(Sjf),
            Algorithm::Srtf => Box::new(Srtf),
            Algorithm::RoundRobin => Box::new(RoundRobin::new(quantum)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown algorithm name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAlgorithmError(String);

impl fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown scheduling algorithm '{}' (expected FCFS, SJF, SRTF or RR)",
            self.0
        )
    }
}

impl std::error::Error for ParseAlgorithmError {}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace(['-', '_', ' '], "").as_str() {
            "FCFS" | "FIFO" => Ok(Algorithm::Fcfs),
            "SJF" => Ok(Algorithm::Sjf),
            "SRTF" => Ok(Algorithm::Srtf),
            "RR" | "ROUNDROBIN" => Ok(Algorithm::RoundRobin),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

/// Resets every record at the top of a run.
fn prepare_for_run(processes: &mut [ProcessRecord]) {
    for p in processes.iter_mut() {
        p.prepare_for_run();
    }
}

/// Earliest arrival strictly after `now` among processes that still owe work.
fn next_arrival_after(processes: &[ProcessRecord], now: i64) -> Option<i64> {
    processes
        .iter()
        .filter(|p| p.remaining_time > 0 && p.arrival_time > now)
        .map(|p| p.arrival_time)
        .min()
}

#[cfg(test)]
mod test_support {
    use crate::models::{ProcessRecord, Timeline};

    /// P1(0,8), P2(1,4), P3(2,2).
    pub fn textbook_processes() -> Vec<ProcessRecord> {
        vec![
            ProcessRecord::new("P1", 0, 8),
            ProcessRecord::new("P2", 1, 4),
            ProcessRecord::new("P3", 2, 2),
        ]
    }

    /// Checks the per-record invariants and the timeline partition.
    pub fn assert_consistent(procs: &[ProcessRecord], timeline: &Timeline) {
        for p in procs {
            let completion = p.completion_time.expect("record not completed");
            let turnaround = p.turnaround_time.expect("missing turnaround");
            let waiting = p.waiting_time.expect("missing waiting");
            assert_eq!(turnaround, completion - p.arrival_time, "{}", p.pid);
            assert_eq!(waiting, turnaround - p.burst_time, "{}", p.pid);
            assert!(completion >= p.arrival_time + p.burst_time, "{}", p.pid);
            assert_eq!(p.remaining_time, 0, "{}", p.pid);

            let ran: i64 = timeline.blocks_for(&p.pid).iter().map(|b| b.duration()).sum();
            assert_eq!(ran, p.burst_time, "{} ran {ran} units", p.pid);
        }

        assert_eq!(timeline.check_partition(), Ok(()));
        let makespan = procs.iter().filter_map(|p| p.completion_time).max();
        assert_eq!(makespan.unwrap_or(0), timeline.makespan());
    }

    /// Completion times in submission order.
    pub fn completions(procs: &[ProcessRecord]) -> Vec<i64> {
        procs.iter().map(|p| p.completion_time.unwrap_or(-1)).collect()
    }

    /// Waiting times in submission order.
    pub fn waits(procs: &[ProcessRecord]) -> Vec<i64> {
        procs.iter().map(|p| p.waiting_time.unwrap_or(-1)).collect()
    }
}
