//! Run quality metrics (KPIs).
//!
//! Computes standard CPU scheduling indicators from the completed records
//! and the timeline of one run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Avg Waiting Time | mean(turnaround - burst) |
//! | Avg Turnaround Time | mean(completion - arrival) |
//! | Avg Response Time | mean(first dispatch - arrival) |
//! | Makespan | Latest completion time |
//! | Utilization | busy time / makespan |
//! | Throughput | completed processes / makespan |
//! | Context Switches | Process-to-process hand-overs |
//!
//! Averages over zero completed processes are undefined and reported as
//! `None`.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};

use crate::models::{ProcessRecord, Timeline};

/// Mean waiting time over completed records. `None` if there are none.
pub fn mean_waiting_time(records: &[ProcessRecord]) -> Option<f64> {
    mean(records.iter().filter_map(|r| r.waiting_time))
}

/// Mean turnaround time over completed records. `None` if there are none.
pub fn mean_turnaround_time(records: &[ProcessRecord]) -> Option<f64> {
    mean(records.iter().filter_map(|r| r.turnaround_time))
}

fn mean(values: impl Iterator<Item = i64>) -> Option<f64> {
    let (sum, count) = values.fold((0i128, 0usize), |(s, c), v| (s + i128::from(v), c + 1));
    if count == 0 {
        None
    } else {
        Some(sum as f64 / count as f64)
    }
}

/// Run performance indicators.
///
/// All time values are in simulation time units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunKpi {
    /// Number of records that completed.
    pub completed: usize,
    /// Mean waiting time.
    pub avg_waiting_time: Option<f64>,
    /// Mean turnaround time.
    pub avg_turnaround_time: Option<f64>,
    /// Mean response time (first dispatch minus arrival).
    pub avg_response_time: Option<f64>,
    /// Longest wait of any single process.
    pub max_waiting_time: Option<i64>,
    /// Latest completion time.
    pub makespan: i64,
    /// Time the CPU spent running processes.
    pub busy_time: i64,
    /// Time the CPU spent idle.
    pub idle_time: i64,
    /// Busy time over makespan (0.0..1.0).
    pub utilization: Option<f64>,
    /// Completed processes per time unit.
    pub throughput: Option<f64>,
    /// Hand-overs from one process to another.
    pub context_switches: usize,
}

impl RunKpi {
    /// Computes KPIs from completed records and their timeline.
    ///
    /// # Arguments
    /// * `records` - Records after a run.
    /// * `timeline` - The timeline that run produced.
    pub fn calculate(records: &[ProcessRecord], timeline: &Timeline) -> Self {
        let completed = records.iter().filter(|r| r.is_completed()).count();
        let makespan = timeline.makespan();

        let avg_response_time = mean(records.iter().filter_map(|r| {
            timeline
                .first_dispatch(&r.pid)
                .map(|start| start - r.arrival_time)
        }));

        let throughput = if makespan > 0 {
            Some(completed as f64 / makespan as f64)
        } else {
            None
        };

        Self {
            completed,
            avg_waiting_time: mean_waiting_time(records),
            avg_turnaround_time: mean_turnaround_time(records),
            avg_response_time,
            max_waiting_time: records.iter().filter_map(|r| r.waiting_time).max(),
            makespan,
            busy_time: timeline.busy_time(),
            idle_time: timeline.idle_time(),
            utilization: timeline.utilization(),
            throughput,
            context_switches: timeline.context_switches(),
        }
    }

    /// The (mean waiting time, mean turnaround time) pair.
    pub fn averages(&self) -> Option<(f64, f64)> {
        self.avg_waiting_time.zip(self.avg_turnaround_time)
    }
}
