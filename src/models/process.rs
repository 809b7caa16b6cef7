//! Process record model.
//!
//! A process record carries the simulation input (pid, arrival, burst)
//! together with the working field and the outputs written by a run.
//!
//! # Lifecycle
//! Every discipline calls [`ProcessRecord::prepare_for_run`] before touching
//! a record, so the same records can be re-run under any discipline.

use serde::{Deserialize, Serialize};

/// A single process submitted to the simulator.
///
/// All times are integer time units relative to t=0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    /// Unique process identifier.
    pub pid: String,
    /// Time unit at which the process becomes eligible to run.
    pub arrival_time: i64,
    /// Total CPU time required.
    pub burst_time: i64,
    /// CPU time still owed. Reaches 0 exactly when the process finishes.
    #[serde(default)]
    pub remaining_time: i64,
    /// Instant the process finished. `None` until completed.
    #[serde(default)]
    pub completion_time: Option<i64>,
    /// Completion minus arrival. `None` until completed.
    #[serde(default)]
    pub turnaround_time: Option<i64>,
    /// Turnaround minus burst. `None` until completed.
    #[serde(default)]
    pub waiting_time: Option<i64>,
}

impl ProcessRecord {
    /// Creates a new, not yet simulated record.
    pub fn new(pid: impl Into<String>, arrival_time: i64, burst_time: i64) -> Self {
        Self {
            pid: pid.into(),
            arrival_time,
            burst_time,
            remaining_time: burst_time,
            completion_time: None,
            turnaround_time: None,
            waiting_time: None,
        }
    }

    /// Resets the working field and clears all outputs.
    pub fn prepare_for_run(&mut self) {
        self.remaining_time = self.burst_time;
        self.completion_time = None;
        self.turnaround_time = None;
        self.waiting_time = None;
    }

    /// Marks the record completed at `time` and derives turnaround/waiting.
    pub fn complete_at(&mut self, time: i64) {
        let turnaround = time - self.arrival_time;
        self.remaining_time = 0;
        self.completion_time = Some(time);
        self.turnaround_time = Some(turnaround);
        self.waiting_time = Some(turnaround - self.burst_time);
    }

    /// Whether the record has been completed in the current run.
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.completion_time.is_some()
    }

    /// Whether the process has arrived and still owes CPU time at `time`.
    #[inline]
    pub fn is_eligible_at(&self, time: i64) -> bool {
        self.arrival_time <= time && self.remaining_time > 0
    }
}

/// An ordered, owning collection of process records.
///
/// Submission order is significant: it is the tie-break order for every
/// discipline. Adding a process never touches existing results; the next
/// run simply recomputes everything from scratch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSet {
    records: Vec<ProcessRecord>,
}

impl ProcessSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a process with an auto-assigned pid (`P1`, `P2`, ...).
    ///
    /// Returns the assigned pid.
    pub fn push(&mut self, arrival_time: i64, burst_time: i64) -> String {
        let pid = format!("P{}", self.records.len() + 1);
        self.records
            .push(ProcessRecord::new(pid.clone(), arrival_time, burst_time));
        pid
    }

    /// Appends a process with an explicit pid.
    pub fn push_record(&mut self, record: ProcessRecord) {
        self.records.push(record);
    }

    /// Read access to the records, in submission order.
    pub fn records(&self) -> &[ProcessRecord] {
        &self.records
    }

    /// Mutable access for a simulation run.
    pub fn records_mut(&mut self) -> &mut [ProcessRecord] {
        &mut self.records
    }

    /// Finds a record by pid.
    pub fn get(&self, pid: &str) -> Option<&ProcessRecord> {
        self.records.iter().find(|r| r.pid == pid)
    }

    /// Number of processes.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Removes every process.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Consumes the set, returning the records.
    pub fn into_records(self) -> Vec<ProcessRecord> {
        self.records
    }
}

impl From<Vec<ProcessRecord>> for ProcessSet {
    fn from(records: Vec<ProcessRecord>) -> Self {
        Self { records }
    }
}
