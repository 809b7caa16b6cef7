//! Seeded random workloads.
//!
//! Generates process sets for demos, comparisons and invariant checks.
//! Pids follow the submission-order convention `P1..Pn`, and the same seed
//! always yields the same workload.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::ProcessRecord;

/// Random process-set generator.
///
/// # Example
/// ```
/// use cpu_sched::workload::WorkloadGenerator;
///
/// let procs = WorkloadGenerator::new(5)
///     .with_arrival_span(10)
///     .with_burst_range(1, 4)
///     .with_seed(42)
///     .generate();
/// assert_eq!(procs.len(), 5);
/// assert_eq!(procs[0].pid, "P1");
/// assert!(procs.iter().all(|p| (1..=4).contains(&p.burst_time)));
/// ```
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    count: usize,
    arrival_span: i64,
    min_burst: i64,
    max_burst: i64,
    seed: u64,
}

impl WorkloadGenerator {
    /// Creates a generator for `count` processes.
    ///
    /// Defaults: arrivals in `0..=20`, bursts in `1..=10`, seed 0.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            arrival_span: 20,
            min_burst: 1,
            max_burst: 10,
            seed: 0,
        }
    }

    /// Latest possible arrival time. Negative spans clamp to 0.
    pub fn with_arrival_span(mut self, span: i64) -> Self {
        self.arrival_span = span.max(0);
        self
    }

    /// Inclusive burst range. Bounds clamp to at least 1 and are reordered
    /// if reversed.
    pub fn with_burst_range(mut self, min: i64, max: i64) -> Self {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.min_burst = lo.max(1);
        self.max_burst = hi.max(1);
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Generates the workload from the configured seed.
    pub fn generate(&self) -> Vec<ProcessRecord> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.generate_with(&mut rng)
    }

    /// Generates the workload from a caller-supplied RNG.
    pub fn generate_with<R: Rng>(&self, rng: &mut R) -> Vec<ProcessRecord> {
        (1..=self.count)
            .map(|n| {
                let arrival = rng.random_range(0..=self.arrival_span);
                let burst = rng.random_range(self.min_burst..=self.max_burst);
                ProcessRecord::new(format!("P{n}"), arrival, burst)
            })
            .collect()
    }
}
