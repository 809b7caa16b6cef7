//! Shortest-Job-First (non-preemptive).
//!
//! # Algorithm
//!
//! At every decision point (CPU idle or a job just finished), pick among
//! arrived, unfinished processes the one with the smallest burst time.
//! Ties go to the earlier arrival, then to the earlier submission. The
//! chosen job runs to completion; later, shorter arrivals wait.
//!
//! When nothing has arrived, the clock jumps to the next arrival.
//!
//! # Complexity
//! O(n²).
//!
//! # Reference
//! Smith (1956), SPT is optimal for mean flow time on a single machine.

use log::{debug, trace};

use super::{next_arrival_after, prepare_for_run, SchedulingPolicy};
use crate::models::{ProcessRecord, Timeline, TimelineBuilder};

/// Shortest-Job-First, non-preemptive.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sjf;

impl Sjf {
    fn select(processes: &[ProcessRecord], now: i64) -> Option<usize> {
        processes
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_eligible_at(now))
            .min_by_key(|&(i, p)| (p.burst_time, p.arrival_time, i))
            .map(|(i, _)| i)
    }
}

impl SchedulingPolicy for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn run(&self, processes: &mut [ProcessRecord]) -> Timeline {
        prepare_for_run(processes);

        let mut timeline = TimelineBuilder::new();
        let mut completed = 0;

        while completed < processes.len() {
            let now = timeline.now();
            match Self::select(processes, now) {
                Some(i) => {
                    let p = &mut processes[i];
                    debug!("SJF: dispatch {} (burst {}) at t={now}", p.pid, p.burst_time);
                    timeline.run(&p.pid, p.burst_time);
                    p.complete_at(timeline.now());
                    completed += 1;
                }
                None => match next_arrival_after(processes, now) {
                    Some(next) => {
                        trace!("SJF: idle [{now}, {next})");
                        timeline.idle_until(next);
                    }
                    None => break,
                },
            }
        }

        timeline.finish()
    }

    fn description(&self) -> &'static str {
        "Shortest-Job-First (non-preemptive)"
    }
}
