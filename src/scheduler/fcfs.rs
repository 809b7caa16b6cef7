//! First-Come-First-Served.
//!
//! # Algorithm
//!
//! 1. Stable-sort processes by arrival time (ties keep submission order).
//! 2. Walk the sorted list; idle until each process arrives if needed.
//! 3. Run each process to completion.
//!
//! # Complexity
//! O(n log n).

use log::{debug, trace};

use super::{prepare_for_run, SchedulingPolicy};
use crate::models::{ProcessRecord, Timeline, TimelineBuilder};

/// First-Come-First-Served, non-preemptive.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fcfs;

impl SchedulingPolicy for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn run(&self, processes: &mut [ProcessRecord]) -> Timeline {
        prepare_for_run(processes);

        let mut order: Vec<usize> = (0..processes.len()).collect();
        order.sort_by_key(|&i| processes[i].arrival_time);

        let mut timeline = TimelineBuilder::new();
        for i in order {
            let p = &mut processes[i];
            if timeline.now() < p.arrival_time {
                trace!("FCFS: idle [{}, {})", timeline.now(), p.arrival_time);
                timeline.idle_until(p.arrival_time);
            }

            debug!("FCFS: dispatch {} at t={}", p.pid, timeline.now());
            timeline.run(&p.pid, p.burst_time);
            p.complete_at(timeline.now());
        }

        timeline.finish()
    }

    fn description(&self) -> &'static str {
        "First-Come-First-Served"
    }
}
