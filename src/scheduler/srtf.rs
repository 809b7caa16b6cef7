//! Shortest-Remaining-Time-First (preemptive SJF).
//!
//! # Algorithm
//!
//! At every time unit, among arrived processes with work left, run the one
//! with the least remaining time. Ties go to the lowest submission index
//! among the eligible processes. A change of selection closes the current
//! timeline block and opens a new one.
//!
//! The selection can only change when a process arrives or completes: the
//! running process strictly gains on everyone else while it runs. The loop
//! therefore advances straight to the next such event instead of stepping
//! one unit at a time. Blocks and metrics are identical to unit stepping.
//!
//! # Complexity
//! O(n²): at most 2n events, O(n) selection per event.

use log::{debug, trace};

use super::{next_arrival_after, prepare_for_run, SchedulingPolicy};
use crate::models::{ProcessRecord, Timeline, TimelineBuilder};

/// Shortest-Remaining-Time-First, preemptive at unit granularity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Srtf;

impl Srtf {
    fn select(processes: &[ProcessRecord], now: i64) -> Option<usize> {
        processes
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_eligible_at(now))
            .min_by_key(|&(i, p)| (p.remaining_time, i))
            .map(|(i, _)| i)
    }
}

impl SchedulingPolicy for Srtf {
    fn name(&self) -> &'static str {
        "SRTF"
    }

    fn run(&self, processes: &mut [ProcessRecord]) -> Timeline {
        prepare_for_run(processes);

        let mut timeline = TimelineBuilder::new();
        let mut completed = 0;
        let mut running: Option<usize> = None;

        while completed < processes.len() {
            let now = timeline.now();
            let next_arrival = next_arrival_after(processes, now);

            let i = match Self::select(processes, now) {
                Some(i) => i,
                None => match next_arrival {
                    Some(next) => {
                        trace!("SRTF: idle [{now}, {next})");
                        timeline.idle_until(next);
                        running = None;
                        continue;
                    }
                    None => break,
                },
            };

            if running != Some(i) {
                match running {
                    Some(prev) if processes[prev].remaining_time > 0 => debug!(
                        "SRTF: {} preempts {} at t={now}",
                        processes[i].pid, processes[prev].pid
                    ),
                    _ => debug!("SRTF: dispatch {} at t={now}", processes[i].pid),
                }
                running = Some(i);
            }

            let p = &mut processes[i];
            let slice = match next_arrival {
                Some(next) => p.remaining_time.min(next - now),
                None => p.remaining_time,
            };
            timeline.run(&p.pid, slice);
            p.remaining_time -= slice;

            if p.remaining_time == 0 {
                p.complete_at(timeline.now());
                completed += 1;
                debug!("SRTF: {} completes at t={}", p.pid, timeline.now());
            }
        }

        timeline.finish()
    }

    fn description(&self) -> &'static str {
        "Shortest-Remaining-Time-First (preemptive)"
    }
}
