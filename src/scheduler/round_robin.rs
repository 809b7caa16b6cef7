//! Round-Robin with a fixed quantum.
//!
//! # Algorithm
//!
//! 1. Admit arrived processes to a FIFO ready queue, scanning in
//!    submission order. Each process is admitted once.
//! 2. Dequeue the head and run it for `min(quantum, remaining)` units.
//! 3. Admit everything that arrived during the slice, *then* requeue the
//!    preempted process at the tail, so newcomers go first.
//! 4. With an empty queue, idle until the next arrival.
//!
//! Slices of the same process that follow each other (a lone process in
//! the queue) merge into one timeline block.
//!
//! # Complexity
//! O(n · (B / q + n)), where B is the total burst time.

use std::collections::VecDeque;

use log::{debug, trace};

use super::{next_arrival_after, prepare_for_run, SchedulingPolicy};
use crate::models::{ProcessRecord, Timeline, TimelineBuilder};

/// Round-Robin, preemptive with a fixed time slice.
#[derive(Debug, Clone, Copy)]
pub struct RoundRobin {
    quantum: i64,
}

impl RoundRobin {
    /// Creates a Round-Robin policy.
    ///
    /// The quantum should be positive; values below 1 run as 1.
    /// [`Simulator`](super::Simulator) rejects them before getting here.
    pub fn new(quantum: i64) -> Self {
        Self { quantum }
    }

    /// The configured quantum.
    pub fn quantum(&self) -> i64 {
        self.quantum
    }

    fn admit_arrivals(
        processes: &[ProcessRecord],
        now: i64,
        admitted: &mut [bool],
        ready: &mut VecDeque<usize>,
    ) {
        for (i, p) in processes.iter().enumerate() {
            if !admitted[i] && p.is_eligible_at(now) {
                trace!("RR: admit {} at t={now}", p.pid);
                admitted[i] = true;
                ready.push_back(i);
            }
        }
    }
}

impl SchedulingPolicy for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn run(&self, processes: &mut [ProcessRecord]) -> Timeline {
        prepare_for_run(processes);

        let quantum = self.quantum.max(1);
        let mut timeline = TimelineBuilder::new();
        let mut ready: VecDeque<usize> = VecDeque::with_capacity(processes.len());
        let mut admitted = vec![false; processes.len()];
        let mut completed = 0;

        Self::admit_arrivals(processes, 0, &mut admitted, &mut ready);

        while completed < processes.len() {
            let i = match ready.pop_front() {
                Some(i) => i,
                None => {
                    let now = timeline.now();
                    match next_arrival_after(processes, now) {
                        Some(next) => {
                            trace!("RR: idle [{now}, {next})");
                            timeline.idle_until(next);
                            Self::admit_arrivals(processes, next, &mut admitted, &mut ready);
                            continue;
                        }
                        None => break,
                    }
                }
            };

            let p = &mut processes[i];
            let slice = quantum.min(p.remaining_time);
            debug!(
                "RR: dispatch {} for {slice} at t={} ({} left)",
                p.pid,
                timeline.now(),
                p.remaining_time
            );
            timeline.run(&p.pid, slice);
            p.remaining_time -= slice;

            Self::admit_arrivals(processes, timeline.now(), &mut admitted, &mut ready);

            let p = &mut processes[i];
            if p.remaining_time == 0 {
                p.complete_at(timeline.now());
                completed += 1;
                debug!("RR: {} completes at t={}", p.pid, timeline.now());
            } else {
                ready.push_back(i);
            }
        }

        timeline.finish()
    }

    fn description(&self) -> &'static str {
        "Round-Robin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GanttBlock;
    use crate::scheduler::test_support::{assert_consistent, completions, textbook_processes, waits};

    #[test]
    fn test_rr_two_equal_jobs() {
        let mut procs = vec![
            ProcessRecord::new("P1", 0, 4),
            ProcessRecord::new("P2", 0, 4),
        ];
        let timeline = RoundRobin::new(2).run(&mut procs);

        assert_eq!(completions(&procs), vec![6, 8]);
        assert_eq!(waits(&procs), vec![2, 4]);
        assert_eq!(timeline.len(), 4);
        assert_eq!(timeline.context_switches(), 3);
        assert_consistent(&procs, &timeline);
    }

    #[test]
    fn test_rr_textbook_quantum_two() {
        let mut procs = textbook_processes();
        let timeline = RoundRobin::new(2).run(&mut procs);

        // t=2: P2, P3 admitted before P1 is requeued
        let labels: Vec<_> = timeline.blocks().iter().map(|b| b.label.to_string()).collect();
        assert_eq!(labels, vec!["P1", "P2", "P3", "P1", "P2", "P1"]);
        assert_eq!(completions(&procs), vec![14, 10, 6]);
        assert_eq!(waits(&procs), vec![6, 5, 2]);
        assert_consistent(&procs, &timeline);
    }

    #[test]
    fn test_rr_newcomers_go_ahead_of_preempted() {
        let mut procs = vec![
            ProcessRecord::new("A", 0, 3),
            ProcessRecord::new("B", 1, 1),
        ];
        let timeline = RoundRobin::new(2).run(&mut procs);

        // B arrives during A's slice and is queued before A returns
        assert_eq!(
            timeline.blocks(),
            &[
                GanttBlock::process("A", 0, 2),
                GanttBlock::process("B", 2, 3),
                GanttBlock::process("A", 3, 4),
            ]
        );
    }

    #[test]
    fn test_rr_lone_process_slices_merge() {
        let mut procs = vec![ProcessRecord::new("solo", 0, 7)];
        let timeline = RoundRobin::new(2).run(&mut procs);

        assert_eq!(timeline.blocks(), &[GanttBlock::process("solo", 0, 7)]);
        assert_eq!(procs[0].waiting_time, Some(0));
    }

    #[test]
    fn test_rr_idles_until_arrival() {
        let mut procs = vec![
            ProcessRecord::new("P1", 3, 1),
            ProcessRecord::new("P2", 7, 3),
        ];
        let timeline = RoundRobin::new(1).run(&mut procs);

        assert_eq!(
            timeline.blocks(),
            &[
                GanttBlock::idle(0, 3),
                GanttBlock::process("P1", 3, 4),
                GanttBlock::idle(4, 7),
                GanttBlock::process("P2", 7, 10),
            ]
        );
        assert_consistent(&procs, &timeline);
    }

    #[test]
    fn test_rr_non_positive_quantum_runs_as_one() {
        let mut procs = vec![
            ProcessRecord::new("P1", 0, 2),
            ProcessRecord::new("P2", 0, 2),
        ];
        let timeline = RoundRobin::new(0).run(&mut procs);
        assert_eq!(timeline.len(), 4);
        assert_eq!(completions(&procs), vec![3, 4]);
    }

    #[test]
    fn test_rr_quantum_accessor() {
        assert_eq!(RoundRobin::new(5).quantum(), 5);
    }
}
