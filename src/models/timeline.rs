//! Execution timeline (Gantt chart) model.
//!
//! A timeline is the ordered sequence of blocks produced by one run. Each
//! block is a maximal interval during which a single process, or nobody,
//! holds the CPU. For a completed run the blocks partition `[0, makespan)`.
//!
//! [`TimelineBuilder`] is the only way the disciplines emit blocks: it keeps
//! the simulated clock, merges consecutive slices of the same label, and
//! ignores zero-length slices, so the partition holds by construction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who occupies the CPU during a block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockLabel {
    /// No eligible process; the CPU is idle.
    Idle,
    /// The process with this pid is running.
    Process(String),
}

impl BlockLabel {
    /// The pid, or `None` for idle blocks.
    pub fn pid(&self) -> Option<&str> {
        match self {
            BlockLabel::Idle => None,
            BlockLabel::Process(pid) => Some(pid),
        }
    }

    /// Whether this is the idle sentinel.
    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, BlockLabel::Idle)
    }
}

impl fmt::Display for BlockLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockLabel::Idle => f.write_str("IDLE"),
            BlockLabel::Process(pid) => f.write_str(pid),
        }
    }
}

/// One contiguous interval `[start_time, end_time)` of the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttBlock {
    /// Occupant of the CPU.
    pub label: BlockLabel,
    /// Inclusive start.
    pub start_time: i64,
    /// Exclusive end.
    pub end_time: i64,
}

impl GanttBlock {
    /// Creates a block for a running process.
    pub fn process(pid: impl Into<String>, start_time: i64, end_time: i64) -> Self {
        Self {
            label: BlockLabel::Process(pid.into()),
            start_time,
            end_time,
        }
    }

    /// Creates an idle block.
    pub fn idle(start_time: i64, end_time: i64) -> Self {
        Self {
            label: BlockLabel::Idle,
            start_time,
            end_time,
        }
    }

    /// Length of the block.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end_time - self.start_time
    }
}

/// A way in which a block sequence fails to partition `[0, makespan)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartitionViolation {
    /// The first block does not start at 0.
    DoesNotStartAtZero { start_time: i64 },
    /// A block has `end_time <= start_time`.
    EmptyBlock { index: usize },
    /// Block `index` does not start where the previous one ended.
    Discontinuity { index: usize, expected: i64, found: i64 },
    /// Block `index` has the same label as its predecessor.
    UnmergedBlocks { index: usize },
}

impl fmt::Display for PartitionViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DoesNotStartAtZero { start_time } => {
                write!(f, "timeline starts at {start_time}, expected 0")
            }
            Self::EmptyBlock { index } => write!(f, "block {index} is empty"),
            Self::Discontinuity {
                index,
                expected,
                found,
            } => write!(f, "block {index} starts at {found}, expected {expected}"),
            Self::UnmergedBlocks { index } => {
                write!(f, "block {index} repeats the label of its predecessor")
            }
        }
    }
}

impl std::error::Error for PartitionViolation {}

/// The ordered execution timeline of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    blocks: Vec<GanttBlock>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing block sequence without checking it.
    ///
    /// Use [`Timeline::check_partition`] to verify externally built sequences.
    pub fn from_blocks(blocks: Vec<GanttBlock>) -> Self {
        Self { blocks }
    }

    /// Blocks in time order.
    pub fn blocks(&self) -> &[GanttBlock] {
        &self.blocks
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the timeline has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// End of the last block, 0 for an empty timeline.
    pub fn makespan(&self) -> i64 {
        self.blocks.last().map(|b| b.end_time).unwrap_or(0)
    }

    /// All blocks during which `pid` ran.
    pub fn blocks_for(&self, pid: &str) -> Vec<&GanttBlock> {
        self.blocks
            .iter()
            .filter(|b| b.label.pid() == Some(pid))
            .collect()
    }

    /// Start of the first block in which `pid` ran.
    pub fn first_dispatch(&self, pid: &str) -> Option<i64> {
        self.blocks
            .iter()
            .find(|b| b.label.pid() == Some(pid))
            .map(|b| b.start_time)
    }

    /// Total time the CPU spent running processes.
    pub fn busy_time(&self) -> i64 {
        self.blocks
            .iter()
            .filter(|b| !b.label.is_idle())
            .map(GanttBlock::duration)
            .sum()
    }

    /// Total time the CPU spent idle.
    pub fn idle_time(&self) -> i64 {
        self.blocks
            .iter()
            .filter(|b| b.label.is_idle())
            .map(GanttBlock::duration)
            .sum()
    }

    /// Busy time over makespan.
    ///
    /// Returns `None` for an empty timeline.
    pub fn utilization(&self) -> Option<f64> {
        let makespan = self.makespan();
        if makespan <= 0 {
            return None;
        }
        Some(self.busy_time() as f64 / makespan as f64)
    }

    /// Number of process blocks, i.e. how often a process was put on the CPU.
    pub fn dispatch_count(&self) -> usize {
        self.blocks.iter().filter(|b| !b.label.is_idle()).count()
    }

    /// Hand-overs from one process to a different one, direct or across idle.
    pub fn context_switches(&self) -> usize {
        let mut switches = 0;
        let mut previous: Option<&str> = None;
        for pid in self.blocks.iter().filter_map(|b| b.label.pid()) {
            if previous.is_some_and(|p| p != pid) {
                switches += 1;
            }
            previous = Some(pid);
        }
        switches
    }

    /// Verifies that the blocks partition `[0, makespan)` with no repeated
    /// adjacent labels.
    pub fn check_partition(&self) -> Result<(), PartitionViolation> {
        let first = match self.blocks.first() {
            Some(b) => b,
            None => return Ok(()),
        };
        if first.start_time != 0 {
            return Err(PartitionViolation::DoesNotStartAtZero {
                start_time: first.start_time,
            });
        }

        for (index, block) in self.blocks.iter().enumerate() {
            if block.end_time <= block.start_time {
                return Err(PartitionViolation::EmptyBlock { index });
            }
            if index == 0 {
                continue;
            }
            let prev = &self.blocks[index - 1];
            if block.start_time != prev.end_time {
                return Err(PartitionViolation::Discontinuity {
                    index,
                    expected: prev.end_time,
                    found: block.start_time,
                });
            }
            if block.label == prev.label {
                return Err(PartitionViolation::UnmergedBlocks { index });
            }
        }
        Ok(())
    }
}

/// Accumulates blocks while a discipline advances the simulated clock.
///
/// The builder owns the clock: every call appends at `now()` and moves it
/// forward, so emitted blocks can never overlap or leave gaps.
#[derive(Debug, Clone, Default)]
pub struct TimelineBuilder {
    blocks: Vec<GanttBlock>,
    now: i64,
}

impl TimelineBuilder {
    /// Creates a builder with the clock at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time.
    #[inline]
    pub fn now(&self) -> i64 {
        self.now
    }

    /// Runs `pid` for `duration` units starting at `now()`.
    ///
    /// Extends the last block when it belongs to the same process.
    pub fn run(&mut self, pid: &str, duration: i64) {
        if duration <= 0 {
            return;
        }
        let start = self.now;
        self.now += duration;
        if let Some(last) = self.blocks.last_mut() {
            if last.label.pid() == Some(pid) {
                last.end_time = self.now;
                return;
            }
        }
        self.blocks.push(GanttBlock::process(pid, start, self.now));
    }

    /// Leaves the CPU idle until `time`. No-op if `time <= now()`.
    pub fn idle_until(&mut self, time: i64) {
        if time <= self.now {
            return;
        }
        let start = self.now;
        self.now = time;
        if let Some(last) = self.blocks.last_mut() {
            if last.label.is_idle() {
                last.end_time = time;
                return;
            }
        }
        self.blocks.push(GanttBlock::idle(start, time));
    }

    /// Number of blocks emitted so far.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Finishes the run and returns the timeline.
    pub fn finish(self) -> Timeline {
        Timeline {
            blocks: self.blocks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_timeline() -> Timeline {
        let mut b = TimelineBuilder::new();
        b.idle_until(2);
        b.run("P1", 3);
        b.run("P2", 2);
        b.idle_until(9);
        b.run("P1", 1);
        b.finish()
    }

    #[test]
    fn test_builder_emits_contiguous_blocks() {
        let t = sample_timeline();
        assert_eq!(
            t.blocks(),
            &[
                GanttBlock::idle(0, 2),
                GanttBlock::process("P1", 2, 5),
                GanttBlock::process("P2", 5, 7),
                GanttBlock::idle(7, 9),
                GanttBlock::process("P1", 9, 10),
            ]
        );
        assert_eq!(t.makespan(), 10);
        assert!(t.check_partition().is_ok());
    }

    #[test]
    fn test_builder_merges_same_label() {
        let mut b = TimelineBuilder::new();
        b.run("P1", 2);
        b.run("P1", 2);
        b.run("P1", 1);
        assert_eq!(b.now(), 5);
        assert_eq!(b.block_count(), 1);

        let t = b.finish();
        assert_eq!(t.blocks(), &[GanttBlock::process("P1", 0, 5)]);
    }

    #[test]
    fn test_builder_ignores_empty_slices() {
        let mut b = TimelineBuilder::new();
        b.idle_until(0);
        b.run("P1", 0);
        assert_eq!(b.block_count(), 0);

        b.run("P1", 1);
        b.idle_until(1);
        b.idle_until(3);
        b.idle_until(4);
        let t = b.finish();
        assert_eq!(
            t.blocks(),
            &[GanttBlock::process("P1", 0, 1), GanttBlock::idle(1, 4)]
        );
    }

    #[test]
    fn test_busy_idle_utilization() {
        let t = sample_timeline();
        assert_eq!(t.busy_time(), 6);
        assert_eq!(t.idle_time(), 4);
        assert!((t.utilization().unwrap() - 0.6).abs() < 1e-10);
        assert!(Timeline::new().utilization().is_none());
    }

    #[test]
    fn test_queries_by_pid() {
        let t = sample_timeline();
        assert_eq!(t.blocks_for("P1").len(), 2);
        assert_eq!(t.first_dispatch("P1"), Some(2));
        assert_eq!(t.first_dispatch("P2"), Some(5));
        assert_eq!(t.first_dispatch("P3"), None);
    }

    #[test]
    fn test_dispatch_and_context_switches() {
        let t = sample_timeline();
        assert_eq!(t.dispatch_count(), 3);
        // P1 -> P2 directly, P2 -> P1 across the idle gap
        assert_eq!(t.context_switches(), 2);
        assert_eq!(Timeline::new().context_switches(), 0);
    }

    #[test]
    fn test_check_partition_violations() {
        let late_start = Timeline::from_blocks(vec![GanttBlock::process("P1", 1, 2)]);
        assert_eq!(
            late_start.check_partition(),
            Err(PartitionViolation::DoesNotStartAtZero { start_time: 1 })
        );

        let gap = Timeline::from_blocks(vec![
            GanttBlock::process("P1", 0, 2),
            GanttBlock::process("P2", 3, 4),
        ]);
        assert_eq!(
            gap.check_partition(),
            Err(PartitionViolation::Discontinuity {
                index: 1,
                expected: 2,
                found: 3
            })
        );

        let unmerged = Timeline::from_blocks(vec![
            GanttBlock::process("P1", 0, 2),
            GanttBlock::process("P1", 2, 4),
        ]);
        assert_eq!(
            unmerged.check_partition(),
            Err(PartitionViolation::UnmergedBlocks { index: 1 })
        );

        let empty = Timeline::from_blocks(vec![GanttBlock::idle(0, 0)]);
        assert_eq!(
            empty.check_partition(),
            Err(PartitionViolation::EmptyBlock { index: 0 })
        );
    }

    #[test]
    fn test_partition_violation_is_error() {
        let gap = Timeline::from_blocks(vec![
            GanttBlock::process("P1", 0, 2),
            GanttBlock::process("P2", 3, 4),
        ]);
        let err: Box<dyn std::error::Error> = gap.check_partition().unwrap_err().into();
        assert_eq!(err.to_string(), "block 1 starts at 3, expected 2");
    }

    #[test]
    fn test_label_display() {
        assert_eq!(BlockLabel::Idle.to_string(), "IDLE");
        assert_eq!(BlockLabel::Process("P7".into()).to_string(), "P7");
    }
}
