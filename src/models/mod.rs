//! Simulation domain models.
//!
//! Provides the per-process record (input plus computed metrics) and the
//! execution timeline shared by every scheduling discipline.
//!
//! # Terminology
//!
//! | Type | Meaning |
//! |------|---------|
//! | `ProcessRecord` | One process: pid, arrival, burst, and run outputs |
//! | `ProcessSet` | Caller-owned, ordered collection of records |
//! | `GanttBlock` | One contiguous interval of CPU occupancy |
//! | `Timeline` | Ordered blocks of a completed run |

mod process;
mod timeline;

pub use process::{ProcessRecord, ProcessSet};
pub use timeline::{BlockLabel, GanttBlock, PartitionViolation, Timeline, TimelineBuilder};
