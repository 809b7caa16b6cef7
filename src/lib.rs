//! Single-CPU process scheduling simulator.
//!
//! Given processes (arrival time, CPU burst) and a discipline, computes
//! per-process completion, turnaround and waiting times and the ordered
//! execution timeline, idle gaps included.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `ProcessRecord`, `ProcessSet`, `GanttBlock`,
//!   `Timeline`, `TimelineBuilder`
//! - **`scheduler`**: Disciplines (`Fcfs`, `Sjf`, `Srtf`, `RoundRobin`), the
//!   `Simulator` entry point, and `RunKpi` aggregate metrics
//! - **`validation`**: Input integrity checks (pids, arrival, burst, quantum, clock range)
//! - **`workload`**: Seeded random process sets
//!
//! # Logging
//!
//! Runs report through the `log` facade: one `info` line per run, `debug`
//! per dispatch, `trace` for idle gaps and queue admissions. No logger is
//! installed by this crate.
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod models;
pub mod scheduler;
pub mod validation;
pub mod workload;
