//! Input validation for simulation runs.
//!
//! Checks structural integrity of the submitted processes and the
//! Round-Robin quantum before any record is touched. Detects:
//! - Empty or duplicate pids
//! - Negative arrival times
//! - Non-positive burst times
//! - Non-positive quantum
//! - Time values that would overflow the simulation clock
//!
//! All problems are collected, not just the first one.

use std::collections::HashSet;
use std::fmt;

use crate::models::ProcessRecord;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A process has an empty pid.
    EmptyPid,
    /// Two processes share the same pid.
    DuplicatePid,
    /// A process arrives before t=0.
    NegativeArrival,
    /// A process requires no CPU time (or less).
    NonPositiveBurst,
    /// Round-Robin quantum is zero or negative.
    NonPositiveQuantum,
    /// Arrival plus burst (or the whole run) exceeds the `i64` clock.
    TimeOverflow,
}

impl ValidationErrorKind {
    /// Whether the error concerns an individual process record.
    pub fn is_process_error(self) -> bool {
        !matches!(self, ValidationErrorKind::NonPositiveQuantum)
    }
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates the processes of a run.
///
/// Checks:
/// 1. No empty pids
/// 2. No duplicate pids
/// 3. All arrival times are >= 0
/// 4. All burst times are > 0
/// 5. `arrival + burst` fits in `i64` for every process
/// 6. Latest arrival plus the sum of all bursts fits in `i64`; no run can
///    push the clock past that bound
///
/// An empty slice is valid.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_processes(processes: &[ProcessRecord]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut pids = HashSet::new();

    for (index, p) in processes.iter().enumerate() {
        if p.pid.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyPid,
                format!("Process at position {index} has an empty pid"),
            ));
        } else if !pids.insert(p.pid.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicatePid,
                format!("Duplicate pid: {}", p.pid),
            ));
        }

        if p.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!(
                    "Process '{}' has negative arrival time {}",
                    p.pid, p.arrival_time
                ),
            ));
        }

        if p.burst_time <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!(
                    "Process '{}' has non-positive burst time {}",
                    p.pid, p.burst_time
                ),
            ));
        }

        if p.arrival_time.checked_add(p.burst_time).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::TimeOverflow,
                format!(
                    "Process '{}' finishes past the end of the clock (arrival {} + burst {})",
                    p.pid, p.arrival_time, p.burst_time
                ),
            ));
        }
    }

    if !errors
        .iter()
        .any(|e| e.kind == ValidationErrorKind::TimeOverflow)
        && run_horizon(processes).is_none()
    {
        errors.push(ValidationError::new(
            ValidationErrorKind::TimeOverflow,
            "Latest arrival plus total burst time exceeds the clock range",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Upper bound on the clock of any run: latest arrival plus all bursts.
///
/// `None` if it overflows. Records already rejected for a negative
/// arrival or non-positive burst are skipped.
fn run_horizon(processes: &[ProcessRecord]) -> Option<i64> {
    let mut valid = processes
        .iter()
        .filter(|p| p.arrival_time >= 0 && p.burst_time > 0);
    let latest = valid.clone().map(|p| p.arrival_time).max().unwrap_or(0);
    valid.try_fold(latest, |acc, p| acc.checked_add(p.burst_time))
}

/// Validates a Round-Robin quantum.
pub fn validate_quantum(quantum: i64) -> ValidationResult {
    if quantum > 0 {
        Ok(())
    } else {
        Err(vec![ValidationError::new(
            ValidationErrorKind::NonPositiveQuantum,
            format!("Quantum must be positive, got {quantum}"),
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_processes() -> Vec<ProcessRecord> {
        vec![
            ProcessRecord::new("P1", 0, 8),
            ProcessRecord::new("P2", 1, 4),
            ProcessRecord::new("P3", 2, 2),
        ]
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_processes(&sample_processes()).is_ok());
        assert!(validate_processes(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_pid() {
        let mut procs = sample_processes();
        procs.push(ProcessRecord::new("P2", 5, 1));

        let errors = validate_processes(&procs).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicatePid);
        assert!(errors[0].message.contains("P2"));
    }

    #[test]
    fn test_empty_pid() {
        let procs = vec![ProcessRecord::new("", 0, 1), ProcessRecord::new("  ", 0, 1)];
        let errors = validate_processes(&procs).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::EmptyPid));
    }

    #[test]
    fn test_negative_arrival() {
        let procs = vec![ProcessRecord::new("P1", -1, 3)];
        let errors = validate_processes(&procs).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NegativeArrival));
    }

    #[test]
    fn test_non_positive_burst() {
        let procs = vec![ProcessRecord::new("P1", 0, 0), ProcessRecord::new("P2", 0, -4)];
        let errors = validate_processes(&procs).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::NonPositiveBurst)
                .count(),
            2
        );
    }

    #[test]
    fn test_multiple_errors() {
        let procs = vec![
            ProcessRecord::new("P1", -2, 0), // Negative arrival + zero burst
            ProcessRecord::new("P1", 0, 1),  // Duplicate
        ];
        let errors = validate_processes(&procs).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().all(|e| e.kind.is_process_error()));
    }

    #[test]
    fn test_arrival_plus_burst_overflow() {
        let procs = vec![ProcessRecord::new("P1", i64::MAX, 1)];
        let errors = validate_processes(&procs).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::TimeOverflow);
        assert!(errors[0].message.contains("P1"));
        assert!(errors[0].kind.is_process_error());
    }

    #[test]
    fn test_total_burst_overflow() {
        // Each process fits on its own, the run as a whole does not
        let half = i64::MAX / 2;
        let procs = vec![
            ProcessRecord::new("P1", 10, half),
            ProcessRecord::new("P2", 0, half),
        ];
        let errors = validate_processes(&procs).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::TimeOverflow);
    }

    #[test]
    fn test_large_values_within_range() {
        let procs = vec![
            ProcessRecord::new("P1", i64::MAX - 10, 4),
            ProcessRecord::new("P2", 0, 6),
        ];
        assert!(validate_processes(&procs).is_ok());
    }

    #[test]
    fn test_quantum() {
        assert!(validate_quantum(1).is_ok());

        let errors = validate_quantum(0).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NonPositiveQuantum);
        assert!(!errors[0].kind.is_process_error());
        assert!(validate_quantum(-3).is_err());
    }
}
