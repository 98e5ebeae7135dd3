//! Input validation for fleet scheduling problems.
//!
//! Checks structural integrity of jobs, tasks, and the travel-time matrix
//! before any constraint model is built. Detects:
//! - Zero robots
//! - Non-square travel matrices
//! - Task locations outside the matrix
//! - Negative service or travel times
//!
//! All detected issues are accumulated and reported together, so a caller
//! fixing malformed input sees every problem in one pass.

use thiserror::Error;

use crate::models::{Job, TravelTimeMatrix};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The fleet has no robots.
    ZeroRobots,
    /// The travel matrix rows are not all the same length as the row count.
    NonSquareMatrix,
    /// A task references a location the travel matrix does not cover.
    LocationOutOfRange,
    /// A task has a negative service time.
    NegativeServiceTime,
    /// The travel matrix contains a negative entry.
    NegativeTravelTime,
    /// The horizon (explicit or computed) does not fit the time domain.
    HorizonOverflow,
    /// An explicitly supplied horizon is negative.
    InvalidHorizon,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for a fleet scheduling problem.
///
/// Checks:
/// 1. `num_robots >= 1`
/// 2. The travel matrix is square
/// 3. All travel entries are non-negative
/// 4. Every task's service time is non-negative
/// 5. Every start/end location referenced by a task is covered by the matrix
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(jobs: &[Job], travel: &TravelTimeMatrix, num_robots: usize) -> ValidationResult {
    let mut errors = Vec::new();

    if num_robots == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::ZeroRobots,
            "fleet must contain at least one robot",
        ));
    }

    if !travel.is_square() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonSquareMatrix,
            format!(
                "travel matrix with {} rows has rows of differing length",
                travel.num_locations()
            ),
        ));
    }

    for (row_idx, row) in travel.rows().iter().enumerate() {
        for (col_idx, &entry) in row.iter().enumerate() {
            if entry < 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NegativeTravelTime,
                    format!("travel[{row_idx}][{col_idx}] = {entry} is negative"),
                ));
            }
        }
    }

    let num_locations = travel.num_locations();
    for (job_idx, job) in jobs.iter().enumerate() {
        for (task_idx, task) in job.tasks.iter().enumerate() {
            if task.service_time_ms < 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NegativeServiceTime,
                    format!(
                        "job {job_idx} task {task_idx} has negative service time {}",
                        task.service_time_ms
                    ),
                ));
            }
            for (label, loc) in [
                ("start", task.start_location),
                ("end", task.end_location),
            ] {
                if loc >= num_locations {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::LocationOutOfRange,
                        format!(
                            "job {job_idx} task {task_idx} {label} location {loc} \
                             is outside the {num_locations}-location travel matrix"
                        ),
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Task, TaskType};

    fn square_matrix() -> TravelTimeMatrix {
        TravelTimeMatrix::from_rows(vec![vec![0, 2], vec![3, 0]])
    }

    #[test]
    fn test_valid_input() {
        let jobs = vec![Job::new()
            .with_task(Task::new(TaskType::Input, 0, 1))
            .with_task(Task::new(TaskType::Delivery, 1, 0).with_service_time(100))];
        assert!(validate_input(&jobs, &square_matrix(), 2).is_ok());
    }

    #[test]
    fn test_zero_robots() {
        let errors = validate_input(&[], &square_matrix(), 0).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::ZeroRobots));
    }

    #[test]
    fn test_non_square_matrix() {
        let travel = TravelTimeMatrix::from_rows(vec![vec![0, 1, 2], vec![1, 0]]);
        let errors = validate_input(&[], &travel, 1).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NonSquareMatrix));
    }

    #[test]
    fn test_location_out_of_range() {
        // Matrix covers locations 0-1 but the task references location 5
        let jobs = vec![Job::new().with_task(Task::new(TaskType::Shelf, 0, 5))];
        let errors = validate_input(&jobs, &square_matrix(), 1).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::LocationOutOfRange));
    }

    #[test]
    fn test_negative_service_time() {
        let jobs = vec![Job::new()
            .with_task(Task::new(TaskType::Packer, 0, 1).with_service_time(-5))];
        let errors = validate_input(&jobs, &square_matrix(), 1).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NegativeServiceTime));
    }

    #[test]
    fn test_negative_travel_time() {
        let travel = TravelTimeMatrix::from_rows(vec![vec![0, -1], vec![1, 0]]);
        let errors = validate_input(&[], &travel, 1).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NegativeTravelTime));
    }

    #[test]
    fn test_multiple_errors_accumulated() {
        let travel = TravelTimeMatrix::from_rows(vec![vec![0, -1], vec![1, 0]]);
        let jobs = vec![Job::new()
            .with_task(Task::new(TaskType::Charger, 9, 9).with_service_time(-1))];
        let errors = validate_input(&jobs, &travel, 0).unwrap_err();
        // Zero robots + negative travel + negative service + 2 bad locations
        assert!(errors.len() >= 4);
    }
}
