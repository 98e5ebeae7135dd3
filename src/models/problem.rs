//! Validated problem instance.
//!
//! A [`Problem`] is the immutable input to one solve: jobs, travel matrix,
//! robot count, and a finite horizon. Construction runs full input
//! validation and precomputes the flattened task view (job-order
//! concatenation) that the rest of the crate indexes into.

use serde::{Deserialize, Serialize};

use super::{Job, Task, TravelTimeMatrix};
use crate::validation::{self, ValidationError, ValidationErrorKind};

/// A validated, immutable fleet scheduling instance.
///
/// Tasks are addressed everywhere by their *global index*: the position in
/// the job-order concatenation of all tasks across all jobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    jobs: Vec<Job>,
    travel: TravelTimeMatrix,
    num_robots: usize,
    horizon_ms: i64,
    tasks: Vec<Task>,
    job_of: Vec<usize>,
    durations_ms: Vec<i64>,
}

impl Problem {
    /// Builds a problem with a computed horizon.
    ///
    /// The horizon is the serial upper bound
    /// `Σ duration + (n−1) · max_travel`: every task on one robot with the
    /// worst gap between each consecutive pair. Any feasible instance has
    /// an optimal makespan at or below it.
    pub fn new(
        jobs: Vec<Job>,
        travel: TravelTimeMatrix,
        num_robots: usize,
    ) -> Result<Self, Vec<ValidationError>> {
        Self::build(jobs, travel, num_robots, None)
    }

    /// Builds a problem with an explicit horizon (ms).
    ///
    /// A horizon tighter than the optimal makespan makes the instance
    /// infeasible; that is reported by the solver, not here. The serial
    /// bound must still fit the time domain, explicit horizon or not.
    pub fn with_horizon(
        jobs: Vec<Job>,
        travel: TravelTimeMatrix,
        num_robots: usize,
        horizon_ms: i64,
    ) -> Result<Self, Vec<ValidationError>> {
        Self::build(jobs, travel, num_robots, Some(horizon_ms))
    }

    fn build(
        jobs: Vec<Job>,
        travel: TravelTimeMatrix,
        num_robots: usize,
        horizon_ms: Option<i64>,
    ) -> Result<Self, Vec<ValidationError>> {
        validation::validate_input(&jobs, &travel, num_robots)?;

        let mut tasks = Vec::new();
        let mut job_of = Vec::new();
        for (job_idx, job) in jobs.iter().enumerate() {
            for task in &job.tasks {
                tasks.push(task.clone());
                job_of.push(job_idx);
            }
        }

        let mut durations_ms = Vec::with_capacity(tasks.len());
        for task in &tasks {
            let travel_ms = travel.time_ms(task.start_location, task.end_location);
            let duration = travel_ms.checked_add(task.service_time_ms).ok_or_else(|| {
                vec![ValidationError::new(
                    ValidationErrorKind::HorizonOverflow,
                    "task duration overflows the time domain",
                )]
            })?;
            durations_ms.push(duration);
        }

        // The serial bound is overflow-checked even under an explicit
        // horizon; duration sums downstream rely on it fitting i64.
        let serial_bound_ms = Self::default_horizon(&durations_ms, &travel)?;

        let horizon_ms = match horizon_ms {
            Some(h) if h < 0 => {
                return Err(vec![ValidationError::new(
                    ValidationErrorKind::InvalidHorizon,
                    format!("horizon {h} is negative"),
                )]);
            }
            Some(h) => h,
            None => serial_bound_ms,
        };

        Ok(Self {
            jobs,
            travel,
            num_robots,
            horizon_ms,
            tasks,
            job_of,
            durations_ms,
        })
    }

    /// Serial upper bound on the makespan, checked against overflow.
    fn default_horizon(
        durations_ms: &[i64],
        travel: &TravelTimeMatrix,
    ) -> Result<i64, Vec<ValidationError>> {
        let overflow = || {
            vec![ValidationError::new(
                ValidationErrorKind::HorizonOverflow,
                "computed horizon overflows the time domain; supply one explicitly",
            )]
        };

        let mut horizon: i64 = 0;
        for &d in durations_ms {
            horizon = horizon.checked_add(d).ok_or_else(overflow)?;
        }
        let gaps = durations_ms.len().saturating_sub(1) as i64;
        let gap_total = travel
            .max_time_ms()
            .checked_mul(gaps)
            .ok_or_else(overflow)?;
        horizon.checked_add(gap_total).ok_or_else(overflow)
    }

    /// Number of robots in the fleet.
    pub fn num_robots(&self) -> usize {
        self.num_robots
    }

    /// Upper bound on any task's completion time (ms).
    pub fn horizon_ms(&self) -> i64 {
        self.horizon_ms
    }

    /// The input jobs.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Number of jobs.
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    /// Flattened tasks in job-order concatenation.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Total number of tasks across all jobs.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// The task at global index `task`.
    pub fn task(&self, task: usize) -> &Task {
        &self.tasks[task]
    }

    /// Index of the job owning the task at global index `task`.
    pub fn job_of(&self, task: usize) -> usize {
        self.job_of[task]
    }

    /// Fixed processing duration of a task (ms): start→end travel plus
    /// service time. Robot-independent.
    pub fn duration_ms(&self, task: usize) -> i64 {
        self.durations_ms[task]
    }

    /// Sum of all task durations (ms).
    pub fn total_duration_ms(&self) -> i64 {
        self.durations_ms.iter().sum()
    }

    /// Inter-task travel gap (ms): the time a robot needs to move from the
    /// end location of `from` to the start location of `to`.
    pub fn transit_ms(&self, from: usize, to: usize) -> i64 {
        self.travel
            .time_ms(self.tasks[from].end_location, self.tasks[to].start_location)
    }

    /// The travel-time matrix.
    pub fn travel(&self) -> &TravelTimeMatrix {
        &self.travel
    }
}
