//! Constraint-based fleet scheduling.
//!
//! Builds the constraint model for a [`Problem`] — fixed-duration task
//! intervals, exactly-one robot per task, per-robot no-overlap with
//! sequence-dependent travel time, priority-derived precedence — and
//! minimizes the makespan with an exact branch-and-bound search.
//!
//! The model mirrors a CP formulation: per task `start[i]`/`end[i]` with
//! `end[i] = start[i] + duration(i)` in `[0, horizon]`, per task×robot an
//! optional interval gated by an assignment literal, no-overlap over each
//! robot's optional intervals, and hard `end[i] ≤ start[j]` edges from the
//! precedence graph. Constraint construction is reported through the
//! injectable [`SolveObserver`].
//!
//! # Example
//! ```
//! use fleet_schedule::cp::FleetScheduler;
//! use fleet_schedule::models::{Job, Problem, Task, TaskType, TravelTimeMatrix};
//!
//! let jobs = vec![Job::new()
//!     .with_task(Task::new(TaskType::Charger, 0, 0).with_service_time(5))
//!     .with_task(Task::new(TaskType::Charger, 0, 0).with_service_time(5))];
//! let travel = TravelTimeMatrix::from_rows(vec![vec![0]]);
//! let problem = Problem::new(jobs, travel, 2).unwrap();
//!
//! let outcome = FleetScheduler::new().solve(&problem).unwrap();
//! assert_eq!(outcome.makespan_ms, Some(5));
//! ```

mod observer;
mod search;

pub use observer::{NullObserver, RecordingObserver, SolveObserver, TracingObserver};

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Problem, Schedule};
use crate::precedence::PrecedenceGraph;
use search::BranchAndBound;

/// Recursion depth cap; the search nests once per task.
const MAX_SEARCH_DEPTH: usize = 4_096;

/// Terminal state of a solve.
///
/// The four states are deliberately distinct: a proven-infeasible instance
/// is a modeling problem, an exhausted budget is a tuning problem, and
/// callers need to tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// The returned schedule's makespan is proven minimal.
    Optimal,
    /// A feasible schedule was found within the budget; optimality is
    /// unproven.
    Feasible,
    /// Proven: no assignment satisfies the constraints within the horizon.
    Infeasible,
    /// The budget ran out before any feasible schedule was located.
    NoSolutionFound,
}

impl SolveStatus {
    /// Whether a schedule accompanies this status.
    pub fn is_solution_found(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

/// Search budget and seeding knobs.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Stop after exploring this many search nodes.
    pub node_limit: Option<u64>,
    /// Stop after this much wall-clock time.
    pub time_limit: Option<Duration>,
    /// Seed the incumbent with the greedy schedule before searching.
    pub seed_incumbent: bool,
}

impl SolverConfig {
    /// Default configuration: unbounded search, greedy seeding on.
    pub fn new() -> Self {
        Self {
            node_limit: None,
            time_limit: None,
            seed_incumbent: true,
        }
    }

    /// Sets the node budget.
    pub fn with_node_limit(mut self, node_limit: u64) -> Self {
        self.node_limit = Some(node_limit);
        self
    }

    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    /// Enables or disables greedy incumbent seeding.
    pub fn with_incumbent_seed(mut self, seed_incumbent: bool) -> Self {
        self.seed_incumbent = seed_incumbent;
        self
    }
}

// Must match new(): seeding is on by default.
impl Default for SolverConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of one solve call.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    /// Terminal state; see [`SolveStatus`].
    pub status: SolveStatus,
    /// The best schedule found, when one exists.
    pub schedule: Option<Schedule>,
    /// Makespan of that schedule (ms).
    pub makespan_ms: Option<i64>,
    /// Search nodes explored (0 when only the seed was used).
    pub nodes_explored: u64,
}

impl SolveOutcome {
    /// Whether a schedule was produced.
    pub fn is_solution_found(&self) -> bool {
        self.status.is_solution_found()
    }
}

/// Internal solver failures, distinct from both validation errors and
/// problem infeasibility.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The instance exceeds the supported search depth.
    #[error("instance too large for complete search: {task_count} tasks (limit {limit})")]
    InstanceTooLarge {
        /// Tasks in the offending instance.
        task_count: usize,
        /// Maximum supported task count.
        limit: usize,
    },
}

/// Exact makespan-minimizing scheduler for a robot fleet.
///
/// One-shot per problem: derives the precedence graph, assembles the
/// constraint model, searches, and decodes the best assignment into a
/// [`Schedule`]. No state survives between solve calls.
#[derive(Debug, Clone, Default)]
pub struct FleetScheduler {
    config: SolverConfig,
}

impl FleetScheduler {
    /// Creates a scheduler with the default configuration.
    pub fn new() -> Self {
        Self {
            config: SolverConfig::new(),
        }
    }

    /// Sets the search budget/seeding configuration.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Solves the problem, discarding trace events.
    pub fn solve(&self, problem: &Problem) -> Result<SolveOutcome, SolveError> {
        self.solve_with_observer(problem, &mut NullObserver)
    }

    /// Solves the problem, reporting model construction and search
    /// progress to `observer`.
    pub fn solve_with_observer(
        &self,
        problem: &Problem,
        observer: &mut dyn SolveObserver,
    ) -> Result<SolveOutcome, SolveError> {
        if problem.task_count() > MAX_SEARCH_DEPTH {
            return Err(SolveError::InstanceTooLarge {
                task_count: problem.task_count(),
                limit: MAX_SEARCH_DEPTH,
            });
        }

        let precedence = PrecedenceGraph::build(problem);
        self.announce_model(problem, &precedence, observer);

        let mut search = BranchAndBound::new(problem, &precedence, &self.config);
        let outcome = search.run(observer);
        observer.search_finished(outcome.status, outcome.nodes_explored);
        Ok(outcome)
    }

    /// Reports the assembled constraint model, one event per constraint.
    fn announce_model(
        &self,
        problem: &Problem,
        precedence: &PrecedenceGraph,
        observer: &mut dyn SolveObserver,
    ) {
        for &(before, after) in precedence.edges() {
            observer.constraint_added(&format!("precedence: start[{after}] >= end[{before}]"));
        }
        for robot in 0..problem.num_robots() {
            observer.constraint_added(&format!(
                "no-overlap: robot {robot} over {} optional intervals",
                problem.task_count()
            ));
        }
        for task in 0..problem.task_count() {
            observer.constraint_added(&format!(
                "exactly-one: task {task} assigned to one of {} robots",
                problem.num_robots()
            ));
        }
        observer.constraint_added("objective: minimize max(end)");
    }
}
