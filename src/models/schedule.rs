//! Schedule (solution) model.
//!
//! A schedule is a complete assignment of tasks to robots and time
//! intervals. The per-robot ordered task sequences consumed by the fleet
//! control layer are derived with [`Schedule::robot_sequences`].

use serde::{Deserialize, Serialize};

/// A task-robot-time assignment.
///
/// Records that the task with the given global index runs on a specific
/// robot over `[start_ms, end_ms)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Global task index (job-order concatenation).
    pub task: usize,
    /// Owning job index (denormalized for query convenience).
    pub job: usize,
    /// Assigned robot index.
    pub robot: usize,
    /// Start time (ms).
    pub start_ms: i64,
    /// End time (ms).
    pub end_ms: i64,
    /// Inter-task travel the robot performed to reach this task's start
    /// location (ms). Elapses before `start_ms`.
    pub setup_ms: i64,
}

impl Assignment {
    /// Creates a new assignment with zero setup.
    pub fn new(task: usize, job: usize, robot: usize, start_ms: i64, end_ms: i64) -> Self {
        Self {
            task,
            job,
            robot,
            start_ms,
            end_ms,
            setup_ms: 0,
        }
    }

    /// Sets the inter-task travel time.
    pub fn with_setup(mut self, setup_ms: i64) -> Self {
        self.setup_ms = setup_ms;
        self
    }

    /// Processing duration (end - start) in ms.
    #[inline]
    pub fn duration_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }
}

/// A complete schedule for a robot fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    num_robots: usize,
    /// Task assignments, in the order they were added. Schedulers add
    /// each robot's assignments in execution order.
    pub assignments: Vec<Assignment>,
}

impl Schedule {
    /// Creates an empty schedule for a fleet of `num_robots`.
    pub fn new(num_robots: usize) -> Self {
        Self {
            num_robots,
            assignments: Vec::new(),
        }
    }

    /// Fleet size this schedule was produced for.
    pub fn num_robots(&self) -> usize {
        self.num_robots
    }

    /// Adds an assignment.
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Makespan: latest end time across all assignments (ms).
    pub fn makespan_ms(&self) -> i64 {
        self.assignments.iter().map(|a| a.end_ms).max().unwrap_or(0)
    }

    /// Finds the assignment for a global task index.
    pub fn assignment_for_task(&self, task: usize) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.task == task)
    }

    /// Returns all assignments on a given robot.
    pub fn assignments_for_robot(&self, robot: usize) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.robot == robot)
            .collect()
    }

    /// Per-robot ordered task sequences.
    ///
    /// For each robot, its tasks sorted by start time ascending. Ties —
    /// only possible with zero-duration tasks — keep the order the
    /// assignments were added in, which both schedulers guarantee is the
    /// robot's execution order; start times alone cannot distinguish a
    /// zero-duration task performed before its neighbor from one performed
    /// after. This is the output handed to the fleet control layer to
    /// drive robot motion.
    pub fn robot_sequences(&self) -> Vec<Vec<usize>> {
        let mut per_robot: Vec<Vec<(i64, usize)>> = vec![Vec::new(); self.num_robots];
        for a in &self.assignments {
            per_robot[a.robot].push((a.start_ms, a.task));
        }
        per_robot
            .into_iter()
            .map(|mut entries| {
                // stable: equal starts keep insertion order
                entries.sort_by_key(|&(start, _)| start);
                entries.into_iter().map(|(_, task)| task).collect()
            })
            .collect()
    }
}
