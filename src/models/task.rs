//! Task and job models.
//!
//! A task is the atomic unit of robot work: move from a start location to
//! an end location, then perform a service of fixed length. A job groups
//! tasks that share ordering rules; the ordering comes from task-*type*
//! priority, never from the position of a task inside the job's list.
//!
//! # Time Representation
//! All times are in milliseconds relative to a scheduling epoch (t=0).
//! The consumer defines what t=0 means (e.g., shift start, batch release).

use serde::{Deserialize, Serialize};

/// The kind of work a task performs, ranked by scheduling priority.
///
/// Within a job, every task of a strictly higher-priority type must finish
/// before any task of a strictly lower-priority type starts. Tasks of equal
/// priority are unordered relative to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskType {
    /// Battery charging station visit (priority 5, highest).
    Charger,
    /// Goods intake from an input port (priority 4).
    Input,
    /// Shelf pickup or putaway (priority 3).
    Shelf,
    /// Packing station visit (priority 2).
    Packer,
    /// Outbound delivery (priority 1, lowest).
    Delivery,
}

impl TaskType {
    /// All task types, in descending priority order.
    pub const ALL: [TaskType; 5] = [
        TaskType::Charger,
        TaskType::Input,
        TaskType::Shelf,
        TaskType::Packer,
        TaskType::Delivery,
    ];

    /// Static type→priority table. Higher means "must happen earlier"
    /// within a job.
    pub const fn priority(self) -> i32 {
        match self {
            TaskType::Charger => 5,
            TaskType::Input => 4,
            TaskType::Shelf => 3,
            TaskType::Packer => 2,
            TaskType::Delivery => 1,
        }
    }
}

/// A single robot task.
///
/// Its processing duration is `travel[start_location][end_location] +
/// service_time_ms`, independent of which robot performs it. Locations are
/// indices into the problem's [`TravelTimeMatrix`](super::TravelTimeMatrix).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Task kind; drives intra-job precedence via [`TaskType::priority`].
    pub task_type: TaskType,
    /// Location where the robot must be to begin the task.
    pub start_location: usize,
    /// Location where the robot ends up after the task.
    pub end_location: usize,
    /// Service time at the end location (ms), on top of travel.
    pub service_time_ms: i64,
}

impl Task {
    /// Creates a task with zero service time.
    pub fn new(task_type: TaskType, start_location: usize, end_location: usize) -> Self {
        Self {
            task_type,
            start_location,
            end_location,
            service_time_ms: 0,
        }
    }

    /// Sets the service time (ms).
    pub fn with_service_time(mut self, service_time_ms: i64) -> Self {
        self.service_time_ms = service_time_ms;
        self
    }

    /// Scheduling priority of this task's type.
    pub const fn priority(&self) -> i32 {
        self.task_type.priority()
    }
}

/// An ordered collection of tasks sharing intra-job precedence rules.
///
/// The list order itself carries no scheduling semantics — only task-type
/// priority orders tasks. A job listing `[Delivery, Charger]` still forces
/// the charger visit to finish before the delivery starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Tasks composing this job.
    pub tasks: Vec<Task>,
}

impl Job {
    /// Creates an empty job.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a task to this job.
    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    /// Number of tasks.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the job has no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
