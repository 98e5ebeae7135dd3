//! # fleet-schedule
//!
//! Scheduling engine for multi-robot warehouse fleets.
//!
//! Takes a batch of jobs — each a set of typed tasks (charging, input
//! pickup, shelf handling, packing, delivery) — a travel-time matrix over
//! warehouse locations, and a fleet size, and produces a start/end time and
//! robot assignment for every task, minimizing the makespan.
//!
//! ## Model
//!
//! - Task ordering inside a job is derived from task-**type** priority
//!   (charging before input before shelf before packing before delivery),
//!   never from list position. Equal-priority tasks are unordered; jobs
//!   never constrain each other.
//! - A robot performs one task at a time and pays the matrix travel time
//!   between the end location of one task and the start location of the
//!   next. Robots are interchangeable.
//! - A task's duration is its start→end travel plus its service time,
//!   fixed regardless of robot.
//!
//! ## Components
//!
//! - [`models`] — [`Job`]/[`Task`]/[`TaskType`], [`TravelTimeMatrix`], the
//!   validated [`Problem`], and the [`Schedule`] solution.
//! - [`precedence`] — derivation of the priority precedence graph.
//! - [`cp`] — the exact branch-and-bound [`FleetScheduler`] with a
//!   four-state outcome (optimal / feasible / infeasible / no solution
//!   found) and an injectable trace observer.
//! - [`scheduler`] — the greedy baseline and schedule KPIs.
//! - [`validation`] — structural input checks, all errors accumulated.
//!
//! ## Quick Start
//!
//! ```
//! use fleet_schedule::{FleetScheduler, Job, Problem, Task, TaskType, TravelTimeMatrix};
//!
//! // Two locations, 2ms travel each way.
//! let travel = TravelTimeMatrix::from_rows(vec![vec![0, 2], vec![2, 0]]);
//!
//! // One job: charge, then deliver (order comes from priority, not list).
//! let jobs = vec![Job::new()
//!     .with_task(Task::new(TaskType::Delivery, 1, 0).with_service_time(3))
//!     .with_task(Task::new(TaskType::Charger, 0, 0).with_service_time(5))];
//!
//! let problem = Problem::new(jobs, travel, 2).expect("valid input");
//! let outcome = FleetScheduler::new().solve(&problem).expect("solvable size");
//!
//! assert!(outcome.is_solution_found());
//! let schedule = outcome.schedule.unwrap();
//! let charger = schedule.assignment_for_task(1).unwrap();
//! let delivery = schedule.assignment_for_task(0).unwrap();
//! assert!(charger.end_ms <= delivery.start_ms);
//! ```

pub mod cp;
pub mod models;
pub mod precedence;
pub mod scheduler;
pub mod validation;

pub use cp::{FleetScheduler, SolveError, SolveOutcome, SolveStatus, SolverConfig};
pub use models::{Assignment, Job, Problem, Schedule, Task, TaskType, TravelTimeMatrix};
pub use precedence::PrecedenceGraph;
pub use scheduler::{GreedyScheduler, ScheduleKpi};
pub use validation::{ValidationError, ValidationErrorKind};
