//! Fleet scheduling domain models.
//!
//! Core data types for representing warehouse fleet scheduling problems
//! and solutions:
//!
//! - [`TaskType`], [`Task`], [`Job`] — the work to schedule
//! - [`TravelTimeMatrix`] — sequence-dependent travel (setup) times
//! - [`Problem`] — validated, immutable instance for one solve
//! - [`Assignment`], [`Schedule`] — the solution
//!
//! All times are `i64` milliseconds from a caller-defined epoch.

mod problem;
mod schedule;
mod task;
mod travel;

pub use problem::Problem;
pub use schedule::{Assignment, Schedule};
pub use task::{Job, Task, TaskType};
pub use travel::TravelTimeMatrix;
