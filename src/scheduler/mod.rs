//! Greedy scheduling and KPI evaluation.
//!
//! `GreedyScheduler` is a fast, deterministic, priority-graph-driven list
//! scheduler. It is not optimal; it provides baseline schedules and the
//! initial incumbent for the exact search in [`cp`](crate::cp).
//!
//! `ScheduleKpi` computes fleet metrics: makespan, utilization, travel
//! overhead, and idle time.

mod greedy;
mod kpi;

pub use greedy::GreedyScheduler;
pub use kpi::ScheduleKpi;
