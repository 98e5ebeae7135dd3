//! Schedule quality metrics (KPIs).
//!
//! Computes fleet performance indicators from a completed schedule.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan (C_max) | Latest completion time |
//! | Per-robot utilization | busy time / makespan |
//! | Avg utilization | Mean over the whole fleet |
//! | Total travel | Sum of inter-task travel (setup) time |
//! | Total idle | Σ over robots of (makespan − busy time) |

use crate::models::Schedule;

/// Fleet schedule performance indicators.
///
/// All time values are in milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleKpi {
    /// Makespan: latest completion time (ms).
    pub makespan_ms: i64,
    /// Per-robot utilization (0.0..1.0), indexed by robot.
    pub utilization_by_robot: Vec<f64>,
    /// Average utilization across the fleet (0.0..1.0).
    pub avg_utilization: f64,
    /// Total inter-task travel time across all robots (ms).
    pub total_travel_ms: i64,
    /// Total idle time across all robots up to the makespan (ms).
    /// Inter-task travel counts as idle here; it occupies the robot but
    /// processes no task.
    pub total_idle_ms: i64,
}

impl ScheduleKpi {
    /// Computes KPIs from a schedule.
    pub fn calculate(schedule: &Schedule) -> Self {
        let makespan = schedule.makespan_ms();
        let num_robots = schedule.num_robots();

        let mut busy = vec![0i64; num_robots];
        let mut total_travel: i64 = 0;
        for a in &schedule.assignments {
            busy[a.robot] += a.duration_ms();
            total_travel += a.setup_ms;
        }

        let utilization_by_robot: Vec<f64> = busy
            .iter()
            .map(|&b| {
                if makespan > 0 {
                    b as f64 / makespan as f64
                } else {
                    0.0
                }
            })
            .collect();

        let avg_utilization = if utilization_by_robot.is_empty() {
            0.0
        } else {
            utilization_by_robot.iter().sum::<f64>() / utilization_by_robot.len() as f64
        };

        let total_idle = busy
            .iter()
            .map(|&b| makespan - b)
            .sum::<i64>();

        Self {
            makespan_ms: makespan,
            utilization_by_robot,
            avg_utilization,
            total_travel_ms: total_travel,
            total_idle_ms: total_idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignment, Schedule};

    fn sample_schedule() -> Schedule {
        let mut s = Schedule::new(2);
        s.add_assignment(Assignment::new(0, 0, 0, 0, 4_000));
        s.add_assignment(Assignment::new(1, 0, 0, 4_500, 8_000).with_setup(500));
        s.add_assignment(Assignment::new(2, 1, 1, 0, 2_000));
        s
    }

    #[test]
    fn test_kpi_basic() {
        let kpi = ScheduleKpi::calculate(&sample_schedule());
        assert_eq!(kpi.makespan_ms, 8_000);
        // robot 0 busy 4000 + 3500 = 7500, robot 1 busy 2000
        assert!((kpi.utilization_by_robot[0] - 7_500.0 / 8_000.0).abs() < 1e-10);
        assert!((kpi.utilization_by_robot[1] - 2_000.0 / 8_000.0).abs() < 1e-10);
        assert!((kpi.avg_utilization - (0.9375 + 0.25) / 2.0).abs() < 1e-10);
        assert_eq!(kpi.total_travel_ms, 500);
        // idle: robot 0 → 500, robot 1 → 6000
        assert_eq!(kpi.total_idle_ms, 6_500);
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = ScheduleKpi::calculate(&Schedule::new(3));
        assert_eq!(kpi.makespan_ms, 0);
        assert_eq!(kpi.utilization_by_robot, vec![0.0, 0.0, 0.0]);
        assert_eq!(kpi.total_travel_ms, 0);
        assert_eq!(kpi.total_idle_ms, 0);
    }
}
