//! Greedy list scheduler.
//!
//! # Algorithm
//!
//! 1. Walk the tasks in a topological order of the precedence graph.
//! 2. Assign each task to the robot offering the earliest achievable start
//!    (its availability plus the travel gap from its previous task's end
//!    location), never earlier than the latest predecessor end.
//! 3. Ties go to the lowest robot index.
//!
//! Deterministic, always feasible against the precedence and travel
//! constraints, and with a single robot it produces exactly the naïve
//! serial schedule — the makespan upper bound the exact solver starts from.
//!
//! # Complexity
//! O(n · r) after the O(n²) precedence derivation.

use crate::models::{Assignment, Problem, Schedule};
use crate::precedence::PrecedenceGraph;

/// Fast feasible baseline scheduler.
///
/// Not optimal; used standalone for quick plans and by
/// [`FleetScheduler`](crate::cp::FleetScheduler) to seed the
/// branch-and-bound incumbent.
#[derive(Debug, Clone, Default)]
pub struct GreedyScheduler;

impl GreedyScheduler {
    /// Creates a new scheduler.
    pub fn new() -> Self {
        Self
    }

    /// Produces a feasible schedule for the problem.
    pub fn schedule(&self, problem: &Problem) -> Schedule {
        let precedence = PrecedenceGraph::build(problem);
        self.schedule_with_precedence(problem, &precedence)
    }

    /// Variant reusing an already-built precedence graph.
    pub fn schedule_with_precedence(
        &self,
        problem: &Problem,
        precedence: &PrecedenceGraph,
    ) -> Schedule {
        let num_robots = problem.num_robots();
        let mut schedule = Schedule::new(num_robots);
        let mut robot_available = vec![0i64; num_robots];
        let mut robot_last_task: Vec<Option<usize>> = vec![None; num_robots];
        let mut end = vec![0i64; problem.task_count()];

        for &task in precedence.topological_order() {
            let predecessor_ready = precedence
                .predecessors(task)
                .iter()
                .map(|&p| end[p])
                .max()
                .unwrap_or(0);

            let mut best_robot = 0;
            let mut best_start = i64::MAX;
            let mut best_gap = 0;
            for robot in 0..num_robots {
                let gap = match robot_last_task[robot] {
                    Some(prev) => problem.transit_ms(prev, task),
                    None => 0,
                };
                let start = (robot_available[robot] + gap).max(predecessor_ready);
                if start < best_start {
                    best_start = start;
                    best_robot = robot;
                    best_gap = gap;
                }
            }

            let task_end = best_start + problem.duration_ms(task);
            schedule.add_assignment(
                Assignment::new(task, problem.job_of(task), best_robot, best_start, task_end)
                    .with_setup(best_gap),
            );
            robot_available[best_robot] = task_end;
            robot_last_task[best_robot] = Some(task);
            end[task] = task_end;
        }

        schedule
    }
}
