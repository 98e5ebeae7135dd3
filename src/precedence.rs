//! Priority-derived precedence graph.
//!
//! For each job independently, every ordered pair of tasks (i, j) with
//! `priority(type(i)) > priority(type(j))` yields the edge "i must finish
//! before j starts". The comparison is a full O(n²) pairwise sweep over the
//! job, not limited to adjacent list positions, so the relation may contain
//! transitively redundant edges. It is always a DAG: an edge only fires on
//! a strict priority inequality, and priority is a total preorder on task
//! types. No edges cross job boundaries, and equal-priority tasks stay
//! unordered.

use std::collections::VecDeque;

use crate::models::Problem;

/// The precedence relation over a problem's flattened tasks.
///
/// Built once before solving and read-only afterwards. Construction is
/// deterministic: identical input produces the identical edge set in the
/// identical order.
#[derive(Debug, Clone)]
pub struct PrecedenceGraph {
    edges: Vec<(usize, usize)>,
    successors: Vec<Vec<usize>>,
    predecessors: Vec<Vec<usize>>,
    topo: Vec<usize>,
}

impl PrecedenceGraph {
    /// Derives the precedence graph from a problem's jobs.
    pub fn build(problem: &Problem) -> Self {
        let n = problem.task_count();
        let mut edges = Vec::new();
        let mut successors = vec![Vec::new(); n];
        let mut predecessors = vec![Vec::new(); n];

        let mut job_start = 0;
        for job in problem.jobs() {
            let job_end = job_start + job.task_count();
            for i in job_start..job_end {
                for j in job_start..job_end {
                    if problem.task(i).priority() > problem.task(j).priority() {
                        edges.push((i, j));
                        successors[i].push(j);
                        predecessors[j].push(i);
                    }
                }
            }
            job_start = job_end;
        }

        let topo = topological_order(n, &successors, &predecessors);

        Self {
            edges,
            successors,
            predecessors,
            topo,
        }
    }

    /// All precedence edges `(before, after)` in derivation order.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Number of precedence edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Tasks that must start after `task` finishes.
    pub fn successors(&self, task: usize) -> &[usize] {
        &self.successors[task]
    }

    /// Tasks that must finish before `task` starts.
    pub fn predecessors(&self, task: usize) -> &[usize] {
        &self.predecessors[task]
    }

    /// A topological order of all tasks (predecessors first).
    pub fn topological_order(&self) -> &[usize] {
        &self.topo
    }

    /// Longest-duration chain starting at each task, own duration included.
    ///
    /// `tail[i] = duration(i) + max over successors of tail[succ]`, ignoring
    /// travel gaps. A valid lower bound on the time between `start[i]` and
    /// the makespan, used to prune the search.
    pub fn critical_tails(&self, problem: &Problem) -> Vec<i64> {
        let mut tails = vec![0i64; problem.task_count()];
        for &i in self.topo.iter().rev() {
            let successor_tail = self.successors[i].iter().map(|&s| tails[s]).max().unwrap_or(0);
            tails[i] = problem.duration_ms(i) + successor_tail;
        }
        tails
    }

    /// Longest precedence chain across the whole instance (ms).
    ///
    /// A static lower bound on the optimal makespan.
    pub fn longest_chain_ms(&self, problem: &Problem) -> i64 {
        self.critical_tails(problem).into_iter().max().unwrap_or(0)
    }
}

/// Kahn's algorithm. The precedence relation is a DAG by construction, so
/// every task appears exactly once.
fn topological_order(
    n: usize,
    successors: &[Vec<usize>],
    predecessors: &[Vec<usize>],
) -> Vec<usize> {
    let mut indegree: Vec<usize> = predecessors.iter().map(|p| p.len()).collect();
    let mut order = Vec::with_capacity(n);
    // FIFO over ascending initial indices keeps the order deterministic
    let mut ready: VecDeque<usize> = (0..n).filter(|&i| indegree[i] == 0).collect();

    while let Some(i) = ready.pop_front() {
        order.push(i);
        for &s in &successors[i] {
            indegree[s] -= 1;
            if indegree[s] == 0 {
                ready.push_back(s);
            }
        }
    }

    debug_assert_eq!(order.len(), n, "priority precedence must be acyclic");
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Job, Task, TaskType, TravelTimeMatrix};

    fn identity_matrix(n: usize) -> TravelTimeMatrix {
        TravelTimeMatrix::from_rows(vec![vec![0; n]; n])
    }

    fn problem_of(jobs: Vec<Job>) -> Problem {
        Problem::new(jobs, identity_matrix(4), 2).unwrap()
    }

    #[test]
    fn test_edges_from_priority_not_list_order() {
        // Delivery listed before Charger — the edge must still be Charger→Delivery
        let problem = problem_of(vec![Job::new()
            .with_task(Task::new(TaskType::Delivery, 0, 1))
            .with_task(Task::new(TaskType::Charger, 2, 3))]);
        let graph = PrecedenceGraph::build(&problem);
        assert_eq!(graph.edges(), &[(1, 0)]);
    }

    #[test]
    fn test_full_pairwise_not_only_adjacent() {
        // Charger, Shelf, Delivery → three edges including the non-adjacent C→D
        let problem = problem_of(vec![Job::new()
            .with_task(Task::new(TaskType::Charger, 0, 0))
            .with_task(Task::new(TaskType::Shelf, 1, 1))
            .with_task(Task::new(TaskType::Delivery, 2, 2))]);
        let graph = PrecedenceGraph::build(&problem);
        assert_eq!(graph.edges(), &[(0, 1), (0, 2), (1, 2)]);
        assert_eq!(graph.successors(0), &[1, 2]);
        assert_eq!(graph.predecessors(2), &[0, 1]);
    }

    #[test]
    fn test_equal_priority_unordered() {
        let problem = problem_of(vec![Job::new()
            .with_task(Task::new(TaskType::Shelf, 0, 1))
            .with_task(Task::new(TaskType::Shelf, 2, 3))]);
        let graph = PrecedenceGraph::build(&problem);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_no_edges_across_jobs() {
        let problem = problem_of(vec![
            Job::new().with_task(Task::new(TaskType::Charger, 0, 0)),
            Job::new().with_task(Task::new(TaskType::Delivery, 1, 1)),
        ]);
        let graph = PrecedenceGraph::build(&problem);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_deterministic() {
        let jobs = vec![Job::new()
            .with_task(Task::new(TaskType::Packer, 0, 1))
            .with_task(Task::new(TaskType::Input, 1, 2))
            .with_task(Task::new(TaskType::Delivery, 2, 3))];
        let a = PrecedenceGraph::build(&problem_of(jobs.clone()));
        let b = PrecedenceGraph::build(&problem_of(jobs));
        assert_eq!(a.edges(), b.edges());
        assert_eq!(a.topological_order(), b.topological_order());
    }

    #[test]
    fn test_topological_order_respects_edges() {
        let problem = problem_of(vec![Job::new()
            .with_task(Task::new(TaskType::Delivery, 0, 1))
            .with_task(Task::new(TaskType::Input, 1, 2))
            .with_task(Task::new(TaskType::Charger, 2, 3))]);
        let graph = PrecedenceGraph::build(&problem);
        let position: Vec<usize> = {
            let mut pos = vec![0; problem.task_count()];
            for (rank, &t) in graph.topological_order().iter().enumerate() {
                pos[t] = rank;
            }
            pos
        };
        for &(before, after) in graph.edges() {
            assert!(position[before] < position[after]);
        }
    }

    #[test]
    fn test_critical_tails() {
        // Charger(5) → Shelf(3) → Delivery(1), durations 5, 3, 2 (pure service)
        let problem = problem_of(vec![Job::new()
            .with_task(Task::new(TaskType::Charger, 0, 0).with_service_time(5))
            .with_task(Task::new(TaskType::Shelf, 0, 0).with_service_time(3))
            .with_task(Task::new(TaskType::Delivery, 0, 0).with_service_time(2))]);
        let graph = PrecedenceGraph::build(&problem);
        let tails = graph.critical_tails(&problem);
        assert_eq!(tails, vec![10, 5, 2]);
        assert_eq!(graph.longest_chain_ms(&problem), 10);
    }
}
