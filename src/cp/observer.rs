//! Injectable solve-time trace sink.
//!
//! The scheduler reports constraint construction and search progress to a
//! [`SolveObserver`] instead of writing to a fixed output channel. Callers
//! pick the sink: discard ([`NullObserver`]), structured logging
//! ([`TracingObserver`]), or capture for inspection ([`RecordingObserver`]).

use super::SolveStatus;

/// Receiver for solve-time trace events.
///
/// All hooks default to no-ops so implementors subscribe only to what they
/// need.
pub trait SolveObserver {
    /// A constraint was added to the model.
    fn constraint_added(&mut self, description: &str) {
        let _ = description;
    }

    /// The search found a new best (incumbent) schedule.
    fn solution_found(&mut self, makespan_ms: i64, nodes_explored: u64) {
        let _ = (makespan_ms, nodes_explored);
    }

    /// The search terminated.
    fn search_finished(&mut self, status: SolveStatus, nodes_explored: u64) {
        let _ = (status, nodes_explored);
    }
}

/// Discards every event. The default sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl SolveObserver for NullObserver {}

/// Routes events to the `tracing` subscriber: constraints at `debug`,
/// progress and termination at `info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SolveObserver for TracingObserver {
    fn constraint_added(&mut self, description: &str) {
        tracing::debug!(constraint = description, "constraint added");
    }

    fn solution_found(&mut self, makespan_ms: i64, nodes_explored: u64) {
        tracing::info!(makespan_ms, nodes_explored, "incumbent improved");
    }

    fn search_finished(&mut self, status: SolveStatus, nodes_explored: u64) {
        tracing::info!(?status, nodes_explored, "search finished");
    }
}

/// Captures events as strings; used by tests and diagnostics.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    /// Captured events in arrival order.
    pub events: Vec<String>,
}

impl RecordingObserver {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SolveObserver for RecordingObserver {
    fn constraint_added(&mut self, description: &str) {
        self.events.push(format!("constraint: {description}"));
    }

    fn solution_found(&mut self, makespan_ms: i64, nodes_explored: u64) {
        self.events
            .push(format!("incumbent: makespan={makespan_ms} nodes={nodes_explored}"));
    }

    fn search_finished(&mut self, status: SolveStatus, nodes_explored: u64) {
        self.events
            .push(format!("finished: {status:?} nodes={nodes_explored}"));
    }
}
