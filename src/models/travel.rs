//! Travel-time matrix.
//!
//! Sequence-dependent setup times for the robot fleet: moving from
//! location `a` to location `b` costs `travel[a][b]` milliseconds. The
//! matrix need not be symmetric (one-way aisles, conveyor crossings).

use serde::{Deserialize, Serialize};

/// An N×N travel-time lookup indexed by location id.
///
/// Validated by [`validate_input`](crate::validation::validate_input) to be
/// square, non-negative, and to cover every location referenced by a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelTimeMatrix {
    times: Vec<Vec<i64>>,
}

impl TravelTimeMatrix {
    /// Creates a matrix from row-major travel times.
    ///
    /// Structural checks (squareness, non-negativity) happen at problem
    /// construction, not here.
    pub fn from_rows(times: Vec<Vec<i64>>) -> Self {
        Self { times }
    }

    /// Travel time from `from` to `to` (ms).
    ///
    /// # Panics
    /// Panics if either location is out of range; use [`get`](Self::get)
    /// for unvalidated input.
    pub fn time_ms(&self, from: usize, to: usize) -> i64 {
        self.times[from][to]
    }

    /// Travel time from `from` to `to`, or `None` if out of range.
    pub fn get(&self, from: usize, to: usize) -> Option<i64> {
        self.times.get(from)?.get(to).copied()
    }

    /// Number of locations covered (row count).
    pub fn num_locations(&self) -> usize {
        self.times.len()
    }

    /// Whether every row has exactly `num_locations` entries.
    pub fn is_square(&self) -> bool {
        let n = self.times.len();
        self.times.iter().all(|row| row.len() == n)
    }

    /// Largest single travel time in the matrix (0 for an empty matrix).
    pub fn max_time_ms(&self) -> i64 {
        self.times
            .iter()
            .flat_map(|row| row.iter().copied())
            .max()
            .unwrap_or(0)
    }

    /// Row-major view of the matrix.
    pub fn rows(&self) -> &[Vec<i64>] {
        &self.times
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_asymmetric() {
        let m = TravelTimeMatrix::from_rows(vec![vec![0, 4], vec![9, 0]]);
        assert_eq!(m.time_ms(0, 1), 4);
        assert_eq!(m.time_ms(1, 0), 9);
        assert_eq!(m.num_locations(), 2);
        assert!(m.is_square());
    }

    #[test]
    fn test_get_out_of_range() {
        let m = TravelTimeMatrix::from_rows(vec![vec![0, 1], vec![1, 0]]);
        assert_eq!(m.get(0, 1), Some(1));
        assert_eq!(m.get(0, 2), None);
        assert_eq!(m.get(2, 0), None);
    }

    #[test]
    fn test_non_square_detected() {
        let m = TravelTimeMatrix::from_rows(vec![vec![0, 1], vec![1]]);
        assert!(!m.is_square());
    }

    #[test]
    fn test_max_time() {
        let m = TravelTimeMatrix::from_rows(vec![vec![0, 7, 2], vec![3, 0, 5], vec![1, 4, 0]]);
        assert_eq!(m.max_time_ms(), 7);
        assert_eq!(TravelTimeMatrix::from_rows(vec![]).max_time_ms(), 0);
    }
}
