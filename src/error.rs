//! Error taxonomy for maze construction and search.

use thiserror::Error;

use crate::types::{Cell, Coord};

/// Errors reported by the maze core.
///
/// `InvalidSize` and `InvalidComplexity` are precondition violations detected before any grid is
/// allocated. `OutOfBounds` and `InvalidNeighbor` come from the grid accessors and indicate a caller
/// bug. `NoPathFound` is only produced when a caller explicitly asks for a path to exist; the
/// searches themselves report a missing path as `None`.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum MazeError {
    /// The requested maze dimension is not positive.
    #[error("maze size must be at least 1, got {0}")]
    InvalidSize(usize),
    /// The extra-path complexity is negative, infinite or not a number.
    #[error("complexity must be a finite, non-negative number, got {0}")]
    InvalidComplexity(f64),
    /// A grid coordinate lies outside the matrix.
    #[error("coordinate {coord} lies outside the {width}x{width} grid")]
    OutOfBounds {
        /// Offending coordinate.
        coord: Coord,
        /// Side length of the grid it was checked against.
        width: usize,
    },
    /// Two logical cells are not axis-adjacent, so no wall separates them.
    #[error("cells {0} and {1} are not axis-adjacent")]
    InvalidNeighbor(Cell, Cell),
    /// The end of the maze cannot be reached from its start.
    #[error("no path exists from {start} to {end}")]
    NoPathFound {
        /// Start coordinate of the search.
        start: Coord,
        /// End coordinate of the search.
        end: Coord,
    },
    /// A search algorithm name could not be recognised.
    #[error("unknown search algorithm `{0}`, expected one of bfs, dfs, astar")]
    UnknownSearch(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MazeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            MazeError::InvalidSize(0).to_string(),
            "maze size must be at least 1, got 0"
        );
        assert_eq!(
            MazeError::OutOfBounds {
                coord: Coord::new(9, 0),
                width: 7
            }
            .to_string(),
            "coordinate (9, 0) lies outside the 7x7 grid"
        );
        assert_eq!(
            MazeError::InvalidNeighbor(Cell::new(0, 0), Cell::new(1, 1)).to_string(),
            "cells [0, 0] and [1, 1] are not axis-adjacent"
        );
        assert_eq!(
            MazeError::NoPathFound {
                start: Coord::new(1, 1),
                end: Coord::new(5, 5)
            }
            .to_string(),
            "no path exists from (1, 1) to (5, 5)"
        );
    }
}
