//! Randomized perfect-maze generation and path search.
//!
//! A maze of `N x N` logical cells is stored as a `(2N+1) x (2N+1)` grid of walls and open tiles.
//! Three generators carve a spanning tree over the cells (depth-first backtracking, Prim and
//! Kruskal), after which an optional extra-path pass knocks out additional walls to introduce
//! cycles. Breadth-first search, depth-first search and A* then look for a path from the top-left
//! cell to the bottom-right one and can record the order in which they explored the grid.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The command-line dependencies are used in the binary crate."
)]

pub mod bench;
pub mod config;
pub mod error;
pub mod generator;
pub mod maze;
pub mod search;
pub mod types;
mod union_find;

pub use config::MazeConfig;
pub use error::{MazeError, Result};
pub use maze::Maze;
pub use search::{Outcome, Trace};
pub use types::{Cell, Coord, GenerationAlgorithm, GenerationStep, SearchAlgorithm, Tile};

/// Generates an `N x N` maze with the given extra-path complexity and algorithm.
///
/// The random source is seeded from the OS; use [`MazeConfig::with_seed`] for a reproducible maze.
///
/// # Errors
///
/// Returns [`MazeError::InvalidSize`] for a zero size and [`MazeError::InvalidComplexity`] for a
/// negative or non-finite complexity.
pub fn build_maze(size: usize, complexity: f64, algorithm: GenerationAlgorithm) -> Result<Maze> {
    MazeConfig::new(size)
        .with_complexity(complexity)
        .with_algorithm(algorithm)
        .build()
}

/// Searches `maze` from its start to its end, recording the visit order when `want_trace` is set.
#[must_use]
pub fn find_path(maze: &Maze, algorithm: SearchAlgorithm, want_trace: bool) -> Outcome {
    search::run(maze, algorithm, Trace::from(want_trace))
}
