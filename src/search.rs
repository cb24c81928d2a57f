//! Path search over a generated maze.
//!
//! This module contains the breadth-first, depth-first and A* searches together with the state
//! they share: visited and parent maps sized to the grid, the optional trace recorder used for
//! step-by-step replay, and path reconstruction. Every search moves one grid step at a time in
//! the four axis directions and never mutates the maze it reads.

mod astar;
mod bfs;
mod dfs;

pub use astar::a_star;
pub use bfs::breadth_first;
pub use dfs::depth_first;

use crate::{
    error::{MazeError, Result},
    maze::Maze,
    types::{Coord, SearchAlgorithm},
};

/// How much of the search process to record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Trace {
    /// Record nothing; only the path is computed.
    #[default]
    Off,
    /// Record the order in which cells were finalized.
    Visits,
    /// Record the visit order and a snapshot of the frontier after every expansion.
    Frontier,
}

impl Trace {
    /// Whether the visit order is recorded.
    const fn records_visits(self) -> bool {
        matches!(self, Self::Visits | Self::Frontier)
    }

    /// Whether frontier snapshots are recorded.
    const fn records_frontier(self) -> bool {
        matches!(self, Self::Frontier)
    }
}

impl From<bool> for Trace {
    fn from(want_trace: bool) -> Self {
        if want_trace {
            Self::Visits
        } else {
            Self::Off
        }
    }
}

/// This structure holds everything a single search produced.
///
/// The path is always computed. The trace and the frontier history are only filled in when the
/// caller asked for them through [`Trace`], since keeping them around costs memory proportional to
/// the number of cells the search touched. An unreachable end is not an error at this level; it
/// shows up as a `None` path, and [`Outcome::into_path`] turns it into one for callers that need it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    /// This field holds the path from `start` to `end`, both included, with every consecutive pair
    /// one grid step apart. It is `None` when `end` cannot be reached from `start`.
    pub path: Option<Vec<Coord>>,
    /// This field holds the cells in the order the search finalized them, starting with `start`
    /// and ending with `end` when a path exists. Cells that were discovered but never finalized are
    /// not part of it.
    pub trace: Option<Vec<Coord>>,
    /// This field holds one snapshot of the frontier before the first expansion and one more after
    /// every expansion that did not reach the goal.
    ///
    /// Snapshots of breadth-first search are in queue order, front first, and those of depth-first
    /// search are in stack order, bottom first. Snapshots of A* are sorted by priority, so the entry
    /// that would be closed next comes first, and leave out stale heap entries for cells that are
    /// already closed.
    pub frontier_history: Option<Vec<Vec<Coord>>>,
}

impl Outcome {
    /// Whether a path was found.
    #[must_use]
    pub const fn found(&self) -> bool {
        self.path.is_some()
    }

    /// Length of the path in moves, that is, one less than the number of cells on it.
    #[must_use]
    pub fn path_len(&self) -> Option<usize> {
        self.path.as_ref().map(|path| path.len().saturating_sub(1))
    }

    /// Number of cells the search finalized, when tracing was requested.
    #[must_use]
    pub fn cells_explored(&self) -> Option<usize> {
        self.trace.as_ref().map(Vec::len)
    }

    /// Consumes the outcome and returns its path, treating a missing path as an error.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::NoPathFound`] when the search could not reach the end of `maze`.
    pub fn into_path(self, maze: &Maze) -> Result<Vec<Coord>> {
        self.path.ok_or(MazeError::NoPathFound {
            start: maze.start(),
            end: maze.end(),
        })
    }
}

/// Runs the selected search algorithm from the maze's start to its end.
#[must_use]
pub fn run(maze: &Maze, algorithm: SearchAlgorithm, trace: Trace) -> Outcome {
    match algorithm {
        SearchAlgorithm::BreadthFirst => breadth_first(maze, trace),
        SearchAlgorithm::DepthFirst => depth_first(maze, trace),
        SearchAlgorithm::AStar => a_star(maze, trace),
    }
}

/// Per-search value attached to every grid position.
struct CellMap<T> {
    /// Side length of the grid.
    width: usize,
    /// Values in row-major order.
    values: Vec<T>,
}

impl<T: Clone + Default + PartialEq> CellMap<T> {
    /// Map covering the whole grid of `maze`, filled with `initial`.
    fn new(maze: &Maze, initial: T) -> Self {
        Self {
            width: maze.width(),
            values: vec![initial; maze.width() * maze.height()],
        }
    }

    /// Row-major index of a coordinate inside the map.
    const fn index(&self, coord: Coord) -> Option<usize> {
        if coord.row < self.width && coord.col < self.width {
            Some(coord.row * self.width + coord.col)
        } else {
            None
        }
    }

    /// Value stored for `coord`, or `None` outside the grid.
    fn get(&self, coord: Coord) -> Option<&T> {
        self.values.get(self.index(coord)?)
    }

    /// Stores a value for `coord`. Coordinates outside the grid are ignored.
    fn set(&mut self, coord: Coord, value: T) {
        if let Some(slot) = self
            .index(coord)
            .and_then(|index| self.values.get_mut(index))
        {
            *slot = value;
        }
    }

    /// Whether `coord` is inside the grid and still holds the default value.
    fn is_unmarked(&self, coord: Coord) -> bool {
        self.get(coord) == Some(&T::default())
    }

    /// Number of grid positions covered by the map.
    fn len(&self) -> usize {
        self.values.len()
    }
}

/// Collects the visit trace and frontier snapshots of a search, when enabled.
struct Recorder {
    /// Finalized cells in order.
    visits: Option<Vec<Coord>>,
    /// Frontier snapshots in order.
    frontier: Option<Vec<Vec<Coord>>>,
}

impl Recorder {
    /// Recorder honouring the requested trace level.
    fn new(trace: Trace) -> Self {
        Self {
            visits: trace.records_visits().then(Vec::new),
            frontier: trace.records_frontier().then(Vec::new),
        }
    }

    /// Records that `coord` was finalized.
    fn visit(&mut self, coord: Coord) {
        if let Some(visits) = &mut self.visits {
            visits.push(coord);
        }
    }

    /// Records the current frontier. The closure only runs when snapshots are enabled.
    fn snapshot<F, I>(&mut self, frontier: F)
    where
        F: FnOnce() -> I,
        I: IntoIterator<Item = Coord>,
    {
        if let Some(history) = &mut self.frontier {
            history.push(frontier().into_iter().collect());
        }
    }

    /// Number of visits recorded so far, zero when visits are not recorded.
    fn visit_count(&self) -> usize {
        self.visits.as_ref().map_or(0, Vec::len)
    }

    /// Bundles the recorded data with the search result.
    fn finish(self, path: Option<Vec<Coord>>) -> Outcome {
        Outcome {
            path,
            trace: self.visits,
            frontier_history: self.frontier,
        }
    }
}

/// Walks parent pointers back from `end` to `start` and returns the path in forward order.
///
/// Returns `None` if the chain is broken or longer than the grid, which would mean the parent map
/// is inconsistent.
fn reconstruct(parents: &CellMap<Option<Coord>>, start: Coord, end: Coord) -> Option<Vec<Coord>> {
    let mut path = vec![end];
    let mut current = end;

    while current != start {
        if path.len() > parents.len() {
            log::warn!("parent chain from {end} does not terminate");
            return None;
        }

        let Some(parent) = parents.get(current).copied().flatten() else {
            log::warn!("parent chain from {end} breaks at {current}");
            return None;
        };

        path.push(parent);
        current = parent;
    }

    path.reverse();
    Some(path)
}
