//! Coordinate types and the enumerations shared by generation and search.

use std::{convert::Infallible, fmt, str::FromStr};

use crate::error::MazeError;

/// Position in the doubled `(2N+1) x (2N+1)` grid.
///
/// Odd/odd positions hold logical cells, every other position is a wall or passage slot sitting
/// between two logical cells (or a pillar where four slots meet).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    /// Row index in the doubled grid.
    pub row: usize,
    /// Column index in the doubled grid.
    pub col: usize,
}

impl Coord {
    /// Builds a grid coordinate from a row and a column.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two grid coordinates.
    ///
    /// This is the heuristic used by the A* search. On a 4-connected grid with unit step cost it
    /// never overestimates the remaining distance.
    #[must_use]
    pub const fn manhattan(self, other: Self) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Moves one grid step in `direction`, or returns `None` when the step would underflow.
    ///
    /// Upper bounds are not checked here; the maze owning the grid decides whether the result is
    /// inside it.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (row, col) = direction.apply(self.row, self.col)?;
        Some(Self::new(row, col))
    }

    /// Whether this coordinate addresses a wall slot between two logical cells.
    ///
    /// Wall slots are the positions where exactly one of the two indices is odd.
    #[must_use]
    pub const fn is_wall_slot(self) -> bool {
        (self.row % 2 == 1) != (self.col % 2 == 1)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {})", self.row, self.col)
    }
}

/// One of the `N x N` logical maze rooms, addressed by `(row, col)` in `[0, N)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    /// Logical row.
    pub row: usize,
    /// Logical column.
    pub col: usize,
}

impl Cell {
    /// Builds a logical cell from a row and a column.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Maps the logical cell onto its odd/odd position in the doubled grid.
    #[must_use]
    pub const fn to_coord(self) -> Coord {
        Coord::new(2 * self.row + 1, 2 * self.col + 1)
    }

    /// Moves one logical step in `direction`, or returns `None` when the step would underflow.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (row, col) = direction.apply(self.row, self.col)?;
        Some(Self::new(row, col))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[{}, {}]", self.row, self.col)
    }
}

/// State of a single grid position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tile {
    /// Impassable position. Every position starts out as a wall.
    #[default]
    Wall,
    /// Passable position, either a logical cell or a carved passage.
    Open,
}

impl Tile {
    /// Character used when printing the maze on a console.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Open => ' ',
        }
    }
}

/// The four axis-aligned movement directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row zero.
    Up,
    /// Towards the last column.
    Right,
    /// Towards the last row.
    Down,
    /// Towards column zero.
    Left,
}

impl Direction {
    /// All directions in the order every algorithm iterates them: up, right, down, left.
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Applies the direction to a `(row, col)` pair, returning `None` on underflow.
    fn apply(self, row: usize, col: usize) -> Option<(usize, usize)> {
        match self {
            Self::Up => Some((row.checked_sub(1)?, col)),
            Self::Right => Some((row, col.checked_add(1)?)),
            Self::Down => Some((row.checked_add(1)?, col)),
            Self::Left => Some((row, col.checked_sub(1)?)),
        }
    }
}

/// Available maze generation algorithms.
///
/// Every variant builds a spanning tree over the logical cells; they differ in the shape of the
/// resulting tree. Depth-first backtracking yields long winding corridors, while Prim and Kruskal
/// yield many short dead ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GenerationAlgorithm {
    /// Randomized depth-first search with an explicit backtracking stack.
    #[default]
    DfsBacktrack,
    /// Randomized Prim's algorithm over a frontier of candidate walls.
    Prim,
    /// Randomized Kruskal's algorithm over shuffled walls and a disjoint set.
    Kruskal,
}

impl GenerationAlgorithm {
    /// Every generation algorithm, in declaration order.
    pub const ALL: [Self; 3] = [Self::DfsBacktrack, Self::Prim, Self::Kruskal];

    /// Canonical name of the algorithm, as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::DfsBacktrack => "dfs_backtrack",
            Self::Prim => "prim",
            Self::Kruskal => "kruskal",
        }
    }
}

impl fmt::Display for GenerationAlgorithm {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

impl FromStr for GenerationAlgorithm {
    type Err = Infallible;

    /// Parses an algorithm name. Unknown names fall back to [`GenerationAlgorithm::DfsBacktrack`].
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Ok(match input.trim().to_ascii_lowercase().as_str() {
            "prim" => Self::Prim,
            "kruskal" => Self::Kruskal,
            "dfs_backtrack" | "dfs" | "backtrack" => Self::DfsBacktrack,
            other => {
                log::debug!("unknown generation algorithm `{other}`, using dfs_backtrack");
                Self::DfsBacktrack
            }
        })
    }
}

/// Available path search algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchAlgorithm {
    /// Breadth-first search over a FIFO queue. Always returns a shortest path.
    BreadthFirst,
    /// Depth-first search over a LIFO stack. Returns some path, not necessarily a short one.
    DepthFirst,
    /// A* search with the Manhattan distance heuristic. Always returns a shortest path.
    AStar,
}

impl SearchAlgorithm {
    /// Every search algorithm, in the order benchmarks report them.
    pub const ALL: [Self; 3] = [Self::DepthFirst, Self::BreadthFirst, Self::AStar];

    /// Short display name of the algorithm.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BreadthFirst => "BFS",
            Self::DepthFirst => "DFS",
            Self::AStar => "A*",
        }
    }
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

impl FromStr for SearchAlgorithm {
    type Err = MazeError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(Self::BreadthFirst),
            "dfs" => Ok(Self::DepthFirst),
            "astar" | "a*" | "a_star" => Ok(Self::AStar),
            other => Err(MazeError::UnknownSearch(other.to_owned())),
        }
    }
}

/// A single mutation performed while a maze was being generated.
///
/// The sequence of steps recorded during generation can be replayed on an all-wall grid to
/// reconstruct the carving process step by step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GenerationStep {
    /// A logical cell was opened.
    OpenCell(Coord),
    /// A wall between two logical cells was removed as a spanning-tree edge.
    OpenWall(Coord),
    /// A wall was removed by the extra-path pass, possibly closing a cycle.
    ExtraPath(Coord),
}

impl GenerationStep {
    /// Grid coordinate the step opened.
    #[must_use]
    pub const fn coord(self) -> Coord {
        match self {
            Self::OpenCell(coord) | Self::OpenWall(coord) | Self::ExtraPath(coord) => coord,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_coord() {
        assert_eq!(Cell::new(0, 0).to_coord(), Coord::new(1, 1));
        assert_eq!(Cell::new(2, 1).to_coord(), Coord::new(5, 3));
    }

    #[test]
    fn test_coord_step_underflow() {
        let origin = Coord::new(0, 0);

        assert_eq!(origin.step(Direction::Up), None);
        assert_eq!(origin.step(Direction::Left), None);
        assert_eq!(origin.step(Direction::Down), Some(Coord::new(1, 0)));
        assert_eq!(origin.step(Direction::Right), Some(Coord::new(0, 1)));
    }

    #[test]
    fn test_coord_manhattan() {
        let from = Coord::new(1, 1);
        let to = Coord::new(5, 3);

        assert_eq!(from.manhattan(to), 6);
        assert_eq!(to.manhattan(from), 6);
        assert_eq!(from.manhattan(from), 0);
    }

    #[test]
    fn test_wall_slot_classes() {
        assert!(Coord::new(1, 2).is_wall_slot());
        assert!(Coord::new(2, 1).is_wall_slot());
        assert!(!Coord::new(1, 1).is_wall_slot());
        assert!(!Coord::new(2, 2).is_wall_slot());
    }

    #[test]
    fn test_generation_algorithm_parsing() {
        assert_eq!("prim".parse(), Ok(GenerationAlgorithm::Prim));
        assert_eq!("Kruskal".parse(), Ok(GenerationAlgorithm::Kruskal));
        assert_eq!("dfs".parse(), Ok(GenerationAlgorithm::DfsBacktrack));
        assert_eq!("dfs_backtrack".parse(), Ok(GenerationAlgorithm::DfsBacktrack));
    }

    #[test]
    fn test_generation_algorithm_unknown_falls_back() {
        assert_eq!("eller".parse(), Ok(GenerationAlgorithm::DfsBacktrack));
        assert_eq!("".parse(), Ok(GenerationAlgorithm::DfsBacktrack));
    }

    #[test]
    fn test_generation_algorithm_name_round_trips() {
        for algorithm in GenerationAlgorithm::ALL {
            assert_eq!(algorithm.name().parse(), Ok(algorithm));
        }
    }

    #[test]
    fn test_search_algorithm_parsing() {
        assert_eq!("bfs".parse(), Ok(SearchAlgorithm::BreadthFirst));
        assert_eq!("DFS".parse(), Ok(SearchAlgorithm::DepthFirst));
        assert_eq!("a*".parse(), Ok(SearchAlgorithm::AStar));
        assert_eq!(
            "dijkstra".parse::<SearchAlgorithm>(),
            Err(MazeError::UnknownSearch("dijkstra".to_owned()))
        );
    }

    #[test]
    fn test_tile_glyphs() {
        assert_eq!(Tile::Wall.glyph(), '#');
        assert_eq!(Tile::Open.glyph(), ' ');
        assert_eq!(Tile::default(), Tile::Wall);
    }

    #[test]
    fn test_generation_step_coord() {
        let coord = Coord::new(3, 4);

        assert_eq!(GenerationStep::OpenCell(coord).coord(), coord);
        assert_eq!(GenerationStep::OpenWall(coord).coord(), coord);
        assert_eq!(GenerationStep::ExtraPath(coord).coord(), coord);
    }
}
