//! Randomized maze generation.
//!
//! Every generator carves a spanning tree over the logical cells of an all-wall [`Maze`], after
//! which `start` and `end` are forced open and the optional extra-path pass removes a number of
//! additional walls to introduce cycles. The random source is supplied by the caller, so the same
//! seed always produces the same maze.

mod backtrack;
mod extra_paths;
mod kruskal;
mod prim;

use rand::Rng;

use crate::{
    error::{MazeError, Result},
    maze::Maze,
    types::{Cell, Coord, GenerationAlgorithm, GenerationStep},
};

/// Generates a maze of `size x size` logical cells.
///
/// `complexity` controls the extra-path pass: `floor(size^2 * complexity)` additional walls are
/// removed once the spanning tree is complete. A complexity of zero leaves a perfect maze.
///
/// # Errors
///
/// Returns [`MazeError::InvalidSize`] for a zero size and [`MazeError::InvalidComplexity`] for a
/// negative or non-finite complexity. Both are checked before any grid is built.
pub fn generate<R: Rng + ?Sized>(
    size: usize,
    complexity: f64,
    algorithm: GenerationAlgorithm,
    rng: &mut R,
) -> Result<Maze> {
    let (maze, _) = run(size, complexity, algorithm, rng, false)?;
    Ok(maze)
}

/// Generates a maze like [`generate`] and also returns every carving step in order.
///
/// Replaying the returned steps on an all-wall grid reproduces the final maze.
///
/// # Errors
///
/// Same as [`generate`].
pub fn generate_recorded<R: Rng + ?Sized>(
    size: usize,
    complexity: f64,
    algorithm: GenerationAlgorithm,
    rng: &mut R,
) -> Result<(Maze, Vec<GenerationStep>)> {
    let (maze, steps) = run(size, complexity, algorithm, rng, true)?;
    Ok((maze, steps.unwrap_or_default()))
}

/// Checks that an extra-path complexity is usable.
///
/// # Errors
///
/// Returns [`MazeError::InvalidComplexity`] for negative, infinite or NaN values.
pub(crate) fn validate_complexity(complexity: f64) -> Result<()> {
    if complexity.is_finite() && complexity >= 0.0 {
        Ok(())
    } else {
        Err(MazeError::InvalidComplexity(complexity))
    }
}

/// Runs the selected generator followed by endpoint forcing and the extra-path pass.
fn run<R: Rng + ?Sized>(
    size: usize,
    complexity: f64,
    algorithm: GenerationAlgorithm,
    rng: &mut R,
    record: bool,
) -> Result<(Maze, Option<Vec<GenerationStep>>)> {
    validate_complexity(complexity)?;
    let maze = Maze::walled(size)?;

    let mut carver = Carver {
        maze,
        rng,
        steps: record.then(Vec::new),
    };

    match algorithm {
        GenerationAlgorithm::DfsBacktrack => backtrack::carve(&mut carver)?,
        GenerationAlgorithm::Prim => prim::carve(&mut carver)?,
        GenerationAlgorithm::Kruskal => kruskal::carve(&mut carver)?,
    }
    carver.force_endpoints()?;

    let extra = if complexity > 0.0 {
        extra_paths::carve(&mut carver, complexity)?
    } else {
        0
    };

    log::debug!(
        "generated {size}x{size} maze with {algorithm}: {} passages, {extra} extra",
        carver.maze.passage_count()
    );

    Ok((carver.maze, carver.steps))
}

/// Mutable generation state shared by every algorithm.
///
/// All grid mutations made during generation go through this type so that the step log, when
/// enabled, sees every opened position exactly once and in order.
struct Carver<'rng, R: ?Sized> {
    /// Maze under construction.
    maze: Maze,
    /// Random source driving every choice.
    rng: &'rng mut R,
    /// Step log, present only when the caller asked for it.
    steps: Option<Vec<GenerationStep>>,
}

impl<R: Rng + ?Sized> Carver<'_, R> {
    /// Appends a step to the log if recording is enabled.
    fn record(&mut self, step: GenerationStep) {
        if let Some(steps) = &mut self.steps {
            steps.push(step);
        }
    }

    /// Opens the grid position of a logical cell.
    fn open_cell(&mut self, cell: Cell) -> Result<()> {
        let coord = self.maze.open_cell(cell)?;
        self.record(GenerationStep::OpenCell(coord));
        Ok(())
    }

    /// Opens the wall between two adjacent logical cells as a spanning-tree edge.
    fn open_wall(&mut self, first: Cell, second: Cell) -> Result<()> {
        let coord = self.maze.open_wall(first, second)?;
        self.record(GenerationStep::OpenWall(coord));
        Ok(())
    }

    /// Opens a wall slot on behalf of the extra-path pass.
    fn open_extra(&mut self, coord: Coord) -> Result<()> {
        if self.maze.set_open(coord)? {
            self.record(GenerationStep::ExtraPath(coord));
        }
        Ok(())
    }

    /// Makes sure `start` and `end` are open.
    ///
    /// Every generator visits all logical cells, so both corners are already open at this point.
    /// Having to open one here means the tree does not reach it.
    fn force_endpoints(&mut self) -> Result<()> {
        for coord in [self.maze.start(), self.maze.end()] {
            if self.maze.set_open(coord)? {
                log::warn!("{coord} was not carved by the generator and had to be forced open");
                self.record(GenerationStep::OpenCell(coord));
            }
        }

        Ok(())
    }
}

/// Set of logical cells backed by a flat flag vector.
struct CellSet {
    /// Logical side length.
    size: usize,
    /// Membership flags in row-major order.
    flags: Vec<bool>,
}

impl CellSet {
    /// Empty set over a `size x size` logical space.
    fn new(size: usize) -> Self {
        Self {
            size,
            flags: vec![false; size * size],
        }
    }

    /// Inserts a cell, returning `true` if it was not present.
    fn insert(&mut self, cell: Cell) -> bool {
        let size = self.size;
        match cell_index(size, cell).and_then(|index| self.flags.get_mut(index)) {
            Some(flag) if !*flag => {
                *flag = true;
                true
            }
            _ => false,
        }
    }

    /// Whether the cell is in the set.
    fn contains(&self, cell: Cell) -> bool {
        cell_index(self.size, cell)
            .and_then(|index| self.flags.get(index))
            .copied()
            .unwrap_or(false)
    }
}

/// Row-major index of a logical cell inside a `size x size` space.
const fn cell_index(size: usize, cell: Cell) -> Option<usize> {
    if cell.row < size && cell.col < size {
        Some(cell.row * size + cell.col)
    } else {
        None
    }
}

/// Picks a uniformly random logical cell.
fn random_cell<R: Rng + ?Sized>(rng: &mut R, size: usize) -> Cell {
    Cell::new(rng.random_range(0..size), rng.random_range(0..size))
}

#[cfg(test)]
mod tests {
    use std::collections::{HashSet, VecDeque};

    use proptest::{arbitrary::any, prop_assert, prop_assert_eq, proptest, sample::select};
    use rand::{rngs::StdRng, SeedableRng as _};

    use super::*;
    use crate::types::Tile;

    /// Seeded generator so every test is reproducible.
    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    /// Open grid positions reachable from `start`, found with a plain flood fill.
    fn reachable(maze: &Maze) -> HashSet<Coord> {
        let mut seen = HashSet::from([maze.start()]);
        let mut queue = VecDeque::from([maze.start()]);

        while let Some(coord) = queue.pop_front() {
            for next in maze.open_neighbors(coord) {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        seen
    }

    /// Number of logical cells reachable from `start`.
    fn reachable_cells(maze: &Maze) -> usize {
        reachable(maze)
            .into_iter()
            .filter(|coord| coord.row % 2 == 1 && coord.col % 2 == 1)
            .count()
    }

    fn open_coords(maze: &Maze) -> HashSet<Coord> {
        maze.coords()
            .filter(|coord| maze.tile(*coord) == Some(Tile::Open))
            .collect()
    }

    #[test]
    fn test_every_algorithm_builds_a_spanning_tree() {
        for algorithm in GenerationAlgorithm::ALL {
            for size in [1, 2, 3, 8, 17] {
                let maze = generate(size, 0.0, algorithm, &mut seeded(7))
                    .expect("valid parameters");

                assert_eq!(reachable_cells(&maze), size * size, "{algorithm} size {size}");
                assert_eq!(maze.passage_count(), size * size - 1, "{algorithm} size {size}");
                assert_eq!(maze.open_count(), 2 * size * size - 1, "{algorithm} size {size}");
            }
        }
    }

    #[test]
    fn test_three_by_three_backtracker() {
        let maze = generate(3, 0.0, GenerationAlgorithm::DfsBacktrack, &mut seeded(3))
            .expect("valid parameters");

        assert_eq!(maze.width(), 7);
        assert_eq!(maze.open_count(), 17);
        assert_eq!(maze.is_open(Coord::new(1, 1)), Ok(true));
        assert_eq!(maze.is_open(Coord::new(5, 5)), Ok(true));
    }

    #[test]
    fn test_single_cell_maze() {
        for algorithm in GenerationAlgorithm::ALL {
            let maze = generate(1, 0.1, algorithm, &mut seeded(0)).expect("valid parameters");

            assert_eq!(maze.open_count(), 1);
            assert_eq!(maze.start(), maze.end());
            assert_eq!(maze.to_string(), "###\n# #\n###\n");
        }
    }

    #[test]
    fn test_invalid_size_is_rejected() {
        assert_eq!(
            generate(0, 0.0, GenerationAlgorithm::Prim, &mut seeded(1)),
            Err(MazeError::InvalidSize(0))
        );
    }

    #[test]
    fn test_invalid_complexity_is_rejected() {
        for complexity in [-0.1, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                generate(4, complexity, GenerationAlgorithm::Kruskal, &mut seeded(1)),
                Err(MazeError::InvalidComplexity(_))
            ));
        }
    }

    #[test]
    fn test_same_seed_is_deterministic() {
        for algorithm in GenerationAlgorithm::ALL {
            let first = generate(12, 0.05, algorithm, &mut seeded(99)).expect("valid parameters");
            let second = generate(12, 0.05, algorithm, &mut seeded(99)).expect("valid parameters");

            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        for algorithm in GenerationAlgorithm::ALL {
            let first = generate(10, 0.0, algorithm, &mut seeded(1)).expect("valid parameters");
            let second = generate(10, 0.0, algorithm, &mut seeded(2)).expect("valid parameters");

            assert_ne!(first, second, "{algorithm}");
        }
    }

    #[test]
    fn test_extra_paths_open_requested_count() {
        for algorithm in GenerationAlgorithm::ALL {
            let maze = generate(10, 0.1, algorithm, &mut seeded(5)).expect("valid parameters");

            assert_eq!(maze.passage_count(), 99 + 10);
            assert_eq!(reachable_cells(&maze), 100);
        }
    }

    #[test]
    fn test_extra_paths_capped_by_eligible_walls() {
        let maze = generate(6, 1.0, GenerationAlgorithm::Prim, &mut seeded(8))
            .expect("valid parameters");

        // 2 * 6 * 5 inter-cell walls exist, all of them end up open.
        assert_eq!(maze.passage_count(), 60);
    }

    #[test]
    fn test_extra_paths_only_add_openings() {
        for algorithm in GenerationAlgorithm::ALL {
            let tree = generate(14, 0.0, algorithm, &mut seeded(21)).expect("valid parameters");
            let braided =
                generate(14, 0.12, algorithm, &mut seeded(21)).expect("valid parameters");

            let tree_open = open_coords(&tree);
            let braided_open = open_coords(&braided);

            assert!(tree_open.is_subset(&braided_open), "{algorithm}");
            assert!(braided_open.len() > tree_open.len(), "{algorithm}");
            assert!(braided_open
                .difference(&tree_open)
                .all(|coord| coord.is_wall_slot()));
        }
    }

    #[test]
    fn test_recorded_steps_replay_to_the_same_maze() {
        for algorithm in GenerationAlgorithm::ALL {
            let (maze, steps) =
                generate_recorded(9, 0.08, algorithm, &mut seeded(13)).expect("valid parameters");

            let mut replayed = Maze::walled(9).expect("valid size");
            for step in &steps {
                assert_eq!(replayed.set_open(step.coord()), Ok(true), "{step:?} opened twice");
            }

            assert_eq!(replayed, maze);
            assert_eq!(steps.len(), maze.open_count());
            assert_eq!(
                steps
                    .iter()
                    .filter(|step| matches!(step, GenerationStep::OpenWall(_)))
                    .count(),
                80
            );
            assert_eq!(
                steps
                    .iter()
                    .filter(|step| matches!(step, GenerationStep::ExtraPath(_)))
                    .count(),
                6
            );
        }
    }

    #[test]
    fn test_recording_does_not_change_the_maze() {
        let plain = generate(11, 0.05, GenerationAlgorithm::Kruskal, &mut seeded(4))
            .expect("valid parameters");
        let (recorded, _) =
            generate_recorded(11, 0.05, GenerationAlgorithm::Kruskal, &mut seeded(4))
                .expect("valid parameters");

        assert_eq!(plain, recorded);
    }

    #[test]
    fn test_kruskal_step_log_opens_cells_first() {
        let (_, steps) = generate_recorded(5, 0.0, GenerationAlgorithm::Kruskal, &mut seeded(2))
            .expect("valid parameters");

        assert!(steps
            .iter()
            .take(25)
            .all(|step| matches!(step, GenerationStep::OpenCell(_))));
        assert!(steps
            .iter()
            .skip(25)
            .all(|step| matches!(step, GenerationStep::OpenWall(_))));
    }

    #[test]
    fn test_cell_set() {
        let mut set = CellSet::new(3);

        assert!(set.insert(Cell::new(1, 2)));
        assert!(!set.insert(Cell::new(1, 2)));
        assert!(set.contains(Cell::new(1, 2)));
        assert!(!set.contains(Cell::new(2, 1)));
        assert!(!set.insert(Cell::new(3, 0)));
        assert!(!set.contains(Cell::new(3, 0)));
    }

    proptest! {
        #[test]
        fn prop_generated_mazes_are_connected_trees(
            seed in any::<u64>(),
            size in 1_usize..16,
            algorithm in select(GenerationAlgorithm::ALL.to_vec()),
        ) {
            let maze = generate(size, 0.0, algorithm, &mut seeded(seed))
                .expect("valid parameters");

            prop_assert_eq!(maze.passage_count(), size * size - 1);
            prop_assert_eq!(reachable_cells(&maze), size * size);
        }

        #[test]
        fn prop_extra_paths_preserve_connectivity(
            seed in any::<u64>(),
            size in 2_usize..16,
            complexity in 0.0_f64..0.2,
            algorithm in select(GenerationAlgorithm::ALL.to_vec()),
        ) {
            let tree = generate(size, 0.0, algorithm, &mut seeded(seed))
                .expect("valid parameters");
            let braided = generate(size, complexity, algorithm, &mut seeded(seed))
                .expect("valid parameters");

            prop_assert_eq!(reachable_cells(&braided), size * size);
            prop_assert!(open_coords(&tree).is_subset(&open_coords(&braided)));
            prop_assert!(braided.passage_count() >= tree.passage_count());
        }
    }
}
