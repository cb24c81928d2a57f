//! Extra-path pass that turns a perfect maze into one with cycles.

use rand::{seq::SliceRandom as _, Rng};

use super::Carver;
use crate::{
    error::Result,
    maze::Maze,
    types::{Coord, Tile},
};

/// Opens up to `floor(N^2 * complexity)` randomly chosen walls.
///
/// Only wall slots between logical cells are considered, and only those with open positions on at
/// least two of their four sides. Returns the number of walls that were opened.
pub(super) fn carve<R: Rng + ?Sized>(carver: &mut Carver<'_, R>, complexity: f64) -> Result<usize> {
    let target = extra_path_count(carver.maze.size(), complexity);
    let mut eligible = eligible_walls(&carver.maze);
    eligible.shuffle(carver.rng);

    let count = target.min(eligible.len());
    for coord in eligible.into_iter().take(count) {
        carver.open_extra(coord)?;
    }

    log::trace!("opened {count} extra paths out of {target} requested");

    Ok(count)
}

/// Interior wall slots that currently separate open positions.
fn eligible_walls(maze: &Maze) -> Vec<Coord> {
    let last = maze.width() - 1;

    maze.coords()
        .filter(|coord| (1..last).contains(&coord.row) && (1..last).contains(&coord.col))
        .filter(|coord| coord.is_wall_slot() && maze.tile(*coord) == Some(Tile::Wall))
        .filter(|coord| maze.open_neighbors(*coord).count() >= 2)
        .collect()
}

/// Number of extra walls requested for a given size and complexity.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "The complexity is validated to be finite and non-negative, and the cast saturates."
)]
fn extra_path_count(size: usize, complexity: f64) -> usize {
    let cells = size.saturating_mul(size) as f64;
    (cells * complexity).floor() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    #[test]
    fn test_extra_path_count() {
        assert_eq!(extra_path_count(10, 0.0), 0);
        assert_eq!(extra_path_count(10, 0.05), 5);
        assert_eq!(extra_path_count(10, 0.1), 10);
        assert_eq!(extra_path_count(3, 0.1), 0);
        assert_eq!(extra_path_count(25, 0.05), 31);
    }

    #[test]
    fn test_eligible_walls_need_two_open_sides() {
        let mut maze = Maze::walled(2).expect("valid size");
        let _ = maze.open_cell(Cell::new(0, 0)).expect("cell is inside");
        let _ = maze.open_cell(Cell::new(0, 1)).expect("cell is inside");

        assert_eq!(eligible_walls(&maze), vec![Coord::new(1, 2)]);

        let _ = maze.open_cell(Cell::new(1, 1)).expect("cell is inside");
        assert_eq!(
            eligible_walls(&maze),
            vec![Coord::new(1, 2), Coord::new(2, 3)]
        );
    }

    #[test]
    fn test_eligible_walls_skip_open_slots() {
        let mut maze = Maze::walled(2).expect("valid size");
        let _ = maze.open_cell(Cell::new(0, 0)).expect("cell is inside");
        let _ = maze.open_cell(Cell::new(0, 1)).expect("cell is inside");
        let _ = maze
            .open_wall(Cell::new(0, 0), Cell::new(0, 1))
            .expect("cells are adjacent");

        assert!(eligible_walls(&maze).is_empty());
    }
}
