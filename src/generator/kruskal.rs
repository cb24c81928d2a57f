//! Randomized Kruskal's algorithm.

use rand::{seq::SliceRandom as _, Rng};

use super::{cell_index, Carver};
use crate::{error::Result, types::Cell, union_find::DisjointSet};

/// Carves a spanning tree by accepting shuffled walls that join two different regions.
///
/// All logical cells are opened up front. Each candidate wall (the east and south wall of every
/// cell that has that neighbour) is then visited once in random order and opened only when the two
/// cells it separates are not yet connected, so exactly `N^2 - 1` walls end up open.
pub(super) fn carve<R: Rng + ?Sized>(carver: &mut Carver<'_, R>) -> Result<()> {
    let size = carver.maze.size();

    for row in 0..size {
        for col in 0..size {
            carver.open_cell(Cell::new(row, col))?;
        }
    }

    let mut walls: Vec<(Cell, Cell)> = Vec::with_capacity(2 * size * (size - 1));
    for row in 0..size {
        for col in 0..size {
            let cell = Cell::new(row, col);
            if col + 1 < size {
                walls.push((cell, Cell::new(row, col + 1)));
            }
            if row + 1 < size {
                walls.push((cell, Cell::new(row + 1, col)));
            }
        }
    }
    walls.shuffle(carver.rng);

    let mut regions = DisjointSet::new(size * size);
    let mut unions = 0_usize;

    for (first, second) in walls.iter().copied() {
        let (Some(first_index), Some(second_index)) =
            (cell_index(size, first), cell_index(size, second))
        else {
            continue;
        };

        if regions.union(first_index, second_index) {
            carver.open_wall(first, second)?;
            unions += 1;
        }
    }

    if !regions.connected(0, regions.len() - 1) {
        log::warn!("kruskal left the maze partitioned after {unions} unions");
    }
    log::trace!(
        "kruskal accepted {unions} of {} candidate walls",
        walls.len()
    );

    Ok(())
}
