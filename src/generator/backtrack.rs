//! Randomized depth-first backtracking.

use rand::{seq::IndexedRandom as _, Rng};

use super::{random_cell, Carver, CellSet};
use crate::{error::Result, types::Cell};

/// Carves a spanning tree with a randomized depth-first walk.
///
/// The walk starts at a random cell. While the top of the stack still has unvisited neighbours one
/// of them is chosen uniformly, the wall towards it is opened and it is pushed; otherwise the stack
/// is popped. Every opened wall leads to a freshly visited cell, so no cycle can form.
pub(super) fn carve<R: Rng + ?Sized>(carver: &mut Carver<'_, R>) -> Result<()> {
    let size = carver.maze.size();
    let total = size * size;
    let mut visited = CellSet::new(size);

    let root = random_cell(carver.rng, size);
    let _ = visited.insert(root);
    carver.open_cell(root)?;

    let mut stack = vec![root];
    let mut visited_count = 1;

    while visited_count < total {
        let Some(&current) = stack.last() else {
            break;
        };

        let unvisited: Vec<Cell> = carver
            .maze
            .neighbors4(current)
            .into_iter()
            .filter(|neighbor| !visited.contains(*neighbor))
            .collect();

        if let Some(&next) = unvisited.choose(carver.rng) {
            let _ = visited.insert(next);
            visited_count += 1;

            carver.open_wall(current, next)?;
            carver.open_cell(next)?;
            stack.push(next);
        } else {
            let _ = stack.pop();
        }
    }

    log::trace!("backtracker visited {visited_count} of {total} cells");

    Ok(())
}
