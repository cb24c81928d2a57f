//! Randomized Prim's algorithm.

use rand::Rng;

use super::{random_cell, Carver};
use crate::{
    error::Result,
    types::{Cell, Tile},
};

/// A wall on the border of the carved region.
#[derive(Clone, Copy, Debug)]
struct Candidate {
    /// Cell already inside the tree.
    from: Cell,
    /// Cell on the far side of the wall.
    to: Cell,
}

/// Carves a spanning tree by growing it from a random cell through a frontier of walls.
///
/// Frontier entries are removed at a uniformly random index rather than in FIFO or LIFO order,
/// which is what gives Prim's mazes their short, branchy dead ends. An entry whose far cell has
/// been reached by another branch in the meantime is discarded.
pub(super) fn carve<R: Rng + ?Sized>(carver: &mut Carver<'_, R>) -> Result<()> {
    let size = carver.maze.size();
    let root = random_cell(carver.rng, size);
    carver.open_cell(root)?;

    let mut frontier: Vec<Candidate> = carver
        .maze
        .neighbors4(root)
        .into_iter()
        .map(|to| Candidate { from: root, to })
        .collect();
    let mut discarded = 0_usize;

    while !frontier.is_empty() {
        let index = carver.rng.random_range(0..frontier.len());
        let Candidate { from, to } = frontier.swap_remove(index);

        if carver.maze.tile(to.to_coord()) != Some(Tile::Wall) {
            discarded += 1;
            continue;
        }

        carver.open_wall(from, to)?;
        carver.open_cell(to)?;

        let maze = &carver.maze;
        frontier.extend(
            maze.neighbors4(to)
                .into_iter()
                .filter(|next| maze.tile(next.to_coord()) == Some(Tile::Wall))
                .map(|next| Candidate { from: to, to: next }),
        );
    }

    log::trace!("prim discarded {discarded} stale frontier entries");

    Ok(())
}
