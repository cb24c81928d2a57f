//! Depth-first search.

use super::{reconstruct, CellMap, Outcome, Recorder, Trace};
use crate::maze::Maze;

/// Finds some path from the maze's start to its end by expanding cells in LIFO order.
///
/// Neighbours are pushed in up, right, down, left order, so the left neighbour is explored first.
/// The path is valid but generally not the shortest one.
#[must_use]
pub fn depth_first(maze: &Maze, trace: Trace) -> Outcome {
    let (start, end) = (maze.start(), maze.end());
    let mut recorder = Recorder::new(trace);
    let mut seen = CellMap::new(maze, false);
    let mut parents = CellMap::new(maze, None);
    let mut stack = vec![start];
    let mut found = false;

    seen.set(start, true);
    recorder.snapshot(|| stack.iter().copied());

    while let Some(current) = stack.pop() {
        recorder.visit(current);
        if current == end {
            found = true;
            break;
        }

        for next in maze.open_neighbors(current) {
            if seen.is_unmarked(next) {
                seen.set(next, true);
                parents.set(next, Some(current));
                stack.push(next);
            }
        }

        recorder.snapshot(|| stack.iter().copied());
    }

    let path = if found {
        reconstruct(&parents, start, end)
    } else {
        None
    };

    log::debug!(
        "dfs from {start} to {end}: found {}, {} cells recorded",
        path.is_some(),
        recorder.visit_count()
    );

    recorder.finish(path)
}
