//! Breadth-first search.

use std::collections::VecDeque;

use super::{reconstruct, CellMap, Outcome, Recorder, Trace};
use crate::maze::Maze;

/// Finds a shortest path from the maze's start to its end by expanding cells in FIFO order.
///
/// Cells are marked as seen when they are enqueued, so each one enters the queue at most once.
/// The trace lists cells in dequeue order and ends with the end cell when a path exists.
#[must_use]
pub fn breadth_first(maze: &Maze, trace: Trace) -> Outcome {
    let (start, end) = (maze.start(), maze.end());
    let mut recorder = Recorder::new(trace);
    let mut seen = CellMap::new(maze, false);
    let mut parents = CellMap::new(maze, None);
    let mut queue = VecDeque::from([start]);
    let mut found = false;

    seen.set(start, true);
    recorder.snapshot(|| queue.iter().copied());

    while let Some(current) = queue.pop_front() {
        recorder.visit(current);
        if current == end {
            found = true;
            break;
        }

        for next in maze.open_neighbors(current) {
            if seen.is_unmarked(next) {
                seen.set(next, true);
                parents.set(next, Some(current));
                queue.push_back(next);
            }
        }

        recorder.snapshot(|| queue.iter().copied());
    }

    let path = if found {
        reconstruct(&parents, start, end)
    } else {
        None
    };

    log::debug!(
        "bfs from {start} to {end}: found {}, {} cells recorded",
        path.is_some(),
        recorder.visit_count()
    );

    recorder.finish(path)
}
