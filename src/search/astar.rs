//! A* search with the Manhattan distance heuristic.

use std::{cmp::Reverse, collections::BinaryHeap};

use super::{reconstruct, CellMap, Outcome, Recorder, Trace};
use crate::{maze::Maze, types::Coord};

/// Priority queue entry.
///
/// The derived ordering compares fields in declaration order, so ties on `f_score` prefer the
/// smaller `g_score` and then the entry pushed first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    /// Cost so far plus the heuristic estimate to the end.
    f_score: usize,
    /// Number of moves from the start.
    g_score: usize,
    /// Insertion counter.
    sequence: u64,
    /// Grid position of the entry.
    coord: Coord,
}

/// Finds a shortest path from the maze's start to its end guided by the Manhattan distance.
///
/// Every move costs one and the heuristic never overestimates, so the path length matches the one
/// found by [`super::breadth_first`]. Outdated heap entries are skipped when popped instead of
/// being removed eagerly. The trace lists cells in the order they were closed.
#[must_use]
pub fn a_star(maze: &Maze, trace: Trace) -> Outcome {
    let (start, end) = (maze.start(), maze.end());
    let mut recorder = Recorder::new(trace);
    let mut closed = CellMap::new(maze, false);
    let mut parents = CellMap::new(maze, None);
    let mut g_scores = CellMap::new(maze, usize::MAX);
    let mut open = BinaryHeap::from([Reverse(Entry {
        f_score: start.manhattan(end),
        g_score: 0,
        sequence: 0,
        coord: start,
    })]);
    let mut sequence = 0_u64;
    let mut found = false;

    g_scores.set(start, 0);
    recorder.snapshot(|| [start]);

    while let Some(Reverse(entry)) = open.pop() {
        let current = entry.coord;
        if !closed.is_unmarked(current) {
            continue;
        }

        closed.set(current, true);
        recorder.visit(current);
        if current == end {
            found = true;
            break;
        }

        let tentative = g_scores
            .get(current)
            .copied()
            .unwrap_or(entry.g_score)
            .saturating_add(1);

        for next in maze.open_neighbors(current) {
            if !closed.is_unmarked(next) {
                continue;
            }

            if tentative < g_scores.get(next).copied().unwrap_or(usize::MAX) {
                g_scores.set(next, tentative);
                parents.set(next, Some(current));
                sequence += 1;
                open.push(Reverse(Entry {
                    f_score: tentative + next.manhattan(end),
                    g_score: tentative,
                    sequence,
                    coord: next,
                }));
            }
        }

        recorder.snapshot(|| frontier(&open, &closed));
    }

    let path = if found {
        reconstruct(&parents, start, end)
    } else {
        None
    };

    log::debug!(
        "a* from {start} to {end}: found {}, {} cells recorded",
        path.is_some(),
        recorder.visit_count()
    );

    recorder.finish(path)
}

/// Open positions in priority order, leaving out entries whose cell is already closed.
fn frontier(open: &BinaryHeap<Reverse<Entry>>, closed: &CellMap<bool>) -> Vec<Coord> {
    let mut entries: Vec<Entry> = open
        .iter()
        .map(|Reverse(entry)| *entry)
        .filter(|entry| closed.is_unmarked(entry.coord))
        .collect();
    entries.sort_unstable();

    entries.into_iter().map(|entry| entry.coord).collect()
}
