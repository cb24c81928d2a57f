//! Timing helpers comparing the generators and the searches.
//!
//! Reports are plain data so that callers can print them or post-process them as they see fit.

use std::{
    fmt,
    time::{Duration, Instant},
};

use crate::{
    config::rng_from_seed,
    error::Result,
    generator,
    maze::Maze,
    search::{self, Trace},
    types::{GenerationAlgorithm, SearchAlgorithm},
};

/// Measurements of one search on one maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchReport {
    /// Search that was run.
    pub algorithm: SearchAlgorithm,
    /// Path length in moves, or `None` when the end was unreachable.
    pub path_len: Option<usize>,
    /// Number of cells the search finalized.
    pub cells_explored: usize,
    /// Wall-clock time of the search, tracing included.
    pub elapsed: Duration,
}

impl fmt::Display for SearchReport {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:<4}", self.algorithm.name())?;
        match self.path_len {
            Some(len) => write!(formatter, " path length {len:>5}")?,
            None => write!(formatter, " path length  none")?,
        }
        write!(
            formatter,
            ", {:>6} cells explored, {:>10.3?}",
            self.cells_explored, self.elapsed
        )
    }
}

/// Mean generation time of one algorithm at one size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationReport {
    /// Generator that was timed.
    pub algorithm: GenerationAlgorithm,
    /// Logical side length of the generated mazes.
    pub size: usize,
    /// Number of mazes generated.
    pub trials: u32,
    /// Mean time per maze.
    pub mean: Duration,
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{:<14} {:>4}x{:<4} mean {:>10.3?} over {} runs",
            self.algorithm.name(),
            self.size,
            self.size,
            self.mean,
            self.trials
        )
    }
}

/// Runs every search on `maze` with tracing enabled and reports their measurements.
///
/// Reports follow the order of [`SearchAlgorithm::ALL`].
#[must_use]
pub fn compare_searches(maze: &Maze) -> Vec<SearchReport> {
    SearchAlgorithm::ALL
        .into_iter()
        .map(|algorithm| {
            let started = Instant::now();
            let outcome = search::run(maze, algorithm, Trace::Visits);
            let elapsed = started.elapsed();

            SearchReport {
                algorithm,
                path_len: outcome.path_len(),
                cells_explored: outcome.cells_explored().unwrap_or_default(),
                elapsed,
            }
        })
        .collect()
}

/// Runs every search on `runs` freshly generated Prim mazes of one size.
///
/// All mazes are drawn from a single random source, so a seed makes the whole sequence
/// reproducible. At least one maze is always generated. Reports are grouped by run, each group in
/// the order of [`SearchAlgorithm::ALL`], giving `runs * 3` reports in total.
///
/// # Errors
///
/// Returns [`crate::error::MazeError::InvalidSize`] for a zero size and
/// [`crate::error::MazeError::InvalidComplexity`] for a negative or non-finite complexity.
pub fn benchmark_searches(
    size: usize,
    complexity: f64,
    runs: u32,
    seed: Option<u64>,
) -> Result<Vec<SearchReport>> {
    let runs = runs.max(1);
    let mut rng = rng_from_seed(seed);
    let mut reports = Vec::new();

    for _ in 0..runs {
        let maze = generator::generate(size, complexity, GenerationAlgorithm::Prim, &mut rng)?;
        reports.extend(compare_searches(&maze));
    }

    log::debug!("ran {} searches on {runs} prim mazes of {size}x{size}", reports.len());

    Ok(reports)
}

/// Mean measurements of one search algorithm over a batch of reports.
///
/// Returns `None` when no report in the batch belongs to `algorithm`. Unreachable ends do not
/// count towards the mean path length.
#[must_use]
pub fn mean_report(reports: &[SearchReport], algorithm: SearchAlgorithm) -> Option<SearchReport> {
    let matching: Vec<&SearchReport> = reports
        .iter()
        .filter(|report| report.algorithm == algorithm)
        .collect();
    let count = matching.len();
    if count == 0 {
        return None;
    }

    let lengths: Vec<usize> = matching.iter().filter_map(|report| report.path_len).collect();
    let path_len = (!lengths.is_empty()).then(|| lengths.iter().sum::<usize>() / lengths.len());
    let cells_explored = matching
        .iter()
        .map(|report| report.cells_explored)
        .sum::<usize>()
        / count;
    let elapsed = matching.iter().map(|report| report.elapsed).sum::<Duration>()
        / u32::try_from(count).unwrap_or(u32::MAX);

    Some(SearchReport {
        algorithm,
        path_len,
        cells_explored,
        elapsed,
    })
}

/// Generates `trials` perfect mazes and reports the mean generation time.
///
/// At least one maze is always generated. A seed makes the sequence of mazes reproducible, though
/// the timings naturally are not.
///
/// # Errors
///
/// Returns [`crate::error::MazeError::InvalidSize`] for a zero size.
pub fn time_generation(
    size: usize,
    algorithm: GenerationAlgorithm,
    trials: u32,
    seed: Option<u64>,
) -> Result<GenerationReport> {
    let trials = trials.max(1);
    let mut rng = rng_from_seed(seed);
    let mut total = Duration::ZERO;

    for _ in 0..trials {
        let started = Instant::now();
        let _ = generator::generate(size, 0.0, algorithm, &mut rng)?;
        total += started.elapsed();
    }

    let mean = total / trials;
    log::debug!("{algorithm} at {size}x{size}: mean {mean:?} over {trials} runs");

    Ok(GenerationReport {
        algorithm,
        size,
        trials,
        mean,
    })
}

/// Times every generator at every size, sizes in the outer loop.
///
/// # Errors
///
/// Returns [`crate::error::MazeError::InvalidSize`] if any size is zero.
pub fn compare_generators(
    sizes: &[usize],
    trials: u32,
    seed: Option<u64>,
) -> Result<Vec<GenerationReport>> {
    let mut reports = Vec::with_capacity(sizes.len() * GenerationAlgorithm::ALL.len());

    for &size in sizes {
        for algorithm in GenerationAlgorithm::ALL {
            reports.push(time_generation(size, algorithm, trials, seed)?);
        }
    }

    Ok(reports)
}
