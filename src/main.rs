//! This crate contains the source code for the `mazepath` command-line tool.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The remaining dependencies are used in the library crate."
)]

use std::time::Instant;

use clap::{ArgAction, Args, Parser, Subcommand};
use color_eyre::{
    eyre::{Result, WrapErr as _},
    install,
};
use log::LevelFilter;
use mazepath::{
    bench::{benchmark_searches, compare_generators, mean_report},
    config::{DEFAULT_COMPLEXITY, DEFAULT_SIZE},
    find_path, GenerationAlgorithm, MazeConfig, SearchAlgorithm,
};

/// Generate random mazes and compare path search algorithms on them.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Increase logging verbosity. Repeat for more detail; `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Action to perform.
    #[command(subcommand)]
    command: Command,
}

/// Actions offered by the tool.
#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a maze and print it.
    Generate(MazeArgs),
    /// Generate a maze and print the path found by one or every search algorithm.
    Solve {
        /// Maze to solve.
        #[command(flatten)]
        maze: MazeArgs,
        /// Search algorithm to run (bfs, dfs, astar). Every algorithm runs when omitted.
        #[arg(long)]
        search: Option<SearchAlgorithm>,
        /// Record and report the cells each search explored.
        #[arg(long)]
        trace: bool,
    },
    /// Time the generators and compare the searches on mazes of several sizes.
    Bench {
        /// Logical side lengths to benchmark.
        #[arg(long, num_args = 1.., value_delimiter = ',', default_values_t = [15, 25, 50])]
        sizes: Vec<usize>,
        /// Number of mazes generated per generator and size, and of Prim mazes searched per size.
        #[arg(long, default_value_t = 5)]
        runs: u32,
        /// Extra-path complexity of the mazes the searches run on.
        #[arg(short, long, default_value_t = DEFAULT_COMPLEXITY)]
        complexity: f64,
        /// Seed for reproducible mazes.
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Parameters of the maze to generate.
#[derive(Debug, Args)]
struct MazeArgs {
    /// Number of logical cells along each side.
    #[arg(short, long, default_value_t = DEFAULT_SIZE)]
    size: usize,
    /// Fraction of `size^2` used as the number of extra walls to remove.
    #[arg(short, long, default_value_t = DEFAULT_COMPLEXITY)]
    complexity: f64,
    /// Generation algorithm (dfs_backtrack, prim, kruskal).
    #[arg(short, long, default_value_t = GenerationAlgorithm::DfsBacktrack)]
    algorithm: GenerationAlgorithm,
    /// Seed for a reproducible maze.
    #[arg(long)]
    seed: Option<u64>,
}

impl MazeArgs {
    /// Maze configuration described by the arguments.
    const fn config(&self) -> MazeConfig {
        MazeConfig {
            size: self.size,
            complexity: self.complexity,
            algorithm: self.algorithm,
            seed: self.seed,
        }
    }
}

fn main() -> Result<()> {
    install()?;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Generate(args) => generate(&args),
        Command::Solve {
            maze,
            search,
            trace,
        } => solve(&maze, search, trace),
        Command::Bench {
            sizes,
            runs,
            complexity,
            seed,
        } => bench(&sizes, runs, complexity, seed),
    }
}

/// Sets up `env_logger` with a level derived from the number of `-v` flags.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Prints a freshly generated maze.
fn generate(args: &MazeArgs) -> Result<()> {
    let maze = args
        .config()
        .build()
        .wrap_err("failed to generate the maze")?;

    print!("{maze}");
    println!(
        "{size}x{size} {} maze, {} passages",
        args.algorithm,
        maze.passage_count(),
        size = maze.size()
    );

    Ok(())
}

/// Generates a maze and prints the path each requested search finds through it.
fn solve(args: &MazeArgs, search: Option<SearchAlgorithm>, trace: bool) -> Result<()> {
    let maze = args
        .config()
        .build()
        .wrap_err("failed to generate the maze")?;
    let algorithms = search.map_or_else(|| SearchAlgorithm::ALL.to_vec(), |algorithm| vec![algorithm]);

    for algorithm in algorithms {
        let started = Instant::now();
        let outcome = find_path(&maze, algorithm, trace);
        let elapsed = started.elapsed();

        let explored = outcome.cells_explored();
        let path = outcome
            .into_path(&maze)
            .wrap_err_with(|| format!("{algorithm} could not solve the maze"))?;

        println!("{algorithm}");
        print!("{}", maze.render_with_path(&path));
        match explored {
            Some(cells) => println!(
                "path length {}, {cells} cells explored, {elapsed:.3?}\n",
                path.len().saturating_sub(1)
            ),
            None => println!(
                "path length {}, {elapsed:.3?}\n",
                path.len().saturating_sub(1)
            ),
        }
    }

    Ok(())
}

/// Prints generation timings followed by search statistics for every size.
fn bench(sizes: &[usize], runs: u32, complexity: f64, seed: Option<u64>) -> Result<()> {
    println!("Generation, mean over {runs} runs");
    for report in compare_generators(sizes, runs, seed).wrap_err("failed to time the generators")? {
        println!("  {report}");
    }

    println!("\nSearch, mean over {runs} prim mazes per size");
    for &size in sizes {
        let reports = benchmark_searches(size, complexity, runs, seed)
            .wrap_err_with(|| format!("failed to benchmark the searches at {size}x{size}"))?;

        println!("  {size}x{size}, complexity {complexity}");
        for algorithm in SearchAlgorithm::ALL {
            if let Some(report) = mean_report(&reports, algorithm) {
                println!("    {report}");
            }
        }
    }

    Ok(())
}
