//! Letter Boxed solver - CLI
//!
//! Lists every two-word chain for a puzzle, using a cached word index.

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use letterboxed::{
    commands::{
        BenchConfig, SolveConfig, inspect_database, open_database, prepare_cache, run_benchmark,
        solve_puzzle,
    },
    core::{SIDE_COUNT, SideSet},
    output::{
        print_benchmark_result, print_inspect_result, print_load_summary, print_prep_result,
        print_solve_result,
    },
    wordlists::{DEFAULT_WORD_LIST, DataPaths, loader::default_cache_path},
};
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "letterboxed",
    about = "Letter Boxed solver: every two-word chain covering the puzzle",
    version,
    author,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Four sides of three letters, e.g. `vrq wue isl dmo`
    sides: Vec<String>,

    /// Word list, one word per line, grouped by first letter
    #[arg(short = 'w', long, global = true, default_value = DEFAULT_WORD_LIST)]
    words: PathBuf,

    /// Cache file (default: word list with a .pre extension)
    #[arg(long, global = true)]
    cache: Option<PathBuf>,

    /// Always index the word list, never read or write the cache
    #[arg(long, global = true)]
    no_cache: bool,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a puzzle (default when sides are given)
    Solve {
        /// Four sides of three letters
        #[arg(num_args = SIDE_COUNT, required = true)]
        sides: Vec<String>,

        /// Show at most this many chains
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Keep search order instead of shortest first
        #[arg(long)]
        unsorted: bool,
    },

    /// Index the word list and write its cache
    Prep,

    /// Solve random puzzles and report timings
    Bench {
        /// Number of puzzles
        #[arg(short = 'n', long, default_value = "100")]
        count: usize,

        /// Seed for puzzle generation
        #[arg(long, default_value = "0")]
        seed: u64,
    },

    /// Per-letter statistics of the dictionary, optionally culled for a puzzle
    Inspect {
        /// Four sides of three letters
        #[arg(num_args = SIDE_COUNT)]
        sides: Vec<String>,
    },
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

/// Validate puzzle sides before any loading happens
fn parse_sides(sides: &[String]) -> Result<SideSet> {
    let joined = sides.join(" ");
    let Ok(sides) = <&[String; SIDE_COUNT]>::try_from(sides) else {
        bail!("{joined} are not {SIDE_COUNT} sides of 3 unique letters");
    };
    SideSet::parse(sides)
        .with_context(|| format!("{joined} are not {SIDE_COUNT} sides of 3 unique letters"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let paths = DataPaths::new(&cli.words, cli.cache.as_deref(), !cli.no_cache);

    match cli.command {
        Some(Commands::Solve {
            sides,
            limit,
            unsorted,
        }) => {
            let config = SolveConfig {
                sort: !unsorted,
                limit,
            };
            run_solve_command(&sides, &paths, &config)
        }
        Some(Commands::Prep) => run_prep_command(&paths),
        Some(Commands::Bench { count, seed }) => run_bench_command(&paths, count, seed),
        Some(Commands::Inspect { sides }) => run_inspect_command(&sides, &paths),
        None if cli.sides.is_empty() => {
            bail!("no puzzle given\n  e.g. letterboxed vrq wue isl dmo")
        }
        None => run_solve_command(&cli.sides, &paths, &SolveConfig::new()),
    }
}

fn run_solve_command(sides: &[String], paths: &DataPaths, config: &SolveConfig) -> Result<()> {
    let sides = parse_sides(sides)?;

    let loaded = open_database(paths).context("failed to load the dictionary")?;
    print_load_summary(&loaded, &paths.words);

    let preload = loaded.elapsed;
    let result = solve_puzzle(&sides, loaded.db, config);
    print_solve_result(&result, preload);
    Ok(())
}

fn run_prep_command(paths: &DataPaths) -> Result<()> {
    let cache = paths
        .cache
        .clone()
        .unwrap_or_else(|| default_cache_path(&paths.words));

    println!(
        "pre-processing {} to {}.",
        paths.words.display(),
        cache.display()
    );
    let result = prepare_cache(&paths.words, &cache)?;
    print_prep_result(&result);
    Ok(())
}

fn run_bench_command(paths: &DataPaths, count: usize, seed: u64) -> Result<()> {
    let loaded = open_database(paths).context("failed to load the dictionary")?;
    print_load_summary(&loaded, &paths.words);

    println!("Running benchmark on {count} random puzzles (seed {seed})...");
    let result = run_benchmark(&loaded.db, &BenchConfig::new(count, seed))?;
    print_benchmark_result(&result);
    Ok(())
}

fn run_inspect_command(sides: &[String], paths: &DataPaths) -> Result<()> {
    let sides = if sides.is_empty() {
        None
    } else {
        Some(parse_sides(sides)?)
    };

    let loaded = open_database(paths).context("failed to load the dictionary")?;
    print_load_summary(&loaded, &paths.words);

    let result = inspect_database(loaded.db, sides.as_ref());
    print_inspect_result(&result);
    Ok(())
}
