//! Command implementations

pub mod bench;
pub mod inspect;
pub mod prep;
pub mod solve;

pub use bench::{BenchConfig, BenchmarkResult, PuzzleRun, random_side_set, run_benchmark};
pub use inspect::{InspectResult, LetterRow, inspect_database};
pub use prep::{PrepResult, prepare_cache};
pub use solve::{SolveConfig, SolveResult, solve_puzzle};

use crate::wordlists::{DataPaths, LoadError, Loaded, load_database};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Load the dictionary behind a spinner
///
/// # Errors
/// Returns `LoadError` if the word list is needed and can't be indexed.
pub fn open_database(paths: &DataPaths) -> Result<Loaded, LoadError> {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Loading {}", paths.words.display()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let loaded = load_database(paths);
    spinner.finish_and_clear();
    loaded
}
