//! Benchmark command
//!
//! Culls and solves a run of random puzzles against one dictionary.

use crate::core::{SIDE_COUNT, SIDE_LEN, Side, SideError, SideSet};
use crate::index::WordDb;
use crate::solver::Solver;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};

/// Configuration for a benchmark run
pub struct BenchConfig {
    pub puzzles: usize,
    pub seed: u64,
    pub show_progress: bool,
}

impl BenchConfig {
    #[must_use]
    pub const fn new(puzzles: usize, seed: u64) -> Self {
        Self {
            puzzles,
            seed,
            show_progress: true,
        }
    }
}

/// One timed puzzle
#[derive(Debug, Clone, Copy)]
pub struct PuzzleRun {
    pub sides: SideSet,
    pub playable_words: usize,
    pub solutions: usize,
    pub duration: Duration,
}

/// Result of a benchmark run
pub struct BenchmarkResult {
    pub puzzles: usize,
    pub total_solutions: usize,
    pub average_solutions: f64,
    pub average_playable: f64,
    /// Puzzles with no two-word chain
    pub unsolvable: usize,
    pub fastest: Option<PuzzleRun>,
    pub slowest: Option<PuzzleRun>,
    pub richest: Option<PuzzleRun>,
    /// Most common first words across all chains
    pub top_openers: Vec<(String, usize)>,
    pub duration: Duration,
    pub puzzles_per_second: f64,
}

/// Draw twelve distinct letters and deal them onto four sides
///
/// # Errors
/// Never fails in practice; the letters are distinct by construction.
pub fn random_side_set<R: Rng + ?Sized>(rng: &mut R) -> Result<SideSet, SideError> {
    let mut letters: Vec<u8> = (b'a'..=b'z').collect();
    letters.shuffle(rng);

    let side = |i: usize| {
        let chunk = &letters[i * SIDE_LEN..(i + 1) * SIDE_LEN];
        Side::parse(&String::from_utf8_lossy(chunk))
    };
    let sides: [Side; SIDE_COUNT] = [side(0)?, side(1)?, side(2)?, side(3)?];
    SideSet::new(sides)
}

fn run_puzzle(db: &WordDb, sides: SideSet, openers: &mut FxHashMap<String, usize>) -> PuzzleRun {
    let start = Instant::now();
    let culled = db.clone().cull(&sides);
    let solutions = Solver::new(&culled, &sides).solve();
    let duration = start.elapsed();

    for (first, _) in solutions.pairs(&culled) {
        *openers.entry(first.to_string()).or_insert(0) += 1;
    }

    PuzzleRun {
        sides,
        playable_words: culled.len(),
        solutions: solutions.len(),
        duration,
    }
}

/// Run the benchmark
///
/// Each puzzle culls its own deep copy of `db`. The same seed always
/// yields the same puzzles.
///
/// # Errors
/// Returns `SideError` if a generated puzzle is malformed.
pub fn run_benchmark(db: &WordDb, config: &BenchConfig) -> Result<BenchmarkResult, SideError> {
    let mut rng = StdRng::seed_from_u64(config.seed);

    let pb = if config.show_progress {
        ProgressBar::new(config.puzzles as u64)
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
    {
        pb.set_style(style.progress_chars("█▓▒░"));
    }

    let mut runs: Vec<PuzzleRun> = Vec::with_capacity(config.puzzles);
    let mut openers: FxHashMap<String, usize> = FxHashMap::default();
    let start = Instant::now();

    for i in 0..config.puzzles {
        let sides = random_side_set(&mut rng)?;
        runs.push(run_puzzle(db, sides, &mut openers));

        if i % 10 == 0 {
            let solved = runs.iter().filter(|r| r.solutions > 0).count();
            pb.set_message(format!("{solved} solvable"));
        }
        pb.inc(1);
    }

    pb.finish_with_message("Complete!");
    let duration = start.elapsed();

    let puzzles = runs.len();
    let total_solutions: usize = runs.iter().map(|r| r.solutions).sum();
    let total_playable: usize = runs.iter().map(|r| r.playable_words).sum();
    let average = |total: usize| {
        if puzzles == 0 {
            0.0
        } else {
            total as f64 / puzzles as f64
        }
    };

    let mut top_openers: Vec<(String, usize)> = openers.into_iter().collect();
    top_openers.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    top_openers.truncate(5);

    Ok(BenchmarkResult {
        puzzles,
        total_solutions,
        average_solutions: average(total_solutions),
        average_playable: average(total_playable),
        unsolvable: runs.iter().filter(|r| r.solutions == 0).count(),
        fastest: runs.iter().min_by_key(|r| r.duration).copied(),
        slowest: runs.iter().max_by_key(|r| r.duration).copied(),
        richest: runs.iter().max_by_key(|r| r.solutions).copied(),
        top_openers,
        duration,
        puzzles_per_second: puzzles as f64 / duration.as_secs_f64().max(f64::EPSILON),
    })
}
