//! Puzzle solving command
//!
//! Culls the dictionary for one puzzle and lists every two-word chain.

use crate::core::SideSet;
use crate::index::WordDb;
use crate::solver::Solver;
use std::time::{Duration, Instant};

/// Configuration for solving a puzzle
pub struct SolveConfig {
    /// Shortest chains first
    pub sort: bool,
    /// Keep at most this many chains
    pub limit: Option<usize>,
}

impl SolveConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sort: true,
            limit: None,
        }
    }
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of solving a puzzle
pub struct SolveResult {
    pub sides: SideSet,
    pub dictionary_words: usize,
    pub playable_words: usize,
    /// Chains found, before any limit
    pub total_solutions: usize,
    pub chains: Vec<(String, String)>,
    /// Cull and search time
    pub duration: Duration,
}

/// Solve a puzzle against a loaded dictionary
///
/// Takes the dictionary by value: culling replaces it with the playable
/// subset.
#[must_use]
pub fn solve_puzzle(sides: &SideSet, db: WordDb, config: &SolveConfig) -> SolveResult {
    let start = Instant::now();
    let dictionary_words = db.len();

    let culled = db.cull(sides);
    let mut solutions = Solver::new(&culled, sides).solve();
    if config.sort {
        solutions.sort_by_length(&culled);
    }
    let duration = start.elapsed();

    let total_solutions = solutions.len();
    let chains = solutions
        .pairs(&culled)
        .take(config.limit.unwrap_or(total_solutions))
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect();

    SolveResult {
        sides: *sides,
        dictionary_words,
        playable_words: culled.len(),
        total_solutions,
        chains,
        duration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn puzzle() -> SideSet {
        SideSet::parse(&["vrq", "wue", "isl", "dmo"]).unwrap()
    }

    fn dictionary() -> WordDb {
        let text = "emoji\nliver\nquivers\nquiver\nquiz\nrowsmld\nswolmed\nsword\nwield\nwise\nzebra\n";
        WordDb::from_text(text.as_bytes().to_vec()).unwrap()
    }

    fn chain(a: &str, b: &str) -> (String, String) {
        (a.to_string(), b.to_string())
    }

    #[test]
    fn solve_sorted() {
        let result = solve_puzzle(&puzzle(), dictionary(), &SolveConfig::new());

        assert_eq!(result.dictionary_words, 11);
        // quivers quiver rowsmld swolmed sword wield
        assert_eq!(result.playable_words, 6);
        assert_eq!(result.total_solutions, 2);
        assert_eq!(
            result.chains,
            [chain("quiver", "rowsmld"), chain("quivers", "swolmed")]
        );
    }

    #[test]
    fn solve_unsorted_keeps_search_order() {
        let config = SolveConfig {
            sort: false,
            limit: None,
        };
        let result = solve_puzzle(&puzzle(), dictionary(), &config);
        assert_eq!(
            result.chains,
            [chain("quivers", "swolmed"), chain("quiver", "rowsmld")]
        );
    }

    #[test]
    fn solve_with_limit() {
        let config = SolveConfig {
            sort: true,
            limit: Some(1),
        };
        let result = solve_puzzle(&puzzle(), dictionary(), &config);
        assert_eq!(result.total_solutions, 2);
        assert_eq!(result.chains, [chain("quiver", "rowsmld")]);
    }

    #[test]
    fn solve_without_solutions() {
        let db = WordDb::from_text(b"quivers\nwield\n".to_vec()).unwrap();
        let result = solve_puzzle(&puzzle(), db, &SolveConfig::default());
        assert_eq!(result.total_solutions, 0);
        assert!(result.chains.is_empty());
        assert_eq!(result.playable_words, 2);
    }
}
