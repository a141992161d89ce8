//! Two-word chain search

use super::solution::{Solution, SolutionSet};
use crate::core::letters::ALPHABET_LEN;
use crate::core::{LetterMask, SideSet};
use crate::index::WordDb;
use log::debug;

/// Finds every two-word chain covering the puzzle
///
/// Expects a database already culled for the same sides; the solver itself
/// only checks letter coverage.
pub struct Solver<'a> {
    db: &'a WordDb,
    target: LetterMask,
}

impl<'a> Solver<'a> {
    /// Create a solver over a culled database
    #[must_use]
    pub const fn new(db: &'a WordDb, sides: &SideSet) -> Self {
        Self {
            db,
            target: sides.letters(),
        }
    }

    /// Enumerate all chains
    ///
    /// For each first word, only the bucket of its last letter is searched
    /// for a second word. Chains come out ordered by the first word's
    /// position in the database, then the second's; each appears once.
    #[must_use]
    pub fn solve(&self) -> SolutionSet {
        let mut solutions = SolutionSet::with_capacity(self.db.len() / 2);

        for letter in (0..ALPHABET_LEN).filter(|&l| self.target & (1 << l) != 0) {
            for (first, a) in self.db.bucket(letter) {
                let next = self.db.last_letter(a);
                for (second, b) in self.db.bucket(next) {
                    if a.letters() | b.letters() == self.target {
                        solutions.push(Solution { first, second });
                    }
                }
            }
        }

        debug!(
            "found {} chains among {} words",
            solutions.len(),
            self.db.len()
        );
        solutions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rustc_hash::FxHashSet;

    fn puzzle() -> SideSet {
        SideSet::parse(&["vrq", "wue", "isl", "dmo"]).unwrap()
    }

    fn culled(words: &[&str]) -> WordDb {
        let mut sorted = words.to_vec();
        sorted.sort_by_key(|w| w.as_bytes()[0]);
        WordDb::from_text(sorted.join("\n").into_bytes())
            .unwrap()
            .cull(&puzzle())
    }

    fn solve(db: &WordDb) -> Vec<(&str, &str)> {
        let solutions = Solver::new(db, &puzzle()).solve();
        solutions
            .iter()
            .map(|s| s.words(db))
            .collect()
    }

    #[test]
    fn finds_the_covering_chain() {
        let db = culled(&["quiz", "liver", "emoji", "wise", "quivers", "swolmed", "wield", "sword"]);
        assert_eq!(solve(&db), [("quivers", "swolmed")]);
    }

    #[test]
    fn emission_order_then_sorted() {
        let db = culled(&["quivers", "quiver", "rowsmld", "swolmed"]);
        let mut solutions = Solver::new(&db, &puzzle()).solve();

        let found: Vec<_> = solutions.pairs(&db).collect();
        assert_eq!(found, [("quivers", "swolmed"), ("quiver", "rowsmld")]);

        solutions.sort_by_length(&db);
        let sorted: Vec<_> = solutions.pairs(&db).collect();
        assert_eq!(sorted, [("quiver", "rowsmld"), ("quivers", "swolmed")]);
    }

    #[test]
    fn no_chain_without_coverage() {
        let db = culled(&["quivers", "sword", "wield"]);
        assert!(Solver::new(&db, &puzzle()).solve().is_empty());
    }

    #[test]
    fn empty_database() {
        let db = WordDb::default();
        assert!(Solver::new(&db, &puzzle()).solve().is_empty());
    }

    fn word_strategy() -> impl Strategy<Value = String> {
        proptest::collection::vec(proptest::sample::select(b"deilmoqrsuvwz".to_vec()), 3..10)
            .prop_map(|bytes| String::from_utf8(bytes).unwrap())
    }

    proptest! {
        #[test]
        fn finds_every_chain_once(extra in proptest::collection::vec(word_strategy(), 0..80)) {
            let mut words: Vec<&str> = extra.iter().map(String::as_str).collect();
            words.extend(["quivers", "swolmed", "quiver", "rowsmld"]);
            let db = culled(&words);
            let target = puzzle().letters();

            let solutions = Solver::new(&db, &puzzle()).solve();
            let found: Vec<Solution> = solutions.iter().copied().collect();

            let mut expected = Vec::new();
            for (first, a) in db.iter() {
                for (second, b) in db.iter() {
                    if db.last_letter(a) == db.first_letter(b) && a.letters() | b.letters() == target {
                        expected.push(Solution { first, second });
                    }
                }
            }

            prop_assert_eq!(&found, &expected);
            let unique: FxHashSet<Solution> = found.iter().copied().collect();
            prop_assert_eq!(unique.len(), found.len());
            prop_assert!(found.len() >= 2);
        }
    }
}
