//! Two-word solutions

use crate::index::{WordDb, WordIdx};

/// A two-word chain covering every puzzle letter
///
/// The indices refer to the culled database the solver ran against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Solution {
    pub first: WordIdx,
    pub second: WordIdx,
}

impl Solution {
    /// Text of both words
    #[must_use]
    pub fn words<'a>(&self, db: &'a WordDb) -> (&'a str, &'a str) {
        (db.text(db.word(self.first)), db.text(db.word(self.second)))
    }

    /// Letters typed to play the chain
    #[must_use]
    pub fn combined_len(&self, db: &WordDb) -> usize {
        db.word(self.first).len() + db.word(self.second).len()
    }
}

/// Solutions in the order the solver found them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolutionSet {
    solutions: Vec<Solution>,
}

impl SolutionSet {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            solutions: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, solution: Solution) {
        self.solutions.push(solution);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Solution] {
        &self.solutions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Solution> {
        self.solutions.iter()
    }

    /// Sort shortest chains first
    ///
    /// The sort is stable: chains of equal length keep the order they were
    /// found in.
    pub fn sort_by_length(&mut self, db: &WordDb) {
        self.solutions.sort_by_key(|s| s.combined_len(db));
    }

    /// Word pairs, in the current order
    pub fn pairs<'a>(&'a self, db: &'a WordDb) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.solutions.iter().map(move |s| s.words(db))
    }
}

impl IntoIterator for SolutionSet {
    type Item = Solution;
    type IntoIter = std::vec::IntoIter<Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.solutions.into_iter()
    }
}

impl<'a> IntoIterator for &'a SolutionSet {
    type Item = &'a Solution;
    type IntoIter = std::slice::Iter<'a, Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.solutions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WordDb {
        WordDb::from_text(b"ant\nantonym\nbean\nzebra\n".to_vec()).unwrap()
    }

    fn idx(db: &WordDb, text: &str) -> WordIdx {
        db.iter().find(|(_, w)| db.text(w) == text).unwrap().0
    }

    fn solution(db: &WordDb, first: &str, second: &str) -> Solution {
        Solution {
            first: idx(db, first),
            second: idx(db, second),
        }
    }

    #[test]
    fn words_and_length() {
        let db = sample();
        let s = solution(&db, "antonym", "zebra");
        assert_eq!(s.words(&db), ("antonym", "zebra"));
        assert_eq!(s.combined_len(&db), 12);
    }

    #[test]
    fn sort_by_length_is_stable() {
        let db = sample();
        let mut set = SolutionSet::default();
        set.push(solution(&db, "antonym", "zebra"));
        set.push(solution(&db, "ant", "bean"));
        set.push(solution(&db, "bean", "ant"));
        set.push(solution(&db, "ant", "ant"));

        set.sort_by_length(&db);

        let pairs: Vec<_> = set.pairs(&db).collect();
        assert_eq!(
            pairs,
            [
                ("ant", "ant"),
                ("ant", "bean"),
                ("bean", "ant"),
                ("antonym", "zebra")
            ]
        );
    }

    #[test]
    fn empty_set() {
        let set = SolutionSet::with_capacity(4);
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.pairs(&sample()).count(), 0);
    }

    #[test]
    fn iterates_in_push_order() {
        let db = sample();
        let mut set = SolutionSet::default();
        let a = solution(&db, "bean", "ant");
        let b = solution(&db, "ant", "bean");
        set.push(a);
        set.push(b);

        assert_eq!(set.iter().copied().collect::<Vec<_>>(), [a, b]);
        assert_eq!(set.as_slice(), [a, b]);
        assert_eq!(set.into_iter().collect::<Vec<_>>(), [a, b]);
    }
}
