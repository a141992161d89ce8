//! Puzzle-specific culling
//!
//! Narrows a full dictionary down to the words playable in one puzzle.

use super::database::WordDb;
use crate::core::SideSet;
use crate::core::letters::{ALPHABET_LEN, index_to_letter};
use log::debug;

impl WordDb {
    /// Keep only the words playable with these sides
    ///
    /// A word survives if it uses only puzzle letters and never places two
    /// letters from the same side next to each other. Buckets for letters
    /// outside the puzzle are dropped whole. Surviving words keep their
    /// relative order.
    ///
    /// Consumes the database and returns a freshly packed one, so indices
    /// taken before culling can't be used against the new layout.
    ///
    /// # Examples
    /// ```
    /// use letterboxed::core::SideSet;
    /// use letterboxed::index::WordDb;
    ///
    /// let sides = SideSet::parse(&["vrq", "wue", "isl", "dmo"]).unwrap();
    /// let db = WordDb::from_text(b"liver\nquiz\nwield\n".to_vec()).unwrap();
    ///
    /// let culled = db.cull(&sides);
    /// assert_eq!(culled.len(), 1); // only "wield"
    /// ```
    #[must_use]
    pub fn cull(mut self, sides: &SideSet) -> Self {
        let puzzle = sides.letters();
        let before = self.len();

        for letter in 0..ALPHABET_LEN {
            let range = self.bucket_range(letter);

            if puzzle & (1 << letter) == 0 {
                for word in &mut self.words[range] {
                    word.mark_dead();
                }
                self.live_stats.clear_letter(letter);
                continue;
            }

            for i in range {
                let word = self.words[i];
                if word.is_dead() {
                    continue;
                }
                if !sides.allows(self.arena.text(&word), word.letters()) {
                    self.cull_word(i, letter);
                }
            }
        }

        debug!(
            "culled {before} words to {} for {sides} ({})",
            self.len(),
            (0..ALPHABET_LEN)
                .filter(|&l| self.live_stats.word_counts[l] > 0)
                .map(index_to_letter)
                .collect::<String>()
        );

        self.packed()
    }

    fn cull_word(&mut self, i: usize, letter: usize) {
        let word = self.words[i];
        self.live_stats.remove(letter, &word);
        self.words[i].mark_dead();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn puzzle() -> SideSet {
        SideSet::parse(&["vrq", "wue", "isl", "dmo"]).unwrap()
    }

    fn build(words: &[&str]) -> WordDb {
        let mut sorted = words.to_vec();
        sorted.sort_by_key(|w| w.as_bytes()[0]);
        WordDb::from_text(sorted.join("\n").into_bytes()).unwrap()
    }

    fn texts(db: &WordDb) -> Vec<&str> {
        db.iter().map(|(_, w)| db.text(w)).collect()
    }

    #[test]
    fn rejects_letters_outside_puzzle() {
        let db = build(&["quiz", "quivers", "wield"]).cull(&puzzle());
        assert_eq!(texts(&db), ["quivers", "wield"]);
    }

    #[test]
    fn rejects_same_side_pairs() {
        // l-i share a side, as do i-s and m-o
        let db = build(&["liver", "wise", "mode", "wield", "swolmed"]).cull(&puzzle());
        assert_eq!(texts(&db), ["swolmed", "wield"]);
    }

    #[test]
    fn drops_buckets_outside_puzzle() {
        let db = build(&["ant", "wield", "zebra"]).cull(&puzzle());
        assert_eq!(texts(&db), ["wield"]);
        assert_eq!(db.first_word(0), None);
        assert_eq!(db.first_word(25), None);
        assert_eq!(db.live_stats().word_counts[0], 0);
        db.check_layout().unwrap();
    }

    #[test]
    fn result_is_packed() {
        let db = build(&["quiz", "quivers", "wield", "wise"]).cull(&puzzle());
        assert!(db.is_packed());
        assert_eq!(db.arena().as_bytes(), b"quivers\nwield\n");
        assert_eq!(db.mem_stats(), db.live_stats());
        db.check_layout().unwrap();
    }

    #[test]
    fn keeps_relative_order() {
        let db = build(&["sword", "sued", "sure", "slid", "swore"]).cull(&puzzle());
        assert_eq!(texts(&db), ["sword", "sure", "swore"]);
    }

    #[test]
    fn everything_culled() {
        let db = build(&["ant", "zebra"]).cull(&puzzle());
        assert!(db.is_empty());
        db.check_layout().unwrap();
    }

    #[test]
    fn cull_is_idempotent() {
        let once = build(&["quiz", "quivers", "liver", "wield", "swolmed"]).cull(&puzzle());
        let twice = once.clone().cull(&puzzle());
        assert_eq!(once, twice);
    }

    fn word_strategy() -> impl Strategy<Value = String> {
        proptest::collection::vec(proptest::sample::select(b"abdeilmoqrsuvwz".to_vec()), 1..9)
            .prop_map(|bytes| String::from_utf8(bytes).unwrap())
    }

    proptest! {
        #[test]
        fn cull_is_a_stable_filter(words in proptest::collection::vec(word_strategy(), 0..60)) {
            let sides = puzzle();
            let db = build(&words.iter().map(String::as_str).collect::<Vec<_>>());
            let live: Vec<(String, u32)> = db
                .iter()
                .map(|(_, w)| (db.text(w).to_string(), w.letters()))
                .collect();

            let culled = db.cull(&sides);
            let survivors: Vec<(String, u32)> = culled
                .iter()
                .map(|(_, w)| (culled.text(w).to_string(), w.letters()))
                .collect();

            let expected: Vec<(String, u32)> = live
                .into_iter()
                .filter(|(text, letters)| sides.allows(text.as_bytes(), *letters))
                .collect();

            prop_assert_eq!(&survivors, &expected);
            for (text, letters) in &survivors {
                prop_assert_eq!(letters & !sides.letters(), 0);
                prop_assert!(!sides.has_same_side_pair(text.as_bytes()));
            }
            prop_assert!(culled.check_layout().is_ok());
            prop_assert_eq!(culled.clone().cull(&sides), culled);
        }
    }
}
