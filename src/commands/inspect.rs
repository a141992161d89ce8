//! Database inspection command
//!
//! Per-letter breakdown of a loaded dictionary, optionally culled for a
//! puzzle first.

use crate::core::{SideSet, Word};
use crate::core::letters::{ALPHABET_LEN, index_to_letter};
use crate::index::WordDb;

/// Words and bytes stored for one starting letter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterRow {
    pub letter: char,
    pub words: usize,
    pub bytes: usize,
}

/// Result of inspecting a database
pub struct InspectResult {
    pub sides: Option<SideSet>,
    pub rows: Vec<LetterRow>,
    pub total_words: usize,
    pub total_bytes: usize,
    pub longest: Option<String>,
    pub average_length: f64,
}

/// Summarize a database, culled for `sides` if given
#[must_use]
pub fn inspect_database(db: WordDb, sides: Option<&SideSet>) -> InspectResult {
    let db = match sides {
        Some(sides) => db.cull(sides),
        None => db,
    };
    let stats = db.live_stats();

    let rows = (0..ALPHABET_LEN)
        .map(|letter| LetterRow {
            letter: index_to_letter(letter),
            words: stats.word_counts[letter] as usize,
            bytes: stats.size_bytes[letter] as usize,
        })
        .collect();

    let longest = db
        .iter()
        .map(|(_, w)| w)
        .fold(None, |best: Option<&Word>, w| match best {
            Some(b) if b.len() >= w.len() => Some(b),
            _ => Some(w),
        })
        .map(|w| db.text(w).to_string());

    let total_words = stats.total_count();
    let total_bytes = stats.total_size_bytes();
    // Each stored word carries one terminator byte
    let average_length = if total_words == 0 {
        0.0
    } else {
        (total_bytes - total_words) as f64 / total_words as f64
    };

    InspectResult {
        sides: sides.copied(),
        rows,
        total_words,
        total_bytes,
        longest,
        average_length,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary() -> WordDb {
        WordDb::from_text(b"ant\nantonym\nbean\nquivers\nwield\nwise\n".to_vec()).unwrap()
    }

    #[test]
    fn rows_cover_alphabet() {
        let result = inspect_database(dictionary(), None);

        assert_eq!(result.rows.len(), 26);
        assert_eq!(
            result.rows[0],
            LetterRow {
                letter: 'a',
                words: 2,
                bytes: 12
            }
        );
        assert_eq!(result.rows[2].words, 0);
        assert_eq!(result.total_words, 6);
        assert_eq!(result.total_bytes, 12 + 5 + 8 + 6 + 5);
        assert!(result.sides.is_none());
    }

    #[test]
    fn longest_and_average() {
        let result = inspect_database(dictionary(), None);
        // "antonym" and "quivers" tie; the first one wins
        assert_eq!(result.longest.as_deref(), Some("antonym"));
        assert!((result.average_length - 30.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn culled_view() {
        let sides = SideSet::parse(&["vrq", "wue", "isl", "dmo"]).unwrap();
        let result = inspect_database(dictionary(), Some(&sides));

        assert_eq!(result.total_words, 2);
        assert_eq!(result.rows[0].words, 0);
        assert_eq!(result.longest.as_deref(), Some("quivers"));
        assert_eq!(result.sides, Some(sides));
    }

    #[test]
    fn empty_database() {
        let result = inspect_database(WordDb::default(), None);
        assert_eq!(result.total_words, 0);
        assert!(result.longest.is_none());
        assert!(result.average_length.abs() < f64::EPSILON);
    }
}
