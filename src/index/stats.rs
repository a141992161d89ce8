//! Per-letter word statistics

use crate::core::letters::ALPHABET_LEN;
use crate::core::Word;

/// Word counts and text bytes per starting letter
///
/// Text bytes include one terminator per word, matching what a packed
/// arena stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LetterStats {
    pub word_counts: [u32; ALPHABET_LEN],
    pub size_bytes: [u32; ALPHABET_LEN],
}

impl LetterStats {
    /// Words across all letters
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.word_counts.iter().map(|&c| c as usize).sum()
    }

    /// Text bytes across all letters
    #[must_use]
    pub fn total_size_bytes(&self) -> usize {
        self.size_bytes.iter().map(|&s| s as usize).sum()
    }

    /// No words under any letter
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.word_counts.iter().all(|&c| c == 0)
    }

    /// Count a word under `letter`
    pub fn add(&mut self, letter: usize, word: &Word) {
        self.word_counts[letter] += 1;
        self.size_bytes[letter] += word.len() as u32 + 1;
    }

    /// Stop counting a word under `letter`
    ///
    /// # Panics
    /// Panics if the word was never counted
    pub fn remove(&mut self, letter: usize, word: &Word) {
        let bytes = word.len() as u32 + 1;
        assert!(
            self.word_counts[letter] > 0 && self.size_bytes[letter] >= bytes,
            "removing an uncounted word under letter {letter}"
        );
        self.word_counts[letter] -= 1;
        self.size_bytes[letter] -= bytes;
    }

    /// Forget every word under `letter`
    pub fn clear_letter(&mut self, letter: usize) {
        self.word_counts[letter] = 0;
        self.size_bytes[letter] = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        let stats = LetterStats::default();
        assert!(stats.is_empty());
        assert_eq!(stats.total_count(), 0);
        assert_eq!(stats.total_size_bytes(), 0);
    }

    #[test]
    fn add_and_remove() {
        let (word, _) = Word::read_str(b"zebra", 0).unwrap();
        let mut stats = LetterStats::default();

        stats.add(25, &word);
        stats.add(25, &word);
        assert_eq!(stats.word_counts[25], 2);
        assert_eq!(stats.size_bytes[25], 12);
        assert_eq!(stats.total_count(), 2);
        assert_eq!(stats.total_size_bytes(), 12);

        stats.remove(25, &word);
        assert_eq!(stats.total_count(), 1);
        assert_eq!(stats.total_size_bytes(), 6);
        assert!(!stats.is_empty());

        stats.clear_letter(25);
        assert!(stats.is_empty());
    }

    #[test]
    #[should_panic(expected = "uncounted word")]
    fn remove_uncounted_panics() {
        let (word, _) = Word::read_str(b"zebra", 0).unwrap();
        LetterStats::default().remove(25, &word);
    }
}
