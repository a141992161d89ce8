//! Text arena
//!
//! All word text lives in one contiguous byte buffer. Words refer to it by
//! offset and length, so the arena can be replaced wholesale during
//! compaction without leaving dangling references behind.

use crate::core::Word;

/// Append-only byte buffer with a capacity fixed at construction
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextArena {
    bytes: Vec<u8>,
    capacity: usize,
}

impl TextArena {
    /// Create an empty arena that can hold `capacity` bytes
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Wrap existing text; the arena is full from the start
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let capacity = bytes.len();
        Self { bytes, capacity }
    }

    /// Bytes the arena was sized for
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes written so far
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The raw contents
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Copy a word and its terminator out of `src`
    ///
    /// Returns the descriptor rebased onto this arena.
    ///
    /// # Panics
    /// Panics if the copy would exceed the arena's capacity. Arenas are
    /// sized from the live statistics, so this means the statistics are
    /// wrong.
    pub fn append(&mut self, src: &Self, word: &Word) -> Word {
        let needed = word.len() + 1;
        assert!(
            self.size() + needed <= self.capacity,
            "arena capacity exceeded: {} + {needed} > {}",
            self.size(),
            self.capacity
        );

        let rebased = word.rebased(self.size());
        self.bytes.extend_from_slice(src.text(word));
        self.bytes.push(b'\n');
        rebased
    }

    /// Text of a word stored in this arena
    ///
    /// # Panics
    /// Panics if the word lies outside the arena
    #[inline]
    #[must_use]
    pub fn text(&self, word: &Word) -> &[u8] {
        &self.bytes[word.begin()..word.begin() + word.len()]
    }

    /// Text of a word as a string slice
    #[must_use]
    pub fn str(&self, word: &Word) -> &str {
        // Parsing only admits lowercase ASCII
        std::str::from_utf8(self.text(word)).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_is_full() {
        let arena = TextArena::from_bytes(b"abc\ndef\n".to_vec());
        assert_eq!(arena.capacity(), 8);
        assert_eq!(arena.size(), 8);
        assert!(!arena.is_empty());
    }

    #[test]
    fn text_by_descriptor() {
        let arena = TextArena::from_bytes(b"abc\ndefg\n".to_vec());
        let (word, _) = Word::read_str(arena.as_bytes(), 4).unwrap();
        assert_eq!(arena.text(&word), b"defg");
        assert_eq!(arena.str(&word), "defg");
    }

    #[test]
    fn append_rebases() {
        let src = TextArena::from_bytes(b"abc\ndefg\n".to_vec());
        let (word, _) = Word::read_str(src.as_bytes(), 4).unwrap();

        let mut dst = TextArena::with_capacity(5);
        assert!(dst.is_empty());

        let copied = dst.append(&src, &word);
        assert_eq!(copied.begin(), 0);
        assert_eq!(copied.letters(), word.letters());
        assert_eq!(dst.as_bytes(), b"defg\n");
        assert_eq!(dst.str(&copied), "defg");
        assert_eq!(dst.size(), dst.capacity());
    }

    #[test]
    #[should_panic(expected = "arena capacity exceeded")]
    fn append_past_capacity_panics() {
        let src = TextArena::from_bytes(b"abc\n".to_vec());
        let (word, _) = Word::read_str(src.as_bytes(), 0).unwrap();

        let mut dst = TextArena::with_capacity(3);
        let _ = dst.append(&src, &word);
    }
}
