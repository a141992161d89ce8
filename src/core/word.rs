//! Word descriptor
//!
//! A `Word` does not own its text. It records where the text lives in a
//! [`TextArena`](crate::index::TextArena) together with the letter set
//! computed while parsing, so the hot loops of culling and solving never
//! touch the text again.

use super::letters::{LetterMask, is_line_end, letter_bit};
use std::fmt;

const BEGIN_BITS: u32 = 26;
const LENGTH_BITS: u32 = 6;
const LETTERS_BITS: u32 = 26;
const COUNT_BITS: u32 = 5;

const LENGTH_SHIFT: u32 = BEGIN_BITS;
const LETTERS_SHIFT: u32 = LENGTH_SHIFT + LENGTH_BITS;
const COUNT_SHIFT: u32 = LETTERS_SHIFT + LETTERS_BITS;
const DEAD_SHIFT: u32 = COUNT_SHIFT + COUNT_BITS;

/// Largest arena offset a descriptor can address (2^26 - 1)
pub const MAX_BEGIN: usize = (1 << BEGIN_BITS) - 1;

/// Longest word a descriptor can describe (2^6 - 1)
pub const MAX_LENGTH: usize = (1 << LENGTH_BITS) - 1;

/// Words shorter than this are never playable
pub const MIN_LENGTH: usize = 3;

/// A playable word can't use more letters than a puzzle has
pub const MAX_DISTINCT_LETTERS: usize = 12;

/// Size of a packed descriptor in bytes
pub const PACKED_BYTES: usize = 8;

/// Fixed-size descriptor of one word
///
/// Packs into exactly 64 bits:
///
/// | field          | bits | range      |
/// |----------------|------|------------|
/// | `begin`        | 26   | 0..=2^26-1 |
/// | `length`       | 6    | 0..=63     |
/// | `letters`      | 26   | letter set |
/// | `letter_count` | 5    | 0..=26     |
/// | `is_dead`      | 1    | flag       |
///
/// The all-zero descriptor is the bucket sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Word {
    begin: u32,
    length: u8,
    letters: LetterMask,
    letter_count: u8,
    is_dead: bool,
}

/// Error type for unparseable word text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordError {
    /// A byte that is neither a lowercase letter nor a line terminator
    InvalidByte { offset: usize, byte: u8 },
    /// The word starts beyond the addressable arena range
    OffsetOverflow(usize),
}

impl fmt::Display for WordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidByte { offset, byte } => write!(
                f,
                "invalid byte {:?} at offset {offset}, expected a lowercase letter",
                char::from(*byte)
            ),
            Self::OffsetOverflow(offset) => {
                write!(f, "word offset {offset} exceeds the {MAX_BEGIN} byte limit")
            }
        }
    }
}

impl std::error::Error for WordError {}

impl Word {
    /// Bucket terminator
    pub const SENTINEL: Self = Self {
        begin: 0,
        length: 0,
        letters: 0,
        letter_count: 0,
        is_dead: false,
    };

    /// Parse the word starting at `offset` in `text`
    ///
    /// Scans to the next line terminator (or the end of `text`), computing
    /// the letter set, the distinct letter count and whether any letter is
    /// immediately repeated. Trailing terminators are skipped as well.
    ///
    /// Returns the descriptor and the number of bytes consumed, so the caller
    /// can advance straight to the next word. Words that can never be played
    /// are flagged dead rather than rejected:
    /// - shorter than [`MIN_LENGTH`]
    /// - more than [`MAX_DISTINCT_LETTERS`] distinct letters
    /// - a doubled letter such as the `ll` in `hello`
    /// - longer than [`MAX_LENGTH`]
    ///
    /// # Errors
    /// Returns `WordError` if the text contains a byte that is not a
    /// lowercase ASCII letter, or `offset` doesn't fit the `begin` field.
    ///
    /// # Examples
    /// ```
    /// use letterboxed::core::Word;
    ///
    /// let text = b"hello\nworld\n";
    /// let (hello, consumed) = Word::read_str(text, 0).unwrap();
    /// assert_eq!(consumed, 6);
    /// assert!(hello.is_dead()); // doubled 'l'
    ///
    /// let (world, _) = Word::read_str(text, consumed).unwrap();
    /// assert_eq!(world.len(), 5);
    /// assert!(!world.is_dead());
    /// ```
    pub fn read_str(text: &[u8], offset: usize) -> Result<(Self, usize), WordError> {
        if offset > MAX_BEGIN {
            return Err(WordError::OffsetOverflow(offset));
        }

        let mut letters: LetterMask = 0;
        let mut letter_count = 0u8;
        let mut has_double = false;
        let mut previous = None;

        let mut end = offset;
        while let Some(&byte) = text.get(end) {
            if is_line_end(byte) {
                break;
            }
            let bit = letter_bit(byte).ok_or(WordError::InvalidByte { offset: end, byte })?;
            has_double |= previous == Some(byte);
            if letters & bit == 0 {
                letters |= bit;
                letter_count += 1;
            }
            previous = Some(byte);
            end += 1;
        }

        let length = end - offset;
        let mut next = end;
        while text.get(next).is_some_and(|&b| is_line_end(b)) {
            next += 1;
        }

        let is_dead = length < MIN_LENGTH
            || length > MAX_LENGTH
            || usize::from(letter_count) > MAX_DISTINCT_LETTERS
            || has_double;

        let word = Self {
            begin: offset as u32,
            length: length.min(MAX_LENGTH) as u8,
            letters,
            letter_count,
            is_dead,
        };
        debug_assert_eq!(word.letters.count_ones(), u32::from(word.letter_count));

        Ok((word, next - offset))
    }

    /// Byte offset of the text in the owning arena
    #[inline]
    #[must_use]
    pub const fn begin(&self) -> usize {
        self.begin as usize
    }

    /// Length of the word in bytes, excluding the terminator
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length as usize
    }

    /// Zero length only happens for the sentinel
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Whether this descriptor terminates a bucket
    #[inline]
    #[must_use]
    pub const fn is_sentinel(&self) -> bool {
        self.is_empty()
    }

    /// Set of letters used by the word
    #[inline]
    #[must_use]
    pub const fn letters(&self) -> LetterMask {
        self.letters
    }

    /// Number of distinct letters in the word
    #[inline]
    #[must_use]
    pub const fn letter_count(&self) -> usize {
        self.letter_count as usize
    }

    /// Whether the word has been excluded from the live view
    #[inline]
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.is_dead
    }

    /// Exclude the word from the live view until the next compaction
    #[inline]
    pub fn mark_dead(&mut self) {
        self.is_dead = true;
    }

    /// Copy of this descriptor pointing at `begin` in another arena
    ///
    /// # Panics
    /// Panics if `begin` doesn't fit the 26-bit field
    #[must_use]
    pub fn rebased(&self, begin: usize) -> Self {
        assert!(begin <= MAX_BEGIN, "arena offset {begin} exceeds {MAX_BEGIN}");
        Self {
            begin: begin as u32,
            ..*self
        }
    }

    /// Pack into the 64-bit on-disk layout
    #[must_use]
    pub fn pack(&self) -> u64 {
        u64::from(self.begin)
            | (u64::from(self.length) << LENGTH_SHIFT)
            | (u64::from(self.letters) << LETTERS_SHIFT)
            | (u64::from(self.letter_count) << COUNT_SHIFT)
            | (u64::from(self.is_dead) << DEAD_SHIFT)
    }

    /// Inverse of [`Word::pack`]
    #[must_use]
    pub const fn unpack(bits: u64) -> Self {
        const fn field(bits: u64, shift: u32, width: u32) -> u64 {
            (bits >> shift) & ((1 << width) - 1)
        }

        Self {
            begin: field(bits, 0, BEGIN_BITS) as u32,
            length: field(bits, LENGTH_SHIFT, LENGTH_BITS) as u8,
            letters: field(bits, LETTERS_SHIFT, LETTERS_BITS) as u32,
            letter_count: field(bits, COUNT_SHIFT, COUNT_BITS) as u8,
            is_dead: field(bits, DEAD_SHIFT, 1) == 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::letters::letter_bit;

    fn mask(letters: &str) -> LetterMask {
        letters.bytes().filter_map(letter_bit).fold(0, |m, b| m | b)
    }

    #[test]
    fn read_str_computes_letters() {
        let (word, consumed) = Word::read_str(b"quiz\n", 0).unwrap();
        assert_eq!(consumed, 5);
        assert_eq!(word.begin(), 0);
        assert_eq!(word.len(), 4);
        assert_eq!(word.letters(), mask("quiz"));
        assert_eq!(word.letter_count(), 4);
        assert!(!word.is_dead());
    }

    #[test]
    fn read_str_counts_distinct_letters() {
        let (word, _) = Word::read_str(b"banana", 0).unwrap();
        assert_eq!(word.len(), 6);
        assert_eq!(word.letter_count(), 3);
        assert_eq!(word.letters(), mask("abn"));
        assert!(!word.is_dead());
    }

    #[test]
    fn read_str_at_offset_skips_crlf() {
        let text = b"abc\r\n\r\ndefg\n";
        let (first, consumed) = Word::read_str(text, 0).unwrap();
        assert_eq!(first.len(), 3);
        assert_eq!(consumed, 7);

        let (second, consumed) = Word::read_str(text, 7).unwrap();
        assert_eq!(second.begin(), 7);
        assert_eq!(second.len(), 4);
        assert_eq!(consumed, 5);
    }

    #[test]
    fn read_str_without_terminator() {
        let (word, consumed) = Word::read_str(b"zebra", 0).unwrap();
        assert_eq!(word.len(), 5);
        assert_eq!(consumed, 5);
    }

    #[test]
    fn short_words_are_dead() {
        assert!(Word::read_str(b"ab\n", 0).unwrap().0.is_dead());
        assert!(Word::read_str(b"a\n", 0).unwrap().0.is_dead());
        assert!(!Word::read_str(b"abc\n", 0).unwrap().0.is_dead());
    }

    #[test]
    fn doubled_letters_are_dead() {
        assert!(Word::read_str(b"heehaw", 0).unwrap().0.is_dead());
        assert!(Word::read_str(b"zigzag", 0).is_ok_and(|(w, _)| !w.is_dead()));
    }

    #[test]
    fn too_many_letters_are_dead() {
        let (word, _) = Word::read_str(b"supercalifragilisticexpialidocious", 0).unwrap();
        assert!(word.letter_count() > MAX_DISTINCT_LETTERS);
        assert!(word.is_dead());
    }

    #[test]
    fn overlong_words_are_dead() {
        let text = "abc".repeat(22); // 66 bytes, 3 letters, no doubles
        let (word, consumed) = Word::read_str(text.as_bytes(), 0).unwrap();
        assert_eq!(consumed, 66);
        assert!(word.is_dead());
    }

    #[test]
    fn invalid_byte_is_an_error() {
        assert_eq!(
            Word::read_str(b"don't", 0),
            Err(WordError::InvalidByte {
                offset: 3,
                byte: b'\''
            })
        );
        assert!(Word::read_str(b"Apple", 0).is_err());
    }

    #[test]
    fn offset_overflow_is_an_error() {
        assert_eq!(
            Word::read_str(b"", MAX_BEGIN + 1),
            Err(WordError::OffsetOverflow(MAX_BEGIN + 1))
        );
    }

    #[test]
    fn sentinel_is_zero() {
        assert!(Word::SENTINEL.is_sentinel());
        assert_eq!(Word::SENTINEL, Word::default());
        assert_eq!(Word::SENTINEL.pack(), 0);
    }

    #[test]
    fn pack_layout() {
        let word = Word {
            begin: MAX_BEGIN as u32,
            length: 5,
            letters: mask("a"),
            letter_count: 1,
            is_dead: true,
        };
        let bits = word.pack();
        assert_eq!(bits & 0x3FF_FFFF, MAX_BEGIN as u64);
        assert_eq!((bits >> 26) & 0x3F, 5);
        assert_eq!((bits >> 32) & 0x3FF_FFFF, 1);
        assert_eq!((bits >> 58) & 0x1F, 1);
        assert_eq!(bits >> 63, 1);
        assert_eq!(Word::unpack(bits), word);
    }

    #[test]
    fn rebased_keeps_letters() {
        let (word, _) = Word::read_str(b"xyz\nwise\n", 4).unwrap();
        let moved = word.rebased(100);
        assert_eq!(moved.begin(), 100);
        assert_eq!(moved.len(), word.len());
        assert_eq!(moved.letters(), word.letters());
    }

    #[test]
    fn mark_dead() {
        let (mut word, _) = Word::read_str(b"wise", 0).unwrap();
        assert!(!word.is_dead());
        word.mark_dead();
        assert!(word.is_dead());
    }
}
