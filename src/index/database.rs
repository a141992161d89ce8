//! Word database
//!
//! Words are stored in 26 buckets, one per starting letter, laid out back to
//! back in alphabetical order. Each bucket ends with a zero sentinel
//! descriptor, so an empty bucket is a lone sentinel and the descriptor
//! array always holds `words + 26` entries.

use super::arena::TextArena;
use super::stats::LetterStats;
use crate::core::letters::{ALPHABET_LEN, index_to_letter, is_line_end};
use crate::core::{MAX_BEGIN, Word, WordError};
use log::debug;
use std::fmt;
use std::ops::Range;

/// Index of a descriptor in a database
///
/// Only meaningful for the database that produced it. Culling consumes the
/// database, so indices can't outlive the layout they point into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WordIdx(u32);

impl WordIdx {
    /// Marks an empty bucket
    pub const INVALID: Self = Self(u32::MAX);

    /// # Panics
    /// Panics if `index` doesn't fit below `u32::MAX`
    #[must_use]
    pub fn new(index: usize) -> Self {
        assert!(index < u32::MAX as usize, "descriptor index {index} out of range");
        Self(index as u32)
    }

    /// Rebuild from the cache representation
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Cache representation
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

/// Error type for word lists that can't be indexed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The text contains something other than lowercase words
    Word(WordError),
    /// Words are not grouped by ascending first letter
    OutOfOrder {
        entry: usize,
        word: String,
        previous: char,
    },
    /// The text doesn't fit the descriptor offset range
    TextTooLarge(usize),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Word(err) => write!(f, "malformed word list: {err}"),
            Self::OutOfOrder {
                entry,
                word,
                previous,
            } => write!(
                f,
                "word list is not sorted by first letter: entry {entry} '{word}' follows words starting with '{previous}'"
            ),
            Self::TextTooLarge(size) => write!(
                f,
                "word list is {size} bytes, the index addresses at most {MAX_BEGIN}"
            ),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Word(err) => Some(err),
            _ => None,
        }
    }
}

impl From<WordError> for BuildError {
    fn from(err: WordError) -> Self {
        Self::Word(err)
    }
}

/// Error type for databases that break the bucket layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The descriptor array doesn't hold `words + 26` entries
    DescriptorCount { expected: usize, found: usize },
    /// The bucket table points somewhere other than the bucket's first word
    BucketStart { letter: char, at: usize },
    /// A stored descriptor is marked dead
    DeadWord { offset: usize },
    /// The arena text at a descriptor's offset can't be parsed
    Text(WordError),
    /// The arena text parses to a different descriptor
    TextMismatch { offset: usize },
    /// A word sits in the bucket of another letter
    Misfiled { offset: usize, letter: char },
    /// A bucket runs on past its word count
    Unterminated(char),
    /// A bucket's text size disagrees with its byte count
    ByteCount {
        letter: char,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DescriptorCount { expected, found } => {
                write!(f, "expected {expected} descriptors, found {found}")
            }
            Self::BucketStart { letter, at } => {
                write!(f, "bucket '{letter}' does not start at descriptor {at}")
            }
            Self::DeadWord { offset } => write!(f, "dead word stored at offset {offset}"),
            Self::Text(err) => write!(f, "unreadable word: {err}"),
            Self::TextMismatch { offset } => {
                write!(f, "descriptor at offset {offset} doesn't match the text")
            }
            Self::Misfiled { offset, letter } => {
                write!(f, "word at offset {offset} filed under '{letter}'")
            }
            Self::Unterminated(letter) => write!(f, "bucket '{letter}' is not terminated"),
            Self::ByteCount {
                letter,
                expected,
                found,
            } => write!(
                f,
                "bucket '{letter}' holds {found} bytes, expected {expected}"
            ),
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Text(err) => Some(err),
            _ => None,
        }
    }
}

impl From<WordError> for LayoutError {
    fn from(err: WordError) -> Self {
        Self::Text(err)
    }
}

/// Bucketed, bit-packed word index
///
/// Cloning is a deep copy of the arena and descriptors; `Default` is the
/// empty database, so `std::mem::take` moves a database out and leaves an
/// empty one behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordDb {
    /// Counts of the descriptors stored in each bucket
    pub(crate) mem_stats: LetterStats,
    pub(crate) words_by_letter: [WordIdx; ALPHABET_LEN],
    pub(crate) arena: TextArena,
    pub(crate) words: Vec<Word>,
    /// Counts of the descriptors not yet marked dead
    pub(crate) live_stats: LetterStats,
}

impl Default for WordDb {
    fn default() -> Self {
        Self {
            mem_stats: LetterStats::default(),
            words_by_letter: [WordIdx::INVALID; ALPHABET_LEN],
            arena: TextArena::default(),
            words: vec![Word::SENTINEL; ALPHABET_LEN],
            live_stats: LetterStats::default(),
        }
    }
}

/// Counts gathered by the first pass over the raw text
#[derive(Debug, Default)]
struct TextScan {
    all: LetterStats,
    live: LetterStats,
}

/// Walks the words of a newline-delimited list
struct TextWords<'a> {
    text: &'a [u8],
    pos: usize,
}

impl<'a> TextWords<'a> {
    const fn new(text: &'a [u8]) -> Self {
        Self { text, pos: 0 }
    }
}

impl Iterator for TextWords<'_> {
    type Item = Result<Word, WordError>;

    fn next(&mut self) -> Option<Self::Item> {
        // Blank lines before the first word
        while self.text.get(self.pos).is_some_and(|&b| is_line_end(b)) {
            self.pos += 1;
        }
        if self.pos >= self.text.len() {
            return None;
        }

        match Word::read_str(self.text, self.pos) {
            Ok((word, consumed)) => {
                self.pos += consumed;
                Some(Ok(word))
            }
            Err(err) => {
                self.pos = self.text.len();
                Some(Err(err))
            }
        }
    }
}

/// Bucket index of the letter at `pos`
///
/// Only called on text that parsing has already validated.
#[inline]
fn letter_at(text: &[u8], pos: usize) -> usize {
    let byte = text[pos];
    debug_assert!(byte.is_ascii_lowercase());
    usize::from(byte - b'a')
}

impl WordDb {
    /// Index a raw word list
    ///
    /// The list holds one lowercase word per line (`\n` or `\r\n`), grouped
    /// by ascending first letter. Words that can never be played are dropped
    /// from the final index. A list with no words gives an empty database.
    ///
    /// # Errors
    /// Returns `BuildError` if the list contains anything but lowercase
    /// letters and line breaks, isn't sorted by first letter, or is too
    /// large to address.
    ///
    /// # Examples
    /// ```
    /// use letterboxed::index::WordDb;
    ///
    /// let db = WordDb::from_text(b"ant\nantonym\nbean\nheehaw\n".to_vec()).unwrap();
    /// assert_eq!(db.len(), 3); // "heehaw" repeats a letter
    ///
    /// assert!(WordDb::from_text(b"bean\nant\n".to_vec()).is_err());
    /// ```
    pub fn from_text(text: Vec<u8>) -> Result<Self, BuildError> {
        if text.len() > MAX_BEGIN {
            return Err(BuildError::TextTooLarge(text.len()));
        }

        let arena = TextArena::from_bytes(text);
        let scan = Self::scan(arena.as_bytes())?;
        if scan.all.is_empty() {
            return Ok(Self::default());
        }

        let unpacked = Self::collate(arena, &scan)?;
        Ok(unpacked.packed())
    }

    /// First pass: per-letter counts, and the ordering check
    fn scan(text: &[u8]) -> Result<TextScan, BuildError> {
        let mut scan = TextScan::default();
        let mut previous: Option<usize> = None;

        for (entry, word) in TextWords::new(text).enumerate() {
            let word = word?;
            let letter = letter_at(text, word.begin());

            if let Some(prev) = previous
                && letter < prev
            {
                let end = word.begin() + word.len();
                return Err(BuildError::OutOfOrder {
                    entry: entry + 1,
                    word: String::from_utf8_lossy(&text[word.begin()..end]).into_owned(),
                    previous: index_to_letter(prev),
                });
            }
            previous = Some(letter);

            scan.all.add(letter, &word);
            if !word.is_dead() {
                scan.live.add(letter, &word);
            }
        }

        Ok(scan)
    }

    /// Second pass: lay descriptors out bucket by bucket
    ///
    /// Dead words keep their slot; only [`WordDb::packed`] drops them.
    fn collate(arena: TextArena, scan: &TextScan) -> Result<Self, BuildError> {
        let mut words = Vec::with_capacity(scan.all.total_count() + ALPHABET_LEN);
        let mut words_by_letter = [WordIdx::INVALID; ALPHABET_LEN];
        let mut open_letter = 0;
        let mut bucket_start = 0;

        let close_bucket = |words: &mut Vec<Word>, letter: usize, start: usize| {
            let count = words.len() - start;
            assert_eq!(
                count, scan.all.word_counts[letter] as usize,
                "word count for '{}' changed between passes",
                index_to_letter(letter)
            );
            words.push(Word::SENTINEL);
            words.len()
        };

        for word in TextWords::new(arena.as_bytes()) {
            let word = word?;
            let letter = letter_at(arena.as_bytes(), word.begin());

            while open_letter < letter {
                bucket_start = close_bucket(&mut words, open_letter, bucket_start);
                open_letter += 1;
            }
            if !words_by_letter[letter].is_valid() {
                words_by_letter[letter] = WordIdx::new(words.len());
            }
            words.push(word);
        }
        while open_letter < ALPHABET_LEN {
            bucket_start = close_bucket(&mut words, open_letter, bucket_start);
            open_letter += 1;
        }

        assert_eq!(words.len(), scan.all.total_count() + ALPHABET_LEN);

        Ok(Self {
            mem_stats: scan.all,
            words_by_letter,
            arena,
            words,
            live_stats: scan.live,
        })
    }

    /// Compact into a new database holding only the live words
    ///
    /// The result has an exactly-sized arena and descriptor array, with words
    /// in their original order. Both statistics tables of the result equal
    /// this database's live statistics.
    ///
    /// # Panics
    /// Panics if the live statistics disagree with the descriptors, which
    /// means an earlier step broke the index.
    #[must_use]
    pub fn packed(&self) -> Self {
        let live = self.live_stats;
        let mut out = Self {
            mem_stats: live,
            words_by_letter: [WordIdx::INVALID; ALPHABET_LEN],
            arena: TextArena::with_capacity(live.total_size_bytes()),
            words: Vec::with_capacity(live.total_count() + ALPHABET_LEN),
            live_stats: live,
        };

        for letter in 0..ALPHABET_LEN {
            let start = out.words.len();
            for (_, word) in self.bucket(letter) {
                let copied = out.arena.append(&self.arena, word);
                out.words.push(copied);
            }

            let count = out.words.len() - start;
            assert_eq!(
                count, live.word_counts[letter] as usize,
                "live count for '{}' disagrees with its bucket",
                index_to_letter(letter)
            );
            if count > 0 {
                out.words_by_letter[letter] = WordIdx::new(start);
            }
            out.words.push(Word::SENTINEL);
        }

        assert_eq!(
            out.arena.size(),
            out.arena.capacity(),
            "live byte count disagrees with packed text"
        );

        debug!(
            "packed {} words, {} bytes -> {} words, {} bytes",
            self.mem_stats.total_count(),
            self.arena.size(),
            out.len(),
            out.arena.size()
        );

        out
    }

    /// Number of live words
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.live_stats.total_count()
    }

    /// No live words
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live_stats.is_empty()
    }

    /// Whether every stored descriptor is live
    #[must_use]
    pub fn is_packed(&self) -> bool {
        self.mem_stats == self.live_stats
            && self.arena.size() == self.live_stats.total_size_bytes()
            && self.words.iter().all(|w| !w.is_dead())
    }

    /// Descriptor at `idx`
    ///
    /// # Panics
    /// Panics if `idx` is invalid or from another database
    #[inline]
    #[must_use]
    pub fn word(&self, idx: WordIdx) -> &Word {
        &self.words[idx.index()]
    }

    /// Descriptor at `idx`, if it exists and isn't a sentinel
    #[must_use]
    pub fn get(&self, idx: WordIdx) -> Option<&Word> {
        self.words.get(idx.index()).filter(|w| !w.is_sentinel())
    }

    /// Text of a word from this database
    #[inline]
    #[must_use]
    pub fn text(&self, word: &Word) -> &str {
        self.arena.str(word)
    }

    /// Bucket index of the word's first letter
    #[inline]
    #[must_use]
    pub fn first_letter(&self, word: &Word) -> usize {
        letter_at(self.arena.as_bytes(), word.begin())
    }

    /// Bucket index of the word's last letter
    #[inline]
    #[must_use]
    pub fn last_letter(&self, word: &Word) -> usize {
        letter_at(self.arena.as_bytes(), word.begin() + word.len() - 1)
    }

    /// First descriptor of a letter's bucket, `None` if it is empty
    ///
    /// # Panics
    /// Panics if `letter >= 26`
    #[must_use]
    pub fn first_word(&self, letter: usize) -> Option<WordIdx> {
        Some(self.words_by_letter[letter]).filter(|idx| idx.is_valid())
    }

    /// Descriptor positions of a bucket, sentinel excluded
    pub(crate) fn bucket_range(&self, letter: usize) -> Range<usize> {
        let Some(first) = self.first_word(letter) else {
            return 0..0;
        };
        let start = first.index();
        let len = self.words[start..]
            .iter()
            .position(Word::is_sentinel)
            .unwrap_or(self.words.len() - start);
        start..start + len
    }

    /// Live words starting with `letter`, in stored order
    ///
    /// # Panics
    /// Panics if `letter >= 26`
    #[must_use]
    pub fn bucket(&self, letter: usize) -> Bucket<'_> {
        let pos = self
            .first_word(letter)
            .map_or(self.words.len(), WordIdx::index);
        Bucket {
            words: &self.words,
            pos,
        }
    }

    /// All live words, bucket by bucket
    pub fn iter(&self) -> impl Iterator<Item = (WordIdx, &Word)> + '_ {
        (0..ALPHABET_LEN).flat_map(move |letter| self.bucket(letter))
    }

    /// Statistics of the stored descriptors
    #[must_use]
    pub const fn mem_stats(&self) -> &LetterStats {
        &self.mem_stats
    }

    /// Statistics of the live descriptors
    #[must_use]
    pub const fn live_stats(&self) -> &LetterStats {
        &self.live_stats
    }

    /// The text arena backing this database
    #[must_use]
    pub const fn arena(&self) -> &TextArena {
        &self.arena
    }

    /// Check every structural invariant of a packed database
    ///
    /// Each descriptor must be live, re-parse to itself from the arena and
    /// sit in the bucket of its first letter. Each bucket must start where
    /// the table says and end in a sentinel.
    ///
    /// # Errors
    /// Returns the first violated invariant as a `LayoutError`.
    pub fn check_layout(&self) -> Result<(), LayoutError> {
        let expected = self.mem_stats.total_count() + ALPHABET_LEN;
        if self.words.len() != expected {
            return Err(LayoutError::DescriptorCount {
                expected,
                found: self.words.len(),
            });
        }

        let text = self.arena.as_bytes();
        let mut pos = 0;
        for letter in 0..ALPHABET_LEN {
            let ch = index_to_letter(letter);
            let count = self.mem_stats.word_counts[letter] as usize;

            match self.first_word(letter) {
                None if count == 0 => {}
                Some(first) if count > 0 && first.index() == pos => {}
                _ => return Err(LayoutError::BucketStart { letter: ch, at: pos }),
            }

            let mut bytes = 0;
            for word in &self.words[pos..pos + count] {
                let offset = word.begin();
                // packing drops dead words, so a stored one can't be counted live
                if word.is_dead() {
                    return Err(LayoutError::DeadWord { offset });
                }
                let (parsed, _) = Word::read_str(text, offset)?;
                if word.is_sentinel() || parsed != *word {
                    return Err(LayoutError::TextMismatch { offset });
                }
                if letter_at(text, offset) != letter {
                    return Err(LayoutError::Misfiled { offset, letter: ch });
                }
                bytes += word.len() + 1;
            }

            if !self.words[pos + count].is_sentinel() {
                return Err(LayoutError::Unterminated(ch));
            }
            if bytes != self.mem_stats.size_bytes[letter] as usize {
                return Err(LayoutError::ByteCount {
                    letter: ch,
                    expected: self.mem_stats.size_bytes[letter] as usize,
                    found: bytes,
                });
            }
            pos += count + 1;
        }

        Ok(())
    }
}

/// Iterator over the live words of one bucket
///
/// Walks descriptors until the bucket's sentinel.
pub struct Bucket<'a> {
    words: &'a [Word],
    pos: usize,
}

impl<'a> Iterator for Bucket<'a> {
    type Item = (WordIdx, &'a Word);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let word = self.words.get(self.pos)?;
            if word.is_sentinel() {
                return None;
            }
            let idx = WordIdx::new(self.pos);
            self.pos += 1;
            if !word.is_dead() {
                return Some((idx, word));
            }
        }
    }
}
