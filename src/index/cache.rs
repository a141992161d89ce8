//! Binary cache of a packed database
//!
//! Parsing a large word list is the slowest step of a run, so the packed
//! index is written to disk verbatim and read back on later runs.
//!
//! # Format
//!
//! Little-endian, no padding, no version tag:
//!
//! | segment     | size                          | contents                              |
//! |-------------|-------------------------------|---------------------------------------|
//! | header      | 320 bytes                     | word counts, byte counts, bucket table (26 × u32 each), arena capacity, arena size (u32 each) |
//! | descriptors | (words + 26) × 8 bytes        | packed [`Word`]s, sentinels included  |
//! | arena       | arena size bytes              | word text, one `\n` after each word   |
//!
//! Any size mismatch, trailing data or inconsistent layout is reported as a
//! [`CacheError`]; callers rebuild from the word list instead.

use super::arena::TextArena;
use super::database::{LayoutError, WordDb, WordIdx};
use super::stats::LetterStats;
use crate::core::letters::ALPHABET_LEN;
use crate::core::{MAX_BEGIN, PACKED_BYTES, Word};
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

const HEADER_FIELDS: usize = ALPHABET_LEN * 3 + 2;

/// Size of the fixed header in bytes
pub const HEADER_BYTES: usize = HEADER_FIELDS * 4;

const COUNTS_AT: usize = 0;
const SIZES_AT: usize = ALPHABET_LEN;
const BUCKETS_AT: usize = ALPHABET_LEN * 2;
const CAPACITY_AT: usize = ALPHABET_LEN * 3;
const SIZE_AT: usize = CAPACITY_AT + 1;

/// The three parts of a cache file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Header,
    Descriptors,
    Arena,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Header => "header",
            Self::Descriptors => "descriptors",
            Self::Arena => "arena",
        })
    }
}

/// Error type for unusable cache files
#[derive(Debug)]
pub enum CacheError {
    Io(io::Error),
    Truncated {
        segment: Segment,
        expected: usize,
        found: usize,
    },
    TrailingBytes,
    /// The header's counts contradict each other
    Inconsistent(String),
    /// Descriptors and text don't form a packed database
    Layout(LayoutError),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "cache unreadable: {err}"),
            Self::Truncated {
                segment,
                expected,
                found,
            } => write!(f, "cache {segment} truncated: expected {expected} bytes, found {found}"),
            Self::TrailingBytes => write!(f, "cache has data past the arena"),
            Self::Inconsistent(why) => write!(f, "cache is inconsistent: {why}"),
            Self::Layout(err) => write!(f, "cache layout is broken: {err}"),
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Layout(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for CacheError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<LayoutError> for CacheError {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}

fn u32_at(header: &[u8], field: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&header[field * 4..field * 4 + 4]);
    u32::from_le_bytes(bytes)
}

fn read_segment<R: Read>(input: &mut R, segment: Segment, len: usize) -> Result<Vec<u8>, CacheError> {
    let mut buf = Vec::with_capacity(len);
    let found = input.by_ref().take(len as u64).read_to_end(&mut buf)?;
    if found == len {
        Ok(buf)
    } else {
        Err(CacheError::Truncated {
            segment,
            expected: len,
            found,
        })
    }
}

impl WordDb {
    /// Size of this database's cache image in bytes
    #[must_use]
    pub fn image_len(&self) -> usize {
        HEADER_BYTES + self.words.len() * PACKED_BYTES + self.arena.size()
    }

    /// Write the cache image of this database
    ///
    /// Only packed databases are written; everything the constructors hand
    /// out is packed.
    ///
    /// # Errors
    /// Returns any I/O error from `out`.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        debug_assert!(self.is_packed(), "only packed databases are cached");
        self.write_image(out)
    }

    fn write_image<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut header = Vec::with_capacity(HEADER_BYTES);
        let fields = self
            .mem_stats
            .word_counts
            .iter()
            .chain(&self.mem_stats.size_bytes)
            .copied()
            .chain(self.words_by_letter.iter().map(|idx| idx.raw()))
            .chain([self.arena.capacity() as u32, self.arena.size() as u32]);
        for field in fields {
            header.extend_from_slice(&field.to_le_bytes());
        }
        debug_assert_eq!(header.len(), HEADER_BYTES);
        out.write_all(&header)?;

        let mut descriptors = Vec::with_capacity(self.words.len() * PACKED_BYTES);
        for word in &self.words {
            descriptors.extend_from_slice(&word.pack().to_le_bytes());
        }
        out.write_all(&descriptors)?;

        out.write_all(self.arena.as_bytes())
    }

    /// Write the cache image to a file, replacing it
    ///
    /// # Errors
    /// Returns any I/O error creating or writing the file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write_to(&mut out)?;
        out.flush()
    }

    /// Read a database back from its cache image
    ///
    /// The restored database is fully live.
    ///
    /// # Errors
    /// Returns `CacheError` if any segment is short, data follows the arena,
    /// or the contents don't form a valid packed database.
    pub fn read_from<R: Read>(input: &mut R) -> Result<Self, CacheError> {
        let header = read_segment(input, Segment::Header, HEADER_BYTES)?;

        let mut stats = LetterStats::default();
        let mut words_by_letter = [WordIdx::INVALID; ALPHABET_LEN];
        for letter in 0..ALPHABET_LEN {
            stats.word_counts[letter] = u32_at(&header, COUNTS_AT + letter);
            stats.size_bytes[letter] = u32_at(&header, SIZES_AT + letter);
            words_by_letter[letter] = WordIdx::from_raw(u32_at(&header, BUCKETS_AT + letter));
        }
        let capacity = u32_at(&header, CAPACITY_AT) as usize;
        let size = u32_at(&header, SIZE_AT) as usize;

        if size != capacity {
            return Err(CacheError::Inconsistent(format!(
                "arena size {size} differs from capacity {capacity}"
            )));
        }
        if size != stats.total_size_bytes() {
            return Err(CacheError::Inconsistent(format!(
                "arena holds {size} bytes, word table says {}",
                stats.total_size_bytes()
            )));
        }
        // A cached word is at least three letters and a newline, which also
        // bounds the allocation a corrupt header can ask for.
        if size > MAX_BEGIN || stats.total_count() * 4 > size {
            return Err(CacheError::Inconsistent(format!(
                "{} words can't fit in {size} bytes",
                stats.total_count()
            )));
        }

        let count = stats.total_count() + ALPHABET_LEN;
        let descriptor_bytes = read_segment(input, Segment::Descriptors, count * PACKED_BYTES)?;
        let words = descriptor_bytes
            .chunks_exact(PACKED_BYTES)
            .map(|chunk| {
                let mut bytes = [0u8; PACKED_BYTES];
                bytes.copy_from_slice(chunk);
                Word::unpack(u64::from_le_bytes(bytes))
            })
            .collect();

        let text = read_segment(input, Segment::Arena, size)?;

        let mut extra = [0u8; 1];
        if input.read(&mut extra)? != 0 {
            return Err(CacheError::TrailingBytes);
        }

        let db = Self {
            mem_stats: stats,
            words_by_letter,
            arena: TextArena::from_bytes(text),
            words,
            live_stats: stats,
        };
        db.check_layout()?;

        Ok(db)
    }

    /// Read a database from a cache file
    ///
    /// # Errors
    /// Returns `CacheError` if the file can't be opened or read, or doesn't
    /// hold a valid cache image.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CacheError> {
        let mut input = BufReader::new(File::open(path)?);
        Self::read_from(&mut input)
    }
}
