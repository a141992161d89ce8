//! Puzzle sides
//!
//! A puzzle is four sides of three letters each. Two letters from the same
//! side can never be played back to back.

use super::letters::{LetterMask, letter_bit, mask_to_string};
use super::word::Word;
use std::fmt;

/// Letters on one side of the puzzle
pub const SIDE_LEN: usize = 3;

/// Sides in a puzzle
pub const SIDE_COUNT: usize = 4;

/// Distinct letters in a well-formed puzzle
pub const PUZZLE_LETTERS: usize = SIDE_LEN * SIDE_COUNT;

/// One edge of the puzzle: exactly three distinct letters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Side {
    text: [u8; SIDE_LEN],
    word: Word,
}

/// Error type for malformed puzzle input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideError {
    InvalidLength { side: String, len: usize },
    InvalidCharacter { side: String, ch: char },
    RepeatedLetter { side: String },
    SharedLetter { side: String, letters: String },
}

impl fmt::Display for SideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength { side, len } => {
                write!(f, "side '{side}' must have exactly 3 letters, got {len}")
            }
            Self::InvalidCharacter { side, ch } => {
                write!(f, "side '{side}' contains {ch:?}, which is not a letter")
            }
            Self::RepeatedLetter { side } => {
                write!(f, "side '{side}' repeats a letter")
            }
            Self::SharedLetter { side, letters } => {
                write!(f, "side '{side}' shares '{letters}' with another side")
            }
        }
    }
}

impl std::error::Error for SideError {}

impl Side {
    /// Parse a side from text, folding ASCII case
    ///
    /// # Errors
    /// Returns `SideError` unless the text is exactly three distinct
    /// ASCII letters.
    ///
    /// # Examples
    /// ```
    /// use letterboxed::core::Side;
    ///
    /// assert!(Side::parse("vrq").is_ok());
    /// assert!(Side::parse("VRQ").is_ok());
    /// assert!(Side::parse("vr").is_err());
    /// assert!(Side::parse("vrv").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, SideError> {
        let folded = text.to_ascii_lowercase();

        if let Some(ch) = folded.chars().find(|c| !c.is_ascii_lowercase()) {
            return Err(SideError::InvalidCharacter {
                side: text.to_string(),
                ch,
            });
        }

        let bytes: [u8; SIDE_LEN] =
            folded
                .as_bytes()
                .try_into()
                .map_err(|_| SideError::InvalidLength {
                    side: text.to_string(),
                    len: folded.len(),
                })?;

        // Only lowercase letters remain, so parsing can't fail
        let (word, _) = Word::read_str(&bytes, 0).map_err(|_| SideError::InvalidCharacter {
            side: text.to_string(),
            ch: '?',
        })?;

        if word.letter_count() != SIDE_LEN {
            return Err(SideError::RepeatedLetter {
                side: text.to_string(),
            });
        }

        Ok(Self { text: bytes, word })
    }

    /// Letters on this side as a mask
    #[inline]
    #[must_use]
    pub const fn letters(&self) -> LetterMask {
        self.word.letters()
    }

    /// The side's letters in the order given
    #[must_use]
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.text).unwrap_or_default()
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four sides of a puzzle, pairwise disjoint
///
/// A `SideSet` always names exactly twelve distinct letters; construction
/// rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideSet {
    sides: [Side; SIDE_COUNT],
    letters: LetterMask,
}

impl SideSet {
    /// Combine four sides into a puzzle
    ///
    /// # Errors
    /// Returns `SideError::SharedLetter` if two sides have a letter in common.
    pub fn new(sides: [Side; SIDE_COUNT]) -> Result<Self, SideError> {
        let mut letters: LetterMask = 0;
        for side in &sides {
            let shared = letters & side.letters();
            if shared != 0 {
                return Err(SideError::SharedLetter {
                    side: side.to_string(),
                    letters: mask_to_string(shared),
                });
            }
            letters |= side.letters();
        }
        debug_assert_eq!(letters.count_ones() as usize, PUZZLE_LETTERS);

        Ok(Self { sides, letters })
    }

    /// Parse four side strings
    ///
    /// # Errors
    /// Returns the first `SideError` found, checking each side before the
    /// sides against each other.
    ///
    /// # Examples
    /// ```
    /// use letterboxed::core::SideSet;
    ///
    /// let sides = SideSet::parse(&["vrq", "wue", "isl", "dmo"]).unwrap();
    /// assert_eq!(sides.letters().count_ones(), 12);
    ///
    /// assert!(SideSet::parse(&["abc", "cde", "fgh", "ijk"]).is_err());
    /// ```
    pub fn parse<S: AsRef<str>>(texts: &[S; SIDE_COUNT]) -> Result<Self, SideError> {
        let [a, b, c, d] = texts;
        Self::new([
            Side::parse(a.as_ref())?,
            Side::parse(b.as_ref())?,
            Side::parse(c.as_ref())?,
            Side::parse(d.as_ref())?,
        ])
    }

    /// All twelve puzzle letters
    #[inline]
    #[must_use]
    pub const fn letters(&self) -> LetterMask {
        self.letters
    }

    /// The sides in the order given
    #[inline]
    #[must_use]
    pub const fn sides(&self) -> &[Side; SIDE_COUNT] {
        &self.sides
    }

    /// Index of the side holding `letter`, if it is in the puzzle
    #[must_use]
    pub fn side_of(&self, letter: u8) -> Option<usize> {
        let bit = letter_bit(letter)?;
        self.sides.iter().position(|side| side.letters() & bit != 0)
    }

    /// Whether the text has two adjacent letters from the same side
    ///
    /// Such a word would need two taps in a row on one side, which the
    /// puzzle disallows.
    #[must_use]
    pub fn has_same_side_pair(&self, text: &[u8]) -> bool {
        text.windows(2).any(|pair| {
            matches!(
                (self.side_of(pair[0]), self.side_of(pair[1])),
                (Some(a), Some(b)) if a == b
            )
        })
    }

    /// Whether a word with this text and letter set can be played
    #[must_use]
    pub fn allows(&self, text: &[u8], letters: LetterMask) -> bool {
        letters & !self.letters == 0 && !self.has_same_side_pair(text)
    }
}

impl fmt::Display for SideSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = &self.sides;
        write!(f, "{a}-{b}-{c}-{d}")
    }
}
