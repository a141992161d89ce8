//! Letter bitmask utilities
//!
//! Every set of letters in the index is a 26-bit mask: bit `i` is set when
//! the letter `'a' + i` is present.

/// Number of letters in the alphabet (and buckets in the index)
pub const ALPHABET_LEN: usize = 26;

/// A set of lowercase letters, one bit per letter
pub type LetterMask = u32;

/// Mask with all 26 letters set
pub const FULL_MASK: LetterMask = (1 << ALPHABET_LEN) - 1;

/// Map a lowercase ASCII letter to its 0-25 index
///
/// # Examples
/// ```
/// use letterboxed::core::letters::letter_index;
///
/// assert_eq!(letter_index(b'a'), Some(0));
/// assert_eq!(letter_index(b'z'), Some(25));
/// assert_eq!(letter_index(b'A'), None);
/// ```
#[inline]
#[must_use]
pub const fn letter_index(letter: u8) -> Option<usize> {
    if letter.is_ascii_lowercase() {
        Some((letter - b'a') as usize)
    } else {
        None
    }
}

/// Map a lowercase ASCII letter to its single-bit mask
#[inline]
#[must_use]
pub const fn letter_bit(letter: u8) -> Option<LetterMask> {
    match letter_index(letter) {
        Some(i) => Some(1 << i),
        None => None,
    }
}

/// Map a 0-25 index back to its letter
///
/// # Panics
/// Panics if `index >= 26`
#[inline]
#[must_use]
pub const fn index_to_letter(index: usize) -> char {
    assert!(index < ALPHABET_LEN, "letter index out of range");
    (b'a' + index as u8) as char
}

/// Whether `byte` ends a word in the raw word list
#[inline]
#[must_use]
pub const fn is_line_end(byte: u8) -> bool {
    matches!(byte, b'\n' | b'\r' | 0)
}

/// Render the letters of a mask in alphabetical order
#[must_use]
pub fn mask_to_string(mask: LetterMask) -> String {
    (0..ALPHABET_LEN)
        .filter(|&i| mask & (1 << i) != 0)
        .map(index_to_letter)
        .collect()
}
