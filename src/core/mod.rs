//! Core domain types for Letter Boxed
//!
//! Letter masks, word descriptors and puzzle sides. Everything here is pure
//! and free of I/O.

pub mod letters;
mod side;
mod word;

pub use letters::LetterMask;
pub use side::{PUZZLE_LETTERS, SIDE_COUNT, SIDE_LEN, Side, SideError, SideSet};
pub use word::{MAX_BEGIN, MAX_LENGTH, PACKED_BYTES, Word, WordError};
