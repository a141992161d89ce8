//! Word index
//!
//! Text arena, per-letter statistics, the bucketed database built from a
//! word list, puzzle culling and the binary cache.

mod arena;
mod cache;
mod cull;
mod database;
mod stats;

pub use arena::TextArena;
pub use cache::{CacheError, HEADER_BYTES, Segment};
pub use database::{Bucket, BuildError, LayoutError, WordDb, WordIdx};
pub use stats::LetterStats;
