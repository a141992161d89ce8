//! Word list access
//!
//! Loading a word list from disk, through its binary cache when possible.

pub mod loader;

pub use loader::{DEFAULT_WORD_LIST, DataPaths, LoadError, Loaded, Origin, load_database};
