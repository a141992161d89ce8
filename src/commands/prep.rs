//! Cache preparation command

use crate::wordlists::LoadError;
use crate::wordlists::loader::rebuild_cache;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Result of rebuilding a cache
pub struct PrepResult {
    pub words: PathBuf,
    pub cache: PathBuf,
    pub word_count: usize,
    pub cache_bytes: usize,
    pub duration: Duration,
}

/// Index a word list and write its cache, replacing any existing one
///
/// # Errors
/// Returns `LoadError` if the word list can't be indexed or the cache
/// can't be written.
pub fn prepare_cache(words: &Path, cache: &Path) -> Result<PrepResult, LoadError> {
    let start = Instant::now();
    let db = rebuild_cache(words, cache)?;

    Ok(PrepResult {
        words: words.to_path_buf(),
        cache: cache.to_path_buf(),
        word_count: db.len(),
        cache_bytes: db.image_len(),
        duration: start.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::WordDb;
    use std::fs;

    #[test]
    fn writes_loadable_cache() {
        let dir = tempfile::tempdir().unwrap();
        let words = dir.path().join("words.txt");
        let cache = dir.path().join("words.pre");
        fs::write(&words, "ant\nbean\nbb\nzebra\n").unwrap();

        let result = prepare_cache(&words, &cache).unwrap();
        assert_eq!(result.word_count, 3);
        assert_eq!(result.cache, cache);
        assert_eq!(fs::metadata(&cache).unwrap().len() as usize, result.cache_bytes);

        let loaded = WordDb::load(&cache).unwrap();
        assert_eq!(loaded.len(), 3);
    }

    #[test]
    fn replaces_existing_cache() {
        let dir = tempfile::tempdir().unwrap();
        let words = dir.path().join("words.txt");
        let cache = dir.path().join("words.pre");
        fs::write(&words, "ant\n").unwrap();
        fs::write(&cache, b"garbage").unwrap();

        prepare_cache(&words, &cache).unwrap();
        assert_eq!(WordDb::load(&cache).unwrap().len(), 1);
    }

    #[test]
    fn missing_word_list() {
        let dir = tempfile::tempdir().unwrap();
        let result = prepare_cache(&dir.path().join("none.txt"), &dir.path().join("none.pre"));
        assert!(matches!(result, Err(LoadError::Read { .. })));
    }
}
