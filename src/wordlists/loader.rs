//! Word list loading
//!
//! Reads the plain-text word list, or its binary cache when one is present
//! and at least as new as the list.

use crate::index::{BuildError, CacheError, WordDb};
use log::{debug, info, warn};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

/// Word list used when none is given
pub const DEFAULT_WORD_LIST: &str = "words_alpha.txt";

/// Extension of a word list's cache file
pub const CACHE_EXTENSION: &str = "pre";

/// Error type for word lists that can't be loaded
#[derive(Debug)]
pub enum LoadError {
    Read { path: PathBuf, source: io::Error },
    Build { path: PathBuf, source: BuildError },
    Save { path: PathBuf, source: io::Error },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "can't read word list {}: {source}", path.display())
            }
            Self::Build { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Save { path, source } => {
                write!(f, "can't write cache {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } | Self::Save { source, .. } => Some(source),
            Self::Build { source, .. } => Some(source),
        }
    }
}

/// Where a loaded database came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Cache,
    Rebuilt,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cache => "cache",
            Self::Rebuilt => "word list",
        })
    }
}

/// A database ready for culling
#[derive(Debug)]
pub struct Loaded {
    pub db: WordDb,
    pub origin: Origin,
    pub elapsed: Duration,
}

/// Word list and cache locations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub words: PathBuf,
    /// `None` disables the cache
    pub cache: Option<PathBuf>,
}

impl DataPaths {
    /// Resolve a word list and its cache
    ///
    /// Without an explicit cache path the cache sits next to the word list.
    #[must_use]
    pub fn new(words: &Path, cache: Option<&Path>, use_cache: bool) -> Self {
        let words = resolve_data_path(words);
        let cache = use_cache.then(|| {
            cache.map_or_else(|| default_cache_path(&words), resolve_data_path)
        });
        Self { words, cache }
    }
}

/// Cache path for a word list: same name, `.pre` extension
///
/// # Examples
/// ```
/// use letterboxed::wordlists::loader::default_cache_path;
/// use std::path::Path;
///
/// let cache = default_cache_path(Path::new("data/words_alpha.txt"));
/// assert_eq!(cache, Path::new("data/words_alpha.pre"));
/// ```
#[must_use]
pub fn default_cache_path(words: &Path) -> PathBuf {
    words.with_extension(CACHE_EXTENSION)
}

/// Find a data file
///
/// A relative path missing from the working directory is looked up next to
/// the executable. If neither exists the path is returned unchanged.
#[must_use]
pub fn resolve_data_path(path: &Path) -> PathBuf {
    if path.is_absolute() || path.exists() {
        return path.to_path_buf();
    }
    if let Ok(exe) = std::env::current_exe()
        && let Some(dir) = exe.parent()
    {
        let beside = dir.join(path);
        if beside.exists() {
            debug!("using {} next to the executable", beside.display());
            return beside;
        }
    }
    path.to_path_buf()
}

/// Read a word list, folded to lowercase
///
/// # Errors
/// Returns `LoadError::Read` if the file can't be read.
pub fn read_word_list(path: &Path) -> Result<Vec<u8>, LoadError> {
    let mut text = fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    text.make_ascii_lowercase();
    Ok(text)
}

/// Build a database straight from a word list
///
/// # Errors
/// Returns `LoadError` if the file can't be read or isn't a valid word list.
pub fn build_from_file(path: &Path) -> Result<WordDb, LoadError> {
    let text = read_word_list(path)?;
    let db = WordDb::from_text(text).map_err(|source| LoadError::Build {
        path: path.to_path_buf(),
        source,
    })?;
    info!("indexed {} words from {}", db.len(), path.display());
    Ok(db)
}

/// Build a database from a word list and write its cache
///
/// # Errors
/// Returns `LoadError` if the word list can't be indexed or the cache
/// can't be written.
pub fn rebuild_cache(words: &Path, cache: &Path) -> Result<WordDb, LoadError> {
    let db = build_from_file(words)?;
    db.save(cache).map_err(|source| LoadError::Save {
        path: cache.to_path_buf(),
        source,
    })?;
    info!("wrote cache {}", cache.display());
    Ok(db)
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// A cache is stale when the word list changed after it was written
fn is_stale(words: &Path, cache: &Path) -> bool {
    match (modified(words), modified(cache)) {
        (Some(words), Some(cache)) => cache < words,
        _ => false,
    }
}

fn try_cache(words: &Path, cache: &Path) -> Option<WordDb> {
    if is_stale(words, cache) {
        info!("cache {} is older than the word list", cache.display());
        return None;
    }

    match WordDb::load(cache) {
        Ok(db) if db.is_empty() => {
            info!("cache {} is empty", cache.display());
            None
        }
        Ok(db) => Some(db),
        Err(CacheError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
            debug!("no cache at {}", cache.display());
            None
        }
        Err(err) => {
            info!("ignoring cache {}: {err}", cache.display());
            None
        }
    }
}

/// Load the database, from the cache when possible
///
/// Any unusable cache is a miss: the word list is indexed again and the
/// cache rewritten. Failing to write the cache only logs a warning.
///
/// # Errors
/// Returns `LoadError` if the word list has to be read and can't be
/// read or indexed.
pub fn load_database(paths: &DataPaths) -> Result<Loaded, LoadError> {
    let start = Instant::now();

    if let Some(cache) = &paths.cache
        && let Some(db) = try_cache(&paths.words, cache)
    {
        debug!("loaded {} words from {}", db.len(), cache.display());
        return Ok(Loaded {
            db,
            origin: Origin::Cache,
            elapsed: start.elapsed(),
        });
    }

    let db = build_from_file(&paths.words)?;
    if let Some(cache) = &paths.cache {
        match db.save(cache) {
            Ok(()) => info!("wrote cache {}", cache.display()),
            Err(err) => warn!("can't write cache {}: {err}", cache.display()),
        }
    }

    Ok(Loaded {
        db,
        origin: Origin::Rebuilt,
        elapsed: start.elapsed(),
    })
}
