#![forbid(unsafe_code)]

//! "Already liked" guard store.
//!
//! The source system kept a per-browser flag in local storage so the same
//! visitor cannot inflate an item's like counter. Here that ambient global
//! is an injectable capability: the controller takes any [`LikeStore`],
//! tests inject [`MemoryLikeStore`], and hosts that want persistence use
//! [`FileLikeStore`].
//!
//! # Design Invariants
//!
//! 1. **Graceful degradation**: a missing or corrupt file degrades to an
//!    empty set with a warning; it never panics and never blocks a like.
//! 2. **Atomic writes**: file persistence uses the write-rename pattern.
//! 3. **Marking is sticky**: `mark_liked` is idempotent; un-liking does
//!    not exist in this system.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Errors raised by like-store persistence.
#[derive(Debug)]
pub enum StoreError {
    /// I/O failure during file operations.
    Io(std::io::Error),
    /// Serialization or deserialization failure.
    Serialization(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "I/O error: {e}"),
            StoreError::Serialization(msg) => write!(f, "serialization error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Serialization(_) => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

/// Result type for like-store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// The injectable "already liked" capability.
pub trait LikeStore {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Whether this browser/profile has already liked the item.
    fn is_liked(&self, item_id: &str) -> bool;

    /// Record a like for the item. Idempotent.
    fn mark_liked(&mut self, item_id: &str) -> StoreResult<()>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Memory store (always available)
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory like store for tests and ephemeral hosts.
#[derive(Debug, Default)]
pub struct MemoryLikeStore {
    liked: BTreeSet<String>,
}

impl MemoryLikeStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with liked item ids.
    #[must_use]
    pub fn with_liked<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            liked: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of liked items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.liked.len()
    }

    /// Whether nothing has been liked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.liked.is_empty()
    }
}

impl LikeStore for MemoryLikeStore {
    fn name(&self) -> &str {
        "MemoryLikeStore"
    }

    fn is_liked(&self, item_id: &str) -> bool {
        self.liked.contains(item_id)
    }

    fn mark_liked(&mut self, item_id: &str) -> StoreResult<()> {
        self.liked.insert(item_id.to_string());
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File store
// ─────────────────────────────────────────────────────────────────────────────

/// On-disk format for the like file.
#[derive(Serialize, Deserialize)]
struct LikesFile {
    /// Format version for future migrations.
    format_version: u32,
    /// Liked item ids, sorted for stable diffs.
    liked: BTreeSet<String>,
}

impl LikesFile {
    const FORMAT_VERSION: u32 = 1;
}

/// File-backed like store using JSON with atomic write-rename.
///
/// The file does not need to exist; it is created on the first like. A
/// corrupt file is treated as empty (the worst outcome is a visitor being
/// able to like an item a second time).
pub struct FileLikeStore {
    path: PathBuf,
    liked: BTreeSet<String>,
}

impl FileLikeStore {
    /// Open a like store at the given path, loading any existing likes.
    #[must_use]
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let liked = match Self::read_file(&path) {
            Ok(liked) => liked,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "like store unreadable, starting empty");
                BTreeSet::new()
            }
        };
        Self { path, liked }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(path: &Path) -> StoreResult<BTreeSet<String>> {
        if !path.exists() {
            return Ok(BTreeSet::new());
        }
        let bytes = fs::read(path)?;
        let file: LikesFile = serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(file.liked)
    }

    /// Persist the current set with write-then-rename.
    fn flush(&self) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = LikesFile {
            format_version: LikesFile::FORMAT_VERSION,
            liked: self.liked.clone(),
        };
        let payload = serde_json::to_vec_pretty(&file)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let mut tmp = self.path.clone();
        tmp.set_extension("json.tmp");
        {
            let mut out = fs::File::create(&tmp)?;
            out.write_all(&payload)?;
            out.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), likes = self.liked.len(), "like store flushed");
        Ok(())
    }
}

impl LikeStore for FileLikeStore {
    fn name(&self) -> &str {
        "FileLikeStore"
    }

    fn is_liked(&self, item_id: &str) -> bool {
        self.liked.contains(item_id)
    }

    fn mark_liked(&mut self, item_id: &str) -> StoreResult<()> {
        if !self.liked.insert(item_id.to_string()) {
            return Ok(());
        }
        self.flush()
    }
}

impl fmt::Debug for FileLikeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileLikeStore")
            .field("path", &self.path)
            .field("likes", &self.liked.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_marks_and_checks() {
        let mut store = MemoryLikeStore::new();
        assert!(!store.is_liked("a"));
        store.mark_liked("a").unwrap();
        assert!(store.is_liked("a"));
        // Idempotent.
        store.mark_liked("a").unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn memory_store_with_liked() {
        let store = MemoryLikeStore::with_liked(["a", "b"]);
        assert!(store.is_liked("a"));
        assert!(store.is_liked("b"));
        assert!(!store.is_liked("c"));
    }

    #[test]
    fn file_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("likes.json");

        let mut store = FileLikeStore::open(&path);
        assert!(!store.is_liked("a"));
        store.mark_liked("a").unwrap();
        store.mark_liked("b").unwrap();

        let reopened = FileLikeStore::open(&path);
        assert!(reopened.is_liked("a"));
        assert!(reopened.is_liked("b"));
        assert!(!reopened.is_liked("c"));
    }

    #[test]
    fn file_store_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileLikeStore::open(dir.path().join("absent.json"));
        assert!(!store.is_liked("a"));
    }

    #[test]
    fn file_store_corrupt_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("likes.json");
        fs::write(&path, b"{ not json").unwrap();

        let mut store = FileLikeStore::open(&path);
        assert!(!store.is_liked("a"));
        // A fresh like replaces the corrupt file.
        store.mark_liked("a").unwrap();
        let reopened = FileLikeStore::open(&path);
        assert!(reopened.is_liked("a"));
    }

    #[test]
    fn file_store_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("likes.json");
        let mut store = FileLikeStore::open(&path);
        store.mark_liked("a").unwrap();
        assert!(path.exists());
    }
}
