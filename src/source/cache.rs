//! Process-wide cache of source indexes.
//!
//! Every failed assertion asks about one line of one file, and a test file usually contains
//! many assertions, so each file is parsed once and kept for the rest of the run.
//!
//! ## Concurrency
//!
//! The map lock is held only long enough to fetch or insert the slot for a path. The build
//! itself runs inside the slot's `OnceLock`, so:
//!
//! - a file is built at most once per cache,
//! - concurrent first lookups of the same file wait for that single build,
//! - lookups of other files are never blocked by it.
//!
//! A file that cannot be read or parsed is cached as unavailable and never retried.
//!
//! Entries are keyed by the path exactly as the caller reported it. Resolving that path
//! on disk ([`locate`]) happens once, inside the build, so later lookups touch only the
//! map.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use super::index::{RecordedCall, SourceIndex};

type Slot = Arc<OnceLock<Option<Arc<SourceIndex>>>>;

static GLOBAL: OnceLock<SourceCache> = OnceLock::new();

/// Memoized `path → SourceIndex` table.
#[derive(Default)]
pub struct SourceCache {
    entries: Mutex<HashMap<PathBuf, Slot>>,
    builds: AtomicUsize,
}

impl SourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cache shared by every harness in the process.
    pub fn global() -> &'static SourceCache {
        GLOBAL.get_or_init(SourceCache::new)
    }

    /// Number of index builds attempted so far (successful or not).
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }

    /// Index for `path`, building it on first use.
    ///
    /// `None` means the file could not be read or parsed, now or on an earlier attempt.
    pub fn index(&self, path: impl AsRef<Path>) -> Option<Arc<SourceIndex>> {
        let reported = path.as_ref();
        let slot = {
            let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            match entries.get(reported) {
                Some(slot) => Arc::clone(slot),
                None => Arc::clone(entries.entry(reported.to_path_buf()).or_default()),
            }
        };

        slot.get_or_init(|| {
            self.builds.fetch_add(1, Ordering::Relaxed);
            let path = locate(reported);
            tracing::debug!(path = %path.display(), "source cache miss");
            match SourceIndex::load(&path) {
                Ok(index) => Some(Arc::new(index)),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "source unavailable for assertion details");
                    None
                }
            }
        })
        .clone()
    }

    /// Argument text to expand into a failure message for the call on `line`.
    pub fn resolve_call_line(&self, path: impl AsRef<Path>, line: usize) -> Option<String> {
        self.index(path)?.arguments_at(line).map(str::to_string)
    }

    /// Comment starting on `line`, trimmed of markers and whitespace.
    pub fn resolve_comment(&self, path: impl AsRef<Path>, line: usize) -> Option<String> {
        self.index(path)?.comment_at(line).map(str::to_string)
    }

    /// The full recorded call on `line`.
    pub fn call_at(&self, path: impl AsRef<Path>, line: usize) -> Option<RecordedCall> {
        self.index(path)?.call_at(line).cloned()
    }
}

/// Resolve a caller-reported file name to the file on disk.
///
/// `Location::file()` is relative to the directory rustc was invoked from (the workspace
/// root), while tests run from the package root. Try the path as given, then against
/// `CARGO_MANIFEST_DIR` and each of its ancestors.
pub fn locate(file: &Path) -> PathBuf {
    let found = if file.is_absolute() || file.exists() {
        Some(file.to_path_buf())
    } else {
        std::env::var_os("CARGO_MANIFEST_DIR").and_then(|dir| {
            Path::new(&dir)
                .ancestors()
                .map(|base| base.join(file))
                .find(|candidate| candidate.exists())
        })
    };

    match found {
        Some(path) => path.canonicalize().unwrap_or(path),
        None => file.to_path_buf(),
    }
}
