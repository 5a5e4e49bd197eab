//! Cached view of the tutorials root.
//!
//! [`Library`] memoises the tree scan behind an atomically swappable
//! snapshot. Readers clone an `Arc` and never block on a rescan that is
//! already in progress elsewhere.
//!
//! # Thread Safety
//!
//! - `snapshot()` returns `Arc<TreeSnapshot>` (just an Arc clone when valid)
//! - reloads use double-checked locking on a dedicated mutex
//! - `invalidate()` is lock-free (atomic flag)

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::entry::TreeEntry;
use crate::listing::FolderListing;
use crate::resolve::{ResolvedPage, resolve};
use crate::scan::scan_tree;
use crate::search::{SearchHit, search};
use crate::sequence::{PrevNext, TutorialEntry, flatten, prev_next};
use crate::sidebar::{SidebarNode, build_sidebar};

/// One consistent scan of the tutorials root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeSnapshot {
    /// Scanned tree. The root entry has an empty page path.
    pub tree: TreeEntry,
    /// Markdown pages in reading order.
    pub sequence: Vec<TutorialEntry>,
}

impl TreeSnapshot {
    /// Scan `root` and flatten the result.
    pub fn scan(root: &Path) -> Self {
        let tree = scan_tree(root);
        let sequence = flatten(&tree);
        Self { tree, sequence }
    }

    /// Sidebar for the page being viewed.
    pub fn sidebar(&self, current: &str) -> Vec<SidebarNode> {
        build_sidebar(&self.tree, current)
    }

    /// Previous and next pages around `page`.
    pub fn prev_next(&self, page: &str) -> PrevNext {
        prev_next(&self.sequence, page)
    }

    /// Ranked search over page titles.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        search(&self.sequence, query)
    }
}

/// The tutorials root and its cached scan.
pub struct Library {
    root: PathBuf,
    cache_enabled: bool,
    /// Mutex for serializing reload operations.
    reload_lock: Mutex<()>,
    /// Current snapshot (atomically swappable).
    current: RwLock<Arc<TreeSnapshot>>,
    /// Cache validity flag.
    valid: AtomicBool,
}

impl Library {
    /// Create a library for `root`.
    ///
    /// With `cache_enabled` false every call to [`Library::snapshot`] rescans.
    #[must_use]
    pub fn new(root: PathBuf, cache_enabled: bool) -> Self {
        Self {
            root,
            cache_enabled,
            reload_lock: Mutex::new(()),
            current: RwLock::new(Arc::new(TreeSnapshot {
                tree: TreeEntry::folder("", ""),
                sequence: Vec::new(),
            })),
            valid: AtomicBool::new(false),
        }
    }

    /// Tutorials root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether scans are memoised.
    pub fn cache_enabled(&self) -> bool {
        self.cache_enabled
    }

    /// Current snapshot, rescanning if it was invalidated.
    pub fn snapshot(&self) -> Arc<TreeSnapshot> {
        if !self.cache_enabled {
            return Arc::new(TreeSnapshot::scan(&self.root));
        }

        // Fast path: cache valid
        if self.valid.load(Ordering::Acquire) {
            return self.current();
        }

        let _guard = self
            .reload_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Double-check after acquiring lock
        if self.valid.load(Ordering::Acquire) {
            return self.current();
        }

        let snapshot = Arc::new(TreeSnapshot::scan(&self.root));
        tracing::debug!(
            root = %self.root.display(),
            pages = snapshot.sequence.len(),
            "Scanned tutorials"
        );

        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::clone(&snapshot);
        self.valid.store(true, Ordering::Release);

        snapshot
    }

    /// Mark the cached snapshot stale.
    ///
    /// Readers holding an older `Arc<TreeSnapshot>` keep using it.
    pub fn invalidate(&self) {
        self.valid.store(false, Ordering::Release);
    }

    /// Resolve a requested page.
    pub fn resolve(&self, page: Option<&str>) -> ResolvedPage {
        resolve(&self.root, page)
    }

    /// Immediate children of a resolved folder page.
    pub fn list_folder(&self, folder_path: &Path, url_path: &str) -> FolderListing {
        FolderListing::read(folder_path, url_path)
    }

    fn current(&self) -> Arc<TreeSnapshot> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }
}
