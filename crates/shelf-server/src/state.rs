//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use shelf_tree::Library;

use crate::preferences::{PreferenceStore, current_theme};
use crate::watcher::TutorialWatcher;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Tutorials root and cached tree scan.
    pub(crate) library: Arc<Library>,
    /// Interface preferences.
    pub(crate) preferences: Arc<dyn PreferenceStore>,
    /// Title shown in the sidebar header and browser tab.
    pub(crate) site_title: String,
    /// Enable verbose output (show render warnings).
    pub(crate) verbose: bool,
    /// Application version for cache invalidation.
    pub(crate) version: String,
    /// Filesystem watcher keeping the tree cache fresh (if caching is enabled).
    /// Held so the watch lives as long as the server.
    #[allow(dead_code)]
    pub(crate) watcher: Option<TutorialWatcher>,
}

impl AppState {
    /// Theme to render pages with.
    pub(crate) fn theme(&self) -> String {
        current_theme(self.preferences.as_ref())
    }
}
