//! Filesystem watcher for the tutorials root.
//!
//! Invalidates the [`Library`] snapshot when files or folders are created,
//! removed or renamed, and whenever the backend reports dropped events or a
//! watch error. Content edits need no invalidation because pages are read on
//! every request.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use notify::event::{Flag, ModifyKind};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use shelf_tree::Library;
use tokio::sync::mpsc;

/// Watches the tutorials root and keeps the tree cache fresh.
pub(crate) struct TutorialWatcher {
    root: PathBuf,
    _watcher: RecommendedWatcher,
}

impl TutorialWatcher {
    /// Start watching the library root.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the file watcher cannot be created.
    pub(crate) fn start(library: Arc<Library>) -> Result<Self, notify::Error> {
        let root = library
            .root()
            .canonicalize()
            .unwrap_or_else(|_| library.root().to_path_buf());
        let (tx, mut rx) = mpsc::channel::<Event>(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            let event = res.unwrap_or_else(|err| {
                tracing::warn!(error = %err, "File watcher error, rescanning tutorials");
                Event::new(EventKind::Other).set_flag(Flag::Rescan)
            });
            // Callback is sync
            let _ = tx.blocking_send(event);
        })?;
        watcher.watch(&root, RecursiveMode::Recursive)?;

        let task_root = root.clone();
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                if invalidates_tree(&event, &task_root) {
                    library.invalidate();
                    tracing::debug!(paths = ?event.paths, kind = ?event.kind, "Tutorial tree changed");
                }
            }
        });

        Ok(Self {
            root,
            _watcher: watcher,
        })
    }

    /// Directory being watched.
    pub(crate) fn root(&self) -> &Path {
        &self.root
    }
}

/// Check whether an event can add, remove or rename a visible entry.
///
/// Rescan requests and unclassified events always count: the backend may
/// have dropped the events that described the change.
fn invalidates_tree(event: &Event, root: &Path) -> bool {
    if event.need_rescan() || matches!(event.kind, EventKind::Other) {
        return true;
    }
    let relevant_kind = matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Remove(_) | EventKind::Modify(ModifyKind::Name(_))
    );
    relevant_kind && event.paths.iter().any(|p| !is_hidden(p, root))
}

/// Check whether a path lies under a dot-prefixed entry of the root.
fn is_hidden(path: &Path, root: &Path) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative.components().any(|c| match c {
        Component::Normal(name) => name.to_string_lossy().starts_with('.'),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use notify::event::{CreateKind, DataChange, RemoveKind, RenameMode};

    use super::*;

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn test_structure_changes() {
        let root = Path::new("/srv/tutorials");

        assert!(invalidates_tree(
            &event(EventKind::Create(CreateKind::File), "/srv/tutorials/go/new.md"),
            root
        ));
        assert!(invalidates_tree(
            &event(EventKind::Remove(RemoveKind::Folder), "/srv/tutorials/go"),
            root
        ));
        assert!(invalidates_tree(
            &event(
                EventKind::Modify(ModifyKind::Name(RenameMode::Any)),
                "/srv/tutorials/a.md"
            ),
            root
        ));
    }

    #[test]
    fn test_rescan_and_overflow_invalidate() {
        let root = Path::new("/srv/tutorials");

        assert!(invalidates_tree(&Event::new(EventKind::Other), root));
        let rescan = event(
            EventKind::Modify(ModifyKind::Data(DataChange::Content)),
            "/srv/tutorials/.git/index",
        )
        .set_flag(Flag::Rescan);
        assert!(invalidates_tree(&rescan, root));
    }

    #[test]
    fn test_content_edits_ignored() {
        let root = Path::new("/srv/tutorials");
        let edit = event(
            EventKind::Modify(ModifyKind::Data(DataChange::Content)),
            "/srv/tutorials/a.md",
        );
        assert!(!invalidates_tree(&edit, root));
    }

    #[test]
    fn test_hidden_paths_ignored() {
        let root = Path::new("/srv/tutorials");
        let swap = event(
            EventKind::Create(CreateKind::File),
            "/srv/tutorials/go/.intro.md.swp",
        );
        assert!(!invalidates_tree(&swap, root));
        assert!(is_hidden(Path::new("/srv/tutorials/.git/index"), root));
        assert!(!is_hidden(Path::new("/srv/tutorials/go/intro.md"), root));
    }

    #[tokio::test]
    async fn test_start_watcher() {
        let temp_dir = tempfile::tempdir().unwrap();
        let library = Arc::new(Library::new(temp_dir.path().to_path_buf(), true));

        let watcher = TutorialWatcher::start(Arc::clone(&library)).unwrap();

        assert_eq!(watcher.root(), temp_dir.path().canonicalize().unwrap());
    }
}
