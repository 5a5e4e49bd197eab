//! Sidebar model built from the tutorial tree.

use serde::Serialize;

use crate::entry::{EntryKind, TreeEntry, display_title};

/// One node of the rendered sidebar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarNode {
    /// Node kind.
    pub kind: EntryKind,
    /// Display label.
    pub label: String,
    /// Page path the node links to.
    pub url_path: String,
    /// Folder is open because the current page lies inside it.
    pub expanded: bool,
    /// File is the current page.
    pub active: bool,
    /// Child nodes (folders only).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SidebarNode>,
}

/// Build the sidebar for `current`, the page path being viewed.
///
/// Folders are expanded when `current` is the folder itself or lies under
/// it. The match is by whole segments, so `go` does not expand for `golang`.
pub fn build_sidebar(tree: &TreeEntry, current: &str) -> Vec<SidebarNode> {
    tree.children
        .iter()
        .map(|entry| build_node(entry, current))
        .collect()
}

fn build_node(entry: &TreeEntry, current: &str) -> SidebarNode {
    match entry.kind {
        EntryKind::Folder => SidebarNode {
            kind: EntryKind::Folder,
            label: display_title(&entry.name),
            url_path: entry.url_path.clone(),
            expanded: is_within(current, &entry.url_path),
            active: false,
            children: entry
                .children
                .iter()
                .map(|child| build_node(child, current))
                .collect(),
        },
        EntryKind::MarkdownFile => SidebarNode {
            kind: EntryKind::MarkdownFile,
            label: display_title(&entry.name),
            url_path: entry.url_path.clone(),
            expanded: false,
            active: entry.url_path == current,
            children: Vec::new(),
        },
    }
}

/// Check whether `current` equals `folder` or lies under it.
fn is_within(current: &str, folder: &str) -> bool {
    current
        .strip_prefix(folder)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}
