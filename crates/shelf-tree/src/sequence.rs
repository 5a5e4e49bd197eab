//! Flattened reading order and previous/next links.

use serde::Serialize;

use crate::entry::{EntryKind, TreeEntry, display_title};

/// One markdown page in reading order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TutorialEntry {
    /// Page path of the file.
    pub page: String,
    /// Display title of the last path segment.
    pub title: String,
    /// Display titles of the enclosing folders, outermost first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub folders: Vec<String>,
}

impl TutorialEntry {
    /// Folder labels joined with ` > ` (e.g., "Go > Concurrency").
    pub fn folder_path(&self) -> String {
        self.folders.join(" > ")
    }
}

/// Neighbours of a page in reading order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PrevNext {
    /// Page before the current one.
    pub previous: Option<TutorialEntry>,
    /// Page after the current one.
    pub next: Option<TutorialEntry>,
}

/// Flatten a tree into reading order.
///
/// At every folder the files come first, then each subfolder is walked in
/// turn. Within each group the tree's own ordering is kept.
pub fn flatten(tree: &TreeEntry) -> Vec<TutorialEntry> {
    let mut out = Vec::new();
    let mut folders = Vec::new();
    walk(tree, &mut folders, &mut out);
    out
}

fn walk(folder: &TreeEntry, folders: &mut Vec<String>, out: &mut Vec<TutorialEntry>) {
    for child in &folder.children {
        if child.kind == EntryKind::MarkdownFile {
            out.push(TutorialEntry {
                page: child.url_path.clone(),
                title: display_title(&child.name),
                folders: folders.clone(),
            });
        }
    }
    for child in &folder.children {
        if child.is_folder() {
            folders.push(display_title(&child.name));
            walk(child, folders, out);
            folders.pop();
        }
    }
}

/// Find the neighbours of `page` in a flattened sequence.
///
/// Both sides are `None` if the page is not in the sequence.
pub fn prev_next(sequence: &[TutorialEntry], page: &str) -> PrevNext {
    let Some(index) = sequence.iter().position(|entry| entry.page == page) else {
        return PrevNext::default();
    };

    PrevNext {
        previous: index
            .checked_sub(1)
            .and_then(|i| sequence.get(i))
            .cloned(),
        next: sequence.get(index + 1).cloned(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn pages(sequence: &[TutorialEntry]) -> Vec<&str> {
        sequence.iter().map(|e| e.page.as_str()).collect()
    }

    fn docs_tree() -> TreeEntry {
        // docs/{a.md, b/{c.md}}
        TreeEntry::folder("", "").with_children(vec![
            TreeEntry::folder("b", "b").with_children(vec![TreeEntry::file("c", "b/c")]),
            TreeEntry::file("a", "a"),
        ])
    }

    #[test]
    fn test_flatten_files_before_folders() {
        let sequence = flatten(&docs_tree());
        assert_eq!(pages(&sequence), vec!["a", "b/c"]);
    }

    #[test]
    fn test_flatten_nested_order() {
        let tree = TreeEntry::folder("", "").with_children(vec![
            TreeEntry::folder("go", "go").with_children(vec![
                TreeEntry::folder("concurrency", "go/concurrency").with_children(vec![
                    TreeEntry::file("channels", "go/concurrency/channels"),
                    TreeEntry::file("mutex", "go/concurrency/mutex"),
                ]),
                TreeEntry::file("intro", "go/intro"),
            ]),
            TreeEntry::folder("rust", "rust")
                .with_children(vec![TreeEntry::file("ownership", "rust/ownership")]),
            TreeEntry::file("welcome", "welcome"),
        ]);

        let sequence = flatten(&tree);

        assert_eq!(
            pages(&sequence),
            vec![
                "welcome",
                "go/intro",
                "go/concurrency/channels",
                "go/concurrency/mutex",
                "rust/ownership",
            ]
        );
        assert_eq!(sequence[2].title, "Channels");
        assert_eq!(sequence[2].folder_path(), "Go > Concurrency");
        assert_eq!(sequence[0].folder_path(), "");
    }

    #[test]
    fn test_prev_next_at_end() {
        let sequence = flatten(&docs_tree());
        let links = prev_next(&sequence, "b/c");

        assert_eq!(links.previous.map(|e| e.page), Some("a".to_owned()));
        assert_eq!(links.next, None);
    }

    #[test]
    fn test_prev_next_at_start() {
        let sequence = flatten(&docs_tree());
        let links = prev_next(&sequence, "a");

        assert_eq!(links.previous, None);
        assert_eq!(links.next.map(|e| e.page), Some("b/c".to_owned()));
    }

    #[test]
    fn test_prev_next_unknown_page() {
        let sequence = flatten(&docs_tree());
        assert_eq!(prev_next(&sequence, "b"), PrevNext::default());
        assert_eq!(prev_next(&[], "a"), PrevNext::default());
    }
}
