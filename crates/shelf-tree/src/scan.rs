//! Tutorial discovery by filesystem walking.
//!
//! Every directory level is read once, hidden entries (leading `.`) are
//! dropped, directories become folders and files with the exact extension
//! `md` become pages. Anything else is invisible to navigation.
//!
//! Scans fail open: a directory that cannot be read contributes an empty
//! listing instead of aborting the whole tree.

use std::fs;
use std::path::Path;

use crate::entry::{EntryKind, TreeEntry, join_url};

/// Scan the tutorials root and return it as a folder entry.
///
/// The root entry has an empty name and page path. Returns an empty root if
/// the directory is missing or unreadable.
pub fn scan_tree(root: &Path) -> TreeEntry {
    TreeEntry::folder("", "").with_children(scan_children(root, ""))
}

/// Read a single directory level without recursing.
///
/// Used for folder listing pages, which only show immediate children.
pub fn list_folder(dir: &Path, url_path: &str) -> Vec<TreeEntry> {
    read_level(dir, url_path)
}

fn scan_children(dir: &Path, url_prefix: &str) -> Vec<TreeEntry> {
    let mut entries = read_level(dir, url_prefix);
    for entry in &mut entries {
        if entry.is_folder() {
            entry.children = scan_children(&dir.join(&entry.name), &entry.url_path);
        }
    }
    entries
}

fn read_level(dir: &Path, url_prefix: &str) -> Vec<TreeEntry> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "Skipping unreadable directory");
            return Vec::new();
        }
    };

    let mut folders = Vec::new();
    let mut files = Vec::new();

    for entry in entries.filter_map(Result::ok) {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            let url_path = join_url(url_prefix, &name);
            folders.push(TreeEntry::folder(name, url_path));
        } else if let Some(stem) = markdown_stem(&name) {
            let url_path = join_url(url_prefix, stem);
            files.push(TreeEntry::file(stem, url_path));
        }
    }

    folders.sort_by(|a, b| a.name.cmp(&b.name));
    files.sort_by(|a, b| a.name.cmp(&b.name));

    folders.extend(files);
    debug_assert!(
        folders
            .windows(2)
            .all(|w| !(w[0].kind == EntryKind::MarkdownFile && w[1].is_folder()))
    );
    folders
}

/// Return the file name without `.md` if the extension is exactly `md`.
fn markdown_stem(name: &str) -> Option<&str> {
    name.strip_suffix(".md").filter(|stem| !stem.is_empty())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn names(entries: &[TreeEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_markdown_stem() {
        assert_eq!(markdown_stem("intro.md"), Some("intro"));
        assert_eq!(markdown_stem("a.b.md"), Some("a.b"));
        assert_eq!(markdown_stem("intro.MD"), None);
        assert_eq!(markdown_stem("intro.markdown"), None);
        assert_eq!(markdown_stem("notes.txt"), None);
    }

    #[test]
    fn test_scan_orders_folders_before_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("a.md"), "# A").unwrap();
        fs::write(root.join("Z.md"), "# Z").unwrap();
        fs::create_dir(root.join("zeta")).unwrap();
        fs::create_dir(root.join("Beta")).unwrap();
        fs::create_dir(root.join("alpha")).unwrap();

        let tree = scan_tree(root);

        // Byte-wise compare puts uppercase before lowercase
        assert_eq!(names(&tree.children), vec!["Beta", "alpha", "zeta", "Z", "a"]);
        assert!(tree.children[..3].iter().all(TreeEntry::is_folder));
    }

    #[test]
    fn test_scan_builds_url_paths() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        let nested = root.join("go").join("concurrency");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("channels.md"), "# Channels").unwrap();

        let tree = scan_tree(root);

        let go = &tree.children[0];
        assert_eq!(go.url_path, "go");
        let concurrency = &go.children[0];
        assert_eq!(concurrency.url_path, "go/concurrency");
        let channels = &concurrency.children[0];
        assert_eq!(channels.kind, EntryKind::MarkdownFile);
        assert_eq!(channels.name, "channels");
        assert_eq!(channels.url_path, "go/concurrency/channels");
    }

    #[test]
    fn test_scan_skips_hidden_and_non_markdown() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::write(root.join(".hidden.md"), "# Hidden").unwrap();
        fs::create_dir(root.join(".git")).unwrap();
        fs::write(root.join(".git").join("HEAD.md"), "ref").unwrap();
        fs::write(root.join("diagram.png"), [0u8; 4]).unwrap();
        fs::write(root.join("README.MD"), "# Upper").unwrap();
        fs::write(root.join("visible.md"), "# Visible").unwrap();

        let tree = scan_tree(root);

        assert_eq!(names(&tree.children), vec!["visible"]);
    }

    #[test]
    fn test_scan_missing_dir_is_empty() {
        let tree = scan_tree(Path::new("/nonexistent/tutorials"));
        assert!(tree.children.is_empty());
        assert_eq!(tree.url_path, "");
    }

    #[test]
    fn test_scan_is_deterministic() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        for name in ["c.md", "a.md", "b.md"] {
            fs::write(root.join(name), "x").unwrap();
        }
        fs::create_dir(root.join("m")).unwrap();
        fs::write(root.join("m").join("x.md"), "x").unwrap();

        assert_eq!(scan_tree(root), scan_tree(root));
    }

    #[test]
    fn test_list_folder_does_not_recurse() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("go").join("deep")).unwrap();
        fs::write(root.join("go").join("deep").join("x.md"), "x").unwrap();
        fs::write(root.join("go").join("intro.md"), "x").unwrap();

        let listing = list_folder(&root.join("go"), "go");

        assert_eq!(names(&listing), vec!["deep", "intro"]);
        assert!(listing[0].children.is_empty());
        assert_eq!(listing[1].url_path, "go/intro");
    }
}
