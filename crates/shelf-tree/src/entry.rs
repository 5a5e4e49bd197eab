//! Tree node types shared by every navigation view.

use serde::Serialize;

/// Kind of a node in the tutorial tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// A directory.
    Folder,
    /// A `.md` file.
    MarkdownFile,
}

/// One filesystem node visible to navigation.
///
/// Folders carry their children sorted folders-first, each group ordered by
/// `name` with a byte-wise compare. Files are leaves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TreeEntry {
    /// Node kind.
    pub kind: EntryKind,
    /// Raw filesystem name, without the `.md` extension for files.
    pub name: String,
    /// Logical page path (e.g., "go/concurrency/channels"). Empty for the root.
    pub url_path: String,
    /// Child entries (always empty for files).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeEntry>,
}

impl TreeEntry {
    /// Create a folder entry.
    #[must_use]
    pub fn folder(name: impl Into<String>, url_path: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Folder,
            name: name.into(),
            url_path: url_path.into(),
            children: Vec::new(),
        }
    }

    /// Create a markdown file entry.
    #[must_use]
    pub fn file(name: impl Into<String>, url_path: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::MarkdownFile,
            name: name.into(),
            url_path: url_path.into(),
            children: Vec::new(),
        }
    }

    /// Attach children to a folder entry.
    #[must_use]
    pub fn with_children(mut self, children: Vec<TreeEntry>) -> Self {
        self.children = children;
        self
    }

    /// Check if this entry is a folder.
    pub fn is_folder(&self) -> bool {
        self.kind == EntryKind::Folder
    }

    /// Display title derived from the entry name.
    pub fn title(&self) -> String {
        display_title(&self.name)
    }
}

/// Join a page path prefix and a child name with `/`.
pub(crate) fn join_url(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}/{name}")
    }
}

/// Convert a file or folder name to a display title.
///
/// Hyphens and underscores become spaces and the first letter of every
/// word is upper-cased. The remaining letters keep their case.
///
/// # Examples
///
/// ```
/// use shelf_tree::display_title;
///
/// assert_eq!(display_title("error-handling"), "Error Handling");
/// assert_eq!(display_title("REST_api"), "REST Api");
/// ```
#[must_use]
pub fn display_title(name: &str) -> String {
    let mut title = String::with_capacity(name.len());
    let mut word_start = true;
    for c in name.chars() {
        let c = if c == '-' || c == '_' { ' ' } else { c };
        if word_start {
            title.push(c.to_ascii_uppercase());
        } else {
            title.push(c);
        }
        word_start = matches!(c, ' ' | '\t' | '\r' | '\n' | '\x0B' | '\x0C');
    }
    title
}

/// Display title for a whole page path (folder listing headings).
///
/// `go/error-handling` becomes `Go / Error Handling`.
#[must_use]
pub fn display_path(url_path: &str) -> String {
    display_title(&url_path.replace('/', " / "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_title() {
        assert_eq!(display_title("channels"), "Channels");
        assert_eq!(display_title("error-handling"), "Error Handling");
        assert_eq!(display_title("getting_started"), "Getting Started");
        assert_eq!(display_title("go"), "Go");
        assert_eq!(display_title("iOS-tips"), "IOS Tips");
        assert_eq!(display_title("a--b"), "A  B");
        assert_eq!(display_title(""), "");
    }

    #[test]
    fn test_display_path() {
        assert_eq!(display_path("go/concurrency"), "Go / Concurrency");
        assert_eq!(display_path("rust/error-handling"), "Rust / Error Handling");
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("", "go"), "go");
        assert_eq!(join_url("go", "basics"), "go/basics");
    }
}
