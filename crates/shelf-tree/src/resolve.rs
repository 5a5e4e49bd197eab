//! Page resolution against the tutorials root.

use std::path::{Path, PathBuf};

use crate::page_path::PagePath;

/// Page name that selects the home view.
pub const HOME_PAGE: &str = "home";

/// What a requested page path refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedPage {
    /// The home view. Not backed by the filesystem.
    Home,
    /// A markdown file.
    MarkdownPage {
        /// Absolute path of the `.md` file.
        file_path: PathBuf,
        /// Page path that was requested.
        url_path: String,
    },
    /// A directory, shown as a folder listing.
    FolderPage {
        /// Absolute path of the directory.
        folder_path: PathBuf,
        /// Page path that was requested.
        url_path: String,
    },
    /// Neither a file nor a directory, or an invalid path.
    NotFound,
}

impl ResolvedPage {
    /// Page path of the resolved page, if any.
    pub fn url_path(&self) -> Option<&str> {
        match self {
            Self::MarkdownPage { url_path, .. } | Self::FolderPage { url_path, .. } => {
                Some(url_path)
            }
            Self::Home | Self::NotFound => None,
        }
    }
}

/// Resolve a requested page against the tutorials root.
///
/// `None`, an empty string and `"home"` select [`ResolvedPage::Home`].
/// Invalid paths resolve to [`ResolvedPage::NotFound`] without touching the
/// filesystem. A file `<page>.md` wins over a directory `<page>`.
pub fn resolve(root: &Path, page: Option<&str>) -> ResolvedPage {
    let raw = match page {
        None => return ResolvedPage::Home,
        Some(raw) if raw.is_empty() || raw == HOME_PAGE => return ResolvedPage::Home,
        Some(raw) => raw,
    };

    let path = match PagePath::parse(raw) {
        Ok(path) => path,
        Err(e) => {
            tracing::debug!(page = raw, error = %e, "Rejected page path");
            return ResolvedPage::NotFound;
        }
    };

    let base = path.join_to(root);

    let mut file_path = base.clone().into_os_string();
    file_path.push(".md");
    let file_path = PathBuf::from(file_path);
    if file_path.is_file() {
        return ResolvedPage::MarkdownPage {
            file_path,
            url_path: path.to_string(),
        };
    }

    if base.is_dir() {
        return ResolvedPage::FolderPage {
            folder_path: base,
            url_path: path.to_string(),
        };
    }

    ResolvedPage::NotFound
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    fn fixture() -> tempfile::TempDir {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("go").join("concurrency")).unwrap();
        fs::write(root.join("go").join("concurrency").join("channels.md"), "# Channels").unwrap();
        fs::write(root.join("intro.md"), "# Intro").unwrap();
        // File and directory with the same name
        fs::write(root.join("rust.md"), "# Rust").unwrap();
        fs::create_dir(root.join("rust")).unwrap();
        temp_dir
    }

    #[test]
    fn test_resolve_home() {
        let temp_dir = fixture();
        assert_eq!(resolve(temp_dir.path(), None), ResolvedPage::Home);
        assert_eq!(resolve(temp_dir.path(), Some("")), ResolvedPage::Home);
        assert_eq!(resolve(temp_dir.path(), Some("home")), ResolvedPage::Home);
    }

    #[test]
    fn test_resolve_markdown_page() {
        let temp_dir = fixture();
        let resolved = resolve(temp_dir.path(), Some("go/concurrency/channels"));

        let ResolvedPage::MarkdownPage {
            file_path,
            url_path,
        } = resolved
        else {
            panic!("expected markdown page, got {resolved:?}");
        };
        assert!(file_path.is_file());
        assert_eq!(url_path, "go/concurrency/channels");
    }

    #[test]
    fn test_resolve_folder_page() {
        let temp_dir = fixture();
        let resolved = resolve(temp_dir.path(), Some("go/concurrency"));

        assert_eq!(
            resolved,
            ResolvedPage::FolderPage {
                folder_path: temp_dir.path().join("go").join("concurrency"),
                url_path: "go/concurrency".to_owned(),
            }
        );
    }

    #[test]
    fn test_resolve_file_wins_over_folder() {
        let temp_dir = fixture();
        let resolved = resolve(temp_dir.path(), Some("rust"));
        assert!(matches!(resolved, ResolvedPage::MarkdownPage { .. }));
    }

    #[test]
    fn test_resolve_missing_is_not_found() {
        let temp_dir = fixture();
        assert_eq!(resolve(temp_dir.path(), Some("python")), ResolvedPage::NotFound);
        assert_eq!(
            resolve(temp_dir.path(), Some("go/concurrency/mutex")),
            ResolvedPage::NotFound
        );
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let temp_dir = fixture();
        let inner = temp_dir.path().join("go");
        // Target exists relative to the inner root but escapes it
        assert_eq!(resolve(&inner, Some("../intro")), ResolvedPage::NotFound);
        assert_eq!(
            resolve(temp_dir.path(), Some("../../../etc/passwd")),
            ResolvedPage::NotFound
        );
        assert_eq!(resolve(temp_dir.path(), Some("/etc/passwd")), ResolvedPage::NotFound);
    }

    #[test]
    fn test_url_path_accessor() {
        let temp_dir = fixture();
        assert_eq!(
            resolve(temp_dir.path(), Some("intro")).url_path(),
            Some("intro")
        );
        assert_eq!(ResolvedPage::Home.url_path(), None);
    }
}
