//! Contents of a folder page.

use std::path::Path;

use serde::Serialize;

use crate::entry::{TreeEntry, display_path};
use crate::scan::list_folder;

/// Contents of a folder page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderListing {
    /// Page path of the folder.
    pub url_path: String,
    /// Heading for the listing (`go/error-handling` → `Go / Error Handling`).
    pub title: String,
    /// Immediate subfolders, name-sorted.
    pub folders: Vec<TreeEntry>,
    /// Immediate markdown files, name-sorted.
    pub files: Vec<TreeEntry>,
}

impl FolderListing {
    /// Read one level of `dir` for the folder page at `url_path`.
    pub fn read(dir: &Path, url_path: &str) -> Self {
        let (folders, files) = list_folder(dir, url_path)
            .into_iter()
            .partition(TreeEntry::is_folder);
        Self {
            url_path: url_path.to_owned(),
            title: display_path(url_path),
            folders,
            files,
        }
    }

    /// Check whether the folder has nothing to show.
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_listing_splits_folders_and_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path().join("error-handling");
        fs::create_dir_all(dir.join("advanced")).unwrap();
        fs::write(dir.join("basics.md"), "# Basics").unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let listing = FolderListing::read(&dir, "rust/error-handling");

        assert_eq!(listing.title, "Rust / Error Handling");
        assert_eq!(listing.folders.len(), 1);
        assert_eq!(listing.folders[0].url_path, "rust/error-handling/advanced");
        assert_eq!(listing.files.len(), 1);
        assert_eq!(listing.files[0].url_path, "rust/error-handling/basics");
        assert!(!listing.is_empty());
    }

    #[test]
    fn test_listing_empty_folder() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join(".keep"), "").unwrap();

        let listing = FolderListing::read(temp_dir.path(), "empty");

        assert!(listing.is_empty());
        assert_eq!(listing.title, "Empty");
    }
}
