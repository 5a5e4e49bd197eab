//! Loading and rendering tutorial pages.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use shelf_renderer::{RenderedDocument, render_markdown};

/// Error reading a tutorial source file.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The file could not be read or is not valid UTF-8.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// Page path being loaded.
        url_path: String,
        /// File on disk.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    /// Page path the failed request was for.
    pub fn url_path(&self) -> &str {
        match self {
            Self::Read { url_path, .. } => url_path,
        }
    }
}

/// A rendered Markdown page.
#[derive(Debug)]
pub(crate) struct Article {
    /// Page path.
    pub(crate) url_path: String,
    /// Rendered content and heading model.
    pub(crate) document: RenderedDocument,
    /// Source modification time, when the filesystem reports one.
    pub(crate) modified: Option<SystemTime>,
}

/// Read and render the Markdown file behind a page.
///
/// Render warnings are logged when `verbose` is set.
pub(crate) async fn load_article(
    file_path: &Path,
    url_path: &str,
    verbose: bool,
) -> Result<Article, FetchError> {
    let read_err = |source| FetchError::Read {
        url_path: url_path.to_owned(),
        path: file_path.to_path_buf(),
        source,
    };

    let markdown = tokio::fs::read_to_string(file_path)
        .await
        .map_err(read_err)?;
    let modified = tokio::fs::metadata(file_path)
        .await
        .and_then(|m| m.modified())
        .ok();

    let document = render_markdown(&markdown, url_path);

    if verbose {
        for warning in &document.warnings {
            tracing::warn!(path = %url_path, warning = %warning, "Page render warning");
        }
    }

    Ok(Article {
        url_path: url_path.to_owned(),
        document,
        modified,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn test_load_article() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("intro.md");
        fs::write(&path, "# Intro\n\n[next](setup.md)\n").unwrap();

        let article = load_article(&path, "go/intro", false).await.unwrap();

        assert_eq!(article.url_path, "go/intro");
        assert_eq!(article.document.title.as_deref(), Some("Intro"));
        assert!(article.document.html.contains("/?page=go/setup"));
        assert!(article.modified.is_some());
    }

    #[tokio::test]
    async fn test_load_missing_article() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("gone.md");

        let err = load_article(&path, "gone", true).await.unwrap_err();

        assert_eq!(err.url_path(), "gone");
        assert!(err.to_string().contains("gone.md"));
    }

    #[tokio::test]
    async fn test_load_invalid_utf8() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("binary.md");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x41]).unwrap();

        assert!(load_article(&path, "binary", false).await.is_err());
    }
}
