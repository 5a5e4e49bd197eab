//! Validated page paths.
//!
//! Page paths come from the `?page=` query parameter and from raw file URLs.
//! Every path is parsed into a [`PagePath`] before it is joined to the
//! tutorials root, so traversal attempts never reach the filesystem.

use std::fmt;
use std::path::{Path, PathBuf};

/// Reason a page path was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PagePathError {
    /// Path is empty.
    #[error("page path is empty")]
    Empty,
    /// Path starts with `/`.
    #[error("page path must be relative: {0}")]
    Absolute(String),
    /// Path contains an empty segment (`a//b`, trailing `/`).
    #[error("page path has an empty segment: {0}")]
    EmptySegment(String),
    /// Path contains `.`, `..` or a hidden segment.
    #[error("page path has a forbidden segment: {0}")]
    ForbiddenSegment(String),
    /// Path contains a backslash or NUL byte.
    #[error("page path has a forbidden character: {0:?}")]
    ForbiddenChar(String),
}

/// A slash-joined page path that is safe to join to the tutorials root.
///
/// Every segment is non-empty, does not start with `.` and contains no
/// backslash or NUL byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PagePath(String);

impl PagePath {
    /// Parse and validate a page path.
    ///
    /// # Errors
    ///
    /// Returns [`PagePathError`] if the path could escape the tutorials root
    /// or names a hidden entry.
    pub fn parse(raw: &str) -> Result<Self, PagePathError> {
        if raw.is_empty() {
            return Err(PagePathError::Empty);
        }
        if raw.contains('\\') || raw.contains('\0') {
            return Err(PagePathError::ForbiddenChar(raw.to_owned()));
        }
        if raw.starts_with('/') {
            return Err(PagePathError::Absolute(raw.to_owned()));
        }
        for segment in raw.split('/') {
            if segment.is_empty() {
                return Err(PagePathError::EmptySegment(raw.to_owned()));
            }
            // Covers ".", ".." and hidden names
            if segment.starts_with('.') {
                return Err(PagePathError::ForbiddenSegment(raw.to_owned()));
            }
        }
        Ok(Self(raw.to_owned()))
    }

    /// The path as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// Join the path to a root directory segment by segment.
    pub fn join_to(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        for segment in self.segments() {
            path.push(segment);
        }
        path
    }
}

impl fmt::Display for PagePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PagePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
