//! In-page anchor repair and lookup.
//!
//! Hand-written Markdown often links to `#some-heading` using the slug of the
//! heading text. Once duplicate headings have been suffixed, or a heading
//! carries an explicit id, those links no longer match. [`AnchorIndex`]
//! rewrites such links to the final id of the heading they were meant for.

use std::collections::{HashMap, HashSet};

use percent_encoding::percent_decode_str;

use crate::heading::HeadingRecord;
use crate::slug::slugify;

/// Prefix some renderers add to generated heading ids.
pub const USER_CONTENT_PREFIX: &str = "user-content-";

/// Lookup tables built from a page's final heading ids.
pub struct AnchorIndex {
    ids: HashSet<String>,
    /// Slug of heading text to final id. Later headings win.
    by_slug: HashMap<String, String>,
}

impl AnchorIndex {
    /// Build the index from headings with their final ids.
    pub fn new(headings: &[HeadingRecord]) -> Self {
        let mut ids = HashSet::new();
        let mut by_slug = HashMap::new();
        for heading in headings {
            if let Some(id) = &heading.id {
                ids.insert(id.clone());
            }
            by_slug.insert(slugify(&heading.text), heading.anchor().to_owned());
        }
        Self { ids, by_slug }
    }

    /// Check whether an id exists on the page, directly or prefixed.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id) || self.ids.contains(&format!("{USER_CONTENT_PREFIX}{id}"))
    }

    /// Rewrite an in-page href (`#...`) whose target is missing.
    ///
    /// Returns `None` when the href should stay as written: it is not an
    /// in-page link, its target exists, or no heading slug matches.
    pub fn rewrite_href(&self, href: &str) -> Option<String> {
        let fragment = href.strip_prefix('#')?;
        let id = decode_fragment(fragment);
        if self.contains(&id) {
            return None;
        }
        self.by_slug
            .get(id.as_str())
            .filter(|mapped| !mapped.is_empty())
            .map(|mapped| format!("#{mapped}"))
    }
}

/// Percent-decode a URL fragment.
pub(crate) fn decode_fragment(fragment: &str) -> String {
    percent_decode_str(fragment).decode_utf8_lossy().into_owned()
}

/// Find the heading an anchor id refers to.
///
/// Tries the exact id, then the `user-content-` prefixed id, then the first
/// heading whose text slugifies to `id`.
pub fn resolve_anchor_target<'a>(
    headings: &'a [HeadingRecord],
    id: &str,
) -> Option<&'a HeadingRecord> {
    if id.is_empty() {
        return None;
    }

    let prefixed = format!("{USER_CONTENT_PREFIX}{id}");
    headings
        .iter()
        .find(|h| h.id.as_deref() == Some(id))
        .or_else(|| {
            headings
                .iter()
                .find(|h| h.id.as_deref() == Some(prefixed.as_str()))
        })
        .or_else(|| headings.iter().find(|h| slugify(&h.text) == id))
}
