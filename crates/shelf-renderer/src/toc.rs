//! Nested table of contents built from heading records.

use crate::heading::HeadingRecord;
use crate::slug::slugify;

/// Deepest heading level shown in the table of contents.
pub const TOC_MAX_LEVEL: u8 = 4;

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TocItem {
    /// Heading level (1-4).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor ID for linking.
    pub id: String,
    /// Nested entries.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub children: Vec<TocItem>,
}

/// Build a nested table of contents from h1-h4 headings.
///
/// Each entry nests under the closest preceding entry with a lower level, so
/// a skipped level (h2 followed by h4) still nests only one step deeper.
pub fn build_toc(headings: &[HeadingRecord]) -> Vec<TocItem> {
    let mut roots = Vec::new();
    let mut stack: Vec<TocItem> = Vec::new();

    for heading in headings.iter().filter(|h| h.level <= TOC_MAX_LEVEL) {
        let level = heading.level;
        while let Some(done) = stack.pop_if(|top| top.level >= level) {
            attach(done, &mut stack, &mut roots);
        }

        let id = match &heading.id {
            Some(id) => id.clone(),
            None => slugify(&heading.text),
        };
        stack.push(TocItem {
            level,
            title: heading.text.trim().to_owned(),
            id,
            children: Vec::new(),
        });
    }

    while let Some(done) = stack.pop() {
        attach(done, &mut stack, &mut roots);
    }

    roots
}

fn attach(item: TocItem, stack: &mut [TocItem], roots: &mut Vec<TocItem>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(item),
        None => roots.push(item),
    }
}
