//! Heading records and page-wide id assignment.

use std::collections::HashSet;

use pulldown_cmark::HeadingLevel;

use crate::slug::slugify;

/// One rendered heading.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HeadingRecord {
    /// Heading level (1-6).
    pub level: u8,
    /// Plain text content.
    pub text: String,
    /// Anchor id. `None` when the text has no slug and no explicit id was set.
    pub id: Option<String>,
}

impl HeadingRecord {
    /// Create a heading without an id.
    pub fn new(level: u8, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            id: None,
        }
    }

    /// Set an explicit id (from `{#id}` heading attributes).
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Anchor id or the empty string.
    pub fn anchor(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }
}

/// Give every heading a page-unique id, in document order.
///
/// A non-blank id already on the heading is kept as the candidate, otherwise
/// the slug of its text is used. A candidate seen earlier on the page gets
/// the first free `-1`, `-2`, ... suffix. Headings without a candidate stay
/// without an id.
///
/// Running this again on its own output changes nothing.
pub fn assign_heading_ids(headings: &mut [HeadingRecord]) {
    let mut used = HashSet::new();

    for heading in headings {
        let candidate = match heading.id.as_deref() {
            Some(id) if !id.trim().is_empty() => id.to_owned(),
            _ => slugify(&heading.text),
        };

        if candidate.is_empty() {
            heading.id = None;
            continue;
        }

        let mut unique = candidate.clone();
        let mut suffix = 1;
        while used.contains(&unique) {
            unique = format!("{candidate}-{suffix}");
            suffix += 1;
        }

        used.insert(unique.clone());
        heading.id = Some(unique);
    }
}

/// Convert heading level enum to number (1-6).
#[must_use]
pub(crate) fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn ids(headings: &[HeadingRecord]) -> Vec<Option<&str>> {
        headings.iter().map(|h| h.id.as_deref()).collect()
    }

    #[test]
    fn test_duplicate_headings_get_suffixes() {
        let mut headings = vec![
            HeadingRecord::new(2, "Intro"),
            HeadingRecord::new(2, "Intro"),
            HeadingRecord::new(2, "Intro"),
        ];

        assign_heading_ids(&mut headings);

        assert_eq!(
            ids(&headings),
            vec![Some("intro"), Some("intro-1"), Some("intro-2")]
        );
    }

    #[test]
    fn test_suffix_skips_taken_ids() {
        let mut headings = vec![
            HeadingRecord::new(2, "Intro 1"),
            HeadingRecord::new(2, "Intro"),
            HeadingRecord::new(2, "Intro"),
        ];

        assign_heading_ids(&mut headings);

        assert_eq!(
            ids(&headings),
            vec![Some("intro-1"), Some("intro"), Some("intro-2")]
        );
    }

    #[test]
    fn test_explicit_id_is_kept() {
        let mut headings = vec![
            HeadingRecord::new(1, "Getting Started").with_id("start"),
            HeadingRecord::new(2, "Start"),
            HeadingRecord::new(2, "Blank").with_id("  "),
        ];

        assign_heading_ids(&mut headings);

        assert_eq!(
            ids(&headings),
            vec![Some("start"), Some("start-1"), Some("blank")]
        );
    }

    #[test]
    fn test_empty_slug_stays_unassigned() {
        let mut headings = vec![HeadingRecord::new(2, "???"), HeadingRecord::new(2, "!!")];

        assign_heading_ids(&mut headings);

        assert_eq!(ids(&headings), vec![None, None]);
        assert_eq!(headings[0].anchor(), "");
    }

    #[test]
    fn test_assignment_is_idempotent() {
        let mut headings = vec![
            HeadingRecord::new(1, "Guide"),
            HeadingRecord::new(2, "Setup"),
            HeadingRecord::new(2, "Setup"),
            HeadingRecord::new(3, "Error Handling & Recovery"),
        ];

        assign_heading_ids(&mut headings);
        let first = headings.clone();
        assign_heading_ids(&mut headings);

        assert_eq!(headings, first);
        assert_eq!(
            headings[3].id.as_deref(),
            Some("error-handling-and-recovery")
        );
    }

    #[test]
    fn test_heading_level_to_num() {
        assert_eq!(heading_level_to_num(HeadingLevel::H1), 1);
        assert_eq!(heading_level_to_num(HeadingLevel::H4), 4);
        assert_eq!(heading_level_to_num(HeadingLevel::H6), 6);
    }
}
