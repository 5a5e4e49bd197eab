//! Markdown to HTML rendering.
//!
//! The pipeline runs in a fixed order on the parsed event stream:
//! 1. collect headings
//! 2. assign page-unique heading ids
//! 3. repair in-page anchor links
//! 4. rebase relative links and images
//! 5. highlight code blocks and add copy buttons
//! 6. emit HTML
//! 7. build the table of contents
//!
//! Each stage sees the results of the previous one, and the whole pipeline
//! is a pure function of the Markdown text and page path.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};

use crate::anchors::{AnchorIndex, decode_fragment, resolve_anchor_target};
use crate::code::render_code_blocks;
use crate::heading::{HeadingRecord, assign_heading_ids, heading_level_to_num};
use crate::links::rewrite_url;
use crate::toc::{TocItem, build_toc};

/// Result of rendering a Markdown page.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenderedDocument {
    /// Rendered HTML content.
    pub html: String,
    /// Text of the first h1 or h2 heading.
    pub title: Option<String>,
    /// All headings in document order with their final ids.
    pub headings: Vec<HeadingRecord>,
    /// Table of contents (h1-h4).
    pub toc: Vec<TocItem>,
    /// Problems found while rendering, such as dangling anchors.
    pub warnings: Vec<String>,
}

impl RenderedDocument {
    /// Find the heading an anchor id refers to.
    pub fn resolve_anchor_target(&self, id: &str) -> Option<&HeadingRecord> {
        resolve_anchor_target(&self.headings, id)
    }
}

fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Render Markdown for the page at `page` (a page path like `go/intro`).
///
/// `page` is used to rebase relative links; it may be empty.
pub fn render_markdown(markdown: &str, page: &str) -> RenderedDocument {
    let mut events: Vec<Event<'_>> = Parser::new_ext(markdown, parser_options()).collect();

    let (mut headings, starts) = collect_headings(&events);
    assign_heading_ids(&mut headings);
    write_heading_ids(&mut events, &starts, &headings);

    let anchors = AnchorIndex::new(&headings);
    let mut warnings = Vec::new();
    for event in &mut events {
        match event {
            Event::Start(Tag::Link { dest_url, .. }) => {
                if dest_url.starts_with('#') {
                    if let Some(fixed) = anchors.rewrite_href(dest_url) {
                        *dest_url = CowStr::from(fixed);
                    }
                    let id = decode_fragment(&dest_url[1..]);
                    if !id.is_empty() && resolve_anchor_target(&headings, &id).is_none() {
                        warnings.push(format!("Unresolved anchor: {dest_url}"));
                    }
                } else if let Some(rebased) = rewrite_url(dest_url, page) {
                    *dest_url = CowStr::from(rebased);
                }
            }
            Event::Start(Tag::Image { dest_url, .. }) => {
                if let Some(rebased) = rewrite_url(dest_url, page) {
                    *dest_url = CowStr::from(rebased);
                }
            }
            _ => {}
        }
    }

    let events = render_code_blocks(events);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());

    let title = headings
        .iter()
        .find(|h| h.level <= 2)
        .map(|h| h.text.clone());
    let toc = build_toc(&headings);

    RenderedDocument {
        html: out,
        title,
        headings,
        toc,
        warnings,
    }
}

/// Collect heading records and the event index of each heading start.
fn collect_headings(events: &[Event<'_>]) -> (Vec<HeadingRecord>, Vec<usize>) {
    let mut headings = Vec::new();
    let mut starts = Vec::new();
    let mut current: Option<HeadingRecord> = None;

    for (index, event) in events.iter().enumerate() {
        match event {
            Event::Start(Tag::Heading { level, id, .. }) => {
                current = Some(HeadingRecord {
                    level: heading_level_to_num(*level),
                    text: String::new(),
                    id: id.as_ref().map(ToString::to_string),
                });
                starts.push(index);
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(heading) = current.as_mut() {
                    heading.text.push_str(text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(heading) = current.as_mut() {
                    heading.text.push(' ');
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(mut heading) = current.take() {
                    heading.text = heading.text.trim().to_owned();
                    headings.push(heading);
                }
            }
            _ => {}
        }
    }

    (headings, starts)
}

fn write_heading_ids(events: &mut [Event<'_>], starts: &[usize], headings: &[HeadingRecord]) {
    for (&index, heading) in starts.iter().zip(headings) {
        if let Some(Event::Start(Tag::Heading { id, .. })) = events.get_mut(index) {
            *id = heading.id.clone().map(CowStr::from);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_render_basic() {
        let doc = render_markdown("# Hello\n\nSome **bold** text.", "intro");

        assert_eq!(
            doc.html,
            "<h1 id=\"hello\">Hello</h1>\n<p>Some <strong>bold</strong> text.</p>\n"
        );
        assert_eq!(doc.title.as_deref(), Some("Hello"));
        assert!(doc.warnings.is_empty());
    }

    #[test]
    fn test_title_from_first_h1_or_h2() {
        let doc = render_markdown("### Small\n\n## Section\n\n# Late", "");
        assert_eq!(doc.title.as_deref(), Some("Section"));

        let doc = render_markdown("Plain text only.", "");
        assert_eq!(doc.title, None);
    }

    #[test]
    fn test_duplicate_heading_ids() {
        let doc = render_markdown("## Intro\n\n## Intro\n\n## Intro\n", "");

        let ids: Vec<_> = doc.headings.iter().map(|h| h.anchor()).collect();
        assert_eq!(ids, vec!["intro", "intro-1", "intro-2"]);
        assert!(doc.html.contains(r#"<h2 id="intro-2">Intro</h2>"#));
    }

    #[test]
    fn test_heading_text_includes_code() {
        let doc = render_markdown("## Using `Result<T, E>`\n", "");

        assert_eq!(doc.headings[0].text, "Using Result<T, E>");
        assert_eq!(doc.headings[0].anchor(), "using-resultt-e");
    }

    #[test]
    fn test_multiline_heading_keeps_line_break_as_space() {
        let doc = render_markdown("Foo\nbar\n===\n", "");

        assert_eq!(doc.headings[0].text, "Foo bar");
        assert_eq!(doc.headings[0].anchor(), "foo-bar");
        assert!(doc.html.starts_with(r#"<h1 id="foo-bar">"#));
    }

    #[test]
    fn test_explicit_heading_id() {
        let doc = render_markdown("## Getting Started {#start}\n\n[go](#getting-started)\n", "");

        assert_eq!(doc.headings[0].anchor(), "start");
        assert!(doc.html.contains(r##"<a href="#start">go</a>"##));
        assert!(doc.warnings.is_empty());
    }

    #[test]
    fn test_anchor_link_rewritten_to_final_id() {
        let markdown = "## Error Handling & Recovery\n\n\
                        [jump](#error-handling-and-recovery)\n";
        let doc = render_markdown(markdown, "");

        assert_eq!(doc.headings[0].anchor(), "error-handling-and-recovery");
        assert!(
            doc.html
                .contains(r##"<a href="#error-handling-and-recovery">jump</a>"##)
        );
    }

    #[test]
    fn test_dangling_anchor_warns() {
        let doc = render_markdown("## Setup\n\n[missing](#nowhere)\n", "");

        assert!(doc.html.contains(r##"<a href="#nowhere">missing</a>"##));
        assert_eq!(doc.warnings, vec!["Unresolved anchor: #nowhere".to_owned()]);
    }

    #[test]
    fn test_relative_links_rebased() {
        let markdown = "[next](channels.md) ![diagram](img/flow.png) [ext](https://go.dev)\n";
        let doc = render_markdown(markdown, "go/concurrency/mutex");

        assert!(
            doc.html
                .contains(r#"<a href="/?page=go/concurrency/channels">next</a>"#)
        );
        assert!(
            doc.html
                .contains(r#"<img src="/tutorials/go/concurrency/img/flow.png" alt="diagram" />"#)
        );
        assert!(doc.html.contains(r#"<a href="https://go.dev">ext</a>"#));
    }

    #[test]
    fn test_toc_built_from_headings() {
        let doc = render_markdown("# Guide\n## Install\n### Linux\n##### Deep\n## Usage\n", "");

        assert_eq!(doc.toc.len(), 1);
        let guide = &doc.toc[0];
        assert_eq!(guide.title, "Guide");
        assert_eq!(guide.children.len(), 2);
        assert_eq!(guide.children[0].children[0].id, "linux");
        // Deep heading still gets an id
        assert_eq!(doc.headings[3].anchor(), "deep");
    }

    #[test]
    fn test_fenced_code_block_gets_copy_button() {
        let doc = render_markdown("## Run\n\n```rust\nlet x = 1;\n```\n", "");

        assert!(doc.html.contains(r#"<div class="code-block"><button type="button" class="copy-btn""#));
        assert!(doc.html.contains(r#"<code class="language-rust">"#));
        assert!(doc.html.contains("hl-"));
        assert_eq!(doc.headings.len(), 1);
    }

    #[test]
    fn test_gfm_extensions() {
        let markdown = "| a | b |\n|---|---|\n| 1 | 2 |\n\n- [x] done\n\n~~old~~\n";
        let doc = render_markdown(markdown, "");

        assert!(doc.html.contains("<table>"));
        assert!(doc.html.contains("checkbox"));
        assert!(doc.html.contains("<del>old</del>"));
    }

    #[test]
    fn test_resolve_anchor_target_on_document() {
        let doc = render_markdown("## Alpha\n\n## Beta {#b}\n", "");

        assert_eq!(
            doc.resolve_anchor_target("b").map(|h| h.text.as_str()),
            Some("Beta")
        );
        assert_eq!(
            doc.resolve_anchor_target("beta").map(|h| h.text.as_str()),
            Some("Beta")
        );
        assert!(doc.resolve_anchor_target("gamma").is_none());
    }

    #[test]
    fn test_render_is_repeatable() {
        let markdown = "# A\n## B\n## B\n[x](#b)\n";
        assert_eq!(render_markdown(markdown, "p"), render_markdown(markdown, "p"));
    }
}
