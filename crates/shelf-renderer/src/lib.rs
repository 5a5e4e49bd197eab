//! Markdown rendering for shelf.
//!
//! Converts tutorial Markdown to HTML with `pulldown-cmark` and derives the
//! navigation aids that depend on the rendered headings:
//! - [`slugify`]: GitHub-style heading slugs
//! - [`assign_heading_ids`]: page-unique heading ids
//! - [`AnchorIndex`]: repair of in-page `#anchor` links
//! - [`build_toc`]: nested table of contents
//! - [`resolve_anchor_target`]: anchor id to heading lookup
//!
//! # Example
//!
//! ```
//! use shelf_renderer::render_markdown;
//!
//! let doc = render_markdown("# Guide\n\n## Setup\n\n[setup](#setup)", "go/guide");
//! assert_eq!(doc.title.as_deref(), Some("Guide"));
//! assert_eq!(doc.toc[0].children[0].id, "setup");
//! ```

mod anchors;
mod code;
mod document;
mod heading;
mod links;
mod slug;
mod toc;

pub use anchors::{AnchorIndex, USER_CONTENT_PREFIX, resolve_anchor_target};
pub use document::{RenderedDocument, render_markdown};
pub use heading::{HeadingRecord, assign_heading_ids};
pub use links::{TUTORIALS_PREFIX, page_href, rewrite_url, source_href};
pub use slug::slugify;
pub use toc::{TOC_MAX_LEVEL, TocItem, build_toc};
