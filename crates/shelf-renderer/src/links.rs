//! Link rewriting for rendered tutorials.
//!
//! Pages are served from `/?page=<path>` while their sources live under
//! `/tutorials/`, so relative URLs written against the Markdown file must be
//! rebased:
//! - `other.md` and `../topic/page.md#part` become `/?page=` links
//! - other relative URLs (images, downloads) point into `/tutorials/`
//! - external, absolute and in-page links are left alone

use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Characters escaped in a `page` query value. `/` stays readable.
const PAGE_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// URL path prefix under which raw tutorial files are served.
pub const TUTORIALS_PREFIX: &str = "/tutorials/";

/// Build the `/?page=` link for a page path.
///
/// # Examples
///
/// ```
/// use shelf_renderer::page_href;
///
/// assert_eq!(page_href("go/error handling"), "/?page=go/error%20handling");
/// ```
#[must_use]
pub fn page_href(page: &str) -> String {
    format!("/?page={}", utf8_percent_encode(page, PAGE_VALUE))
}

/// Build the raw source URL for a path relative to the tutorials root.
#[must_use]
pub fn source_href(path: &str) -> String {
    format!("{TUTORIALS_PREFIX}{}", utf8_percent_encode(path, PAGE_VALUE))
}

/// Rewrite a link or image URL found in the page at `page`.
///
/// Returns `None` when the URL should be kept as written.
pub fn rewrite_url(url: &str, page: &str) -> Option<String> {
    if url.is_empty()
        || url.starts_with('#')
        || url.starts_with('/')
        || url.starts_with('?')
        || has_scheme(url)
    {
        return None;
    }

    let (path, fragment) = split_at_char(url, '#');
    let (path, query) = split_at_char(path, '?');

    // Link targets arrive percent-encoded; decode so the output is encoded once
    let path = percent_decode_str(path)
        .decode_utf8()
        .unwrap_or(Cow::Borrowed(path));
    let resolved = resolve_relative_path(&path, parent_dir(page));

    if let Some(target) = resolved.strip_suffix(".md") {
        let mut href = page_href(target);
        href.push_str(fragment);
        return Some(href);
    }

    let mut href = source_href(&resolved);
    href.push_str(query);
    href.push_str(fragment);
    Some(href)
}

/// Split before the first `sep`, keeping `sep` in the tail.
fn split_at_char(s: &str, sep: char) -> (&str, &str) {
    match s.find(sep) {
        Some(pos) => s.split_at(pos),
        None => (s, ""),
    }
}

/// Directory part of a page path (`go/intro` → `go`).
fn parent_dir(page: &str) -> &str {
    page.rsplit_once('/').map_or("", |(dir, _)| dir)
}

/// Check for a URL scheme such as `https:` or `mailto:`.
fn has_scheme(url: &str) -> bool {
    let Some(colon) = url.find(':') else {
        return false;
    };
    let scheme = &url[..colon];
    scheme
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Resolve a relative path against a base directory.
///
/// `..` never climbs above the base root.
fn resolve_relative_path(relative: &str, base: &str) -> String {
    let mut segments: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();

    for component in relative.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(component),
        }
    }

    segments.join("/")
}
