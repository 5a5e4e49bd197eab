//! Pages API endpoint.
//!
//! Renders a tutorial and returns JSON with metadata, navigation, table of
//! contents, heading records and HTML content.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use md5::{Digest, Md5};
use serde::Serialize;
use shelf_renderer::{HeadingRecord, TocItem};
use shelf_tree::{Crumb, PrevNext, ResolvedPage, build_breadcrumbs};

use crate::content::{Article, load_article};
use crate::error::ServerError;
use crate::state::AppState;

/// Response for GET /api/pages/{path}.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageResponse {
    /// Page metadata.
    meta: PageMeta,
    /// Breadcrumb trail.
    breadcrumbs: Vec<Crumb>,
    /// Neighbouring tutorials in reading order.
    prev_next: PrevNext,
    /// Table of contents (h1-h4).
    toc: Vec<TocItem>,
    /// All headings with their final ids.
    headings: Vec<HeadingRecord>,
    /// Rendered HTML content.
    content: String,
}

/// Page metadata.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageMeta {
    /// Page title (from the first h1 or h2).
    title: Option<String>,
    /// Page path.
    path: String,
    /// Source file relative to the tutorials root.
    source_file: String,
    /// Last modification time (RFC 3339).
    #[serde(skip_serializing_if = "Option::is_none")]
    last_modified: Option<String>,
}

/// Resolve a page path to a loaded article, or `PageNotFound`.
pub(crate) async fn load_page(state: &AppState, path: &str) -> Result<Article, ServerError> {
    match state.library.resolve(Some(path)) {
        ResolvedPage::MarkdownPage {
            file_path,
            url_path,
        } => Ok(load_article(&file_path, &url_path, state.verbose).await?),
        _ => Err(ServerError::PageNotFound(path.to_owned())),
    }
}

/// Handle GET /api/pages/{path}.
pub(crate) async fn get_page(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let article = load_page(&state, &path).await?;

    let etag = compute_etag(&state.version, &article.document.html);

    if headers
        .get(header::IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| etag_matches(value, &etag))
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let last_modified: Option<DateTime<Utc>> = article.modified.map(DateTime::<Utc>::from);
    let prev_next = state.library.snapshot().prev_next(&article.url_path);
    let document = article.document;

    let response = PageResponse {
        meta: PageMeta {
            title: document.title,
            path: article.url_path.clone(),
            source_file: format!("{}.md", article.url_path),
            last_modified: last_modified.map(|t| t.to_rfc3339()),
        },
        breadcrumbs: build_breadcrumbs(&article.url_path),
        prev_next,
        toc: document.toc,
        headings: document.headings,
        content: document.html,
    };

    let mut response = Json(response).into_response();
    let response_headers = response.headers_mut();
    response_headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("private, max-age=60"),
    );
    if let Ok(value) = HeaderValue::from_str(&etag) {
        response_headers.insert(header::ETAG, value);
    }
    if let Some(modified) = last_modified
        && let Ok(value) = HeaderValue::from_str(&http_date(modified))
    {
        response_headers.insert(header::LAST_MODIFIED, value);
    }

    Ok(response)
}

/// Strong validator for a rendered page: the first 64 bits of
/// `md5("{version}:{html}")` in hex, quoted.
///
/// Changes whenever the server version or the HTML changes.
fn compute_etag(version: &str, content: &str) -> String {
    let digest = Md5::digest(format!("{version}:{content}"));
    format!("\"{}\"", &hex::encode(digest)[..16])
}

/// Whether an `If-None-Match` value covers `etag`.
///
/// Accepts `*` and comma-separated lists. Weak comparison, so a `W/` prefix
/// on a listed tag is ignored.
fn etag_matches(if_none_match: &str, etag: &str) -> bool {
    if_none_match.split(',').map(str::trim).any(|candidate| {
        candidate == "*" || candidate.strip_prefix("W/").unwrap_or(candidate) == etag
    })
}

fn http_date(time: DateTime<Utc>) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
