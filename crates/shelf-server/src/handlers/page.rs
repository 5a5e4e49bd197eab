//! HTML page endpoint.
//!
//! `GET /?page=<path>` renders the home page, a tutorial, a folder listing or
//! the not-found page inside the shared layout.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use shelf_renderer::page_href;
use shelf_tree::{HOME_PAGE, ResolvedPage, build_breadcrumbs, display_title};

use super::{PageFrame, render_frame};
use crate::content::load_article;
use crate::state::AppState;
use crate::templates;

/// Query string for GET /.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PageQuery {
    /// Requested page path.
    pub(crate) page: Option<String>,
}

/// Handle GET /.
pub(crate) async fn get_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Response {
    let requested = query.page.as_deref();
    let return_to = requested.map_or_else(|| "/".to_owned(), page_href);

    match state.library.resolve(requested) {
        ResolvedPage::Home => {
            let count = state.library.snapshot().sequence.len();
            let frame = PageFrame {
                current: HOME_PAGE,
                title: None,
                query: "",
                return_to: &return_to,
                source: None,
            };
            render_frame(&state, &frame, templates::home(count)).into_response()
        }
        ResolvedPage::MarkdownPage {
            file_path,
            url_path,
        } => {
            let crumbs = build_breadcrumbs(&url_path);
            let source = format!("{url_path}.md");
            match load_article(&file_path, &url_path, state.verbose).await {
                Ok(article) => {
                    let links = state.library.snapshot().prev_next(&article.url_path);
                    let fallback_title = display_title(page_name(&url_path));
                    let document = &article.document;
                    let frame = PageFrame {
                        current: &url_path,
                        title: Some(document.title.as_deref().unwrap_or(&fallback_title)),
                        query: "",
                        return_to: &return_to,
                        source: Some(&source),
                    };
                    let content =
                        templates::article(&document.html, &document.toc, &crumbs, &links);
                    render_frame(&state, &frame, content).into_response()
                }
                Err(e) => {
                    tracing::warn!(path = %url_path, error = %e, "Failed to load tutorial");
                    let frame = PageFrame {
                        current: &url_path,
                        title: None,
                        query: "",
                        return_to: &return_to,
                        source: None,
                    };
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        render_frame(&state, &frame, templates::fetch_error(&crumbs)),
                    )
                        .into_response()
                }
            }
        }
        ResolvedPage::FolderPage {
            folder_path,
            url_path,
        } => {
            let listing = state.library.list_folder(&folder_path, &url_path);
            let crumbs = build_breadcrumbs(&url_path);
            let frame = PageFrame {
                current: &url_path,
                title: Some(&listing.title),
                query: "",
                return_to: &return_to,
                source: None,
            };
            render_frame(&state, &frame, templates::folder_listing(&listing, &crumbs))
                .into_response()
        }
        ResolvedPage::NotFound => {
            let frame = PageFrame {
                current: "",
                title: Some("Page Not Found"),
                query: "",
                return_to: "/",
                source: None,
            };
            (
                StatusCode::NOT_FOUND,
                render_frame(&state, &frame, templates::not_found()),
            )
                .into_response()
        }
    }
}

/// Last segment of a page path.
fn page_name(url_path: &str) -> &str {
    url_path.rsplit('/').next().unwrap_or(url_path)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_page_name() {
        assert_eq!(page_name("go/concurrency/channels"), "channels");
        assert_eq!(page_name("intro"), "intro");
    }

    #[test]
    fn test_page_query_deserialization() {
        let query: PageQuery = serde_urlencoded::from_str("page=go%2Fintro").unwrap();
        assert_eq!(query.page.as_deref(), Some("go/intro"));

        let query: PageQuery = serde_urlencoded::from_str("").unwrap();
        assert_eq!(query.page, None);
    }
}
