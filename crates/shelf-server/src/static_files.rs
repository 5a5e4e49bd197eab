//! Built-in static assets.
//!
//! The stylesheet and the copy-button script are compiled into the binary.

use axum::http::header;
use axum::response::IntoResponse;

/// Stylesheet for all pages.
const STYLESHEET: &str = include_str!("../assets/style.css");

/// Handle GET /assets/style.css.
pub(crate) async fn get_stylesheet() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        STYLESHEET,
    )
}

/// Code block copy buttons.
const SCRIPT: &str = include_str!("../assets/shelf.js");

/// Handle GET /assets/shelf.js.
pub(crate) async fn get_script() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/javascript; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        SCRIPT,
    )
}
