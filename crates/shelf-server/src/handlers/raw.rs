//! Raw tutorial files.
//!
//! Serves Markdown sources and the images or downloads they reference from
//! the tutorials root under `/tutorials/`.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use shelf_tree::PagePath;

use crate::error::ServerError;
use crate::state::AppState;

/// Content type for Markdown sources.
const MARKDOWN_CONTENT_TYPE: &str = "text/markdown; charset=utf-8";

/// Handle GET /tutorials/{*path}.
pub(crate) async fn get_raw(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ServerError> {
    let relative = PagePath::parse(&path).map_err(|e| {
        tracing::debug!(path = %path, error = %e, "Rejected file path");
        ServerError::FileNotFound(path.clone())
    })?;
    let file_path = relative.join_to(state.library.root());

    match tokio::fs::metadata(&file_path).await {
        Ok(metadata) if metadata.is_file() => {}
        _ => return Err(ServerError::FileNotFound(path)),
    }
    let bytes = tokio::fs::read(&file_path).await?;

    Ok(([(header::CONTENT_TYPE, content_type(relative.as_str()))], bytes).into_response())
}

fn content_type(path: &str) -> String {
    if path.ends_with(".md") {
        MARKDOWN_CONTENT_TYPE.to_owned()
    } else {
        mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_owned()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_content_type() {
        assert_eq!(content_type("go/intro.md"), "text/markdown; charset=utf-8");
        assert_eq!(content_type("go/img/flow.png"), "image/png");
        assert_eq!(content_type("files/data.bin"), "application/octet-stream");
    }
}
