//! Error types for the HTTP server.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use crate::content::FetchError;
use crate::preferences::PreferenceError;

/// Server error type for the JSON API and raw file routes.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// No Markdown page at the given page path.
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// No file at the given path under the tutorials root.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Page exists but has no heading for the anchor.
    #[error("Anchor not found: {path}#{id}")]
    AnchorNotFound {
        /// Page path.
        path: String,
        /// Requested anchor id.
        id: String,
    },

    /// Page source could not be read.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Preference could not be stored.
    #[error(transparent)]
    Preference(#[from] PreferenceError),

    /// No value stored for the preference key.
    #[error("Preference not found: {0}")]
    PreferenceNotFound(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::PageNotFound(_)
            | Self::FileNotFound(_)
            | Self::AnchorNotFound { .. }
            | Self::PreferenceNotFound(_) => StatusCode::NOT_FOUND,
            Self::Preference(e) if e.is_invalid_input() => StatusCode::BAD_REQUEST,
            Self::Fetch(_) | Self::Preference(_) | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// JSON body: a short `error` label plus whatever identifies the subject.
    fn body(&self) -> Value {
        match self {
            Self::PageNotFound(path) => json!({"error": "Page not found", "path": path}),
            Self::FileNotFound(path) => json!({"error": "File not found", "path": path}),
            Self::AnchorNotFound { path, id } => {
                json!({"error": "Anchor not found", "path": path, "id": id})
            }
            Self::Fetch(e) => json!({"error": e.to_string(), "path": e.url_path()}),
            Self::PreferenceNotFound(key) => json!({"error": "Preference not found", "key": key}),
            Self::Preference(_) | Self::Io(_) => json!({"error": self.to_string()}),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        if let Self::Fetch(e) = &self {
            tracing::warn!(path = %e.url_path(), error = %e, "Failed to load tutorial");
        }
        (self.status(), Json(self.body())).into_response()
    }
}
