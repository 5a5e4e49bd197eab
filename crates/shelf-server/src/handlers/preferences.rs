//! Preferences endpoints.
//!
//! The JSON API reads and writes single keys. The theme form posts from the
//! toolbar and redirects back to the page it came from.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Form, Path, State};
use axum::response::Redirect;
use serde::{Deserialize, Serialize};

use crate::error::ServerError;
use crate::preferences::THEME_KEY;
use crate::state::AppState;

/// A stored preference.
#[derive(Debug, Serialize)]
pub(crate) struct PreferenceResponse {
    key: String,
    value: String,
}

/// Body for PUT /api/preferences/{key}.
#[derive(Debug, Deserialize)]
pub(crate) struct PreferenceUpdate {
    value: String,
}

/// Form for POST /preferences/theme.
#[derive(Debug, Deserialize)]
pub(crate) struct ThemeForm {
    theme: String,
    #[serde(default)]
    return_to: Option<String>,
}

/// Handle GET /api/preferences/{key}.
pub(crate) async fn get_preference(
    Path(key): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<PreferenceResponse>, ServerError> {
    let value = state
        .preferences
        .get(&key)
        .ok_or_else(|| ServerError::PreferenceNotFound(key.clone()))?;
    Ok(Json(PreferenceResponse { key, value }))
}

/// Handle PUT /api/preferences/{key}.
pub(crate) async fn put_preference(
    Path(key): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(update): Json<PreferenceUpdate>,
) -> Result<Json<PreferenceResponse>, ServerError> {
    store_preference(&state, key.clone(), update.value.clone()).await?;
    tracing::debug!(key = %key, value = %update.value, "Preference updated");
    Ok(Json(PreferenceResponse {
        key,
        value: update.value,
    }))
}

/// Handle POST /preferences/theme.
pub(crate) async fn post_theme(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ThemeForm>,
) -> Result<Redirect, ServerError> {
    store_preference(&state, THEME_KEY.to_owned(), form.theme).await?;
    Ok(Redirect::to(safe_return_to(form.return_to.as_deref())))
}

/// Store a preference off the async runtime; file-backed stores write to disk.
async fn store_preference(
    state: &Arc<AppState>,
    key: String,
    value: String,
) -> Result<(), ServerError> {
    let store = Arc::clone(&state.preferences);
    tokio::task::spawn_blocking(move || store.set(&key, &value))
        .await
        .map_err(|e| ServerError::Io(std::io::Error::other(e)))??;
    Ok(())
}

/// Only same-site paths are followed after a form post.
fn safe_return_to(return_to: Option<&str>) -> &str {
    match return_to {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path
        }
        _ => "/",
    }
}
