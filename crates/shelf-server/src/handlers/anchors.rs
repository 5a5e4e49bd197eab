//! Anchor resolution endpoint.
//!
//! Maps an anchor id from a link or URL fragment to the heading it targets,
//! trying the exact id, the `user-content-` prefixed id, then heading slugs.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use shelf_renderer::HeadingRecord;

use super::pages::load_page;
use crate::error::ServerError;
use crate::state::AppState;

/// Query string for GET /api/anchors/{path}.
#[derive(Debug, Deserialize)]
pub(crate) struct AnchorQuery {
    /// Anchor id to resolve, without `#`.
    id: String,
}

/// Response for GET /api/anchors/{path}.
#[derive(Serialize)]
pub(crate) struct AnchorResponse {
    /// Page path.
    path: String,
    /// Requested id.
    requested: String,
    /// Heading the id resolves to.
    heading: HeadingRecord,
}

/// Handle GET /api/anchors/{path}.
pub(crate) async fn get_anchor(
    Path(path): Path<String>,
    Query(query): Query<AnchorQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<AnchorResponse>, ServerError> {
    let article = load_page(&state, &path).await?;
    let id = query.id.strip_prefix('#').unwrap_or(&query.id);

    let Some(heading) = article.document.resolve_anchor_target(id).cloned() else {
        return Err(ServerError::AnchorNotFound {
            path,
            id: query.id,
        });
    };

    Ok(Json(AnchorResponse {
        path: article.url_path,
        requested: query.id,
        heading,
    }))
}
