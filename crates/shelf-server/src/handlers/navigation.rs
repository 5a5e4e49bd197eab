//! Navigation API endpoint.
//!
//! Returns the sidebar tree, expanded along the requested page.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use serde::Serialize;
use shelf_tree::SidebarNode;

use super::page::PageQuery;
use crate::state::AppState;

/// Response for GET /api/navigation.
#[derive(Serialize)]
pub(crate) struct NavigationResponse {
    /// Sidebar tree items.
    items: Vec<SidebarNode>,
}

/// Handle GET /api/navigation.
pub(crate) async fn get_navigation(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Json<NavigationResponse> {
    let current = query.page.unwrap_or_default();
    let items = state.library.snapshot().sidebar(&current);
    Json(NavigationResponse { items })
}
