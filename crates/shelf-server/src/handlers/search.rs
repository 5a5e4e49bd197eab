//! Search endpoints.
//!
//! Ranks tutorials by title and folder path; see [`shelf_tree::search`].

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::response::Html;
use serde::{Deserialize, Serialize};
use shelf_tree::SearchHit;

use super::{PageFrame, render_frame};
use crate::state::AppState;
use crate::templates;

/// Query string for the search endpoints.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchQuery {
    /// Search text.
    #[serde(default)]
    pub(crate) q: String,
}

/// Response for GET /api/search.
#[derive(Serialize)]
pub(crate) struct SearchResponse {
    /// Search text as received.
    query: String,
    /// Hits, best first.
    hits: Vec<SearchHit>,
}

/// Handle GET /search.
pub(crate) async fn get_search_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Html<String> {
    let hits = state.library.snapshot().search(&query.q);
    tracing::debug!(query = %query.q, hits = hits.len(), "Search");

    let return_to = format!(
        "/search?{}",
        serde_urlencoded::to_string([("q", query.q.as_str())]).unwrap_or_default()
    );
    let frame = PageFrame {
        current: "",
        title: Some("Search"),
        query: &query.q,
        return_to: &return_to,
        source: None,
    };
    render_frame(&state, &frame, templates::search_results(&query.q, &hits))
}

/// Handle GET /api/search.
pub(crate) async fn get_search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Json<SearchResponse> {
    let hits = state.library.snapshot().search(&query.q);
    Json(SearchResponse {
        query: query.q,
        hits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_serialization() {
        let response = SearchResponse {
            query: "chan".to_owned(),
            hits: vec![SearchHit {
                page: "go/channels".to_owned(),
                title: "Channels".to_owned(),
                folder_path: "Go".to_owned(),
                score: 523,
            }],
        };

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["query"], "chan");
        assert_eq!(json["hits"][0]["page"], "go/channels");
        assert_eq!(json["hits"][0]["folderPath"], "Go");
        assert_eq!(json["hits"][0]["score"], 523);
    }
}
