//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;
use crate::static_files;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    // HTML pages
    let page_routes = Router::new()
        .route("/", get(handlers::page::get_page))
        .route("/search", get(handlers::search::get_search_page))
        .route("/preferences/theme", post(handlers::preferences::post_theme));

    // API routes
    let api_routes = Router::new()
        .route("/api/navigation", get(handlers::navigation::get_navigation))
        .route("/api/pages/{*path}", get(handlers::pages::get_page))
        .route("/api/anchors/{*path}", get(handlers::anchors::get_anchor))
        .route("/api/search", get(handlers::search::get_search))
        .route(
            "/api/preferences/{key}",
            get(handlers::preferences::get_preference).put(handlers::preferences::put_preference),
        );

    // Tutorial sources and built-in assets
    let file_routes = Router::new()
        .route("/tutorials/{*path}", get(handlers::raw::get_raw))
        .route("/assets/style.css", get(static_files::get_stylesheet))
        .route("/assets/shelf.js", get(static_files::get_script));

    let router = Router::new()
        .merge(page_routes)
        .merge(api_routes)
        .merge(file_routes);

    security::with_security_headers(router)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}
