//! HTTP server for the shelf tutorial browser.
//!
//! This crate provides a native Rust HTTP server using axum, serving:
//! - Server-rendered HTML pages (`/?page=`, `/search`)
//! - JSON API endpoints for pages, navigation, anchors, search and preferences
//! - Raw tutorial sources under `/tutorials/`
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use shelf_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         tutorials_dir: PathBuf::from("tutorials"),
//!         version: "0.1.0".to_owned(),
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (shelf-server)
//!                        │
//!                        ├─► HTML pages ──► maud templates
//!                        │       │
//!                        │       └─► Library (shelf-tree) + render_markdown (shelf-renderer)
//!                        │
//!                        ├─► JSON API ──► same models, serialized
//!                        │
//!                        └─► notify watcher ──► Library::invalidate
//! ```

mod app;
mod content;
mod error;
mod handlers;
mod middleware;
mod preferences;
mod state;
mod static_files;
mod templates;
mod watcher;

use std::path::PathBuf;
use std::sync::Arc;

use shelf_tree::Library;
use state::AppState;

pub use content::FetchError;
pub use error::ServerError;
pub use preferences::{
    MemoryPreferences, PreferenceChange, PreferenceError, PreferenceStore, THEME_KEY,
};

/// Everything [`run_server`] needs.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host name or address to bind.
    pub host: String,
    /// TCP port to bind (`0` is rejected by config validation).
    pub port: u16,
    /// Tutorials root directory.
    pub tutorials_dir: PathBuf,
    /// Memoise the tree scan and watch the root for changes.
    pub cache_enabled: bool,
    /// JSON file for persisted preferences (`None` keeps them in memory).
    pub preferences_file: Option<PathBuf>,
    /// Title shown in the sidebar header and browser tab.
    pub site_title: String,
    /// Log render warnings for every page served.
    pub verbose: bool,
    /// Mixed into page `ETag`s.
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
            tutorials_dir: PathBuf::from("tutorials"),
            cache_enabled: true,
            preferences_file: None,
            site_title: "Markdown Tutorials".to_owned(),
            verbose: false,
            version: String::new(),
        }
    }
}

/// Serve tutorials until Ctrl-C or SIGTERM.
///
/// # Errors
///
/// Returns an error if the preferences file cannot be loaded, the watcher
/// cannot be started or the server fails to bind.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    if !config.tutorials_dir.is_dir() {
        tracing::warn!(
            root = %config.tutorials_dir.display(),
            "Tutorials directory does not exist, serving an empty tree"
        );
    }

    let library = Arc::new(Library::new(
        config.tutorials_dir.clone(),
        config.cache_enabled,
    ));

    let preferences: Arc<dyn PreferenceStore> = match &config.preferences_file {
        Some(path) => Arc::new(MemoryPreferences::load(path.clone())?),
        None => Arc::new(MemoryPreferences::new()),
    };

    // Uncached libraries rescan on every request
    let watcher = if library.cache_enabled() && library.root().is_dir() {
        let watcher = watcher::TutorialWatcher::start(Arc::clone(&library))?;
        tracing::info!(root = %watcher.root().display(), "Watching tutorials for changes");
        Some(watcher)
    } else {
        None
    };

    let state = Arc::new(AppState {
        library,
        preferences,
        site_title: config.site_title.clone(),
        verbose: config.verbose,
        version: config.version.clone(),
        watcher,
    });

    let app = app::create_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolve on Ctrl-C, or on SIGTERM where that exists.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => {}
        () = terminate => {}
    }
    tracing::info!("Shutting down");
}

/// Map a loaded `shelf.toml` onto [`ServerConfig`].
#[must_use]
pub fn server_config_from_shelf_config(
    config: &shelf_config::Config,
    version: String,
    verbose: bool,
) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        tutorials_dir: config.tutorials.root.clone(),
        cache_enabled: config.tutorials.cache_enabled,
        preferences_file: config.preferences.file.clone(),
        site_title: config.site.title.clone(),
        verbose,
        version,
    }
}
