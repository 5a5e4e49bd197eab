//! Tutorial tree scanning and navigation for shelf.
//!
//! This crate provides:
//! - [`scan_tree`]: filesystem walk producing a [`TreeEntry`] tree
//! - [`resolve`]: page path resolution with traversal protection
//! - Sidebar, breadcrumb, reading order and search models
//! - [`Library`]: the tutorials root with a cached scan snapshot
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::PathBuf;
//! use shelf_tree::{Library, ResolvedPage, build_breadcrumbs};
//!
//! let library = Library::new(PathBuf::from("tutorials"), true);
//! let snapshot = library.snapshot();
//!
//! if let ResolvedPage::MarkdownPage { url_path, .. } = library.resolve(Some("go/intro")) {
//!     let crumbs = build_breadcrumbs(&url_path);
//!     let links = snapshot.prev_next(&url_path);
//! }
//! ```

mod breadcrumb;
mod entry;
mod library;
mod listing;
mod page_path;
mod resolve;
mod scan;
mod search;
mod sequence;
mod sidebar;

pub use breadcrumb::{Crumb, build_breadcrumbs};
pub use entry::{EntryKind, TreeEntry, display_path, display_title};
pub use library::{Library, TreeSnapshot};
pub use listing::FolderListing;
pub use page_path::{PagePath, PagePathError};
pub use resolve::{HOME_PAGE, ResolvedPage, resolve};
pub use scan::{list_folder, scan_tree};
pub use search::{SearchHit, search};
pub use sequence::{PrevNext, TutorialEntry, flatten, prev_next};
pub use sidebar::{SidebarNode, build_sidebar};
