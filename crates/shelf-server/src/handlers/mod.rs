//! HTTP request handlers.

pub(crate) mod anchors;
pub(crate) mod navigation;
pub(crate) mod page;
pub(crate) mod pages;
pub(crate) mod preferences;
pub(crate) mod raw;
pub(crate) mod search;

use axum::response::Html;
use maud::Markup;

use crate::state::AppState;
use crate::templates::{Chrome, layout};

/// Everything the shared layout needs besides the content.
pub(crate) struct PageFrame<'a> {
    /// Page path the sidebar highlights (empty for none).
    pub(crate) current: &'a str,
    /// Browser tab title.
    pub(crate) title: Option<&'a str>,
    /// Search box contents.
    pub(crate) query: &'a str,
    /// URL of this page, for the theme toggle.
    pub(crate) return_to: &'a str,
    /// Source file relative to the tutorials root.
    pub(crate) source: Option<&'a str>,
}

/// Wrap page content in the layout using the current tree and theme.
pub(crate) fn render_frame(state: &AppState, frame: &PageFrame<'_>, content: Markup) -> Html<String> {
    let snapshot = state.library.snapshot();
    let sidebar = snapshot.sidebar(frame.current);
    let theme = state.theme();
    let chrome = Chrome {
        site_title: &state.site_title,
        theme: &theme,
        sidebar: &sidebar,
        query: frame.query,
        return_to: frame.return_to,
        source: frame.source,
    };

    Html(layout(&chrome, frame.title, content).into_string())
}
