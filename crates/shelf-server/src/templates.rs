//! HTML templates.
//!
//! Every page shares [`layout`]: a sidebar with the search box and the
//! folder tree, a toolbar with the theme toggle, and the content area.
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use shelf_renderer::{TocItem, page_href, source_href};
use shelf_tree::{Crumb, EntryKind, FolderListing, PrevNext, SearchHit, SidebarNode, TreeEntry};

use crate::preferences::THEME_KEY;

/// Stylesheet URL.
pub(crate) const STYLESHEET_PATH: &str = "/assets/style.css";

/// Copy-button script URL.
pub(crate) const SCRIPT_PATH: &str = "/assets/shelf.js";

/// Page-independent parts of the layout.
pub(crate) struct Chrome<'a> {
    /// Title in the sidebar header and browser tab.
    pub(crate) site_title: &'a str,
    /// Value for `<html data-theme>`.
    pub(crate) theme: &'a str,
    /// Sidebar tree for the current page.
    pub(crate) sidebar: &'a [SidebarNode],
    /// Text to prefill the search box with.
    pub(crate) query: &'a str,
    /// URL the theme toggle returns to.
    pub(crate) return_to: &'a str,
    /// Source file of the page, relative to the tutorials root.
    pub(crate) source: Option<&'a str>,
}

/// Render a full HTML document.
pub(crate) fn layout(chrome: &Chrome<'_>, title: Option<&str>, content: Markup) -> Markup {
    let full_title = match title {
        Some(title) => format!("{title} - {}", chrome.site_title),
        None => chrome.site_title.to_owned(),
    };

    html! {
        (DOCTYPE)
        html lang="en" data-theme=(chrome.theme) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (full_title) }
                link rel="stylesheet" href=(STYLESHEET_PATH);
                script src=(SCRIPT_PATH) defer {}
            }
            body {
                (sidebar(chrome))
                main.main-content {
                    (toolbar(chrome))
                    (content)
                }
            }
        }
    }
}

fn sidebar(chrome: &Chrome<'_>) -> Markup {
    html! {
        nav.sidebar aria-label="Tutorials" {
            header.sidebar-header {
                a.site-title href=(page_href("home")) { (chrome.site_title) }
            }
            form.search-form method="get" action="/search" role="search" {
                input type="search" name="q" value=(chrome.query)
                    placeholder="Search tutorials..." aria-label="Search tutorials";
            }
            ul.file-tree {
                (sidebar_nodes(chrome.sidebar))
            }
        }
    }
}

fn sidebar_nodes(nodes: &[SidebarNode]) -> Markup {
    html! {
        @for node in nodes {
            @match node.kind {
                EntryKind::Folder => {
                    li.folder {
                        details open[node.expanded] {
                            summary { (node.label) }
                            ul { (sidebar_nodes(&node.children)) }
                        }
                    }
                },
                EntryKind::MarkdownFile => {
                    li.file.active[node.active] {
                        a href=(page_href(&node.url_path))
                            aria-current=[node.active.then_some("page")] { (node.label) }
                    }
                },
            }
        }
    }
}

fn toolbar(chrome: &Chrome<'_>) -> Markup {
    let (next_theme, toggle_label) = if chrome.theme == "dark" {
        ("light", "Light mode")
    } else {
        ("dark", "Dark mode")
    };

    html! {
        div.toolbar {
            form.theme-toggle method="post" action="/preferences/theme" {
                input type="hidden" name=(THEME_KEY) value=(next_theme);
                input type="hidden" name="return_to" value=(chrome.return_to);
                button type="submit" { (toggle_label) }
            }
            @if let Some(source) = chrome.source {
                a.source-link href=(source_href(source)) { "View source" }
            }
        }
    }
}

/// Breadcrumb trail.
pub(crate) fn breadcrumbs(crumbs: &[Crumb]) -> Markup {
    html! {
        nav.breadcrumb aria-label="Breadcrumb" {
            @for (i, crumb) in crumbs.iter().enumerate() {
                @if i > 0 {
                    span.separator aria-hidden="true" { "›" }
                }
                @match &crumb.href {
                    Some(href) => a href=(page_href(href)) { (crumb.label) },
                    None => span.current aria-current=[crumb.is_current.then_some("page")] {
                        (crumb.label)
                    },
                }
            }
        }
    }
}

fn prev_next_links(links: &PrevNext) -> Markup {
    html! {
        @if links.previous.is_some() || links.next.is_some() {
            nav.prev-next {
                @if let Some(prev) = &links.previous {
                    a.prev href=(page_href(&prev.page)) {
                        span.direction { "← Previous" }
                        span.title { (prev.title) }
                    }
                }
                @if let Some(next) = &links.next {
                    a.next href=(page_href(&next.page)) {
                        span.direction { "Next →" }
                        span.title { (next.title) }
                    }
                }
            }
        }
    }
}

fn table_of_contents(toc: &[TocItem]) -> Markup {
    html! {
        @if !toc.is_empty() {
            aside.toc {
                h2 { "Table of Contents" }
                (toc_items(toc))
            }
        }
    }
}

fn toc_items(items: &[TocItem]) -> Markup {
    html! {
        ul {
            @for item in items {
                li class={ "toc-level-" (item.level) } {
                    @if item.id.is_empty() {
                        span { (item.title) }
                    } @else {
                        a href={ "#" (item.id) } { (item.title) }
                    }
                    @if !item.children.is_empty() {
                        (toc_items(&item.children))
                    }
                }
            }
        }
    }
}

/// Landing page.
pub(crate) fn home(tutorial_count: usize) -> Markup {
    html! {
        div.content-wrapper {
            div.home-page {
                h1 { "Welcome to Markdown Tutorials" }
                p {
                    "Navigate through the tutorials using the sidebar on the left. "
                    @match tutorial_count {
                        0 => "No tutorials have been added yet.",
                        1 => "There is 1 tutorial available.",
                        n => { "There are " (n) " tutorials available." },
                    }
                }
                div.features {
                    div.feature {
                        h3 { "Table of Contents" }
                        p { "Every tutorial lists its sections so you can jump straight to a heading" }
                    }
                    div.feature {
                        h3 { "Search" }
                        p { "Find tutorials by title or folder from the search box" }
                    }
                    div.feature {
                        h3 { "Organized Structure" }
                        p { "Tutorials are organized in folders and subfolders for easy navigation" }
                    }
                }
            }
        }
    }
}

/// Page shown for unknown or rejected page paths.
pub(crate) fn not_found() -> Markup {
    html! {
        div.content-wrapper {
            div.error-page {
                h1 { "Page Not Found" }
                p { "The requested tutorial could not be found." }
                a.btn href=(page_href("home")) { "Go Home" }
            }
        }
    }
}

/// Inline error for a page whose source could not be loaded.
pub(crate) fn fetch_error(crumbs: &[Crumb]) -> Markup {
    html! {
        div.content-wrapper {
            (breadcrumbs(crumbs))
            div.error {
                p { "Error loading tutorial. Please try again later." }
            }
        }
    }
}

/// Folder page with its immediate subfolders and tutorials.
pub(crate) fn folder_listing(listing: &FolderListing, crumbs: &[Crumb]) -> Markup {
    html! {
        div.content-wrapper {
            (breadcrumbs(crumbs))
            h1 { (listing.title) }
            div.folder-contents {
                @if !listing.folders.is_empty() {
                    section.content-section {
                        h2 { "Folders" }
                        div.folder-grid {
                            @for folder in &listing.folders {
                                (entry_card("folder-card", folder))
                            }
                        }
                    }
                }
                @if !listing.files.is_empty() {
                    section.content-section {
                        h2 { "Tutorials" }
                        div.file-grid {
                            @for file in &listing.files {
                                (entry_card("file-card", file))
                            }
                        }
                    }
                }
                @if listing.is_empty() {
                    div.empty-folder {
                        p { "This folder is empty." }
                    }
                }
            }
        }
    }
}

fn entry_card(class: &str, entry: &TreeEntry) -> Markup {
    html! {
        div class=(class) {
            a href=(page_href(&entry.url_path)) {
                span { (entry.title()) }
            }
        }
    }
}

/// Rendered Markdown page.
pub(crate) fn article(
    content_html: &str,
    toc: &[TocItem],
    crumbs: &[Crumb],
    links: &PrevNext,
) -> Markup {
    html! {
        div.content-wrapper {
            (breadcrumbs(crumbs))
            div.article-layout {
                article.markdown-content {
                    (PreEscaped(content_html))
                }
                (table_of_contents(toc))
            }
            (prev_next_links(links))
        }
    }
}

/// Search results page.
pub(crate) fn search_results(query: &str, hits: &[SearchHit]) -> Markup {
    html! {
        div.content-wrapper {
            div.search-page {
                @if query.trim().is_empty() {
                    h1 { "Search" }
                    p { "Type a search term in the sidebar to find tutorials." }
                } @else {
                    h1 { "Search results for \u{201c}" (query) "\u{201d}" }
                    @if hits.is_empty() {
                        p.no-results { "No tutorials found" }
                    } @else {
                        ul.search-results {
                            @for hit in hits {
                                li.search-result {
                                    a href=(page_href(&hit.page)) { (hit.title) }
                                    @if !hit.folder_path.is_empty() {
                                        span.search-result-path { (hit.folder_path) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
