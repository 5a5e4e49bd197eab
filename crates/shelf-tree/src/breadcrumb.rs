//! Breadcrumb trail from Home down to the current page.

use serde::Serialize;

use crate::entry::display_title;
use crate::resolve::HOME_PAGE;

/// One breadcrumb item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Crumb {
    /// Display label.
    pub label: String,
    /// Page path to link to. `None` for the current page.
    pub href: Option<String>,
    /// This crumb is the page being viewed.
    pub is_current: bool,
}

/// Build breadcrumbs for a page path.
///
/// The first crumb is always Home. Every ancestor prefix links to its folder
/// page and the last segment is the non-clickable current crumb.
pub fn build_breadcrumbs(url_path: &str) -> Vec<Crumb> {
    let mut crumbs = vec![Crumb {
        label: "Home".to_owned(),
        href: Some(HOME_PAGE.to_owned()),
        is_current: false,
    }];

    let segments: Vec<&str> = url_path.split('/').filter(|s| !s.is_empty()).collect();
    let Some((last, ancestors)) = segments.split_last() else {
        return crumbs;
    };

    let mut prefix = String::new();
    for segment in ancestors {
        if !prefix.is_empty() {
            prefix.push('/');
        }
        prefix.push_str(segment);
        crumbs.push(Crumb {
            label: display_title(segment),
            href: Some(prefix.clone()),
            is_current: false,
        });
    }

    crumbs.push(Crumb {
        label: display_title(last),
        href: None,
        is_current: true,
    });

    crumbs
}
