//! Breadcrumb trail for the location bar.

use platform_host::{join_path, path_segments, SHARED_WITH_ME_VIEW_TOKEN};

use crate::view_mode::ViewMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub label: String,
    /// Location to navigate to, or `None` for a plain heading.
    pub target: Option<String>,
}

impl Breadcrumb {
    fn link(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: Some(target.into()),
        }
    }

    fn heading(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: None,
        }
    }
}

/// Builds the trail for `location` in `view`.
///
/// Every crumb under "Shared with me" leads back to the top of that view rather than to its
/// own depth.
pub fn breadcrumbs(location: &str, view: ViewMode) -> Vec<Breadcrumb> {
    match view {
        ViewMode::Trash => vec![Breadcrumb::heading("Trash")],
        ViewMode::MyShares => vec![Breadcrumb::heading("My Shares")],
        ViewMode::SharedWithMe => {
            let mut crumbs = vec![Breadcrumb::link("Shared with me", SHARED_WITH_ME_VIEW_TOKEN)];
            crumbs.extend(
                path_segments(location)
                    .into_iter()
                    .skip(1)
                    .map(|segment| Breadcrumb::link(segment, SHARED_WITH_ME_VIEW_TOKEN)),
            );
            crumbs
        }
        ViewMode::Directory => {
            let mut crumbs = vec![Breadcrumb::link("root", "/")];
            let mut path = "/".to_string();
            for segment in path_segments(location) {
                path = join_path(&path, segment);
                crumbs.push(Breadcrumb::link(segment, path.clone()));
            }
            crumbs
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn targets(crumbs: &[Breadcrumb]) -> Vec<Option<&str>> {
        crumbs.iter().map(|crumb| crumb.target.as_deref()).collect()
    }

    #[test]
    fn directory_trail_links_every_ancestor() {
        let crumbs = breadcrumbs("/media/movies/2024", ViewMode::Directory);
        let labels: Vec<&str> = crumbs.iter().map(|crumb| crumb.label.as_str()).collect();
        assert_eq!(labels, vec!["root", "media", "movies", "2024"]);
        assert_eq!(
            targets(&crumbs),
            vec![
                Some("/"),
                Some("/media"),
                Some("/media/movies"),
                Some("/media/movies/2024")
            ]
        );
    }

    #[test]
    fn virtual_views_render_headings() {
        assert_eq!(
            breadcrumbs("trash", ViewMode::Trash),
            vec![Breadcrumb::heading("Trash")]
        );
        assert_eq!(targets(&breadcrumbs("my-shares", ViewMode::MyShares)), vec![None]);
    }

    #[test]
    fn shared_crumbs_all_return_to_the_shared_view() {
        let crumbs = breadcrumbs("shared-with-me/team/specs", ViewMode::SharedWithMe);
        assert_eq!(crumbs.len(), 3);
        assert!(crumbs
            .iter()
            .all(|crumb| crumb.target.as_deref() == Some("shared-with-me")));
    }
}
