//! Project grid filter and detail modal

use std::fmt;

use folio_types::{Portfolio, Project, ProjectCategory, ProjectId};
use thiserror::Error;

use crate::overlay::{CloseTrigger, Overlay};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GalleryError {
    #[error("unknown project category filter: {0}")]
    UnknownFilter(String),

    #[error("no project with id {0}")]
    UnknownProject(ProjectId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(ProjectCategory),
}

impl CategoryFilter {
    /// Filter buttons in display order
    pub fn all() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(ProjectCategory::all().iter().copied().map(CategoryFilter::Only))
            .collect()
    }

    /// `"all"` or a category key
    pub fn parse(key: &str) -> Result<Self, GalleryError> {
        if key == "all" {
            return Ok(CategoryFilter::All);
        }
        ProjectCategory::from_key(key)
            .map(CategoryFilter::Only)
            .ok_or_else(|| GalleryError::UnknownFilter(key.to_string()))
    }

    pub fn key(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.key(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(category) => category.label(),
        }
    }

    pub fn matches(&self, project: &Project) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => project.category == *category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Projects passing `filter`, in their original order.
pub fn filter_projects(projects: &[Project], filter: CategoryFilter) -> Vec<&Project> {
    projects.iter().filter(|p| filter.matches(p)).collect()
}

#[derive(Debug, Clone, Default)]
pub struct Gallery {
    filter: CategoryFilter,
    modal: Overlay<ProjectId>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        tracing::debug!(filter = %filter, "project filter changed");
        self.filter = filter;
    }

    pub fn visible<'a>(&self, portfolio: &'a Portfolio) -> Vec<&'a Project> {
        filter_projects(&portfolio.projects, self.filter)
    }

    /// Open the modal for `id`. Unknown ids leave the modal untouched.
    pub fn open_project(&mut self, id: ProjectId, portfolio: &Portfolio) -> Result<(), GalleryError> {
        if portfolio.project(id).is_none() {
            return Err(GalleryError::UnknownProject(id));
        }
        self.modal.open(id);
        Ok(())
    }

    pub fn close_modal(&mut self, trigger: CloseTrigger) -> bool {
        self.modal.close(trigger)
    }

    pub fn modal(&self) -> &Overlay<ProjectId> {
        &self.modal
    }

    pub fn open_project_id(&self) -> Option<ProjectId> {
        if self.modal.is_open() {
            self.modal.payload().copied()
        } else {
            None
        }
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal.is_open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::load_embedded;

    #[test]
    fn web_filter_keeps_order() {
        let portfolio = load_embedded().unwrap();
        let web = filter_projects(&portfolio.projects, CategoryFilter::Only(ProjectCategory::Web));
        let ids: Vec<_> = web.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 6]);
    }

    #[test]
    fn all_filter_returns_everything() {
        let portfolio = load_embedded().unwrap();
        let gallery = Gallery::new();
        assert_eq!(gallery.visible(&portfolio).len(), portfolio.projects.len());
    }

    #[test]
    fn parse_rejects_unknown_keys() {
        assert_eq!(CategoryFilter::parse("all"), Ok(CategoryFilter::All));
        assert_eq!(
            CategoryFilter::parse("mobile"),
            Ok(CategoryFilter::Only(ProjectCategory::Mobile))
        );
        assert!(matches!(
            CategoryFilter::parse("desktop"),
            Err(GalleryError::UnknownFilter(_))
        ));
    }

    #[test]
    fn filter_buttons_start_with_all() {
        let keys: Vec<_> = CategoryFilter::all().iter().map(|f| f.key()).collect();
        assert_eq!(keys, vec!["all", "web", "mobile", "ai"]);
    }

    #[test]
    fn unknown_project_leaves_modal_closed() {
        let portfolio = load_embedded().unwrap();
        let mut gallery = Gallery::new();
        assert_eq!(
            gallery.open_project(99, &portfolio),
            Err(GalleryError::UnknownProject(99))
        );
        assert!(!gallery.is_modal_open());
    }

    #[test]
    fn backdrop_and_escape_close_the_same_way() {
        let portfolio = load_embedded().unwrap();
        for trigger in [CloseTrigger::OutsideClick, CloseTrigger::Escape, CloseTrigger::Explicit] {
            let mut gallery = Gallery::new();
            gallery.open_project(5, &portfolio).unwrap();
            assert_eq!(gallery.open_project_id(), Some(5));
            assert!(gallery.close_modal(trigger));
            assert_eq!(gallery.open_project_id(), None);
        }
    }
}
