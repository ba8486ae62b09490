//! Active section resolution from scroll position

use folio_types::SectionId;

use crate::config::LayoutSettings;

/// Measured layout box of one rendered section
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionBounds {
    pub id: SectionId,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    /// Half-open: `[top, top + height)`
    pub fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.top + self.height
    }
}

/// Section containing `position`, scanning in page order. When boxes overlap
/// the later section wins.
pub fn resolve_active(bounds: &[SectionBounds], position: f64) -> Option<SectionId> {
    bounds
        .iter()
        .rev()
        .find(|b| b.contains(position))
        .map(|b| b.id)
}

/// First section containing `position`, else the first section on the page.
/// Swipe navigation steps relative to this.
pub fn current_or_first(bounds: &[SectionBounds], position: f64) -> Option<SectionId> {
    bounds
        .iter()
        .find(|b| b.contains(position))
        .or_else(|| bounds.first())
        .map(|b| b.id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveChange {
    pub previous: Option<SectionId>,
    pub current: Option<SectionId>,
}

#[derive(Debug, Clone)]
pub struct ActiveSectionTracker {
    active: Option<SectionId>,
    scroll_offset: f64,
}

impl ActiveSectionTracker {
    pub fn new(layout: &LayoutSettings) -> Self {
        Self {
            active: None,
            scroll_offset: f64::from(layout.scroll_offset),
        }
    }

    pub fn active(&self) -> Option<SectionId> {
        self.active
    }

    /// Scroll position used for hit testing
    pub fn reference_line(&self, scroll_y: f64) -> f64 {
        scroll_y + self.scroll_offset
    }

    /// Whether [`update`](Self::update) would report a change.
    pub fn would_change(&self, scroll_y: f64, bounds: &[SectionBounds]) -> bool {
        resolve_active(bounds, self.reference_line(scroll_y)) != self.active
    }

    /// Re-resolve after a scroll. Returns a change only when the resolved
    /// section differs from the current highlight.
    pub fn update(&mut self, scroll_y: f64, bounds: &[SectionBounds]) -> Option<ActiveChange> {
        let resolved = resolve_active(bounds, self.reference_line(scroll_y));
        if resolved == self.active {
            return None;
        }
        let change = ActiveChange {
            previous: self.active,
            current: resolved,
        };
        self.active = resolved;
        tracing::trace!(section = ?resolved, "active section changed");
        Some(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Vec<SectionBounds> {
        vec![
            SectionBounds { id: SectionId::Home, top: 0.0, height: 800.0 },
            SectionBounds { id: SectionId::About, top: 800.0, height: 600.0 },
            SectionBounds { id: SectionId::Projects, top: 1400.0, height: 1000.0 },
        ]
    }

    #[test]
    fn position_inside_box_resolves_to_it() {
        assert_eq!(resolve_active(&page(), 0.0), Some(SectionId::Home));
        assert_eq!(resolve_active(&page(), 1399.9), Some(SectionId::About));
        assert_eq!(resolve_active(&page(), 5000.0), None);
    }

    #[test]
    fn exact_boundary_belongs_to_later_section() {
        assert_eq!(resolve_active(&page(), 800.0), Some(SectionId::About));
    }

    #[test]
    fn overlapping_boxes_pick_the_last() {
        let mut bounds = page();
        bounds[1].height = 900.0;
        assert_eq!(resolve_active(&bounds, 1500.0), Some(SectionId::Projects));
    }

    #[test]
    fn update_reports_only_changes() {
        let mut tracker = ActiveSectionTracker::new(&LayoutSettings::default());
        let first = tracker.update(0.0, &page()).unwrap();
        assert_eq!(first.current, Some(SectionId::Home));
        assert!(tracker.update(50.0, &page()).is_none());

        // 700 + 100 offset lands on about
        let change = tracker.update(700.0, &page()).unwrap();
        assert_eq!(change.previous, Some(SectionId::Home));
        assert_eq!(change.current, Some(SectionId::About));
    }

    #[test]
    fn current_falls_back_to_first_section() {
        assert_eq!(current_or_first(&page(), 9000.0), Some(SectionId::Home));
        assert_eq!(current_or_first(&[], 0.0), None);
    }
}
