//! Header scroll behavior

use crate::config::LayoutSettings;

/// Scroll destination for a section so its top clears the fixed header.
pub fn scroll_target(section_top: f64, layout: &LayoutSettings) -> f64 {
    (section_top - f64::from(layout.header_height)).max(0.0)
}

/// Header shadow once the page is scrolled past a threshold.
#[derive(Debug, Clone)]
pub struct StickyHeader {
    threshold: f64,
    scrolled: bool,
}

impl StickyHeader {
    pub fn new(layout: &LayoutSettings) -> Self {
        Self {
            threshold: f64::from(layout.sticky_threshold),
            scrolled: false,
        }
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn would_change(&self, scroll_y: f64) -> bool {
        (scroll_y > self.threshold) != self.scrolled
    }

    /// Returns the new state when the threshold is crossed.
    pub fn update(&mut self, scroll_y: f64) -> Option<bool> {
        let scrolled = scroll_y > self.threshold;
        if scrolled == self.scrolled {
            return None;
        }
        self.scrolled = scrolled;
        Some(scrolled)
    }
}
