//! Scroll-driven navigation: active section, header state, shortcuts

mod header;
mod shortcuts;
mod tracker;

pub use header::{StickyHeader, scroll_target};
pub use shortcuts::{KeyAction, alt_shortcut, classify_key};
pub use tracker::{ActiveChange, ActiveSectionTracker, SectionBounds, current_or_first, resolve_active};

use folio_types::SectionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Next,
    Previous,
}

/// Neighbor of `current` in `order`. `None` at either end.
pub fn adjacent(order: &[SectionId], current: SectionId, step: Step) -> Option<SectionId> {
    let index = order.iter().position(|s| *s == current)?;
    match step {
        Step::Next => order.get(index + 1).copied(),
        Step::Previous => index.checked_sub(1).and_then(|i| order.get(i).copied()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacent_stops_at_the_ends() {
        let order = SectionId::all();
        assert_eq!(adjacent(order, SectionId::Home, Step::Next), Some(SectionId::About));
        assert_eq!(adjacent(order, SectionId::Home, Step::Previous), None);
        assert_eq!(adjacent(order, SectionId::Contact, Step::Next), None);
        assert_eq!(adjacent(order, SectionId::Contact, Step::Previous), Some(SectionId::Education));
    }
}
