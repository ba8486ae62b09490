//! Page-level keyboard handling

use folio_types::SectionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Escape: close every open overlay
    CloseOverlays,
    /// Tab: show focus outlines until the next mouse down
    KeyboardNavigation,
    /// Alt+digit: jump to a section
    JumpTo(SectionId),
}

/// Alt+1 … Alt+6, in navigation order. Contact has no shortcut.
pub fn alt_shortcut(key: &str) -> Option<SectionId> {
    let section = match key {
        "1" => SectionId::Home,
        "2" => SectionId::About,
        "3" => SectionId::Projects,
        "4" => SectionId::Experience,
        "5" => SectionId::Leadership,
        "6" => SectionId::Education,
        _ => return None,
    };
    Some(section)
}

pub fn classify_key(key: &str, alt: bool) -> Option<KeyAction> {
    match key {
        "Escape" => Some(KeyAction::CloseOverlays),
        "Tab" => Some(KeyAction::KeyboardNavigation),
        _ if alt => alt_shortcut(key).map(KeyAction::JumpTo),
        _ => None,
    }
}
