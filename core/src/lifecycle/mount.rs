//! Typed registry of DOM mount points
//!
//! Every element id the frontend renders or looks up comes from here, so a
//! rename is a compile error instead of a silently dead handler.

use folio_types::SectionId;

use crate::contact::FormField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MountPoint {
    Header,
    Main,
    Section(SectionId),
    DarkModeToggle,
    MobileMenuToggle,
    MobileMenu,
    ProjectsGrid,
    ProjectModal,
    ContactForm,
    SubmitButton,
    SuccessMessage,
    FieldError(FormField),
}

impl MountPoint {
    pub fn id(&self) -> &'static str {
        match self {
            MountPoint::Header => "header",
            MountPoint::Main => "main",
            MountPoint::Section(section) => section.anchor(),
            MountPoint::DarkModeToggle => "dark-mode-toggle",
            MountPoint::MobileMenuToggle => "mobile-menu-toggle",
            MountPoint::MobileMenu => "mobile-menu",
            MountPoint::ProjectsGrid => "projects-grid",
            MountPoint::ProjectModal => "project-modal",
            MountPoint::ContactForm => "contact-form",
            MountPoint::SubmitButton => "submit-btn",
            MountPoint::SuccessMessage => "success-message",
            MountPoint::FieldError(field) => field.error_slot(),
        }
    }

    /// Mount points that must exist once the page has rendered.
    ///
    /// Overlays and banners are rendered conditionally and are not listed.
    pub fn required() -> Vec<MountPoint> {
        let mut points = vec![
            MountPoint::Header,
            MountPoint::Main,
            MountPoint::DarkModeToggle,
            MountPoint::MobileMenuToggle,
            MountPoint::ProjectsGrid,
            MountPoint::ContactForm,
            MountPoint::SubmitButton,
        ];
        points.extend(SectionId::all().iter().map(|s| MountPoint::Section(*s)));
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_ids_are_unique() {
        let points = MountPoint::required();
        let mut ids: Vec<_> = points.iter().map(|p| p.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), points.len());
    }

    #[test]
    fn field_error_slots_follow_field_names() {
        assert_eq!(MountPoint::FieldError(FormField::Email).id(), "email-error");
        assert_eq!(MountPoint::Section(SectionId::Projects).id(), "projects");
    }
}
