//! Section frame shared by every content block

use dioxus::prelude::*;
use folio_core::MountPoint;
use folio_core::animation::stagger_delay;
use folio_types::SectionId;

use crate::site::{PageSite, use_site};
use crate::widgets::{REVEAL_CLASS, STAGGER_CLASS, VISIBLE_CLASS};

/// Id of the block revealed when `section` scrolls into view
pub fn reveal_id(section: SectionId) -> String {
    format!("{}-reveal", section.anchor())
}

/// `class` for a block that fades in once. The visible state is kept in the
/// site so a re-render never hides an already revealed block.
pub fn reveal_class(site: &PageSite, key: &str) -> String {
    if site.reveal().is_revealed(key) {
        format!("{REVEAL_CLASS} {VISIBLE_CLASS}")
    } else {
        REVEAL_CLASS.to_string()
    }
}

/// Transition delay for the `index`th staggered child.
pub fn stagger_style(site: &PageSite, index: usize) -> String {
    let delay = stagger_delay(index, &site.config().animation);
    format!("transition-delay: {delay}ms")
}

/// Class for staggered children of a reveal block
pub fn stagger_class(extra: &str) -> String {
    format!("{STAGGER_CLASS} {extra}")
}

#[component]
pub fn SectionShell(section: SectionId, subtitle: Option<String>, children: Element) -> Element {
    let site = use_site();
    let key = reveal_id(section);
    let (title, class) = {
        let site = site.read();
        (
            site.config().section_name(section).to_string(),
            reveal_class(&site, &key),
        )
    };

    rsx! {
        section {
            id: MountPoint::Section(section).id(),
            class: "section section-{section}",
            div { class: "container",
                // Home is a hero and carries no heading
                if section != SectionId::Home {
                    header { class: "section-header",
                        h2 { class: "section-title", "{title}" }
                        if let Some(subtitle) = subtitle {
                            p { class: "section-subtitle", "{subtitle}" }
                        }
                    }
                }
                div { id: "{key}", class: "{class}", {children} }
            }
        }
    }
}
