//! Fixed header: brand, section links, theme toggle and the mobile menu

use dioxus::prelude::*;
use folio_core::{CloseTrigger, MountPoint};
use folio_types::SectionId;

use crate::dom;
use crate::site::{navigate_to, use_site};

#[component]
fn NavLink(section: SectionId, label: String, active: bool, mobile: bool) -> Element {
    let site = use_site();
    let base = if mobile { "mobile-nav-link" } else { "nav-link" };
    let class = if active { format!("{base} active") } else { base.to_string() };

    rsx! {
        a {
            class: "{class}",
            href: "#{section}",
            onclick: move |e| {
                e.prevent_default();
                navigate_to(site, section);
            },
            "{label}"
        }
    }
}

#[component]
pub fn Header() -> Element {
    let mut site = use_site();

    let (name, sections, active, scrolled, dark, menu_open) = {
        let site = site.read();
        (
            site.portfolio().personal.name.clone(),
            site.config().sections.clone(),
            site.active_section(),
            site.header_scrolled(),
            site.theme().is_dark(),
            site.is_mobile_menu_open(),
        )
    };

    let header_class = if scrolled { "site-header scrolled" } else { "site-header" };

    rsx! {
        header { id: MountPoint::Header.id(), class: "{header_class}",
            nav { class: "nav",
                a {
                    class: "brand",
                    href: format!("#{}", SectionId::Home),
                    onclick: move |e| {
                        e.prevent_default();
                        navigate_to(site, SectionId::Home);
                    },
                    "{name}"
                }

                ul { class: "nav-links",
                    for descriptor in sections.iter() {
                        li { key: "{descriptor.id}",
                            NavLink {
                                section: descriptor.id,
                                label: descriptor.name.clone(),
                                active: active == Some(descriptor.id),
                                mobile: false,
                            }
                        }
                    }
                }

                div { class: "nav-actions",
                    button {
                        id: MountPoint::DarkModeToggle.id(),
                        class: "icon-btn",
                        title: if dark { "Switch to light mode" } else { "Switch to dark mode" },
                        onclick: move |_| {
                            let theme = site.write().toggle_theme();
                            dom::apply_theme(theme);
                        },
                        if dark {
                            i { class: "fa-solid fa-moon" }
                        } else {
                            i { class: "fa-solid fa-sun" }
                        }
                    }
                    button {
                        id: MountPoint::MobileMenuToggle.id(),
                        class: "icon-btn mobile-only",
                        title: "Menu",
                        onclick: move |_| {
                            site.write().toggle_mobile_menu();
                        },
                        i { class: if menu_open { "fa-solid fa-xmark" } else { "fa-solid fa-bars" } }
                    }
                }
            }

            if menu_open {
                div { id: MountPoint::MobileMenu.id(), class: "mobile-menu",
                    for descriptor in sections.iter() {
                        NavLink {
                            key: "{descriptor.id}",
                            section: descriptor.id,
                            label: descriptor.name.clone(),
                            active: active == Some(descriptor.id),
                            mobile: true,
                        }
                    }
                    button {
                        class: "mobile-menu-close",
                        onclick: move |_| {
                            site.write().close_mobile_menu(CloseTrigger::Explicit);
                        },
                        "Close"
                    }
                }
            }
        }
    }
}
