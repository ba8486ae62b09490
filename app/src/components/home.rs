use dioxus::prelude::*;
use folio_core::animation::Typewriter;
use folio_types::SectionId;
use gloo_timers::future::TimeoutFuture;

use super::section::SectionShell;
use crate::site::{navigate_to, use_site};

/// Delay between typed characters
const TYPE_TICK_MS: u32 = 50;

#[component]
pub fn Home() -> Element {
    let site = use_site();
    let personal = site.read().portfolio().personal.clone();

    let title = personal.title.clone();
    let mut typed = use_signal(move || Typewriter::new(title));
    use_future(move || async move {
        loop {
            TimeoutFuture::new(TYPE_TICK_MS).await;
            if !typed.write().tick() {
                break;
            }
        }
    });

    let socials = [
        (personal.github.clone(), "fa-brands fa-github", "GitHub"),
        (personal.linkedin.clone(), "fa-brands fa-linkedin", "LinkedIn"),
        (personal.twitter.clone(), "fa-brands fa-x-twitter", "Twitter"),
    ];

    rsx! {
        SectionShell { section: SectionId::Home,
            div { class: "hero",
                div { class: "hero-shapes",
                    div { class: "shape shape-1 parallax", "data-speed": "0.2" }
                    div { class: "shape shape-2 parallax", "data-speed": "0.4" }
                    div { class: "shape shape-3 parallax" }
                }
                div { class: "hero-image",
                    img { src: "{personal.headshot}", alt: "{personal.name}" }
                }
                div { class: "hero-text",
                    p { class: "hero-greeting", "Hello, I'm" }
                    h1 { class: "hero-name", "{personal.name}" }
                    h2 { class: "hero-title",
                        "{typed.read().visible()}"
                        span { class: "typing-caret", "|" }
                    }
                    p { class: "hero-bio", "{personal.bio}" }
                    div { class: "hero-actions",
                        button {
                            class: "btn btn-primary",
                            onclick: move |_| navigate_to(site, SectionId::Projects),
                            i { class: "fa-solid fa-briefcase" }
                            " View my work"
                        }
                        button {
                            class: "btn btn-secondary",
                            onclick: move |_| navigate_to(site, SectionId::Contact),
                            i { class: "fa-solid fa-envelope" }
                            " Get in touch"
                        }
                        if !personal.resume.is_empty() {
                            a {
                                class: "btn btn-outline",
                                href: "{personal.resume}",
                                download: "",
                                i { class: "fa-solid fa-download" }
                                " Resume"
                            }
                        }
                    }
                    div { class: "social-links",
                        for (url, icon, label) in socials.into_iter().filter(|(url, _, _)| !url.is_empty()) {
                            a {
                                key: "{label}",
                                href: "{url}",
                                target: "_blank",
                                rel: "noopener noreferrer",
                                title: "{label}",
                                i { class: "{icon}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
