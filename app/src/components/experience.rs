use dioxus::prelude::*;
use folio_types::SectionId;

use super::section::{SectionShell, stagger_class, stagger_style};
use crate::site::use_site;

#[component]
pub fn Experience() -> Element {
    let site = use_site();
    let site_ref = site.read();
    let entries = &site_ref.portfolio().experience;

    rsx! {
        SectionShell { section: SectionId::Experience, subtitle: "Where I have worked and what I built there",
            ol { class: "timeline",
                for (i, job) in entries.iter().enumerate() {
                    li {
                        key: "{i}",
                        class: stagger_class("timeline-item"),
                        style: stagger_style(&site_ref, i),
                        div { class: "timeline-marker" }
                        div { class: "timeline-card",
                            div { class: "timeline-header",
                                h3 { "{job.position}" }
                                span { class: "timeline-period",
                                    i { class: "fa-regular fa-calendar" }
                                    " {job.period}"
                                }
                            }
                            p { class: "timeline-org",
                                if let Some(website) = job.website.as_ref() {
                                    a { href: "{website}", target: "_blank", rel: "noopener noreferrer", "{job.company}" }
                                } else {
                                    "{job.company}"
                                }
                                span { class: "timeline-location",
                                    i { class: "fa-solid fa-location-dot" }
                                    " {job.location}"
                                }
                            }
                            p { "{job.description}" }
                            if !job.achievements.is_empty() {
                                ul { class: "achievements",
                                    for achievement in job.achievements.iter() {
                                        li { key: "{achievement}", "{achievement}" }
                                    }
                                }
                            }
                            ul { class: "tag-list",
                                for tech in job.technologies.iter() {
                                    li { key: "{tech}", class: "tag", "{tech}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
