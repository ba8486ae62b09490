use dioxus::prelude::*;
use folio_types::SectionId;

use super::section::{SectionShell, stagger_class, stagger_style};
use crate::site::use_site;

#[component]
pub fn Leadership() -> Element {
    let site = use_site();
    let site_ref = site.read();
    let portfolio = site_ref.portfolio();

    rsx! {
        SectionShell { section: SectionId::Leadership, subtitle: "Roles, recognition and certifications",
            div { class: "card-grid",
                for (i, role) in portfolio.leadership.iter().enumerate() {
                    div {
                        key: "{i}",
                        class: stagger_class("card"),
                        style: stagger_style(&site_ref, i),
                        h3 {
                            i { class: "fa-solid fa-users" }
                            " {role.title}"
                        }
                        p { class: "card-meta", "{role.organization} · {role.period}" }
                        p { "{role.description}" }
                        if !role.achievements.is_empty() {
                            ul { class: "achievements",
                                for achievement in role.achievements.iter() {
                                    li { key: "{achievement}", "{achievement}" }
                                }
                            }
                        }
                    }
                }
            }

            if !portfolio.awards.is_empty() {
                h3 { class: "subsection-title", "Awards" }
                div { class: "card-grid",
                    for award in portfolio.awards.iter() {
                        div { key: "{award.title}", class: "card card-compact",
                            h4 {
                                i { class: "fa-solid fa-trophy" }
                                " {award.title}"
                            }
                            p { class: "card-meta", "{award.organization} · {award.date}" }
                            p { "{award.description}" }
                        }
                    }
                }
            }

            if !portfolio.certifications.is_empty() {
                h3 { class: "subsection-title", "Certifications" }
                div { class: "card-grid",
                    for cert in portfolio.certifications.iter() {
                        div { key: "{cert.name}", class: "card card-compact",
                            h4 {
                                i { class: "fa-solid fa-certificate" }
                                " {cert.name}"
                            }
                            p { class: "card-meta", "{cert.issuer} · {cert.date}" }
                            p { "{cert.description}" }
                            if let Some(id) = cert.credential_id.as_ref() {
                                p { class: "credential", "Credential ID: {id}" }
                            }
                            if let Some(url) = cert.verify_url.as_ref() {
                                a { href: "{url}", target: "_blank", rel: "noopener noreferrer", "Verify" }
                            }
                        }
                    }
                }
            }
        }
    }
}
