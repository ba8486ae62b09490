use dioxus::prelude::*;
use folio_types::SectionId;

use super::section::{SectionShell, stagger_class, stagger_style};
use crate::site::use_site;

#[component]
pub fn Education() -> Element {
    let site = use_site();
    let site_ref = site.read();
    let portfolio = site_ref.portfolio();

    rsx! {
        SectionShell { section: SectionId::Education, subtitle: "Formal education and continued learning",
            div { class: "card-grid",
                for (i, degree) in portfolio.education.iter().enumerate() {
                    div {
                        key: "{i}",
                        class: stagger_class("card"),
                        style: stagger_style(&site_ref, i),
                        h3 {
                            i { class: "fa-solid fa-graduation-cap" }
                            " {degree.degree}"
                        }
                        p { class: "card-meta", "{degree.institution} · {degree.location} · {degree.period}" }
                        if let Some(description) = degree.description.as_ref() {
                            p { "{description}" }
                        }
                        if let Some(gpa) = degree.gpa.as_ref() {
                            p { class: "gpa", "GPA: {gpa}" }
                        }
                        if !degree.relevant_courses.is_empty() {
                            ul { class: "tag-list",
                                for course in degree.relevant_courses.iter() {
                                    li { key: "{course}", class: "tag", "{course}" }
                                }
                            }
                        }
                        if !degree.achievements.is_empty() {
                            ul { class: "achievements",
                                for achievement in degree.achievements.iter() {
                                    li { key: "{achievement}", "{achievement}" }
                                }
                            }
                        }
                    }
                }
            }

            if !portfolio.courses.is_empty() {
                h3 { class: "subsection-title", "Online courses" }
                div { class: "card-grid",
                    for course in portfolio.courses.iter() {
                        div { key: "{course.title}", class: "card card-compact",
                            h4 { "{course.title}" }
                            p { class: "card-meta",
                                "{course.platform} · {course.date}"
                                if !course.duration.is_empty() {
                                    " · {course.duration}"
                                }
                            }
                            p { "{course.description}" }
                            if let Some(url) = course.certificate_url.as_ref() {
                                a { href: "{url}", target: "_blank", rel: "noopener noreferrer",
                                    i { class: "fa-solid fa-award" }
                                    " Certificate"
                                }
                            }
                        }
                    }
                }
            }

            if !portfolio.technology_groups.is_empty() {
                h3 { class: "subsection-title", "Technologies" }
                div { class: "tech-groups",
                    for group in portfolio.technology_groups.iter() {
                        div { key: "{group.name}", class: "tech-group",
                            h4 { "{group.name}" }
                            ul { class: "tag-list",
                                for tech in group.technologies.iter() {
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
