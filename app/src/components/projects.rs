//! Project gallery: category filter, card grid and detail modal

use dioxus::prelude::*;
use folio_core::{CategoryFilter, CloseTrigger, MountPoint};
use folio_types::{Project, SectionId};

use super::lazy_image::LazyImage;
use super::section::{SectionShell, stagger_class, stagger_style};
use crate::site::use_site;

fn card_image_id(project: &Project) -> String {
    format!("project-image-{}", project.id)
}

#[component]
fn ProjectLinks(live_url: Option<String>, github_url: Option<String>) -> Element {
    rsx! {
        div { class: "project-links",
            if let Some(url) = live_url {
                a {
                    class: "btn btn-primary btn-small",
                    href: "{url}",
                    target: "_blank",
                    rel: "noopener noreferrer",
                    onclick: move |e| e.stop_propagation(),
                    i { class: "fa-solid fa-arrow-up-right-from-square" }
                    " Live demo"
                }
            }
            if let Some(url) = github_url {
                a {
                    class: "btn btn-outline btn-small",
                    href: "{url}",
                    target: "_blank",
                    rel: "noopener noreferrer",
                    onclick: move |e| e.stop_propagation(),
                    i { class: "fa-brands fa-github" }
                    " Code"
                }
            }
        }
    }
}

#[component]
pub fn Projects() -> Element {
    let mut site = use_site();
    let site_ref = site.read();
    let active = site_ref.gallery().filter();
    let visible: Vec<Project> = site_ref
        .gallery()
        .visible(site_ref.portfolio())
        .into_iter()
        .cloned()
        .collect();

    rsx! {
        SectionShell { section: SectionId::Projects, subtitle: "Selected work across web, mobile and AI",
            div { class: "filter-bar",
                for filter in CategoryFilter::all() {
                    button {
                        key: "{filter.key()}",
                        class: if filter == active { "filter-btn active" } else { "filter-btn" },
                        "data-filter": "{filter.key()}",
                        onclick: move |_| site.write().gallery_mut().set_filter(filter),
                        "{filter.label()}"
                    }
                }
            }

            div { id: MountPoint::ProjectsGrid.id(), class: "projects-grid",
                if visible.is_empty() {
                    p { class: "empty-state", "No projects in this category yet." }
                }
                for (i, project) in visible.into_iter().enumerate() {
                    article {
                        key: "{project.id}",
                        class: stagger_class("project-card"),
                        style: stagger_style(&site_ref, i),
                        onclick: move |_| {
                            site.write().open_project(project.id);
                        },
                        div { class: "project-media",
                            LazyImage {
                                image_id: card_image_id(&project),
                                src: project.image.clone(),
                                alt: project.title.clone(),
                            }
                            span { class: "project-category", "{project.category.label()}" }
                        }
                        div { class: "project-body",
                            h3 { "{project.title}" }
                            p { "{project.description}" }
                            ul { class: "tag-list",
                                for tech in project.technologies.iter() {
                                    li { key: "{tech}", class: "tag", "{tech}" }
                                }
                            }
                            ProjectLinks {
                                live_url: project.live_url.clone(),
                                github_url: project.github_url.clone(),
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Detail view for the open project. Closes from the close button, a click
/// on the backdrop, or Escape (handled by the keyboard widget).
#[component]
pub fn ProjectModal() -> Element {
    let mut site = use_site();
    let project = {
        let site = site.read();
        site.gallery()
            .open_project_id()
            .and_then(|id| site.portfolio().project(id).cloned())
    };

    let Some(project) = project else {
        return rsx! {};
    };

    rsx! {
        div {
            id: MountPoint::ProjectModal.id(),
            class: "modal-backdrop",
            role: "dialog",
            "aria-modal": "true",
            onclick: move |_| {
                site.write().gallery_mut().close_modal(CloseTrigger::OutsideClick);
            },
            div {
                class: "modal",
                onclick: move |e| e.stop_propagation(),
                button {
                    class: "modal-close",
                    title: "Close",
                    onclick: move |_| {
                        site.write().gallery_mut().close_modal(CloseTrigger::Explicit);
                    },
                    i { class: "fa-solid fa-xmark" }
                }
                LazyImage {
                    image_id: format!("modal-image-{}", project.id),
                    src: project.image.clone(),
                    alt: project.title.clone(),
                    class: "modal-image",
                }
                div { class: "modal-body",
                    span { class: "project-category", "{project.category.label()}" }
                    h3 { "{project.title}" }
                    p { "{project.description}" }
                    h4 { "Technologies" }
                    ul { class: "tag-list",
                        for tech in project.technologies.iter() {
                            li { key: "{tech}", class: "tag", "{tech}" }
                        }
                    }
                    ProjectLinks {
                        live_url: project.live_url.clone(),
                        github_url: project.github_url.clone(),
                    }
                }
            }
        }
    }
}
