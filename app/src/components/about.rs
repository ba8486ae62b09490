use dioxus::prelude::*;
use folio_core::animation::{CounterAnimation, FRAME_MS};
use folio_types::SectionId;
use gloo_timers::future::TimeoutFuture;

use super::section::{SectionShell, reveal_id, stagger_class, stagger_style};
use crate::site::use_site;

const COUNTER_DURATION_MS: u32 = 2000;

/// Counts up from zero once the About block has been revealed.
#[component]
fn Counter(target: u64, label: String) -> Element {
    let site = use_site();
    let mut shown = use_signal(|| 0u64);
    let mut started = use_signal(|| false);

    use_effect(move || {
        let revealed = site
            .read()
            .reveal()
            .is_revealed(&reveal_id(SectionId::About));
        if !revealed || *started.peek() {
            return;
        }
        started.set(true);
        spawn(async move {
            for value in CounterAnimation::new(target, COUNTER_DURATION_MS) {
                shown.set(value);
                TimeoutFuture::new(FRAME_MS).await;
            }
        });
    });

    rsx! {
        div { class: "stat",
            span { class: "stat-value", "{shown}+" }
            span { class: "stat-label", "{label}" }
        }
    }
}

#[component]
pub fn About() -> Element {
    let site = use_site();
    let site_ref = site.read();
    let portfolio = site_ref.portfolio();
    let bars_visible = site_ref
        .reveal()
        .is_revealed(&reveal_id(SectionId::About));

    let technologies: u64 = portfolio
        .skill_groups
        .iter()
        .map(|g| g.skills.len() as u64)
        .sum();

    rsx! {
        SectionShell { section: SectionId::About, subtitle: "A little about who I am and what I do",
            div { class: "about-grid",
                div { class: "about-story",
                    for (i, paragraph) in portfolio.story.iter().enumerate() {
                        p { key: "{i}", "{paragraph}" }
                    }
                    div { class: "stats",
                        Counter { target: portfolio.projects.len() as u64, label: "Projects" }
                        Counter { target: portfolio.experience.len() as u64, label: "Roles" }
                        Counter { target: technologies, label: "Technologies" }
                    }
                }

                div { class: "about-skills",
                    for (i, group) in portfolio.skill_groups.iter().enumerate() {
                        div {
                            key: "{group.name}",
                            class: stagger_class("skill-group"),
                            style: stagger_style(&site_ref, i),
                            h3 { "{group.name}" }
                            for skill in group.skills.iter() {
                                div { key: "{skill.name}", class: "skill",
                                    div { class: "skill-header",
                                        span { "{skill.name}" }
                                        span { class: "skill-level", "{skill.level}%" }
                                    }
                                    div { class: "skill-track",
                                        div {
                                            class: "skill-bar",
                                            style: if bars_visible { format!("width: {}%", skill.level.min(100)) } else { "width: 0%".to_string() },
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            div { class: "interests",
                h3 { "Interests" }
                ul { class: "tag-list",
                    for interest in portfolio.interests.iter() {
                        li { key: "{interest}", class: "tag", "{interest}" }
                    }
                }
            }
        }
    }
}
