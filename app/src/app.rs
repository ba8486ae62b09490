//! Root component: site context, page layout and widget lifecycle

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use dioxus::prelude::*;
use folio_core::{MountPoint, WidgetSet};
use folio_types::SectionId;

use crate::components::{
    About, Contact, Education, Experience, Header, Home, Leadership, ProjectModal, Projects,
};
use crate::site::{PageSite, use_site, use_site_provider, use_startup};
use crate::widgets::{self, LazyImageObserver};

static CSS: Asset = asset!("/assets/styles.css");
const FONT_AWESOME: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css";

#[component]
fn SectionView(section: SectionId) -> Element {
    match section {
        SectionId::Home => rsx! { Home {} },
        SectionId::About => rsx! { About {} },
        SectionId::Projects => rsx! { Projects {} },
        SectionId::Experience => rsx! { Experience {} },
        SectionId::Leadership => rsx! { Leadership {} },
        SectionId::Education => rsx! { Education {} },
        SectionId::Contact => rsx! { Contact {} },
    }
}

#[component]
fn Footer() -> Element {
    let site = use_site();
    let name = site.read().portfolio().personal.name.clone();

    rsx! {
        footer { class: "site-footer",
            p { "Built by {name} with Rust and Dioxus" }
        }
    }
}

/// Shown instead of the page when the embedded data cannot be loaded
#[component]
fn StartupFailed(detail: String) -> Element {
    rsx! {
        link { rel: "stylesheet", href: CSS }
        main { id: MountPoint::Main.id(), class: "startup-error",
            div { class: "error-banner", role: "alert",
                h1 { "This page could not be loaded" }
                p { "The site content is invalid. Please try again later." }
                pre { class: "error-detail", "{detail}" }
            }
        }
    }
}

#[component]
fn Page(site: Signal<PageSite>) -> Element {
    let mut site = use_site_provider(site);
    let lazy_images = use_context_provider(|| LazyImageObserver::new(site));
    let widget_set = use_hook(|| Rc::new(RefCell::new(WidgetSet::new())));
    let mounted = use_hook(|| Rc::new(Cell::new(false)));

    // Widgets need the rendered DOM, so they mount after the first render.
    // Their setup reads the site, which would re-run this effect; the flag
    // keeps it to a single mount.
    use_effect({
        let widget_set = widget_set.clone();
        move || {
            if mounted.replace(true) {
                return;
            }
            *widget_set.borrow_mut() = widgets::mount_all(site, lazy_images.clone());
            widgets::install_unload(site, widget_set.clone());
        }
    });

    use_drop({
        let widget_set = widget_set.clone();
        move || widgets::teardown(&mut site, &widget_set)
    });

    let sections = site.read().section_order();

    rsx! {
        link { rel: "stylesheet", href: CSS }
        link { rel: "stylesheet", href: FONT_AWESOME }
        Header {}
        main { id: MountPoint::Main.id(),
            for section in sections {
                SectionView { key: "{section}", section }
            }
        }
        Footer {}
        ProjectModal {}
    }
}

#[component]
pub fn App() -> Element {
    match use_startup() {
        Ok(site) => rsx! { Page { site } },
        Err(detail) => rsx! { StartupFailed { detail } },
    }
}
