//! Site context shared by every component
//!
//! Built once in `App` and provided through Dioxus context; access it with
//! `use_site()`.

use dioxus::prelude::*;
use folio_core::site::StartupEnv;
use folio_core::Site;
use folio_types::SectionId;

use crate::dom::{self, LocalStore};

pub type PageSite = Site<LocalStore>;

/// Outcome of loading the embedded site data
pub type Startup = Result<Signal<PageSite>, String>;

fn build() -> Startup {
    let env = StartupEnv {
        system_prefers_dark: dom::system_prefers_dark(),
        viewport: dom::viewport(),
        now_ms: dom::now_ms(),
    };
    match Site::bootstrap(LocalStore, env) {
        Ok(mut site) => {
            site.apply_launch_query(&dom::location_search());
            Ok(Signal::new(site))
        }
        Err(err) => {
            let detail = err.detail();
            tracing::error!(error = %detail, "embedded site data invalid");
            Err(detail)
        }
    }
}

/// Load the site once at app root. The error carries the full cause chain.
pub fn use_startup() -> Startup {
    use_hook(build)
}

/// Share a loaded site with every component below.
pub fn use_site_provider(site: Signal<PageSite>) -> Signal<PageSite> {
    use_context_provider(|| site)
}

pub fn use_site() -> Signal<PageSite> {
    use_context::<Signal<PageSite>>()
}

/// Smooth-scroll to `section`, clearing the fixed header.
pub fn scroll_to_section(site: Signal<PageSite>, section: SectionId) {
    let Some(top) = dom::section_top(section) else {
        tracing::warn!(section = %section, "scroll target not rendered");
        return;
    };
    let target = match site.try_read() {
        Ok(site) => site.scroll_target(top),
        Err(_) => return,
    };
    dom::smooth_scroll_to(target);
}

/// A link to `section` was activated.
pub fn navigate_to(mut site: Signal<PageSite>, section: SectionId) {
    if let Ok(mut site) = site.try_write() {
        site.navigate(section);
    }
    scroll_to_section(site, section);
}
