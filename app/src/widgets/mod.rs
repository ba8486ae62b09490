//! Page-level browser integrations
//!
//! Each widget implements the core [`Widget`](folio_core::Widget) contract
//! and owns its listeners and observers. They are mounted once after the
//! first render, in the order below, and destroyed in reverse when the page
//! unloads.

mod observe;
mod page;
mod scroll;
mod vitals;

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use folio_core::WidgetSet;
use folio_core::lifecycle::missing_mounts;
use folio_core::monitor::LogSink;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

pub use observe::{LazyImageObserver, REVEAL_CLASS, STAGGER_CLASS, VISIBLE_CLASS};

use crate::dom::{self, DomHost};
use crate::site::PageSite;

/// Mount every widget against the rendered page.
pub fn mount_all(site: Signal<PageSite>, lazy_images: LazyImageObserver) -> WidgetSet {
    let mut host = DomHost;

    let missing = missing_mounts(&host);
    if !missing.is_empty() {
        tracing::warn!(?missing, "required mount points not rendered");
    }

    let mut widgets = WidgetSet::new();
    widgets.mount(Box::new(page::ThemeSync::new(site)), &mut host);
    widgets.mount(Box::new(page::ResizeWatch::new(site)), &mut host);
    widgets.mount(Box::new(scroll::ScrollSpy::new(site)), &mut host);
    widgets.mount(Box::new(scroll::TouchNavigation::new(site)), &mut host);
    widgets.mount(Box::new(page::KeyboardShortcuts::new(site)), &mut host);
    widgets.mount(Box::new(page::PageActivity::new(site)), &mut host);
    widgets.mount(Box::new(page::ErrorCapture::new(site)), &mut host);
    widgets.mount(Box::new(observe::SectionVisits::new(site)), &mut host);
    widgets.mount(Box::new(observe::ScrollReveal::new(site)), &mut host);
    widgets.mount(
        Box::new(observe::LazyImageLoader::new(site, lazy_images)),
        &mut host,
    );
    widgets.mount(Box::new(vitals::VitalsObserver::new(site)), &mut host);

    tracing::info!(
        ready = widgets.ready_count(),
        total = widgets.len(),
        "widgets mounted"
    );
    widgets
}

/// Flush analytics and destroy every widget.
pub fn teardown(site: &mut Signal<PageSite>, widgets: &RefCell<WidgetSet>) {
    if let Ok(mut site) = site.try_write() {
        site.teardown(&mut LogSink::default(), &dom::report_context(), dom::now_ms());
    }
    if let Ok(mut widgets) = widgets.try_borrow_mut() {
        widgets.destroy_all(&mut DomHost);
    }
}

/// Run [`teardown`] on `beforeunload`, and bring the page back to life when
/// the browser restores it from the back/forward cache.
///
/// The listeners live outside the widget set so destroying the widgets from
/// inside one never drops the running closure.
pub fn install_unload(site: Signal<PageSite>, widgets: Rc<RefCell<WidgetSet>>) {
    let Some(window) = dom::window() else {
        return;
    };

    let mut unload_site = site;
    let unload_widgets = Rc::clone(&widgets);
    forget_listener(&window, "beforeunload", move |_| {
        teardown(&mut unload_site, &unload_widgets);
    });

    let mut restore_site = site;
    forget_listener(&window, "pageshow", move |event| {
        let persisted = event
            .dyn_ref::<web_sys::PageTransitionEvent>()
            .is_some_and(|e| e.persisted());
        if persisted {
            restore(&mut restore_site, &widgets);
        }
    });
}

/// Start a fresh visit and remount every widget after a bfcache restore.
fn restore(site: &mut Signal<PageSite>, widgets: &RefCell<WidgetSet>) {
    if let Ok(mut site) = site.try_write() {
        site.on_page_restored(dom::now_ms());
    }
    if let Ok(mut widgets) = widgets.try_borrow_mut() {
        widgets.reinit_all(&mut DomHost);
        tracing::info!(ready = widgets.ready_count(), "widgets restored");
    }
}

fn forget_listener(
    window: &web_sys::Window,
    kind: &str,
    handler: impl FnMut(web_sys::Event) + 'static,
) {
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    if let Err(err) = window.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
    {
        tracing::warn!(kind, error = %dom::js_message(&err), "page listener not installed");
    }
    // Lives for the rest of the page
    closure.forget();
}
