//! IntersectionObserver backed widgets: section visits, scroll reveal and
//! lazy images

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use folio_core::{MountHost, MountPoint, Widget, WidgetError};
use folio_types::SectionId;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local as spawn;

use crate::dom;
use crate::site::PageSite;

/// Marks a block that fades in on first intersection
pub const REVEAL_CLASS: &str = "animate-on-scroll";
/// Children of a revealed block that appear one after another, each with a
/// transition delay from `stagger_delay`
pub const STAGGER_CLASS: &str = "animate-stagger";
pub const VISIBLE_CLASS: &str = "visible";
const LAZY_SELECTOR: &str = "img[data-src]";

type EntryCallback = Closure<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>;

/// An `IntersectionObserver` plus the closure it calls.
pub struct Observer {
    inner: web_sys::IntersectionObserver,
    _callback: EntryCallback,
}

impl Observer {
    /// `on_visible` runs for every entry that is intersecting.
    pub fn new(
        root_margin: &str,
        threshold: f64,
        mut on_visible: impl FnMut(web_sys::Element, &web_sys::IntersectionObserver) + 'static,
    ) -> Result<Self, WidgetError> {
        let callback = EntryCallback::new(
            move |entries: js_sys::Array, observer: web_sys::IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<web_sys::IntersectionObserverEntry>() else {
                        continue;
                    };
                    if entry.is_intersecting() {
                        on_visible(entry.target(), &observer);
                    }
                }
            },
        );
        let init = web_sys::IntersectionObserverInit::new();
        init.set_root_margin(root_margin);
        init.set_threshold(&JsValue::from_f64(threshold));
        let inner = web_sys::IntersectionObserver::new_with_options(
            callback.as_ref().unchecked_ref(),
            &init,
        )
        .map_err(dom::js_error)?;
        Ok(Self {
            inner,
            _callback: callback,
        })
    }

    pub fn observe(&self, element: &web_sys::Element) {
        self.inner.observe(element);
    }

    /// Observe every element matching `selector`. Returns how many matched.
    pub fn observe_all(&self, selector: &str) -> usize {
        let elements = dom::query_all(selector);
        for element in &elements {
            self.inner.observe(element);
        }
        elements.len()
    }

    pub fn disconnect(&self) {
        self.inner.disconnect();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Section visits
// ─────────────────────────────────────────────────────────────────────────────

/// Counts a visit each time a section becomes at least half visible.
pub struct SectionVisits {
    site: Signal<PageSite>,
    observer: Option<Observer>,
}

impl SectionVisits {
    pub fn new(site: Signal<PageSite>) -> Self {
        Self {
            site,
            observer: None,
        }
    }
}

impl Widget for SectionVisits {
    fn name(&self) -> &'static str {
        "section-visits"
    }

    fn render(&mut self, _host: &mut dyn MountHost) -> Result<(), WidgetError> {
        Ok(())
    }

    fn attach_listeners(&mut self, _host: &mut dyn MountHost) -> Result<(), WidgetError> {
        let mut site = self.site;
        let observer = Observer::new("0px", 0.5, move |target, _| {
            let Some(section) = SectionId::from_anchor(&target.id()) else {
                return;
            };
            if let Ok(mut site) = site.try_write() {
                site.on_section_visible(section);
            }
        })?;

        for section in SectionId::all() {
            if let Some(element) = dom::element(MountPoint::Section(*section).id()) {
                observer.observe(&element);
            }
        }
        self.observer = Some(observer);
        Ok(())
    }

    fn destroy(&mut self, _host: &mut dyn MountHost) {
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scroll reveal
// ─────────────────────────────────────────────────────────────────────────────

/// Fades in blocks the first time they scroll into view.
pub struct ScrollReveal {
    site: Signal<PageSite>,
    observer: Option<Observer>,
}

impl ScrollReveal {
    pub fn new(site: Signal<PageSite>) -> Self {
        Self {
            site,
            observer: None,
        }
    }
}

impl Widget for ScrollReveal {
    fn name(&self) -> &'static str {
        "animations"
    }

    fn mount_point(&self) -> Option<MountPoint> {
        Some(MountPoint::Main)
    }

    fn render(&mut self, _host: &mut dyn MountHost) -> Result<(), WidgetError> {
        Ok(())
    }

    fn attach_listeners(&mut self, _host: &mut dyn MountHost) -> Result<(), WidgetError> {
        let mut site = self.site;
        let observer = Observer::new("0px 0px -50px 0px", 0.1, move |target, observer| {
            observer.unobserve(&target);
            let first = match site.try_write() {
                Ok(mut site) => site.reveal_mut().on_intersect(&target.id()),
                Err(_) => return,
            };
            if first {
                let _ = target.class_list().add_1(VISIBLE_CLASS);
            }
        })?;
        let observed = observer.observe_all(&format!(".{REVEAL_CLASS}"));
        tracing::debug!(observed, "reveal targets observed");
        self.observer = Some(observer);
        Ok(())
    }

    fn destroy(&mut self, _host: &mut dyn MountHost) {
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Lazy images
// ─────────────────────────────────────────────────────────────────────────────

/// Preload `src` off-DOM and settle the image state. A preload still running
/// after `timeout_ms` shows the fallback until it finishes.
fn preload(site: Signal<PageSite>, key: String, src: &str, timeout_ms: u32) {
    let Ok(image) = web_sys::HtmlImageElement::new() else {
        tracing::warn!(image = %key, "could not create preload image");
        return;
    };

    let mut on_load_site = site;
    let load_key = key.clone();
    let on_load = Closure::once_into_js(move || {
        if let Ok(mut site) = on_load_site.try_write() {
            site.images_mut().on_loaded(&load_key);
        }
    });

    let mut on_error_site = site;
    let error_key = key.clone();
    let on_error = Closure::once_into_js(move || {
        if let Ok(mut site) = on_error_site.try_write() {
            site.images_mut().on_failed(&error_key);
        }
    });

    image.set_onload(Some(on_load.unchecked_ref()));
    image.set_onerror(Some(on_error.unchecked_ref()));
    image.set_src(src);

    let mut site = site;
    spawn(async move {
        TimeoutFuture::new(timeout_ms).await;
        // no-op unless still loading
        if let Ok(mut site) = site.try_write() {
            site.images_mut().on_timeout(&key);
        }
    });
}

/// Shared handle to the lazy image observer so images rendered after startup
/// can be picked up.
#[derive(Clone)]
pub struct LazyImageObserver {
    site: Signal<PageSite>,
    observer: Rc<RefCell<Option<Observer>>>,
}

impl LazyImageObserver {
    pub fn new(site: Signal<PageSite>) -> Self {
        Self {
            site,
            observer: Rc::new(RefCell::new(None)),
        }
    }

    /// Observe every rendered image that has not been triggered yet.
    pub fn refresh(&self) -> usize {
        let observer = self.observer.borrow();
        let Some(observer) = observer.as_ref() else {
            return 0;
        };
        // peek: callers run inside effects and must not subscribe
        let Ok(site) = self.site.try_peek() else {
            return 0;
        };
        let mut observed = 0;
        for key in site.images().pending_keys() {
            if let Some(element) = dom::element(key) {
                observer.observe(&element);
                observed += 1;
            }
        }
        observed
    }

    fn install(&self, observer: Observer) {
        *self.observer.borrow_mut() = Some(observer);
    }

    fn uninstall(&self) {
        if let Some(observer) = self.observer.borrow_mut().take() {
            observer.disconnect();
        }
    }
}

/// Swaps in real image sources as images approach the viewport.
pub struct LazyImageLoader {
    site: Signal<PageSite>,
    handle: LazyImageObserver,
}

impl LazyImageLoader {
    pub fn new(site: Signal<PageSite>, handle: LazyImageObserver) -> Self {
        Self { site, handle }
    }
}

impl Widget for LazyImageLoader {
    fn name(&self) -> &'static str {
        "lazy-images"
    }

    fn mount_point(&self) -> Option<MountPoint> {
        Some(MountPoint::ProjectsGrid)
    }

    fn render(&mut self, _host: &mut dyn MountHost) -> Result<(), WidgetError> {
        Ok(())
    }

    fn attach_listeners(&mut self, _host: &mut dyn MountHost) -> Result<(), WidgetError> {
        let (margin, timeout) = {
            let site = self
                .site
                .try_read()
                .map_err(|_| WidgetError::Unavailable("site context"))?;
            let config = site.config();
            (
                format!("{}px", config.layout.lazy_load_offset),
                config.performance.image_load_timeout,
            )
        };

        let mut site = self.site;
        let observer = Observer::new(&margin, 0.1, move |target, observer| {
            observer.unobserve(&target);
            let key = target.id();
            let src = match site.try_write() {
                Ok(mut site) => site.images_mut().on_intersect(&key).map(str::to_owned),
                Err(_) => return,
            };
            if let Some(src) = src {
                preload(site, key, &src, timeout);
            }
        })?;

        let tagged = dom::query_all(LAZY_SELECTOR).len();
        self.handle.install(observer);
        let observed = self.handle.refresh();
        tracing::debug!(tagged, observed, "lazy images observed");
        Ok(())
    }

    fn destroy(&mut self, _host: &mut dyn MountHost) {
        self.handle.uninstall();
    }
}
