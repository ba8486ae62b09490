//! Scroll and touch driven navigation

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use folio_core::animation::{FrameGate, parallax_offset};
use folio_core::rate_limit::Throttle;
use folio_core::{MountHost, MountPoint, Widget, WidgetError};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::dom::{self, Listener, Listeners};
use crate::site::{PageSite, scroll_to_section};

const PARALLAX_SELECTOR: &str = ".parallax";
const PROGRESS_CLASS: &str = "scroll-progress";

// ─────────────────────────────────────────────────────────────────────────────
// Scroll spy and parallax
// ─────────────────────────────────────────────────────────────────────────────

/// Throttled scroll handling: active section highlight, sticky header,
/// scroll depth and a progress bar under the header. Parallax layers move
/// once per animation frame.
pub struct ScrollSpy {
    site: Signal<PageSite>,
    listeners: Listeners,
    throttle: Rc<RefCell<Throttle>>,
    progress: Option<web_sys::HtmlElement>,
    frame: Rc<RefCell<FrameGate>>,
    /// Kept alive for `requestAnimationFrame`
    on_frame: Option<Rc<Closure<dyn FnMut()>>>,
}

impl ScrollSpy {
    pub fn new(site: Signal<PageSite>) -> Self {
        Self {
            site,
            listeners: Listeners::default(),
            throttle: Rc::new(RefCell::new(Throttle::new(0))),
            progress: None,
            frame: Rc::new(RefCell::new(FrameGate::default())),
            on_frame: None,
        }
    }

    /// Writes to the site only when the scroll moved something it renders.
    fn sync(site: &mut Signal<PageSite>, progress: Option<&web_sys::HtmlElement>) {
        let sample = dom::scroll_sample();
        if let Some(bar) = progress {
            let _ = bar
                .style()
                .set_property("width", &format!("{}%", sample.progress()));
        }

        let bounds = {
            let Ok(site) = site.try_peek() else {
                return;
            };
            let bounds = dom::section_bounds(&site.section_order());
            if !site.scroll_changes(sample, &bounds) {
                return;
            }
            bounds
        };
        if let Ok(mut site) = site.try_write() {
            site.on_scroll(sample, &bounds, dom::now_ms());
        }
    }
}

fn move_parallax_layers(speed: f64) {
    let scroll_y = dom::scroll_y();
    for element in dom::query_all(PARALLAX_SELECTOR) {
        let Ok(element) = element.dyn_into::<web_sys::HtmlElement>() else {
            continue;
        };
        let speed = element
            .get_attribute("data-speed")
            .and_then(|s| s.parse::<f64>().ok())
            .unwrap_or(speed);
        let offset = parallax_offset(scroll_y, speed);
        let _ = element
            .style()
            .set_property("transform", &format!("translateY({offset}px)"));
    }
}

impl Widget for ScrollSpy {
    fn name(&self) -> &'static str {
        "navigation"
    }

    fn mount_point(&self) -> Option<MountPoint> {
        Some(MountPoint::Header)
    }

    fn render(&mut self, _host: &mut dyn MountHost) -> Result<(), WidgetError> {
        let document = dom::require_document()?;
        let header = document
            .get_element_by_id(MountPoint::Header.id())
            .ok_or(WidgetError::MissingMount {
                id: MountPoint::Header.id(),
            })?;
        let bar = document
            .create_element("div")
            .map_err(dom::js_error)?
            .dyn_into::<web_sys::HtmlElement>()
            .map_err(|_| WidgetError::Js("progress bar is not an HTML element".into()))?;
        bar.set_class_name(PROGRESS_CLASS);
        bar.set_attribute(dom::WIDGET_OWNED_ATTR, self.name())
            .map_err(dom::js_error)?;
        header.append_child(&bar).map_err(dom::js_error)?;
        self.progress = Some(bar);

        let delay = self
            .site
            .try_peek()
            .map_err(|_| WidgetError::Unavailable("site context"))?
            .config()
            .performance
            .throttle_delay;
        *self.throttle.borrow_mut() = Throttle::new(delay);

        Self::sync(&mut self.site, self.progress.as_ref());
        Ok(())
    }

    fn attach_listeners(&mut self, _host: &mut dyn MountHost) -> Result<(), WidgetError> {
        let window = dom::require_window()?;
        let speed = self
            .site
            .try_peek()
            .map_err(|_| WidgetError::Unavailable("site context"))?
            .config()
            .animation
            .parallax_speed;

        let frame = Rc::clone(&self.frame);
        let on_frame = Rc::new(Closure::<dyn FnMut()>::new(move || {
            move_parallax_layers(speed);
            frame.borrow_mut().frame_done();
        }));
        self.on_frame = Some(Rc::clone(&on_frame));

        let mut site = self.site;
        let throttle = Rc::clone(&self.throttle);
        let progress = self.progress.clone();
        let frame = Rc::clone(&self.frame);
        let raf_window = window.clone();
        self.listeners.push(Listener::new(&window, "scroll", move |_| {
            if throttle.borrow_mut().admit(dom::now_ms()) {
                Self::sync(&mut site, progress.as_ref());
            }
            if frame.borrow_mut().request()
                && raf_window
                    .request_animation_frame(Closure::as_ref(&on_frame).unchecked_ref())
                    .is_err()
            {
                frame.borrow_mut().frame_done();
            }
        })?);
        Ok(())
    }

    fn destroy(&mut self, _host: &mut dyn MountHost) {
        self.listeners.remove_all();
        self.on_frame = None;
        // the node itself is removed by the host through its owner marker
        self.progress = None;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Touch
// ─────────────────────────────────────────────────────────────────────────────

fn first_touch(event: &web_sys::Event, changed: bool) -> Option<web_sys::Touch> {
    let event = event.dyn_ref::<web_sys::TouchEvent>()?;
    let list = if changed {
        event.changed_touches()
    } else {
        event.touches()
    };
    list.item(0)
}

/// Vertical swipes step between sections; a quick second tap is swallowed.
pub struct TouchNavigation {
    site: Signal<PageSite>,
    listeners: Listeners,
}

impl TouchNavigation {
    pub fn new(site: Signal<PageSite>) -> Self {
        Self {
            site,
            listeners: Listeners::default(),
        }
    }
}

impl Widget for TouchNavigation {
    fn name(&self) -> &'static str {
        "touch"
    }

    fn render(&mut self, _host: &mut dyn MountHost) -> Result<(), WidgetError> {
        Ok(())
    }

    fn attach_listeners(&mut self, _host: &mut dyn MountHost) -> Result<(), WidgetError> {
        let document = dom::require_document()?;

        let mut site = self.site;
        self.listeners.push(Listener::new(&document, "touchstart", move |event| {
            let Some(touch) = first_touch(&event, false) else {
                return;
            };
            if let Ok(mut site) = site.try_write() {
                site.on_touch_start(f64::from(touch.client_x()), f64::from(touch.client_y()));
            }
        })?);

        let mut site = self.site;
        self.listeners.push(Listener::new(&document, "touchend", move |event| {
            let Some(touch) = first_touch(&event, true) else {
                return;
            };
            let order = match site.try_read() {
                Ok(site) => site.section_order(),
                Err(_) => return,
            };
            let bounds = dom::section_bounds(&order);
            let outcome = match site.try_write() {
                Ok(mut site) => site.on_touch_end(
                    f64::from(touch.client_x()),
                    f64::from(touch.client_y()),
                    dom::scroll_y(),
                    &bounds,
                    dom::now_ms(),
                ),
                Err(_) => return,
            };
            if outcome.prevent_default {
                event.prevent_default();
            }
            if let Some(section) = outcome.navigate_to {
                scroll_to_section(site, section);
            }
        })?);
        Ok(())
    }

    fn destroy(&mut self, _host: &mut dyn MountHost) {
        self.listeners.remove_all();
    }
}
