//! Browser glue
//!
//! Thin wrappers over `web-sys` used by components and widgets. Nothing here
//! panics: a missing window, document or element degrades to a no-op.

use folio_core::lifecycle::{MountHost, MountPoint};
use folio_core::monitor::ReportContext;
use folio_core::navigation::SectionBounds;
use folio_core::responsive::{DeviceClass, Viewport};
use folio_core::theme::{DARK_CLASS, PreferenceStore, StorageError, Theme};
use folio_core::{ScrollSample, WidgetError};
use folio_types::SectionId;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

pub fn window() -> Option<web_sys::Window> {
    web_sys::window()
}

pub fn document() -> Option<web_sys::Document> {
    web_sys::window()?.document()
}

pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map_or(0.0, |p| p.now())
}

pub fn element(id: &str) -> Option<web_sys::HtmlElement> {
    document()?
        .get_element_by_id(id)?
        .dyn_into::<web_sys::HtmlElement>()
        .ok()
}

/// Every element matching `selector`, in document order.
pub fn query_all(selector: &str) -> Vec<web_sys::Element> {
    let Some(list) = document().and_then(|d| d.query_selector_all(selector).ok()) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .collect()
}

pub fn require_window() -> Result<web_sys::Window, WidgetError> {
    web_sys::window().ok_or(WidgetError::Unavailable("window"))
}

pub fn require_document() -> Result<web_sys::Document, WidgetError> {
    document().ok_or(WidgetError::Unavailable("document"))
}

/// Readable text for a thrown JS value
pub fn js_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

pub fn js_error(value: JsValue) -> WidgetError {
    WidgetError::Js(js_message(&value))
}

// ─────────────────────────────────────────────────────────────────────────────
// Geometry
// ─────────────────────────────────────────────────────────────────────────────

pub fn viewport() -> Viewport {
    let (width, height) = web_sys::window()
        .map(|w| {
            (
                w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0),
                w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0),
            )
        })
        .unwrap_or_default();
    Viewport { width, height }
}

pub fn scroll_y() -> f64 {
    web_sys::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

pub fn scroll_sample() -> ScrollSample {
    let scroll_height = document()
        .and_then(|d| d.body())
        .map_or(0.0, |b| f64::from(b.scroll_height()));
    ScrollSample {
        scroll_y: scroll_y(),
        scroll_height,
        viewport_height: viewport().height,
    }
}

/// Layout boxes of the rendered sections, in `order`. Sections that are not
/// in the DOM are skipped.
pub fn section_bounds(order: &[SectionId]) -> Vec<SectionBounds> {
    order
        .iter()
        .filter_map(|id| {
            let el = element(id.anchor())?;
            Some(SectionBounds {
                id: *id,
                top: f64::from(el.offset_top()),
                height: f64::from(el.offset_height()),
            })
        })
        .collect()
}

pub fn section_top(section: SectionId) -> Option<f64> {
    element(section.anchor()).map(|el| f64::from(el.offset_top()))
}

/// Native smooth scroll. A new call supersedes one still in progress.
pub fn smooth_scroll_to(top: f64) {
    if let Some(window) = web_sys::window() {
        let options = web_sys::ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(web_sys::ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Document state
// ─────────────────────────────────────────────────────────────────────────────

pub fn apply_theme(theme: Theme) {
    if let Some(root) = document().and_then(|d| d.document_element()) {
        let _ = root
            .class_list()
            .toggle_with_force(DARK_CLASS, theme.is_dark());
    }
}

pub fn apply_device(device: DeviceClass) {
    let Some(doc) = document() else {
        return;
    };
    if let Some(body) = doc.body() {
        let classes = body.class_list();
        for class in DeviceClass::all() {
            let _ = classes.remove_1(class.body_class());
        }
        let _ = classes.add_1(device.body_class());
    }
    if let Some(root) = doc
        .document_element()
        .and_then(|r| r.dyn_into::<web_sys::HtmlElement>().ok())
    {
        let _ = root
            .style()
            .set_property("--animation-duration", device.animation_duration());
    }
}

pub fn set_body_class(class: &str, on: bool) {
    if let Some(body) = document().and_then(|d| d.body()) {
        let _ = body.class_list().toggle_with_force(class, on);
    }
}

pub fn system_prefers_dark() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .is_some_and(|mql| mql.matches())
}

pub fn is_hidden() -> bool {
    document().is_some_and(|d| d.visibility_state() == web_sys::VisibilityState::Hidden)
}

pub fn hostname() -> String {
    web_sys::window()
        .and_then(|w| w.location().hostname().ok())
        .unwrap_or_default()
}

/// `location.search`, leading `?` included
pub fn location_search() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

pub fn report_context() -> ReportContext {
    let viewport = viewport();
    ReportContext {
        user_agent: web_sys::window()
            .and_then(|w| w.navigator().user_agent().ok())
            .unwrap_or_default(),
        viewport_width: viewport.width,
        viewport_height: viewport.height,
    }
}

pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Listener registration
// ─────────────────────────────────────────────────────────────────────────────

/// An event listener that can be removed again.
pub struct Listener {
    target: web_sys::EventTarget,
    kind: &'static str,
    capture: bool,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl Listener {
    pub fn new(
        target: &web_sys::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) -> Result<Self, WidgetError> {
        Self::with_capture(target, kind, false, handler)
    }

    pub fn with_capture(
        target: &web_sys::EventTarget,
        kind: &'static str,
        capture: bool,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) -> Result<Self, WidgetError> {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        target
            .add_event_listener_with_callback_and_bool(
                kind,
                closure.as_ref().unchecked_ref(),
                capture,
            )
            .map_err(js_error)?;
        Ok(Self {
            target: target.clone(),
            kind,
            capture,
            closure,
        })
    }

    pub fn remove(self) {
        let _ = self.target.remove_event_listener_with_callback_and_bool(
            self.kind,
            self.closure.as_ref().unchecked_ref(),
            self.capture,
        );
    }
}

/// Listeners owned by one widget, removed together on destroy.
#[derive(Default)]
pub struct Listeners(Vec<Listener>);

impl Listeners {
    pub fn push(&mut self, listener: Listener) {
        self.0.push(listener);
    }

    pub fn remove_all(&mut self) {
        for listener in self.0.drain(..) {
            listener.remove();
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Core trait implementations
// ─────────────────────────────────────────────────────────────────────────────

/// Marks nodes a widget inserted itself; the rest of a mount point belongs to
/// the Dioxus tree and must not be touched.
pub const WIDGET_OWNED_ATTR: &str = "data-widget-owned";

/// Mount lookups against the live document
pub struct DomHost;

impl MountHost for DomHost {
    fn has_mount(&self, point: MountPoint) -> bool {
        document().is_some_and(|d| d.get_element_by_id(point.id()).is_some())
    }

    fn clear(&mut self, point: MountPoint) {
        let selector = format!("#{} [{}]", point.id(), WIDGET_OWNED_ATTR);
        for node in query_all(&selector) {
            node.remove();
        }
    }
}

/// `window.localStorage`
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStore;

impl LocalStore {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(StorageError::Unavailable)
    }
}

impl PreferenceStore for LocalStore {
    fn load(&self, key: &'static str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|_| StorageError::Unavailable)
    }

    fn store(&mut self, key: &'static str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|err| StorageError::Write {
                key,
                reason: err.as_string().unwrap_or_else(|| format!("{err:?}")),
            })
    }
}
