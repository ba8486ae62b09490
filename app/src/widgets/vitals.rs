//! Web vitals collection
//!
//! Binds the browser `PerformanceObserver` directly; entry fields are read
//! with `Reflect` because each entry type carries different properties.

use dioxus::prelude::*;
use folio_core::monitor::WebVitals;
use folio_core::{MountHost, Widget, WidgetError};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::dom::{self, Listener, Listeners};
use crate::site::PageSite;

// ─────────────────────────────────────────────────────────────────────────────
// PerformanceObserver JS Interop
// ─────────────────────────────────────────────────────────────────────────────

#[wasm_bindgen]
extern "C" {
    type PerformanceObserver;

    #[wasm_bindgen(constructor, catch)]
    fn new(callback: &js_sys::Function) -> Result<PerformanceObserver, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn observe(this: &PerformanceObserver, options: &js_sys::Object) -> Result<(), JsValue>;

    #[wasm_bindgen(method)]
    fn disconnect(this: &PerformanceObserver);

    type PerformanceObserverEntryList;

    #[wasm_bindgen(method, js_name = getEntries)]
    fn get_entries(this: &PerformanceObserverEntryList) -> js_sys::Array;
}

fn number(entry: &JsValue, field: &str) -> Option<f64> {
    js_sys::Reflect::get(entry, &JsValue::from_str(field))
        .ok()?
        .as_f64()
}

fn flag(entry: &JsValue, field: &str) -> bool {
    js_sys::Reflect::get(entry, &JsValue::from_str(field))
        .ok()
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

/// Performance entry types the monitor listens for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Paint,
    LargestPaint,
    FirstInput,
    LayoutShift,
}

impl EntryKind {
    const ALL: [EntryKind; 4] = [
        EntryKind::Paint,
        EntryKind::LargestPaint,
        EntryKind::FirstInput,
        EntryKind::LayoutShift,
    ];

    fn entry_type(self) -> &'static str {
        match self {
            EntryKind::Paint => "paint",
            EntryKind::LargestPaint => "largest-contentful-paint",
            EntryKind::FirstInput => "first-input",
            EntryKind::LayoutShift => "layout-shift",
        }
    }

    fn record(self, vitals: &mut WebVitals, entry: &JsValue) {
        let start = number(entry, "startTime").unwrap_or(0.0);
        match self {
            EntryKind::Paint => {
                let name = js_sys::Reflect::get(entry, &JsValue::from_str("name"))
                    .ok()
                    .and_then(|v| v.as_string())
                    .unwrap_or_default();
                vitals.record_paint(&name, start);
            }
            EntryKind::LargestPaint => vitals.record_largest_paint(start),
            EntryKind::FirstInput => {
                if let Some(processing) = number(entry, "processingStart") {
                    vitals.record_first_input(processing, start);
                }
            }
            EntryKind::LayoutShift => vitals.record_layout_shift(
                number(entry, "value").unwrap_or(0.0),
                flag(entry, "hadRecentInput"),
            ),
        }
    }
}

struct Subscription {
    observer: PerformanceObserver,
    _callback: Closure<dyn FnMut(PerformanceObserverEntryList)>,
}

fn subscribe(site: Signal<PageSite>, kind: EntryKind) -> Result<Subscription, JsValue> {
    let mut site = site;
    let callback = Closure::<dyn FnMut(PerformanceObserverEntryList)>::new(
        move |list: PerformanceObserverEntryList| {
            let Ok(mut site) = site.try_write() else {
                return;
            };
            let vitals = site.monitor_mut().vitals_mut();
            for entry in list.get_entries().iter() {
                kind.record(vitals, &entry);
            }
        },
    );
    let observer = PerformanceObserver::new(callback.as_ref().unchecked_ref())?;

    let options = js_sys::Object::new();
    js_sys::Reflect::set(
        &options,
        &JsValue::from_str("type"),
        &JsValue::from_str(kind.entry_type()),
    )?;
    js_sys::Reflect::set(&options, &JsValue::from_str("buffered"), &JsValue::TRUE)?;
    observer.observe(&options)?;

    Ok(Subscription {
        observer,
        _callback: callback,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Widget
// ─────────────────────────────────────────────────────────────────────────────

/// Feeds paint, input and layout-shift timings plus page load time into the
/// monitor. Entry types the browser does not support are skipped.
pub struct VitalsObserver {
    site: Signal<PageSite>,
    subscriptions: Vec<Subscription>,
    listeners: Listeners,
}

impl VitalsObserver {
    pub fn new(site: Signal<PageSite>) -> Self {
        Self {
            site,
            subscriptions: Vec::new(),
            listeners: Listeners::default(),
        }
    }
}

impl Widget for VitalsObserver {
    fn name(&self) -> &'static str {
        "performance-monitor"
    }

    fn render(&mut self, _host: &mut dyn MountHost) -> Result<(), WidgetError> {
        Ok(())
    }

    fn attach_listeners(&mut self, _host: &mut dyn MountHost) -> Result<(), WidgetError> {
        for kind in EntryKind::ALL {
            match subscribe(self.site, kind) {
                Ok(subscription) => self.subscriptions.push(subscription),
                Err(err) => tracing::debug!(
                    entry_type = kind.entry_type(),
                    error = %dom::js_message(&err),
                    "performance entry type unsupported"
                ),
            }
        }

        let document = dom::require_document()?;
        if document.ready_state() == "complete" {
            if let Ok(mut site) = self.site.try_write() {
                site.monitor_mut().vitals_mut().record_page_load(dom::now_ms());
            }
        } else {
            let window = dom::require_window()?;
            let mut site = self.site;
            self.listeners.push(Listener::new(&window, "load", move |_| {
                if let Ok(mut site) = site.try_write() {
                    site.monitor_mut().vitals_mut().record_page_load(dom::now_ms());
                }
            })?);
        }
        Ok(())
    }

    fn destroy(&mut self, _host: &mut dyn MountHost) {
        for subscription in self.subscriptions.drain(..) {
            subscription.observer.disconnect();
        }
        self.listeners.remove_all();
    }
}
