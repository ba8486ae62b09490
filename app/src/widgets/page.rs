//! Window and document listeners that route page events into the site

use dioxus::prelude::*;
use folio_core::monitor::{ClickTarget, ErrorKind};
use folio_core::navigation::KeyAction;
use folio_core::{CloseTrigger, MountHost, MountPoint, Widget, WidgetError};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local as spawn;

use crate::dom::{self, Listener, Listeners};
use crate::site::{PageSite, scroll_to_section};

/// Body class that turns on focus outlines
const KEYBOARD_NAV_CLASS: &str = "keyboard-navigation";

fn site_unavailable() -> WidgetError {
    WidgetError::Unavailable("site context")
}

// ─────────────────────────────────────────────────────────────────────────────
// Theme
// ─────────────────────────────────────────────────────────────────────────────

/// Applies the initial theme and follows the system color scheme while the
/// visitor has no stored preference.
pub struct ThemeSync {
    site: Signal<PageSite>,
    listeners: Listeners,
}

impl ThemeSync {
    pub fn new(site: Signal<PageSite>) -> Self {
        Self {
            site,
            listeners: Listeners::default(),
        }
    }
}

impl Widget for ThemeSync {
    fn name(&self) -> &'static str {
        "theme"
    }

    fn mount_point(&self) -> Option<MountPoint> {
        Some(MountPoint::DarkModeToggle)
    }

    fn render(&mut self, _host: &mut dyn MountHost) -> Result<(), WidgetError> {
        let theme = self.site.try_read().map_err(|_| site_unavailable())?.theme();
        dom::apply_theme(theme);
        Ok(())
    }

    fn attach_listeners(&mut self, _host: &mut dyn MountHost) -> Result<(), WidgetError> {
        let window = dom::require_window()?;
        let Some(query) = window
            .match_media("(prefers-color-scheme: dark)")
            .map_err(dom::js_error)?
        else {
            tracing::debug!("color scheme media query unsupported");
            return Ok(());
        };

        let mut site = self.site;
        self.listeners.push(Listener::new(&query, "change", move |event| {
            let Some(event) = event.dyn_ref::<web_sys::MediaQueryListEvent>() else {
                return;
            };
            let applied = match site.try_write() {
                Ok(mut site) => site.on_system_theme_change(event.matches()),
                Err(_) => return,
            };
            if let Some(theme) = applied {
                dom::apply_theme(theme);
            }
        })?);
        Ok(())
    }

    fn destroy(&mut self, _host: &mut dyn MountHost) {
        self.listeners.remove_all();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Resize
// ─────────────────────────────────────────────────────────────────────────────

/// Debounced viewport tracking. Keeps the device body class and animation
/// duration in sync with the window width.
pub struct ResizeWatch {
    site: Signal<PageSite>,
    listeners: Listeners,
}

impl ResizeWatch {
    pub fn new(site: Signal<PageSite>) -> Self {
        Self {
            site,
            listeners: Listeners::default(),
        }
    }
}

impl Widget for ResizeWatch {
    fn name(&self) -> &'static str {
        "responsive"
    }

    fn render(&mut self, _host: &mut dyn MountHost) -> Result<(), WidgetError> {
        let device = self.site.try_read().map_err(|_| site_unavailable())?.device();
        dom::apply_device(device);
        Ok(())
    }

    fn attach_listeners(&mut self, _host: &mut dyn MountHost) -> Result<(), WidgetError> {
        let window = dom::require_window()?;
        let mut site = self.site;
        self.listeners.push(Listener::new(&window, "resize", move |_| {
            let (ticket, wait) = match site.try_write() {
                Ok(mut site) => (site.on_resize(), site.resize_wait_ms()),
                Err(_) => return,
            };
            spawn(async move {
                TimeoutFuture::new(wait).await;
                let changed = match site.try_write() {
                    Ok(mut site) => site.on_resize_settled(ticket, dom::viewport()),
                    Err(_) => None,
                };
                if let Some(device) = changed {
                    tracing::debug!(device = device.body_class(), "device class changed");
                    dom::apply_device(device);
                }
            });
        })?);
        Ok(())
    }

    fn destroy(&mut self, _host: &mut dyn MountHost) {
        self.listeners.remove_all();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Keyboard
// ─────────────────────────────────────────────────────────────────────────────

/// Escape, Tab focus ring and Alt+digit section jumps
pub struct KeyboardShortcuts {
    site: Signal<PageSite>,
    listeners: Listeners,
}

impl KeyboardShortcuts {
    pub fn new(site: Signal<PageSite>) -> Self {
        Self {
            site,
            listeners: Listeners::default(),
        }
    }
}

impl Widget for KeyboardShortcuts {
    fn name(&self) -> &'static str {
        "keyboard"
    }

    fn render(&mut self, _host: &mut dyn MountHost) -> Result<(), WidgetError> {
        Ok(())
    }

    fn attach_listeners(&mut self, _host: &mut dyn MountHost) -> Result<(), WidgetError> {
        let document = dom::require_document()?;

        let mut site = self.site;
        self.listeners.push(Listener::new(&document, "keydown", move |event| {
            let Some(event) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
                return;
            };
            let action = match site.try_write() {
                Ok(mut site) => site.on_key(&event.key(), event.alt_key()),
                Err(_) => return,
            };
            match action {
                Some(KeyAction::KeyboardNavigation) => dom::set_body_class(KEYBOARD_NAV_CLASS, true),
                Some(KeyAction::JumpTo(section)) => {
                    event.prevent_default();
                    scroll_to_section(site, section);
                }
                Some(KeyAction::CloseOverlays) | None => {}
            }
        })?);

        let mut site = self.site;
        self.listeners.push(Listener::new(&document, "mousedown", move |_| {
            if let Ok(mut site) = site.try_write()
                && site.keyboard_navigation()
            {
                site.on_mouse_down();
                dom::set_body_class(KEYBOARD_NAV_CLASS, false);
            }
        })?);
        Ok(())
    }

    fn destroy(&mut self, _host: &mut dyn MountHost) {
        self.listeners.remove_all();
        dom::set_body_class(KEYBOARD_NAV_CLASS, false);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Clicks and visibility
// ─────────────────────────────────────────────────────────────────────────────

fn click_target(element: &web_sys::Element) -> ClickTarget {
    let non_empty = |value: String| (!value.is_empty()).then_some(value);
    ClickTarget {
        tag: element.tag_name(),
        id: non_empty(element.id()),
        class: non_empty(element.class_name()),
        href: element.get_attribute("href"),
    }
}

/// Records clicks and page visibility, and closes the mobile menu on clicks
/// outside of it.
pub struct PageActivity {
    site: Signal<PageSite>,
    listeners: Listeners,
}

impl PageActivity {
    pub fn new(site: Signal<PageSite>) -> Self {
        Self {
            site,
            listeners: Listeners::default(),
        }
    }
}

impl Widget for PageActivity {
    fn name(&self) -> &'static str {
        "page-activity"
    }

    fn mount_point(&self) -> Option<MountPoint> {
        Some(MountPoint::Main)
    }

    fn render(&mut self, _host: &mut dyn MountHost) -> Result<(), WidgetError> {
        Ok(())
    }

    fn attach_listeners(&mut self, _host: &mut dyn MountHost) -> Result<(), WidgetError> {
        let document = dom::require_document()?;
        let menu_selector = format!(
            "#{}, #{}",
            MountPoint::MobileMenu.id(),
            MountPoint::MobileMenuToggle.id()
        );

        let mut site = self.site;
        self.listeners.push(Listener::new(&document, "click", move |event| {
            let Some(element) = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            else {
                return;
            };
            let inside_menu = element.closest(&menu_selector).ok().flatten().is_some();
            let Ok(mut site) = site.try_write() else {
                return;
            };
            if !inside_menu && site.is_mobile_menu_open() {
                site.close_mobile_menu(CloseTrigger::OutsideClick);
            }
            site.on_document_click(click_target(&element), &dom::hostname(), dom::now_ms());
        })?);

        let mut site = self.site;
        self.listeners
            .push(Listener::new(&document, "visibilitychange", move |_| {
                if let Ok(mut site) = site.try_write() {
                    site.on_visibility_change(dom::is_hidden(), dom::now_ms());
                }
            })?);
        Ok(())
    }

    fn destroy(&mut self, _host: &mut dyn MountHost) {
        self.listeners.remove_all();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Runtime errors
// ─────────────────────────────────────────────────────────────────────────────

/// Records uncaught errors, unhandled rejections and failed resource loads.
pub struct ErrorCapture {
    site: Signal<PageSite>,
    listeners: Listeners,
}

impl ErrorCapture {
    pub fn new(site: Signal<PageSite>) -> Self {
        Self {
            site,
            listeners: Listeners::default(),
        }
    }
}

impl Widget for ErrorCapture {
    fn name(&self) -> &'static str {
        "error-capture"
    }

    fn render(&mut self, _host: &mut dyn MountHost) -> Result<(), WidgetError> {
        Ok(())
    }

    fn attach_listeners(&mut self, _host: &mut dyn MountHost) -> Result<(), WidgetError> {
        let window = dom::require_window()?;

        let mut site = self.site;
        self.listeners.push(Listener::new(&window, "error", move |event| {
            let Some(event) = event.dyn_ref::<web_sys::ErrorEvent>() else {
                return;
            };
            let message = event.message();
            let source = format!("{}:{}:{}", event.filename(), event.lineno(), event.colno());
            tracing::error!(%message, %source, "uncaught error");
            if let Ok(mut site) = site.try_write() {
                site.on_runtime_error(ErrorKind::Javascript, message, Some(source), dom::now_ms());
            }
        })?);

        let mut site = self.site;
        self.listeners
            .push(Listener::new(&window, "unhandledrejection", move |event| {
                let Some(event) = event.dyn_ref::<web_sys::PromiseRejectionEvent>() else {
                    return;
                };
                let message = dom::js_message(&event.reason());
                tracing::error!(%message, "unhandled promise rejection");
                if let Ok(mut site) = site.try_write() {
                    site.on_runtime_error(ErrorKind::Promise, message, None, dom::now_ms());
                }
            })?);

        // Resource failures do not bubble, so they are only seen while capturing.
        let mut site = self.site;
        self.listeners
            .push(Listener::with_capture(&window, "error", true, move |event| {
                let Some(element) = event
                    .target()
                    .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
                else {
                    return;
                };
                let source = element
                    .get_attribute("src")
                    .or_else(|| element.get_attribute("href"));
                let message = format!("failed to load {}", element.tag_name().to_lowercase());
                tracing::warn!(%message, source = ?source, "resource error");
                if let Ok(mut site) = site.try_write() {
                    site.on_runtime_error(ErrorKind::Resource, message, source, dom::now_ms());
                }
            })?);
        Ok(())
    }

    fn destroy(&mut self, _host: &mut dyn MountHost) {
        self.listeners.remove_all();
    }
}
