//! Application context
//!
//! [`Site`] is built once at startup and owns every piece of page state:
//! configuration, content, theme, navigation, overlays, the contact form and
//! the performance monitor. The frontend shares it through a Dioxus context
//! and routes every page-level browser event through one of the `on_*`
//! handlers below.
//!
//! ```text
//!   scroll ──throttle──► on_scroll  ──► active section, sticky header, depth
//!   resize ──debounce──► on_resize_settled ──► device class, breakpoint
//!   keydown ───────────► on_key     ──► close overlays / focus ring / jump
//!   touch  ────────────► on_touch_* ──► swipe navigation, double-tap guard
//!   unload ────────────► teardown   ──► flush analytics
//!   pageshow ──────────► on_page_restored ──► fresh visit after bfcache
//! ```

#[cfg(test)]
mod site_tests;

use folio_types::{Portfolio, ProjectId, SectionId};

use crate::animation::RevealTracker;
use crate::config::{ConfigError, SiteConfig};
use crate::contact::ContactForm;
use crate::content;
use crate::gallery::{CategoryFilter, Gallery};
use crate::lazy_image::LazyImages;
use crate::monitor::{
    AnalyticsSink, ClickTarget, ErrorKind, PerformanceMonitor, ReportContext, is_external_link,
    scroll_percent,
};
use crate::navigation::{
    self, ActiveChange, ActiveSectionTracker, KeyAction, SectionBounds, Step, StickyHeader,
};
use crate::overlay::{CloseTrigger, Overlay};
use crate::rate_limit::{Debounce, DebounceTicket, Throttle};
use crate::responsive::{DeviceClass, DoubleTapGuard, Swipe, SwipeDetector, Viewport};
use crate::theme::{PreferenceStore, Theme, ThemeController};

/// Browser facts known before the first render
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartupEnv {
    pub system_prefers_dark: bool,
    pub viewport: Viewport,
    pub now_ms: f64,
}

/// Scroll geometry sampled by the frontend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSample {
    pub scroll_y: f64,
    pub scroll_height: f64,
    pub viewport_height: f64,
}

impl ScrollSample {
    /// Current position in the scrollable range, 0-100
    pub fn progress(&self) -> u8 {
        scroll_percent(self.scroll_y, self.scroll_height, self.viewport_height).unwrap_or(0)
    }
}

/// What a throttled scroll changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollUpdate {
    pub active: Option<ActiveChange>,
    pub sticky: Option<bool>,
}

/// What a touch end asks the frontend to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TouchOutcome {
    pub prevent_default: bool,
    pub navigate_to: Option<SectionId>,
}

pub struct Site<S: PreferenceStore> {
    config: SiteConfig,
    portfolio: Portfolio,
    theme: ThemeController<S>,
    tracker: ActiveSectionTracker,
    header: StickyHeader,
    mobile_menu: Overlay<()>,
    gallery: Gallery,
    contact: ContactForm,
    images: LazyImages,
    reveal: RevealTracker,
    monitor: PerformanceMonitor,
    swipe: SwipeDetector,
    double_tap: DoubleTapGuard,
    scroll_throttle: Throttle,
    resize_debounce: Debounce,
    viewport: Viewport,
    keyboard_navigation: bool,
    torn_down: bool,
}

impl<S: PreferenceStore> Site<S> {
    /// Load the embedded configuration and content, then build the context.
    pub fn bootstrap(store: S, env: StartupEnv) -> Result<Self, ConfigError> {
        let config = SiteConfig::embedded()?;
        let portfolio = content::load_embedded()?;
        Ok(Self::new(config, portfolio, store, env))
    }

    pub fn new(config: SiteConfig, portfolio: Portfolio, store: S, env: StartupEnv) -> Self {
        let theme = ThemeController::init(store, env.system_prefers_dark);
        let mut monitor = PerformanceMonitor::new(&config.monitor, env.now_ms);
        start_visit(&mut monitor, env.viewport, env.now_ms);

        tracing::info!(
            sections = config.sections.len(),
            projects = portfolio.projects.len(),
            device = env.viewport.device().body_class(),
            theme = theme.theme().as_str(),
            "site initialized"
        );

        Self {
            tracker: ActiveSectionTracker::new(&config.layout),
            header: StickyHeader::new(&config.layout),
            swipe: SwipeDetector::new(&config.gestures),
            double_tap: DoubleTapGuard::new(&config.gestures),
            scroll_throttle: Throttle::new(config.performance.throttle_delay),
            resize_debounce: Debounce::new(config.performance.debounce_delay),
            mobile_menu: Overlay::new(),
            gallery: Gallery::new(),
            contact: ContactForm::new(),
            images: LazyImages::new(),
            reveal: RevealTracker::new(),
            viewport: env.viewport,
            keyboard_navigation: false,
            torn_down: false,
            theme,
            monitor,
            config,
            portfolio,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    pub fn active_section(&self) -> Option<SectionId> {
        self.tracker.active()
    }

    pub fn header_scrolled(&self) -> bool {
        self.header.is_scrolled()
    }

    pub fn is_mobile_menu_open(&self) -> bool {
        self.mobile_menu.is_open()
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn gallery_mut(&mut self) -> &mut Gallery {
        &mut self.gallery
    }

    pub fn contact(&self) -> &ContactForm {
        &self.contact
    }

    pub fn contact_mut(&mut self) -> &mut ContactForm {
        &mut self.contact
    }

    pub fn images(&self) -> &LazyImages {
        &self.images
    }

    pub fn images_mut(&mut self) -> &mut LazyImages {
        &mut self.images
    }

    pub fn reveal(&self) -> &RevealTracker {
        &self.reveal
    }

    pub fn reveal_mut(&mut self) -> &mut RevealTracker {
        &mut self.reveal
    }

    pub fn monitor(&self) -> &PerformanceMonitor {
        &self.monitor
    }

    pub fn monitor_mut(&mut self) -> &mut PerformanceMonitor {
        &mut self.monitor
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn device(&self) -> DeviceClass {
        self.viewport.device()
    }

    pub fn keyboard_navigation(&self) -> bool {
        self.keyboard_navigation
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Sections in navigation order, as configured
    pub fn section_order(&self) -> Vec<SectionId> {
        self.config.sections.iter().map(|s| s.id).collect()
    }

    /// Where to scroll so `section_top` clears the fixed header
    pub fn scroll_target(&self, section_top: f64) -> f64 {
        navigation::scroll_target(section_top, &self.config.layout)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Theme
    // ─────────────────────────────────────────────────────────────────────────

    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.theme.toggle();
        self.theme_applied(theme);
        theme
    }

    pub fn set_theme(&mut self, theme: Theme) -> Theme {
        let theme = self.theme.set_theme(theme);
        self.theme_applied(theme);
        theme
    }

    pub fn on_system_theme_change(&mut self, prefers_dark: bool) -> Option<Theme> {
        let theme = self.theme.on_system_change(prefers_dark)?;
        self.theme_applied(theme);
        Some(theme)
    }

    fn theme_applied(&mut self, theme: Theme) {
        self.monitor.analytics_mut().record_theme(theme.is_dark());
        tracing::debug!(theme = theme.as_str(), "theme changed");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Overlays and navigation
    // ─────────────────────────────────────────────────────────────────────────

    pub fn toggle_mobile_menu(&mut self) -> bool {
        self.mobile_menu.toggle(())
    }

    pub fn close_mobile_menu(&mut self, trigger: CloseTrigger) -> bool {
        self.mobile_menu.close(trigger)
    }

    /// A navigation link was activated. The mobile menu closes; the caller
    /// scrolls to the section.
    pub fn navigate(&mut self, section: SectionId) -> SectionId {
        self.mobile_menu.close(CloseTrigger::Explicit);
        tracing::debug!(section = %section, "navigate");
        section
    }

    /// Open the project modal. Unknown ids are logged and ignored.
    pub fn open_project(&mut self, id: ProjectId) -> bool {
        match self.gallery.open_project(id, &self.portfolio) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "project modal not opened");
                false
            }
        }
    }

    /// Close every open overlay. Returns how many were open.
    pub fn close_all_overlays(&mut self, trigger: CloseTrigger) -> usize {
        let closed = [
            self.gallery.close_modal(trigger),
            self.mobile_menu.close(trigger),
        ];
        closed.into_iter().filter(|c| *c).count()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Page-level events
    // ─────────────────────────────────────────────────────────────────────────

    /// True when a scroll event at `now_ms` would pass the throttle.
    /// Whether `sample` would move the highlight, flip the header shadow or
    /// deepen the recorded scroll depth. Read-only, so the frontend can skip
    /// the write (and the re-render it causes) when nothing changes.
    pub fn scroll_changes(&self, sample: ScrollSample, bounds: &[SectionBounds]) -> bool {
        let depth = self.monitor.analytics().scroll_depth;
        self.tracker.would_change(sample.scroll_y, bounds)
            || self.header.would_change(sample.scroll_y)
            || scroll_percent(sample.scroll_y, sample.scroll_height, sample.viewport_height)
                .is_some_and(|d| d > depth)
    }

    /// Scroll event. Dropped entirely while the throttle is closed.
    pub fn on_scroll(
        &mut self,
        sample: ScrollSample,
        bounds: &[SectionBounds],
        now_ms: f64,
    ) -> Option<ScrollUpdate> {
        if !self.scroll_throttle.admit(now_ms) {
            return None;
        }
        self.monitor.analytics_mut().record_scroll(
            sample.scroll_y,
            sample.scroll_height,
            sample.viewport_height,
        );
        Some(ScrollUpdate {
            active: self.tracker.update(sample.scroll_y, bounds),
            sticky: self.header.update(sample.scroll_y),
        })
    }

    /// Raw resize event. Sleep `resize_wait_ms` then settle the ticket.
    pub fn on_resize(&mut self) -> DebounceTicket {
        self.resize_debounce.trigger()
    }

    pub fn resize_wait_ms(&self) -> u32 {
        self.resize_debounce.wait_ms()
    }

    /// Debounced resize. Returns the new device class when it changed.
    pub fn on_resize_settled(
        &mut self,
        ticket: DebounceTicket,
        viewport: Viewport,
    ) -> Option<DeviceClass> {
        if !self.resize_debounce.fire(ticket) {
            return None;
        }
        let previous = self.viewport.device();
        self.viewport = viewport;
        let device = viewport.device();
        tracing::debug!(
            width = viewport.width,
            breakpoint = %viewport.breakpoint(),
            "viewport resized"
        );
        (device != previous).then_some(device)
    }

    pub fn on_visibility_change(&mut self, hidden: bool, now_ms: f64) {
        tracing::debug!(hidden, "page visibility changed");
        self.monitor
            .analytics_mut()
            .on_visibility_change(hidden, now_ms);
    }

    /// Keydown anywhere on the page.
    pub fn on_key(&mut self, key: &str, alt: bool) -> Option<KeyAction> {
        let action = navigation::classify_key(key, alt)?;
        match action {
            KeyAction::CloseOverlays => {
                self.close_all_overlays(CloseTrigger::Escape);
            }
            KeyAction::KeyboardNavigation => self.keyboard_navigation = true,
            KeyAction::JumpTo(section) => {
                tracing::debug!(section = %section, "keyboard shortcut");
            }
        }
        Some(action)
    }

    pub fn on_mouse_down(&mut self) {
        self.keyboard_navigation = false;
    }

    pub fn on_document_click(&mut self, target: ClickTarget, hostname: &str, now_ms: f64) {
        if let Some(href) = target.href.as_deref()
            && is_external_link(href, hostname)
        {
            tracing::info!(href, "external link clicked");
        }
        self.monitor.track_click(target, now_ms);
    }

    /// Uncaught error or unhandled rejection. Logged and recorded only.
    pub fn on_runtime_error(
        &mut self,
        kind: ErrorKind,
        message: impl Into<String>,
        source: Option<String>,
        now_ms: f64,
    ) {
        self.monitor.track_error(kind, message, source, now_ms);
    }

    /// A section became at least half visible.
    pub fn on_section_visible(&mut self, section: SectionId) {
        self.monitor.analytics_mut().record_section_visit(section);
    }

    pub fn on_touch_start(&mut self, x: f64, y: f64) {
        self.swipe.touch_start(x, y);
    }

    /// Touch end: double-tap suppression plus swipe navigation relative to
    /// the section under the current scroll position.
    pub fn on_touch_end(
        &mut self,
        x: f64,
        y: f64,
        scroll_y: f64,
        bounds: &[SectionBounds],
        now_ms: f64,
    ) -> TouchOutcome {
        let prevent_default = self.double_tap.touch_end(now_ms);
        let navigate_to = match self.swipe.touch_end(x, y) {
            Some(swipe @ (Swipe::Up | Swipe::Down)) => {
                let step = if swipe == Swipe::Up {
                    Step::Next
                } else {
                    Step::Previous
                };
                let position = self.tracker.reference_line(scroll_y);
                navigation::current_or_first(bounds, position).and_then(|current| {
                    let order: Vec<_> = bounds.iter().map(|b| b.id).collect();
                    navigation::adjacent(&order, current, step)
                })
            }
            Some(swipe) => {
                tracing::debug!(swipe = ?swipe, "horizontal swipe");
                None
            }
            None => None,
        };
        TouchOutcome {
            prevent_default,
            navigate_to,
        }
    }

    /// Page is unloading: settle time on page, send analytics, close
    /// overlays. Runs once.
    pub fn teardown(&mut self, sink: &mut dyn AnalyticsSink, context: &ReportContext, now_ms: f64) {
        if self.torn_down {
            return;
        }
        self.monitor.flush(sink, context, now_ms);
        self.close_all_overlays(CloseTrigger::Explicit);
        self.resize_debounce.cancel();
        self.torn_down = true;
        tracing::info!("site torn down");
    }

    /// The page came back from the back/forward cache after a teardown.
    /// Metrics were already sent, so the restored page starts a fresh visit.
    pub fn on_page_restored(&mut self, now_ms: f64) {
        if !self.torn_down {
            return;
        }
        self.monitor.reset(now_ms);
        self.scroll_throttle.reset();
        start_visit(&mut self.monitor, self.viewport, now_ms);
        self.torn_down = false;
        tracing::info!("site restored");
    }

    /// Apply `filter` and `theme` from the page's query string, as in
    /// `?filter=web&theme=dark`. Unknown keys are ignored and bad values
    /// logged.
    pub fn apply_launch_query(&mut self, query: &str) {
        let pairs = query
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='));
        for (key, value) in pairs {
            match key {
                "filter" => match CategoryFilter::parse(value) {
                    Ok(filter) => self.gallery.set_filter(filter),
                    Err(err) => tracing::warn!(error = %err, "ignoring launch filter"),
                },
                "theme" => match Theme::parse(value) {
                    Some(theme) => {
                        self.set_theme(theme);
                    }
                    None => tracing::warn!(value, "ignoring unknown launch theme"),
                },
                _ => {}
            }
        }
    }
}

fn start_visit(monitor: &mut PerformanceMonitor, viewport: Viewport, now_ms: f64) {
    monitor.analytics_mut().record_device(viewport.width);
    monitor.track_page_view(now_ms);
}

