//! Tests for Site event routing
//!
//! Verifies that:
//! - Scroll, resize and key events reach the right piece of state
//! - Escape closes every open overlay
//! - Swipes step through sections and double taps are suppressed
//! - Teardown flushes analytics exactly once

use folio_types::{ProjectCategory, SectionId};

use super::{ScrollSample, Site, StartupEnv};
use crate::contact::FormField;
use crate::gallery::CategoryFilter;
use crate::monitor::{AnalyticsSink, ClickTarget, ErrorKind, MonitorReport, ReportContext};
use crate::navigation::{KeyAction, SectionBounds};
use crate::responsive::{DeviceClass, Viewport};
use crate::theme::{MemoryStore, STORAGE_KEY, Theme};

// ═══════════════════════════════════════════════════════════════════════════
// Test Helpers
// ═══════════════════════════════════════════════════════════════════════════

fn env(width: f64) -> StartupEnv {
    StartupEnv {
        system_prefers_dark: false,
        viewport: Viewport {
            width,
            height: 900.0,
        },
        now_ms: 0.0,
    }
}

fn site() -> Site<MemoryStore> {
    Site::bootstrap(MemoryStore::new(), env(1280.0)).unwrap()
}

/// Every configured section stacked 1000px tall, in order
fn layout(site: &Site<MemoryStore>) -> Vec<SectionBounds> {
    site.section_order()
        .into_iter()
        .enumerate()
        .map(|(i, id)| SectionBounds {
            id,
            top: i as f64 * 1000.0,
            height: 1000.0,
        })
        .collect()
}

fn sample(scroll_y: f64) -> ScrollSample {
    ScrollSample {
        scroll_y,
        scroll_height: 7000.0,
        viewport_height: 900.0,
    }
}

#[derive(Default)]
struct CountingSink {
    sent: usize,
}

impl AnalyticsSink for CountingSink {
    fn send(&mut self, _report: &MonitorReport<'_>) {
        self.sent += 1;
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Startup
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_bootstrap_records_page_view_and_device() {
    let site = Site::bootstrap(MemoryStore::new(), env(500.0)).unwrap();
    let analytics = site.monitor().analytics();
    assert_eq!(analytics.page_views, 1);
    assert_eq!(analytics.devices.mobile, 1);
    assert_eq!(site.device(), DeviceClass::Mobile);
    assert_eq!(site.section_order().first(), Some(&SectionId::Home));
}

#[test]
fn test_bootstrap_honors_stored_theme() {
    let site = Site::bootstrap(MemoryStore::with(STORAGE_KEY, "true"), env(1280.0)).unwrap();
    assert_eq!(site.theme(), Theme::Dark);
}

// ═══════════════════════════════════════════════════════════════════════════
// Scroll and resize
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_scroll_updates_active_section_and_header() {
    let mut site = site();
    let bounds = layout(&site);

    let update = site.on_scroll(sample(950.0), &bounds, 0.0).unwrap();
    assert_eq!(update.active.and_then(|c| c.current), Some(SectionId::About));
    assert_eq!(update.sticky, Some(true));
    assert_eq!(site.active_section(), Some(SectionId::About));
    assert!(site.header_scrolled());
}

#[test]
fn test_scroll_inside_throttle_window_is_dropped() {
    let mut site = site();
    let bounds = layout(&site);

    assert!(site.on_scroll(sample(0.0), &bounds, 0.0).is_some());
    assert!(site.on_scroll(sample(2500.0), &bounds, 50.0).is_none());
    assert_eq!(site.active_section(), Some(SectionId::Home));

    let update = site.on_scroll(sample(2500.0), &bounds, 100.0).unwrap();
    assert_eq!(update.active.and_then(|c| c.current), Some(SectionId::Projects));
}

#[test]
fn test_scroll_changes_only_when_something_moves() {
    let mut site = site();
    let bounds = layout(&site);

    assert!(site.scroll_changes(sample(0.0), &bounds));
    site.on_scroll(sample(0.0), &bounds, 0.0);
    assert!(!site.scroll_changes(sample(0.0), &bounds));

    // same section, header still flat, depth already recorded
    site.on_scroll(sample(61.0), &bounds, 100.0);
    assert!(!site.scroll_changes(sample(40.0), &bounds));

    // header crosses its threshold
    assert!(site.scroll_changes(sample(150.0), &bounds));
    site.on_scroll(sample(150.0), &bounds, 200.0);

    // deeper than ever before, still in Home
    assert!(site.scroll_changes(sample(300.0), &bounds));
    site.on_scroll(sample(300.0), &bounds, 300.0);
    assert!(!site.scroll_changes(sample(200.0), &bounds));

    // next section
    assert!(site.scroll_changes(sample(950.0), &bounds));
}

#[test]
fn test_scroll_progress_spans_scrollable_range() {
    assert_eq!(sample(0.0).progress(), 0);
    assert_eq!(sample(3050.0).progress(), 50);
    assert_eq!(sample(6100.0).progress(), 100);
    assert_eq!(sample(9000.0).progress(), 100);

    let short_page = ScrollSample {
        scroll_y: 0.0,
        scroll_height: 500.0,
        viewport_height: 900.0,
    };
    assert_eq!(short_page.progress(), 0);
}

#[test]
fn test_only_latest_resize_settles() {
    let mut site = site();
    let stale = site.on_resize();
    let latest = site.on_resize();

    let phone = Viewport {
        width: 400.0,
        height: 800.0,
    };
    assert_eq!(site.on_resize_settled(stale, phone), None);
    assert_eq!(site.on_resize_settled(latest, phone), Some(DeviceClass::Mobile));
    assert_eq!(site.viewport(), phone);
}

// ═══════════════════════════════════════════════════════════════════════════
// Keyboard and overlays
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_escape_closes_modal_and_menu_together() {
    let mut site = site();
    assert!(site.open_project(2));
    site.toggle_mobile_menu();

    assert_eq!(site.on_key("Escape", false), Some(KeyAction::CloseOverlays));
    assert!(!site.gallery().is_modal_open());
    assert!(!site.is_mobile_menu_open());
}

#[test]
fn test_unknown_project_is_ignored() {
    let mut site = site();
    assert!(!site.open_project(404));
    assert!(!site.gallery().is_modal_open());
}

#[test]
fn test_tab_enables_focus_ring_until_mouse_down() {
    let mut site = site();
    site.on_key("Tab", false);
    assert!(site.keyboard_navigation());
    site.on_mouse_down();
    assert!(!site.keyboard_navigation());
}

#[test]
fn test_navigating_closes_mobile_menu() {
    let mut site = site();
    site.toggle_mobile_menu();
    assert_eq!(site.navigate(SectionId::Contact), SectionId::Contact);
    assert!(!site.is_mobile_menu_open());
}

#[test]
fn test_alt_digit_reports_jump() {
    let mut site = site();
    assert_eq!(
        site.on_key("4", true),
        Some(KeyAction::JumpTo(SectionId::Experience))
    );
    assert_eq!(site.scroll_target(3000.0), 2920.0);
}

// ═══════════════════════════════════════════════════════════════════════════
// Touch
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_swipe_up_goes_to_next_section() {
    let mut site = site();
    let bounds = layout(&site);

    site.on_touch_start(200.0, 600.0);
    let outcome = site.on_touch_end(210.0, 400.0, 1000.0, &bounds, 0.0);
    assert_eq!(outcome.navigate_to, Some(SectionId::Projects));
    assert!(!outcome.prevent_default);
}

#[test]
fn test_swipe_down_on_first_section_goes_nowhere() {
    let mut site = site();
    let bounds = layout(&site);

    site.on_touch_start(200.0, 300.0);
    let outcome = site.on_touch_end(200.0, 500.0, 0.0, &bounds, 0.0);
    assert_eq!(outcome.navigate_to, None);
}

#[test]
fn test_double_tap_is_suppressed() {
    let mut site = site();
    let bounds = layout(&site);

    site.on_touch_end(10.0, 10.0, 0.0, &bounds, 1000.0);
    let second = site.on_touch_end(10.0, 10.0, 0.0, &bounds, 1200.0);
    assert!(second.prevent_default);
}

// ═══════════════════════════════════════════════════════════════════════════
// Analytics wiring
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_theme_changes_feed_dark_mode_counters() {
    let mut site = site();
    site.toggle_theme();
    site.toggle_theme();
    site.set_theme(Theme::Dark);

    let usage = site.monitor().analytics().dark_mode;
    assert_eq!((usage.enabled, usage.disabled), (2, 1));
}

#[test]
fn test_runtime_errors_and_clicks_are_recorded() {
    let mut site = site();
    site.on_runtime_error(ErrorKind::Promise, "fetch failed", None, 5.0);
    site.on_document_click(
        ClickTarget {
            tag: "A".into(),
            href: Some("https://github.com/someone".into()),
            ..Default::default()
        },
        "localhost",
        6.0,
    );

    assert_eq!(site.monitor().errors().len(), 1);
    // page view from startup plus the click
    assert_eq!(site.monitor().interactions().len(), 2);
}

#[test]
fn test_section_visits_drive_most_visited() {
    let mut site = site();
    site.on_section_visible(SectionId::Projects);
    site.on_section_visible(SectionId::Projects);
    site.on_section_visible(SectionId::About);
    assert_eq!(site.monitor().analytics().most_visited(), SectionId::Projects);
}

#[test]
fn test_gallery_and_form_are_reachable_through_site() {
    let mut site = site();
    site.gallery_mut()
        .set_filter(CategoryFilter::Only(ProjectCategory::Ai));
    let visible = site.gallery().visible(site.portfolio());
    assert_eq!(visible.len(), 1);

    site.contact_mut().on_input(FormField::Name, "A");
    assert!(!site.contact_mut().on_blur(FormField::Name));
}

#[test]
fn test_teardown_flushes_once() {
    let mut site = site();
    let mut sink = CountingSink::default();
    let context = ReportContext::default();

    site.open_project(1);
    site.teardown(&mut sink, &context, 10_000.0);
    site.teardown(&mut sink, &context, 11_000.0);

    assert_eq!(sink.sent, 1);
    assert!(site.is_torn_down());
    assert!(!site.gallery().is_modal_open());
    assert_eq!(site.monitor().analytics().time_on_page_ms, 10_000.0);
}

#[test]
fn test_restored_page_starts_a_fresh_visit() {
    let mut site = site();
    let mut sink = CountingSink::default();
    let context = ReportContext::default();

    site.on_runtime_error(ErrorKind::Promise, "fetch failed", None, 5.0);
    site.teardown(&mut sink, &context, 10_000.0);
    site.on_page_restored(20_000.0);

    assert!(!site.is_torn_down());
    assert!(site.monitor().errors().is_empty());
    let analytics = site.monitor().analytics();
    assert_eq!(analytics.page_views, 1);
    assert_eq!(analytics.devices.desktop, 1);

    site.teardown(&mut sink, &context, 25_000.0);
    assert_eq!(sink.sent, 2);
    assert_eq!(site.monitor().analytics().time_on_page_ms, 5_000.0);
}

#[test]
fn test_restored_page_admits_the_next_scroll() {
    let mut site = site();
    let bounds = layout(&site);
    let mut sink = CountingSink::default();

    assert!(site.on_scroll(sample(0.0), &bounds, 1_000.0).is_some());
    site.teardown(&mut sink, &ReportContext::default(), 1_010.0);
    site.on_page_restored(1_020.0);
    assert!(site.on_scroll(sample(2500.0), &bounds, 1_030.0).is_some());
}

#[test]
fn test_restore_without_teardown_keeps_metrics() {
    let mut site = site();
    site.on_runtime_error(ErrorKind::Promise, "fetch failed", None, 5.0);
    site.on_page_restored(6.0);
    assert_eq!(site.monitor().errors().len(), 1);
}

// ═══════════════════════════════════════════════════════════════════════════
// Launch query
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_launch_query_sets_filter_and_theme() {
    let mut site = site();
    site.apply_launch_query("?filter=ai&theme=dark&utm_source=mail");

    assert_eq!(
        site.gallery().filter(),
        CategoryFilter::Only(ProjectCategory::Ai)
    );
    assert_eq!(site.theme(), Theme::Dark);
}

#[test]
fn test_launch_query_ignores_bad_values() {
    let mut site = site();
    site.apply_launch_query("filter=desktop&theme=sepia&theme");

    assert_eq!(site.gallery().filter(), CategoryFilter::All);
    assert_eq!(site.theme(), Theme::Light);
}
