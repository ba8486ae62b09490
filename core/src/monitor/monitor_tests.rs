//! Tests for PerformanceMonitor bookkeeping and reporting

use folio_types::SectionId;

use super::{
    AnalyticsSink, ClickTarget, ErrorKind, InteractionKind, LogSink, MonitorReport,
    PerformanceMonitor, ReportContext, is_external_link,
};
use crate::config::MonitorSettings;

// ═══════════════════════════════════════════════════════════════════════════
// Test Helpers
// ═══════════════════════════════════════════════════════════════════════════

fn monitor() -> PerformanceMonitor {
    PerformanceMonitor::new(&MonitorSettings::default(), 0.0)
}

fn context() -> ReportContext {
    ReportContext {
        user_agent: "test-agent".into(),
        viewport_width: 1280.0,
        viewport_height: 800.0,
    }
}

fn link(href: &str) -> ClickTarget {
    ClickTarget {
        tag: "A".into(),
        href: Some(href.into()),
        ..Default::default()
    }
}

#[derive(Default)]
struct CapturingSink {
    payloads: Vec<serde_json::Value>,
}

impl AnalyticsSink for CapturingSink {
    fn send(&mut self, report: &MonitorReport<'_>) {
        self.payloads.push(serde_json::to_value(report).unwrap());
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Bounded logs
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_interaction_log_capped_at_hundred() {
    let mut monitor = monitor();
    for i in 0..250 {
        monitor.track_click(link("#about"), f64::from(i));
    }
    assert_eq!(monitor.interactions().len(), 100);
    assert_eq!(monitor.interactions().iter().next().unwrap().timestamp, 150.0);
}

#[test]
fn test_error_log_capped_at_fifty() {
    let mut monitor = monitor();
    for i in 0..80 {
        monitor.track_error(ErrorKind::Javascript, format!("boom {i}"), None, f64::from(i));
    }
    assert_eq!(monitor.errors().len(), 50);
    assert_eq!(monitor.errors().latest().unwrap().message, "boom 79");
}

#[test]
fn test_page_view_is_also_an_interaction() {
    let mut monitor = monitor();
    monitor.track_page_view(12.0);
    assert_eq!(monitor.analytics().page_views, 1);
    assert_eq!(
        monitor.interactions().latest().map(|i| i.kind),
        Some(InteractionKind::PageView)
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// Reporting
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_report_to_json_carries_score_and_section() {
    let mut monitor = monitor();
    monitor.vitals_mut().record_largest_paint(3000.0);
    monitor.analytics_mut().record_section_visit(SectionId::Projects);
    monitor.track_error(ErrorKind::Promise, "rejected", None, 5.0);

    let json: serde_json::Value =
        serde_json::from_str(&monitor.report(&context(), 1_000.0).to_json().unwrap()).unwrap();

    assert_eq!(json["score"], 80);
    assert_eq!(json["mostVisitedSection"], "projects");
    assert_eq!(json["errors"][0]["kind"], "promise");
    assert_eq!(json["analytics"]["sections"]["projects"], 1);
    assert_eq!(json["context"]["userAgent"], "test-agent");
}

#[test]
fn test_flush_settles_time_before_sending() {
    let mut monitor = monitor();
    let mut sink = CapturingSink::default();
    monitor.flush(&mut sink, &context(), 4_000.0);

    assert_eq!(sink.payloads.len(), 1);
    assert_eq!(sink.payloads[0]["timeOnPage"], 4_000.0);
    assert_eq!(monitor.analytics().time_on_page(9_000.0), 4_000.0);
}

#[test]
fn test_log_sink_counts_sends() {
    let monitor = monitor();
    let mut sink = LogSink::default();
    monitor.send(&mut sink, &context(), 10.0);
    monitor.send(&mut sink, &context(), 20.0);
    assert_eq!(sink.sent(), 2);
}

#[test]
fn test_reset_clears_everything() {
    let mut monitor = monitor();
    monitor.track_page_view(1.0);
    monitor.track_error(ErrorKind::Resource, "img", Some("/a.png".into()), 2.0);
    monitor.vitals_mut().record_first_input(400.0, 0.0);
    monitor.analytics_mut().record_theme(true);

    monitor.reset(100.0);

    assert!(monitor.interactions().is_empty());
    assert!(monitor.errors().is_empty());
    assert_eq!(monitor.score(), 100);
    assert_eq!(monitor.analytics().dark_mode.enabled, 0);
    assert_eq!(monitor.analytics().time_on_page(150.0), 50.0);
}

#[test]
fn test_external_links_are_off_site_http() {
    assert!(is_external_link("https://github.com/someone", "alex.dev"));
    assert!(!is_external_link("https://alex.dev/resume.pdf", "alex.dev"));
    assert!(!is_external_link("#contact", "alex.dev"));
    assert!(!is_external_link("mailto:me@example.com", "alex.dev"));
}
