//! Performance and analytics monitor
//!
//! ```text
//!   PerformanceObserver entries ──► WebVitals ──► score()
//!   clicks / page views         ──► RingLog<Interaction>  (bounded)
//!   error / unhandledrejection  ──► RingLog<ErrorRecord>  (bounded)
//!   sections / theme / scroll   ──► Analytics
//!                                        │
//!                                        ▼
//!                           MonitorReport ──► AnalyticsSink
//! ```
//!
//! Nothing here talks to the browser. The frontend feeds observations in with
//! an explicit `now_ms` from `performance.now()`.

mod analytics;
mod ring_log;
mod vitals;

#[cfg(test)]
mod monitor_tests;

pub use analytics::{Analytics, DarkModeUsage, DeviceUsage, scroll_percent};
pub use ring_log::RingLog;
pub use vitals::{FCP_ENTRY, WebVitals};

use folio_types::SectionId;
use serde::Serialize;

use crate::config::MonitorSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    PageView,
    Click,
}

/// Element a click landed on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClickTarget {
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub kind: InteractionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<ClickTarget>,
    pub timestamp: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// Uncaught script error
    Javascript,
    /// Unhandled promise rejection
    Promise,
    /// Image, script or stylesheet failed to load
    Resource,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub timestamp: f64,
}

/// Browser facts attached to a report
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportContext {
    pub user_agent: String,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorReport<'a> {
    pub vitals: &'a WebVitals,
    pub score: u8,
    pub interactions: &'a RingLog<Interaction>,
    pub errors: &'a RingLog<ErrorRecord>,
    pub analytics: &'a Analytics,
    pub time_on_page: f64,
    pub most_visited_section: SectionId,
    pub context: &'a ReportContext,
}

impl MonitorReport<'_> {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Destination for finished reports
pub trait AnalyticsSink {
    fn send(&mut self, report: &MonitorReport<'_>);
}

/// Writes the report to the log as JSON.
#[derive(Debug, Default)]
pub struct LogSink {
    sent: u32,
}

impl LogSink {
    pub fn sent(&self) -> u32 {
        self.sent
    }
}

impl AnalyticsSink for LogSink {
    fn send(&mut self, report: &MonitorReport<'_>) {
        match report.to_json() {
            Ok(json) => {
                self.sent += 1;
                tracing::info!(report = %json, "analytics data");
            }
            Err(err) => tracing::error!(error = %err, "failed to serialize analytics report"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PerformanceMonitor {
    vitals: WebVitals,
    interactions: RingLog<Interaction>,
    errors: RingLog<ErrorRecord>,
    analytics: Analytics,
    settings: MonitorSettings,
}

impl PerformanceMonitor {
    pub fn new(settings: &MonitorSettings, now_ms: f64) -> Self {
        Self {
            vitals: WebVitals::default(),
            interactions: RingLog::with_capacity(settings.interaction_capacity),
            errors: RingLog::with_capacity(settings.error_capacity),
            analytics: Analytics::started_at(now_ms),
            settings: settings.clone(),
        }
    }

    pub fn vitals(&self) -> &WebVitals {
        &self.vitals
    }

    pub fn vitals_mut(&mut self) -> &mut WebVitals {
        &mut self.vitals
    }

    pub fn analytics(&self) -> &Analytics {
        &self.analytics
    }

    pub fn analytics_mut(&mut self) -> &mut Analytics {
        &mut self.analytics
    }

    pub fn interactions(&self) -> &RingLog<Interaction> {
        &self.interactions
    }

    pub fn errors(&self) -> &RingLog<ErrorRecord> {
        &self.errors
    }

    pub fn score(&self) -> u8 {
        self.vitals.score()
    }

    /// A page view counts both as analytics and as an interaction.
    pub fn track_page_view(&mut self, now_ms: f64) {
        self.analytics.record_page_view();
        self.interactions.push(Interaction {
            kind: InteractionKind::PageView,
            target: None,
            timestamp: now_ms,
        });
    }

    pub fn track_click(&mut self, target: ClickTarget, now_ms: f64) {
        self.interactions.push(Interaction {
            kind: InteractionKind::Click,
            target: Some(target),
            timestamp: now_ms,
        });
    }

    pub fn track_error(
        &mut self,
        kind: ErrorKind,
        message: impl Into<String>,
        source: Option<String>,
        now_ms: f64,
    ) {
        let message = message.into();
        tracing::error!(kind = ?kind, message = %message, "runtime error recorded");
        self.errors.push(ErrorRecord {
            kind,
            message,
            source,
            timestamp: now_ms,
        });
    }

    pub fn report<'a>(&'a self, context: &'a ReportContext, now_ms: f64) -> MonitorReport<'a> {
        MonitorReport {
            vitals: &self.vitals,
            score: self.score(),
            interactions: &self.interactions,
            errors: &self.errors,
            analytics: &self.analytics,
            time_on_page: self.analytics.time_on_page(now_ms),
            most_visited_section: self.analytics.most_visited(),
            context,
        }
    }

    /// Hand the current report to `sink`.
    pub fn send(&self, sink: &mut dyn AnalyticsSink, context: &ReportContext, now_ms: f64) {
        sink.send(&self.report(context, now_ms));
    }

    /// Page is going away: settle time on page and send.
    pub fn flush(&mut self, sink: &mut dyn AnalyticsSink, context: &ReportContext, now_ms: f64) {
        self.analytics.settle_time(now_ms);
        self.send(sink, context, now_ms);
    }

    /// Drop every metric and restart the time-on-page clock.
    pub fn reset(&mut self, now_ms: f64) {
        *self = Self::new(&self.settings, now_ms);
        tracing::debug!("performance monitor reset");
    }
}

/// `http(s)` link pointing away from `hostname`
pub fn is_external_link(href: &str, hostname: &str) -> bool {
    (href.starts_with("http://") || href.starts_with("https://"))
        && (hostname.is_empty() || !href.contains(hostname))
}
