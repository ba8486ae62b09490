//! Visitor analytics: section visits, theme usage, devices, engagement

use std::collections::BTreeMap;

use folio_types::SectionId;
use serde::Serialize;

use crate::responsive::MOBILE_MAX_WIDTH;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DarkModeUsage {
    pub enabled: u32,
    pub disabled: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeviceUsage {
    pub mobile: u32,
    pub desktop: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub page_views: u32,
    pub sections: BTreeMap<SectionId, u32>,
    pub dark_mode: DarkModeUsage,
    pub devices: DeviceUsage,
    /// Accumulated visible time, excluding the current visible stretch
    pub time_on_page_ms: f64,
    /// Highest scroll position reached, in percent of the scrollable height
    pub scroll_depth: u8,
    #[serde(skip)]
    visible_since_ms: Option<f64>,
}

impl Analytics {
    pub fn started_at(now_ms: f64) -> Self {
        Self {
            visible_since_ms: Some(now_ms),
            ..Self::default()
        }
    }

    pub fn record_page_view(&mut self) {
        self.page_views += 1;
    }

    pub fn record_section_visit(&mut self, section: SectionId) {
        *self.sections.entry(section).or_default() += 1;
    }

    /// Section with the most visits. Ties keep the earliest section in page
    /// order; no visits at all means home.
    pub fn most_visited(&self) -> SectionId {
        self.sections
            .iter()
            .fold((SectionId::Home, 0), |best, (id, count)| {
                if *count > best.1 { (*id, *count) } else { best }
            })
            .0
    }

    /// Count one application of the theme to the document root.
    pub fn record_theme(&mut self, dark: bool) {
        if dark {
            self.dark_mode.enabled += 1;
        } else {
            self.dark_mode.disabled += 1;
        }
    }

    pub fn record_device(&mut self, viewport_width: f64) {
        if viewport_width < MOBILE_MAX_WIDTH {
            self.devices.mobile += 1;
        } else {
            self.devices.desktop += 1;
        }
    }

    /// Page hidden or shown. Time only accrues while visible.
    pub fn on_visibility_change(&mut self, hidden: bool, now_ms: f64) {
        if hidden {
            if let Some(since) = self.visible_since_ms.take() {
                self.time_on_page_ms += (now_ms - since).max(0.0);
            }
        } else if self.visible_since_ms.is_none() {
            self.visible_since_ms = Some(now_ms);
        }
    }

    /// Total visible time including the current stretch.
    pub fn time_on_page(&self, now_ms: f64) -> f64 {
        let current = self
            .visible_since_ms
            .map_or(0.0, |since| (now_ms - since).max(0.0));
        self.time_on_page_ms + current
    }

    /// Close the running visible stretch, as on unload.
    pub fn settle_time(&mut self, now_ms: f64) {
        self.on_visibility_change(true, now_ms);
    }

    /// Track the maximum scroll depth seen so far.
    pub fn record_scroll(&mut self, scroll_y: f64, scroll_height: f64, viewport_height: f64) -> u8 {
        if let Some(depth) = scroll_percent(scroll_y, scroll_height, viewport_height) {
            self.scroll_depth = self.scroll_depth.max(depth);
        }
        self.scroll_depth
    }
}

/// How far down the scrollable range `scroll_y` is, 0-100. `None` when the
/// page fits in the viewport.
pub fn scroll_percent(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> Option<u8> {
    let scrollable = scroll_height - viewport_height;
    (scrollable > 0.0).then(|| (scroll_y / scrollable * 100.0).round().clamp(0.0, 100.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn most_visited_defaults_to_home() {
        assert_eq!(Analytics::default().most_visited(), SectionId::Home);
    }

    #[test]
    fn most_visited_prefers_count_then_page_order() {
        let mut analytics = Analytics::default();
        analytics.record_section_visit(SectionId::Contact);
        analytics.record_section_visit(SectionId::About);
        assert_eq!(analytics.most_visited(), SectionId::About);

        analytics.record_section_visit(SectionId::Contact);
        assert_eq!(analytics.most_visited(), SectionId::Contact);
    }

    #[test]
    fn time_only_accrues_while_visible() {
        let mut analytics = Analytics::started_at(0.0);
        analytics.on_visibility_change(true, 1_000.0);
        analytics.on_visibility_change(false, 5_000.0);
        assert_eq!(analytics.time_on_page(5_500.0), 1_500.0);

        analytics.settle_time(6_000.0);
        assert_eq!(analytics.time_on_page_ms, 2_000.0);
        assert_eq!(analytics.time_on_page(9_000.0), 2_000.0);
    }

    #[test]
    fn scroll_depth_keeps_maximum() {
        let mut analytics = Analytics::default();
        assert_eq!(analytics.record_scroll(500.0, 2_000.0, 1_000.0), 50);
        assert_eq!(analytics.record_scroll(100.0, 2_000.0, 1_000.0), 50);
        assert_eq!(analytics.record_scroll(1_000.0, 2_000.0, 1_000.0), 100);
    }

    #[test]
    fn unscrollable_page_reports_zero_depth() {
        let mut analytics = Analytics::default();
        assert_eq!(analytics.record_scroll(0.0, 800.0, 800.0), 0);
    }

    #[test]
    fn device_split_at_mobile_width() {
        let mut analytics = Analytics::default();
        analytics.record_device(767.0);
        analytics.record_device(768.0);
        assert_eq!(analytics.devices, DeviceUsage { mobile: 1, desktop: 1 });
    }
}
