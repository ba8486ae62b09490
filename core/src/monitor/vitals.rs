//! Core web vitals and the derived performance score

use serde::Serialize;

/// Paint entry name carrying first contentful paint
pub const FCP_ENTRY: &str = "first-contentful-paint";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebVitals {
    pub first_contentful_paint: Option<f64>,
    pub largest_contentful_paint: Option<f64>,
    pub first_input_delay: Option<f64>,
    pub cumulative_layout_shift: Option<f64>,
    pub page_load: Option<f64>,
}

/// Penalty bands, highest threshold first.
const LCP_BANDS: [(f64, u32); 3] = [(4000.0, 30), (2500.0, 20), (2000.0, 10)];
const FID_BANDS: [(f64, u32); 3] = [(300.0, 30), (100.0, 20), (50.0, 10)];
const CLS_BANDS: [(f64, u32); 3] = [(0.25, 30), (0.1, 20), (0.05, 10)];

fn penalty(value: Option<f64>, bands: &[(f64, u32)]) -> u32 {
    let Some(value) = value.filter(|v| *v > 0.0) else {
        return 0;
    };
    bands
        .iter()
        .find(|(threshold, _)| value > *threshold)
        .map_or(0, |(_, points)| *points)
}

impl WebVitals {
    /// Paint timing entry. Only first contentful paint is kept.
    pub fn record_paint(&mut self, name: &str, start_time: f64) {
        if name == FCP_ENTRY {
            self.first_contentful_paint = Some(start_time);
        }
    }

    /// The latest candidate is the final value.
    pub fn record_largest_paint(&mut self, start_time: f64) {
        self.largest_contentful_paint = Some(start_time);
    }

    pub fn record_first_input(&mut self, processing_start: f64, start_time: f64) {
        self.first_input_delay = Some(processing_start - start_time);
    }

    /// Shifts right after user input are expected and not counted.
    pub fn record_layout_shift(&mut self, value: f64, had_recent_input: bool) {
        if had_recent_input {
            return;
        }
        *self.cumulative_layout_shift.get_or_insert(0.0) += value;
    }

    pub fn record_page_load(&mut self, now_ms: f64) {
        self.page_load = Some(now_ms);
    }

    /// 0-100. Unset or zero metrics are not penalized.
    pub fn score(&self) -> u8 {
        let lost = penalty(self.largest_contentful_paint, &LCP_BANDS)
            + penalty(self.first_input_delay, &FID_BANDS)
            + penalty(self.cumulative_layout_shift, &CLS_BANDS);
        100u32.saturating_sub(lost) as u8
    }
}
