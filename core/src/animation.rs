//! Scroll reveal, parallax and text/number animations

use std::collections::BTreeSet;

use crate::config::AnimationSettings;

/// Interval of counter frames, about 60 per second
pub const FRAME_MS: u32 = 16;

/// Elements revealed once, on their first intersection.
#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    revealed: BTreeSet<String>,
}

impl RevealTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true on the first intersection only; the caller then stops
    /// observing the element.
    pub fn on_intersect(&mut self, key: &str) -> bool {
        if self.revealed.contains(key) {
            return false;
        }
        self.revealed.insert(key.to_string());
        true
    }

    pub fn is_revealed(&self, key: &str) -> bool {
        self.revealed.contains(key)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }
}

/// Delay for the child at `index` of a revealed container.
pub fn stagger_delay(index: usize, settings: &AnimationSettings) -> u32 {
    u32::try_from(index)
        .unwrap_or(u32::MAX)
        .saturating_mul(settings.stagger_step)
}

/// Vertical translation for a parallax layer.
pub fn parallax_offset(scroll_y: f64, speed: f64) -> f64 {
    -(scroll_y * speed)
}

/// Coalesces scroll events so parallax runs at most once per animation frame.
#[derive(Debug, Clone, Default)]
pub struct FrameGate {
    ticking: bool,
}

impl FrameGate {
    /// Returns true when the caller should request a frame.
    pub fn request(&mut self) -> bool {
        if self.ticking {
            return false;
        }
        self.ticking = true;
        true
    }

    pub fn frame_done(&mut self) {
        self.ticking = false;
    }
}

/// Counts from zero to `target` in `FRAME_MS` steps.
///
/// Yields the displayed (floored) value for each frame. The last value is
/// always exactly `target`.
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    target: u64,
    increment: f64,
    current: f64,
    done: bool,
}

impl CounterAnimation {
    pub fn new(target: u64, duration_ms: u32) -> Self {
        let frames = (f64::from(duration_ms) / f64::from(FRAME_MS)).max(1.0);
        Self {
            target,
            increment: target as f64 / frames,
            current: 0.0,
            done: false,
        }
    }
}

impl Iterator for CounterAnimation {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.done {
            return None;
        }
        self.current += self.increment;
        if self.current >= self.target as f64 {
            self.done = true;
            return Some(self.target);
        }
        Some(self.current.floor() as u64)
    }
}

/// Reveals `text` one character per tick.
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    shown: usize,
}

impl Typewriter {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            shown: 0,
        }
    }

    pub fn visible(&self) -> &str {
        match self.text.char_indices().nth(self.shown) {
            Some((byte, _)) => &self.text[..byte],
            None => &self.text,
        }
    }

    pub fn is_done(&self) -> bool {
        self.shown >= self.text.chars().count()
    }

    /// Advance one character. Returns false once everything is shown.
    pub fn tick(&mut self) -> bool {
        if self.is_done() {
            return false;
        }
        self.shown += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_fires_once_per_element() {
        let mut reveal = RevealTracker::new();
        assert!(reveal.on_intersect("about-card"));
        assert!(!reveal.on_intersect("about-card"));
        assert!(reveal.is_revealed("about-card"));
    }

    #[test]
    fn stagger_steps_by_index() {
        let settings = AnimationSettings::default();
        let delays: Vec<_> = (0..4).map(|i| stagger_delay(i, &settings)).collect();
        assert_eq!(delays, vec![0, 100, 200, 300]);
    }

    #[test]
    fn parallax_moves_against_scroll() {
        assert_eq!(parallax_offset(200.0, 0.5), -100.0);
    }

    #[test]
    fn frame_gate_coalesces_until_frame_runs() {
        let mut gate = FrameGate::default();
        assert!(gate.request());
        assert!(!gate.request());
        gate.frame_done();
        assert!(gate.request());
    }

    #[test]
    fn counter_ends_exactly_at_target() {
        let frames: Vec<_> = CounterAnimation::new(7, 2000).collect();
        assert_eq!(frames.last(), Some(&7));
        assert!(frames.windows(2).all(|w| w[0] <= w[1]));
        assert!(frames.len() >= 125);
    }

    #[test]
    fn counter_with_zero_target_finishes_immediately() {
        let frames: Vec<_> = CounterAnimation::new(0, 2000).collect();
        assert_eq!(frames, vec![0]);
    }

    #[test]
    fn typewriter_reveals_one_char_per_tick() {
        let mut writer = Typewriter::new("Héllo");
        assert_eq!(writer.visible(), "");
        writer.tick();
        writer.tick();
        assert_eq!(writer.visible(), "Hé");
        while writer.tick() {}
        assert_eq!(writer.visible(), "Héllo");
        assert!(writer.is_done());
    }
}
