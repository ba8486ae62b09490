//! Common serde default value functions
//!
//! Used across the site configuration so a partial `site.toml` stays valid.

/// Height of the fixed header (h-20)
pub fn default_header_height() -> u32 {
    80
}

/// Offset added to the scroll position before resolving the active section
pub fn default_scroll_offset() -> u32 {
    100
}

pub fn default_sticky_threshold() -> u32 {
    100
}

pub fn default_animation_duration() -> u32 {
    300
}

/// Intersection margin for lazy images, in pixels
pub fn default_lazy_load_offset() -> u32 {
    50
}

pub fn default_debounce_delay() -> u32 {
    250
}

pub fn default_throttle_delay() -> u32 {
    100
}

pub fn default_image_load_timeout() -> u32 {
    5000
}

/// Simulated contact submission latency
pub fn default_submit_delay() -> u32 {
    2000
}

pub fn default_success_banner() -> u32 {
    5000
}

pub fn default_interaction_capacity() -> usize {
    100
}

pub fn default_error_capacity() -> usize {
    50
}

pub fn default_swipe_threshold() -> f64 {
    50.0
}

pub fn default_double_tap_window() -> u32 {
    300
}

pub fn default_stagger_step() -> u32 {
    100
}

pub fn default_parallax_speed() -> f64 {
    0.5
}
