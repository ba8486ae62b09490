//! Device classes, breakpoints and touch gestures

use std::fmt;

use crate::config::GestureSettings;

/// Viewports narrower than this are phones
pub const MOBILE_MAX_WIDTH: f64 = 768.0;
/// Viewports narrower than this (and not phones) are tablets
pub const TABLET_MAX_WIDTH: f64 = 1024.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    Mobile,
    Tablet,
    Desktop,
}

impl DeviceClass {
    pub fn from_width(width: f64) -> Self {
        if width < MOBILE_MAX_WIDTH {
            DeviceClass::Mobile
        } else if width < TABLET_MAX_WIDTH {
            DeviceClass::Tablet
        } else {
            DeviceClass::Desktop
        }
    }

    /// Class put on `<body>`
    pub fn body_class(self) -> &'static str {
        match self {
            DeviceClass::Mobile => "mobile",
            DeviceClass::Tablet => "tablet",
            DeviceClass::Desktop => "desktop",
        }
    }

    pub fn all() -> &'static [DeviceClass] {
        &[DeviceClass::Mobile, DeviceClass::Tablet, DeviceClass::Desktop]
    }

    /// Value for the `--animation-duration` custom property
    pub fn animation_duration(self) -> &'static str {
        match self {
            DeviceClass::Mobile => "0.3s",
            _ => "0.6s",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Breakpoint {
    Sm,
    Md,
    Lg,
    Xl,
    Xxl,
}

impl Breakpoint {
    pub fn from_width(width: f64) -> Self {
        if width < 640.0 {
            Breakpoint::Sm
        } else if width < 768.0 {
            Breakpoint::Md
        } else if width < 1024.0 {
            Breakpoint::Lg
        } else if width < 1280.0 {
            Breakpoint::Xl
        } else {
            Breakpoint::Xxl
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Breakpoint::Sm => "sm",
            Breakpoint::Md => "md",
            Breakpoint::Lg => "lg",
            Breakpoint::Xl => "xl",
            Breakpoint::Xxl => "2xl",
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Snapshot taken after a (debounced) resize
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn device(&self) -> DeviceClass {
        DeviceClass::from_width(self.width)
    }

    pub fn breakpoint(&self) -> Breakpoint {
        Breakpoint::from_width(self.width)
    }

    pub fn is_mobile(&self) -> bool {
        self.device() == DeviceClass::Mobile
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    Up,
    Down,
    Left,
    Right,
}

/// Tracks a touch from start to end and classifies it.
#[derive(Debug, Clone)]
pub struct SwipeDetector {
    threshold: f64,
    start: Option<(f64, f64)>,
}

impl SwipeDetector {
    pub fn new(settings: &GestureSettings) -> Self {
        Self {
            threshold: settings.swipe_threshold,
            start: None,
        }
    }

    pub fn touch_start(&mut self, x: f64, y: f64) {
        self.start = Some((x, y));
    }

    /// Classify the gesture. Movement is measured start minus end, so a
    /// finger moving up the screen is a positive vertical delta.
    pub fn touch_end(&mut self, x: f64, y: f64) -> Option<Swipe> {
        let (start_x, start_y) = self.start.take()?;
        let dx = start_x - x;
        let dy = start_y - y;

        if dy.abs() > dx.abs() {
            if dy > self.threshold {
                Some(Swipe::Up)
            } else if dy < -self.threshold {
                Some(Swipe::Down)
            } else {
                None
            }
        } else if dx > self.threshold {
            Some(Swipe::Left)
        } else if dx < -self.threshold {
            Some(Swipe::Right)
        } else {
            None
        }
    }
}

/// Suppresses the second of two touch ends inside the window, which would
/// otherwise zoom the page.
#[derive(Debug, Clone)]
pub struct DoubleTapGuard {
    window_ms: f64,
    last_touch_end: Option<f64>,
}

impl DoubleTapGuard {
    pub fn new(settings: &GestureSettings) -> Self {
        Self {
            window_ms: f64::from(settings.double_tap_window),
            last_touch_end: None,
        }
    }

    /// Returns true when the default action must be prevented.
    pub fn touch_end(&mut self, now_ms: f64) -> bool {
        let suppress = self
            .last_touch_end
            .is_some_and(|last| now_ms - last <= self.window_ms);
        self.last_touch_end = Some(now_ms);
        suppress
    }
}
