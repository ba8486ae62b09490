//! Deferred image loading state
//!
//! Each image is observed until it first intersects the viewport, then
//! unobserved for good. A failed preload shows [`FALLBACK_IMAGE`] and is
//! never retried. A preload that outlives its timeout also shows the
//! fallback, but a load event arriving afterwards still swaps the real
//! image in.

use std::collections::BTreeMap;

/// Grey tile with "Image not available", shown when a preload fails
pub const FALLBACK_IMAGE: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iMjAwIiBoZWlnaHQ9IjIwMCIgeG1sbnM9Imh0dHA6Ly93d3cudzMub3JnLzIwMDAvc3ZnIj48cmVjdCB3aWR0aD0iMTAwJSIgaGVpZ2h0PSIxMDAlIiBmaWxsPSIjZjNmNGY2Ii8+PHRleHQgeD0iNTAlIiB5PSI1MCUiIGZvbnQtZmFtaWx5PSJBcmlhbCwgc2Fucy1zZXJpZiIgZm9udC1zaXplPSIxNCIgZmlsbD0iIzY2NjY2NiIgdGV4dC1hbmNob3I9Im1pZGRsZSIgZHk9Ii4zZW0iPkltYWdlIG5vdCBhdmFpbGFibGU8L3RleHQ+PC9zdmc+";

/// Transparent pixel used as `src` until the real image is swapped in
pub const BLANK_IMAGE: &str =
    "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageState {
    Pending,
    Loading,
    Loaded,
    /// Still loading past the timeout; only a later success can change it
    TimedOut,
    Failed,
}

impl ImageState {
    pub fn class(self) -> &'static str {
        match self {
            ImageState::Pending => "loading-skeleton",
            ImageState::Loading => "loading-skeleton loading",
            ImageState::Loaded => "loaded",
            ImageState::TimedOut | ImageState::Failed => "error",
        }
    }
}

#[derive(Debug, Clone)]
struct TrackedImage {
    src: String,
    state: ImageState,
}

/// Registry of deferred images keyed by their element id.
#[derive(Debug, Clone, Default)]
pub struct LazyImages {
    images: BTreeMap<String, TrackedImage>,
}

impl LazyImages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start observing `key`. Returns false if it was already registered, so
    /// calling it again for every image on the page only picks up new ones.
    pub fn register(&mut self, key: impl Into<String>, src: impl Into<String>) -> bool {
        let key = key.into();
        if self.images.contains_key(&key) {
            return false;
        }
        self.images.insert(
            key,
            TrackedImage {
                src: src.into(),
                state: ImageState::Pending,
            },
        );
        true
    }

    /// First intersection: returns the source to preload. Later calls return
    /// `None` because the element is no longer observed.
    pub fn on_intersect(&mut self, key: &str) -> Option<&str> {
        let image = self.images.get_mut(key)?;
        if image.state != ImageState::Pending {
            return None;
        }
        image.state = ImageState::Loading;
        Some(image.src.as_str())
    }

    pub fn on_loaded(&mut self, key: &str) {
        let late = self.state(key) == Some(ImageState::TimedOut);
        if self.settle(key, &[ImageState::Loading, ImageState::TimedOut], ImageState::Loaded) && late {
            tracing::debug!(image = key, "image loaded after timeout");
        }
    }

    pub fn on_failed(&mut self, key: &str) {
        if self.settle(key, &[ImageState::Loading, ImageState::TimedOut], ImageState::Failed) {
            tracing::warn!(image = key, "image failed to load, showing fallback");
        }
    }

    /// The preload took too long. Shows the fallback without giving up on
    /// the request.
    pub fn on_timeout(&mut self, key: &str) {
        if self.settle(key, &[ImageState::Loading], ImageState::TimedOut) {
            tracing::warn!(image = key, "image load timed out, showing fallback");
        }
    }

    fn settle(&mut self, key: &str, from: &[ImageState], to: ImageState) -> bool {
        match self.images.get_mut(key) {
            Some(image) if from.contains(&image.state) => {
                image.state = to;
                true
            }
            _ => false,
        }
    }

    pub fn state(&self, key: &str) -> Option<ImageState> {
        self.images.get(key).map(|i| i.state)
    }

    pub fn is_observed(&self, key: &str) -> bool {
        self.state(key) == Some(ImageState::Pending)
    }

    /// Value for the element's `src` attribute
    pub fn displayed_src(&self, key: &str) -> &str {
        match self.images.get(key) {
            Some(image) if image.state == ImageState::Loaded => &image.src,
            Some(image) if matches!(image.state, ImageState::TimedOut | ImageState::Failed) => {
                FALLBACK_IMAGE
            }
            _ => BLANK_IMAGE,
        }
    }

    pub fn pending_keys(&self) -> impl Iterator<Item = &str> {
        self.images
            .iter()
            .filter(|(_, i)| i.state == ImageState::Pending)
            .map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_intersection_hands_out_source_once() {
        let mut images = LazyImages::new();
        images.register("project-1", "/images/shop.jpg");
        assert!(images.is_observed("project-1"));

        assert_eq!(images.on_intersect("project-1"), Some("/images/shop.jpg"));
        assert!(!images.is_observed("project-1"));
        assert_eq!(images.on_intersect("project-1"), None);
    }

    #[test]
    fn broken_source_falls_back_exactly_once() {
        let mut images = LazyImages::new();
        images.register("hero", "/missing.png");
        images.on_intersect("hero");
        images.on_failed("hero");

        assert_eq!(images.state("hero"), Some(ImageState::Failed));
        assert_eq!(images.displayed_src("hero"), FALLBACK_IMAGE);
        assert_eq!(images.on_intersect("hero"), None);

        // an error event is final
        images.on_loaded("hero");
        assert_eq!(images.state("hero"), Some(ImageState::Failed));
    }

    #[test]
    fn slow_image_loads_after_timeout() {
        let mut images = LazyImages::new();
        images.register("project-image-3", "/images/large.jpg");
        images.on_intersect("project-image-3");

        images.on_timeout("project-image-3");
        assert_eq!(images.state("project-image-3"), Some(ImageState::TimedOut));
        assert_eq!(images.displayed_src("project-image-3"), FALLBACK_IMAGE);
        assert_eq!(images.on_intersect("project-image-3"), None);

        images.on_loaded("project-image-3");
        assert_eq!(images.state("project-image-3"), Some(ImageState::Loaded));
        assert_eq!(images.displayed_src("project-image-3"), "/images/large.jpg");
    }

    #[test]
    fn timeout_after_settling_is_ignored() {
        let mut images = LazyImages::new();
        images.register("a", "/a.jpg");
        images.on_intersect("a");
        images.on_loaded("a");
        images.on_timeout("a");
        assert_eq!(images.state("a"), Some(ImageState::Loaded));

        images.register("b", "/b.jpg");
        images.on_intersect("b");
        images.on_timeout("b");
        images.on_failed("b");
        assert_eq!(images.state("b"), Some(ImageState::Failed));
        images.on_loaded("b");
        assert_eq!(images.state("b"), Some(ImageState::Failed));
    }

    #[test]
    fn loaded_image_shows_real_source() {
        let mut images = LazyImages::new();
        images.register("avatar", "/me.jpg");
        assert_eq!(images.displayed_src("avatar"), BLANK_IMAGE);
        assert_eq!(images.state("avatar").map(ImageState::class), Some("loading-skeleton"));

        images.on_intersect("avatar");
        images.on_loaded("avatar");
        assert_eq!(images.displayed_src("avatar"), "/me.jpg");
        assert_eq!(images.state("avatar").map(ImageState::class), Some("loaded"));
    }

    #[test]
    fn refresh_only_registers_new_images() {
        let mut images = LazyImages::new();
        assert!(images.register("a", "/a.jpg"));
        images.on_intersect("a");
        assert!(!images.register("a", "/a.jpg"));
        assert!(images.register("b", "/b.jpg"));

        let pending: Vec<_> = images.pending_keys().collect();
        assert_eq!(pending, vec!["b"]);
    }
}
