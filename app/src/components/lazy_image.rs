use dioxus::prelude::*;
use folio_core::lazy_image::ImageState;

use crate::site::use_site;
use crate::widgets::LazyImageObserver;

/// Image whose real source is fetched once it nears the viewport.
///
/// `image_id` doubles as the element id and the registry key, so it must be
/// unique on the page.
#[component]
pub fn LazyImage(image_id: String, src: String, alt: String, class: Option<String>) -> Element {
    let mut site = use_site();
    let lazy_images = use_context::<LazyImageObserver>();

    let key = image_id.clone();
    let source = src.clone();
    use_effect(move || {
        let registered = match site.try_write() {
            Ok(mut site) => site.images_mut().register(key.clone(), source.clone()),
            Err(_) => return,
        };
        if registered {
            tracing::trace!(image = %key, "lazy image registered");
        }
        lazy_images.refresh();
    });

    let (state, displayed) = {
        let site = site.read();
        let images = site.images();
        (
            images.state(&image_id).unwrap_or(ImageState::Pending),
            images.displayed_src(&image_id).to_string(),
        )
    };
    let class = format!("lazy-image {} {}", state.class(), class.unwrap_or_default());

    rsx! {
        img {
            id: "{image_id}",
            class: "{class}",
            src: "{displayed}",
            "data-src": "{src}",
            alt: "{alt}",
        }
    }
}
