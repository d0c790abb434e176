//! Gallery images

use crate::dom::DomQuery;

use super::layout;

/// Full-size gallery URLs in document order, with the cover image removed
pub fn extract_images<D: DomQuery>(dom: &D, scope: D::Handle, cover_image: &str) -> Vec<String> {
    let images = dom
        .find(scope, layout::GALLERY_IMAGES)
        .into_iter()
        .map(|el| {
            let src = dom.attr(el, layout::IMAGE_SOURCE_ATTR).unwrap_or_default();
            full_size_url(&src)
        })
        .collect();

    exclude_cover(images, cover_image)
}

/// Strip the thumbnail path segment from an image URL
pub fn full_size_url(src: &str) -> String {
    src.replace(layout::THUMBNAIL_SEGMENT, "")
}

/// Drop the first exact match of `cover_image`; other entries keep their order
pub fn exclude_cover(mut images: Vec<String>, cover_image: &str) -> Vec<String> {
    if let Some(pos) = images.iter().position(|url| url == cover_image) {
        images.remove(pos);
    }
    images
}
