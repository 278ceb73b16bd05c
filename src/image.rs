use std::sync::LazyLock;

use regex::Regex;

use crate::feed::Item;

pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x160?text=No+Image";

static IMG_SRC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<img[^>]+src=["']([^"'>]+)["']"#).unwrap());

/// Picks the image to show for `item`.
///
/// Structured media fields win over anything found in the description markup.
pub fn resolve_image(item: &Item) -> String {
    item.media_content_url()
        .or_else(|| item.enclosure_link())
        .or_else(|| item.thumbnail())
        .map(str::to_string)
        .or_else(|| item.description().and_then(first_img_src))
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string())
}

/// `src` of the first `<img>` tag in `markup`, if any.
pub fn first_img_src(markup: &str) -> Option<String> {
    IMG_SRC
        .captures(markup)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
