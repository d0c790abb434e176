//! Fixed markup contract of the product page.

/// Present in the raw markup of the shop's "page not found" response
pub const NOT_FOUND_MARKER: &str = "error_404";

pub const CONTENT_REGION: &str = "div#content";

pub const DESCRIPTION: &str = "div.cr-info-descr";

pub const GALLERY_IMAGES: &str = "div.b-photo img[itemprop=image]";
pub const IMAGE_SOURCE_ATTR: &str = "src";
/// Path segment of the thumbnail variant; removing it yields the full-size URL
pub const THUMBNAIL_SEGMENT: &str = "/preview_b";

pub const ATTRIBUTE_ITEMS: &str = "div.cr-info-attrs div.attr_item";
pub const ATTRIBUTE_NAME: &str = "span.attr__name";
pub const ATTRIBUTE_VALUE: &str = "span.attr__value";

pub const REVIEW_ITEMS: &str = "li[id^=review-]";
pub const MODERATOR_COMMENT: &str = ".cr-moderator_comment";
pub const REVIEW_RATING: &str = "meta[itemprop=ratingValue]";
pub const REVIEW_RATING_ATTR: &str = "content";
pub const REVIEW_AUTHOR: &str = "span[itemprop=author]";
pub const REVIEW_TEXT: &str = "span[itemprop=description]";
pub const REVIEW_DATE: &str = "span.reviews__date";
pub const REVIEW_BODY: &str = "span.reviews__body";

/// Zero-based positions among the review body segments
pub const PROS_SEGMENT: usize = 1;
pub const CONS_SEGMENT: usize = 2;

/// Section labels stripped from the pros/cons segments
pub const SECTION_LABELS: [&str; 2] = ["Плюсы:", "Минусы:"];
