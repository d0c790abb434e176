//! Customer reviews
//!
//! Moderator replies sit inside the review markup, often nested in the very
//! element holding the review text. Reading a review is therefore two steps:
//! `strip_moderator_comments` blanks them in the tree and hands back a
//! `StrippedReview`, which is the only thing `read_review` accepts.

use crate::dom::DomQuery;

use super::attribute_extractor::first_text;
use super::{layout, trim_text, Review};

/// A review element whose moderator comments have been emptied
#[derive(Debug, Clone, Copy)]
pub struct StrippedReview<H>(H);

impl<H: Copy> StrippedReview<H> {
    pub fn handle(&self) -> H {
        self.0
    }
}

/// All reviews in document order. A review missing some parts is kept with empty fields.
pub fn extract_reviews<D: DomQuery>(dom: &mut D, scope: D::Handle) -> Vec<Review> {
    let items = dom.find(scope, layout::REVIEW_ITEMS);
    let mut reviews = Vec::with_capacity(items.len());

    for item in items {
        let stripped = strip_moderator_comments(dom, item);
        reviews.push(read_review(dom, stripped));
    }

    reviews
}

/// Empty every moderator comment inside the review
pub fn strip_moderator_comments<D: DomQuery>(
    dom: &mut D,
    review: D::Handle,
) -> StrippedReview<D::Handle> {
    for comment in dom.find(review, layout::MODERATOR_COMMENT) {
        dom.empty(comment);
    }
    StrippedReview(review)
}

pub fn read_review<D: DomQuery>(dom: &D, review: StrippedReview<D::Handle>) -> Review {
    let scope = review.handle();

    let rating = dom
        .find_first(scope, layout::REVIEW_RATING)
        .and_then(|el| dom.attr(el, layout::REVIEW_RATING_ATTR))
        .map(|v| trim_text(&v).to_string())
        .unwrap_or_default();

    Review {
        rating,
        author: first_text(dom, scope, layout::REVIEW_AUTHOR),
        text: first_text(dom, scope, layout::REVIEW_TEXT),
        date: first_text(dom, scope, layout::REVIEW_DATE),
        pros: body_segment(dom, scope, layout::PROS_SEGMENT),
        cons: body_segment(dom, scope, layout::CONS_SEGMENT),
    }
}

/// Text of the n-th body segment without its section label
fn body_segment<D: DomQuery>(dom: &D, scope: D::Handle, index: usize) -> String {
    let selector = format!("{}:eq({})", layout::REVIEW_BODY, index);
    let text: String = dom
        .find(scope, &selector)
        .into_iter()
        .map(|el| dom.text(el))
        .collect();

    trim_text(&strip_labels(&text)).to_string()
}

fn strip_labels(text: &str) -> String {
    layout::SECTION_LABELS
        .iter()
        .fold(text.to_string(), |acc, label| acc.replace(label, ""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ScraperDom;
    use pretty_assertions::assert_eq;

    fn extract(html: &str) -> Vec<Review> {
        let mut dom = ScraperDom::parse(html);
        let root = dom.root().unwrap();
        extract_reviews(&mut dom, root)
    }

    #[test]
    fn test_full_review() {
        let html = r#"
        <ul>
            <li id="review-101">
                <meta itemprop="ratingValue" content=" 4 ">
                <span itemprop="author"> Ivan </span>
                <span class="reviews__date">12.03.2023</span>
                <span class="reviews__body">
                    <span itemprop="description">Boils quickly.</span>
                </span>
                <span class="reviews__body">Плюсы: fast</span>
                <span class="reviews__body">Минусы: loud</span>
            </li>
        </ul>
        "#;

        let reviews = extract(html);
        assert_eq!(
            reviews,
            vec![Review {
                rating: "4".into(),
                author: "Ivan".into(),
                text: "Boils quickly.".into(),
                date: "12.03.2023".into(),
                pros: "fast".into(),
                cons: "loud".into(),
            }]
        );
    }

    #[test]
    fn test_single_body_segment_leaves_pros_and_cons_empty() {
        let html = r#"
        <ul><li id="review-1"><span class="reviews__body">intro</span></li></ul>
        "#;

        let reviews = extract(html);
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].pros, "");
        assert_eq!(reviews[0].cons, "");
    }

    #[test]
    fn test_segments_are_counted_per_review() {
        let html = r#"
        <ul>
            <li id="review-1">
                <span class="reviews__body">a</span>
                <span class="reviews__body">Плюсы: light</span>
            </li>
            <li id="review-2">
                <span class="reviews__body">b</span>
                <span class="reviews__body">Плюсы: cheap</span>
                <span class="reviews__body">Минусы: small</span>
            </li>
        </ul>
        "#;

        let reviews = extract(html);
        assert_eq!(reviews[0].pros, "light");
        assert_eq!(reviews[0].cons, "");
        assert_eq!(reviews[1].pros, "cheap");
        assert_eq!(reviews[1].cons, "small");
    }

    #[test]
    fn test_moderator_comment_is_stripped_from_text() {
        let html = r#"
        <ul>
            <li id="review-7">
                <span itemprop="description">Works fine.
                    <div class="cr-moderator_comment">Thank you for your review!</div>
                </span>
                <div class="cr-moderator_comment">We appreciate it.</div>
            </li>
        </ul>
        "#;

        let reviews = extract(html);
        assert_eq!(reviews[0].text, "Works fine.");
    }

    #[test]
    fn test_malformed_review_is_kept() {
        let html = r#"
        <ul>
            <li id="review-1"><span itemprop="author">A</span></li>
            <li id="review-2"></li>
            <li id="comment-3"><span itemprop="author">not a review</span></li>
        </ul>
        "#;

        let reviews = extract(html);
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].author, "A");
        assert_eq!(reviews[0].rating, "");
        assert_eq!(reviews[1], Review::default());
    }

    #[test]
    fn test_strip_labels_removes_every_occurrence() {
        assert_eq!(strip_labels("Плюсы: a Плюсы: b"), " a  b");
        assert_eq!(strip_labels("Минусы:x"), "x");
    }
}
