//! Product description
//!
//! Keeps the inner markup so embedded formatting survives.

use crate::dom::DomQuery;

use super::{layout, trim_text};

/// Trimmed inner HTML of the description block, or empty if absent
pub fn extract_description<D: DomQuery>(dom: &D, scope: D::Handle) -> String {
    dom.find_first(scope, layout::DESCRIPTION)
        .map(|el| trim_text(&dom.html(el)).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ScraperDom;

    fn extract(html: &str) -> String {
        let dom = ScraperDom::parse(html);
        let root = dom.root().unwrap();
        extract_description(&dom, root)
    }

    #[test]
    fn test_description_keeps_markup() {
        let html = r#"
        <div class="cr-info-descr">
            <p>Steel kettle, <b>1.7 l</b></p>
        </div>
        "#;

        assert_eq!(extract(html), "<p>Steel kettle, <b>1.7 l</b></p>");
    }

    #[test]
    fn test_missing_description_is_empty() {
        assert_eq!(extract("<div class=\"other\">x</div>"), "");
    }

    #[test]
    fn test_first_description_wins() {
        let html = r#"
        <div class="cr-info-descr">first</div>
        <div class="cr-info-descr">second</div>
        "#;

        assert_eq!(extract(html), "first");
    }
}
