//! Product attribute table (name/value pairs)

use crate::dom::DomQuery;

use super::{layout, trim_text, Attribute};

/// Every attribute row in document order; duplicates and empty values are kept
pub fn extract_attributes<D: DomQuery>(dom: &D, scope: D::Handle) -> Vec<Attribute> {
    dom.find(scope, layout::ATTRIBUTE_ITEMS)
        .into_iter()
        .map(|item| Attribute {
            name: first_text(dom, item, layout::ATTRIBUTE_NAME),
            value: first_text(dom, item, layout::ATTRIBUTE_VALUE),
        })
        .collect()
}

/// Trimmed text of the first match, or empty
pub(crate) fn first_text<D: DomQuery>(dom: &D, scope: D::Handle, selector: &str) -> String {
    dom.find_first(scope, selector)
        .map(|el| trim_text(&dom.text(el)).to_string())
        .unwrap_or_default()
}
