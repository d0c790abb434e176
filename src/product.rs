//! Product page extraction entry point

use tracing::debug;

use crate::dom::{DomQuery, ScraperDom};
use crate::extractors::{
    extract_attributes, extract_description, extract_images, extract_reviews, layout,
    ExtractionOutcome, ExtractionRequest, ProductRecord,
};

/// Turns one rendered product page into a `ProductRecord`.
///
/// Holds no state: every call parses its own tree and builds its own record,
/// so one instance can serve any number of calls, from any thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProductContentExtractor;

impl ProductContentExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract using the scraper-backed DOM
    pub fn extract(&self, request: &ExtractionRequest) -> ExtractionOutcome {
        self.extract_with::<ScraperDom>(request)
    }

    /// Extract using any `DomQuery` implementation
    pub fn extract_with<D: DomQuery>(&self, request: &ExtractionRequest) -> ExtractionOutcome {
        let identifier = request.identifier.clone();
        let product_id = request.product_id().clone();

        if is_not_found_page(&request.html) {
            debug!(%identifier, "not-found page, skipping parse");
            return ExtractionOutcome::not_found(identifier, product_id);
        }

        let mut dom = D::parse(&request.html);
        let mut record = ProductRecord {
            link: request.reference_url.clone(),
            cover_image: request.cover_image_url.clone(),
            ..Default::default()
        };

        let content = dom
            .root()
            .and_then(|root| dom.find_first(root, layout::CONTENT_REGION));

        match content {
            Some(scope) => {
                record.description = extract_description(&dom, scope);
                record.images = extract_images(&dom, scope, &request.cover_image_url);
                record.attributes = extract_attributes(&dom, scope);
                // Mutates the tree; keep it after the read-only extractors
                record.reviews = extract_reviews(&mut dom, scope);
            }
            None => debug!(%identifier, "content region not present"),
        }

        debug!(
            %identifier,
            images = record.images.len(),
            attributes = record.attributes.len(),
            reviews = record.reviews.len(),
            "product page extracted"
        );

        ExtractionOutcome::found(identifier, product_id, record)
    }
}

/// Extract a product page with a throwaway extractor
pub fn extract_product(request: &ExtractionRequest) -> ExtractionOutcome {
    ProductContentExtractor::new().extract(request)
}

pub fn is_not_found_page(html: &str) -> bool {
    html.contains(layout::NOT_FOUND_MARKER)
}
