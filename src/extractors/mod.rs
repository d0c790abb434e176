//! Product page extraction
//!
//! One module per record field, plus the fixed page layout they share.

pub mod layout;

mod attribute_extractor;
mod description_extractor;
mod image_extractor;
mod review_extractor;

pub use attribute_extractor::*;
pub use description_extractor::*;
pub use image_extractor::*;
pub use review_extractor::*;

use std::fmt;

use serde::{Deserialize, Serialize};

pub const STATUS_OK: u16 = 200;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const MESSAGE_OK: &str = "200 - ok";
pub const MESSAGE_NOT_FOUND: &str = "404 - Product not found";

/// Trim ASCII blanks only (space, tab, CR, LF, NUL, vertical tab).
///
/// Non-breaking spaces are content on this site and survive, which
/// `str::trim` would not allow.
pub fn trim_text(text: &str) -> &str {
    text.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B'))
}

/// Caller-side correlation key: numeric row id or opaque string
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Int(i64),
    Text(String),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Int(n) => write!(f, "{}", n),
            Identifier::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Identifier {
    fn from(n: i64) -> Self {
        Identifier::Int(n)
    }
}

impl From<i32> for Identifier {
    fn from(n: i32) -> Self {
        Identifier::Int(n.into())
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Identifier::Text(s.to_string())
    }
}

impl From<String> for Identifier {
    fn from(s: String) -> Self {
        Identifier::Text(s)
    }
}

/// Input for one extraction call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionRequest {
    /// Key the outcome is reported under
    pub identifier: Identifier,
    /// Id of the product the page describes, when it differs from `identifier`
    #[serde(default)]
    pub product_id: Option<Identifier>,
    /// Canonical product page link
    #[serde(alias = "url")]
    pub reference_url: String,
    /// Primary image, excluded from the gallery
    #[serde(alias = "picture")]
    pub cover_image_url: String,
    /// Raw page markup (passed separately over FFI)
    #[serde(default)]
    pub html: String,
}

impl ExtractionRequest {
    pub fn new(
        identifier: impl Into<Identifier>,
        reference_url: impl Into<String>,
        cover_image_url: impl Into<String>,
        html: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            product_id: None,
            reference_url: reference_url.into(),
            cover_image_url: cover_image_url.into(),
            html: html.into(),
        }
    }

    pub fn with_product_id(mut self, product_id: impl Into<Identifier>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    /// Product id, falling back to the correlation identifier
    pub fn product_id(&self) -> &Identifier {
        self.product_id.as_ref().unwrap_or(&self.identifier)
    }
}

/// Name/value pair from the product attribute table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// One customer review
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub rating: String,
    pub author: String,
    #[serde(rename = "review")]
    pub text: String,
    pub date: String,
    #[serde(rename = "plus")]
    pub pros: String,
    #[serde(rename = "minus")]
    pub cons: String,
}

/// Normalized content of a product page.
///
/// Field names on the wire match the storage layout (`picture`, `attrs`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub link: String,
    #[serde(rename = "picture")]
    pub cover_image: String,
    pub description: String,
    #[serde(rename = "attrs")]
    pub attributes: Vec<Attribute>,
    pub images: Vec<String>,
    pub reviews: Vec<Review>,
}

impl ProductRecord {
    /// True when any field carries scraped data
    pub fn has_content(&self) -> bool {
        !self.attributes.is_empty()
            || !self.reviews.is_empty()
            || !self.images.is_empty()
            || !self.description.is_empty()
    }
}

/// Result of one extraction call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionOutcome {
    pub identifier: Identifier,
    pub product_id: Identifier,
    pub found: bool,
    pub has_content: bool,
    pub status_code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<ProductRecord>,
}

impl ExtractionOutcome {
    pub fn not_found(identifier: Identifier, product_id: Identifier) -> Self {
        Self {
            identifier,
            product_id,
            found: false,
            has_content: false,
            status_code: STATUS_NOT_FOUND,
            message: MESSAGE_NOT_FOUND.to_string(),
            record: None,
        }
    }

    pub fn found(identifier: Identifier, product_id: Identifier, record: ProductRecord) -> Self {
        Self {
            identifier,
            product_id,
            found: true,
            has_content: record.has_content(),
            status_code: STATUS_OK,
            message: MESSAGE_OK.to_string(),
            record: Some(record),
        }
    }
}
