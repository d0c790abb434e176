//! Product content parser
//!
//! Extracts a normalized product record from a rendered product page:
//! - description (inner HTML)
//! - image gallery, cover image excluded
//! - name/value attributes
//! - customer reviews with pros and cons
//!
//! Exposed to Rust callers directly and to C++ through the FFI module.

pub mod dom;
pub mod error;
pub mod extractors;
pub mod ffi;
pub mod payload;
pub mod product;

pub use dom::{DomQuery, ScraperDom};
pub use error::{DomError, PayloadError, RequestError};
pub use extractors::{
    Attribute, ExtractionOutcome, ExtractionRequest, Identifier, ProductRecord, Review,
};
pub use ffi::*;
pub use payload::{BindValues, ResultMap, ResultPayload};
pub use product::{extract_product, ProductContentExtractor};
