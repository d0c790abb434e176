//! Persistence-facing result shape
//!
//! Callers store outcomes as rows keyed by identifier. Collections are bound
//! as JSON strings, so their encoding here is part of the storage contract.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::PayloadError;
use crate::extractors::{ExtractionOutcome, Identifier, ProductRecord};

/// Named parameters for the product content upsert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindValues {
    #[serde(rename = ":product_id")]
    pub product_id: Identifier,
    #[serde(rename = ":description")]
    pub description: String,
    #[serde(rename = ":images")]
    pub images: String,
    #[serde(rename = ":attrs")]
    pub attributes: String,
    #[serde(rename = ":reviews")]
    pub reviews: String,
}

impl BindValues {
    pub fn from_record(
        product_id: &Identifier,
        record: &ProductRecord,
    ) -> Result<Self, PayloadError> {
        Ok(Self {
            product_id: product_id.clone(),
            description: record.description.clone(),
            images: encode("images", &record.images)?,
            attributes: encode("attrs", &record.attributes)?,
            reviews: encode("reviews", &record.reviews)?,
        })
    }
}

fn encode<T: Serialize>(field: &'static str, value: &T) -> Result<String, PayloadError> {
    serde_json::to_string(value).map_err(|source| PayloadError::Encode { field, source })
}

/// One result row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultPayload {
    pub status: bool,
    pub has_content: bool,
    pub code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ProductRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind_values: Option<BindValues>,
}

/// Result rows keyed by the identifier's string form
pub type ResultMap = BTreeMap<String, ResultPayload>;

impl ExtractionOutcome {
    pub fn to_payload(&self) -> Result<ResultPayload, PayloadError> {
        // Bound under the call's identifier, which the storage layer keys rows by
        let bind_values = self
            .record
            .as_ref()
            .map(|record| BindValues::from_record(&self.identifier, record))
            .transpose()?;

        Ok(ResultPayload {
            status: self.found,
            has_content: self.has_content,
            code: self.status_code,
            message: self.message.clone(),
            content: self.record.clone(),
            bind_values,
        })
    }

    pub fn to_result_map(&self) -> Result<ResultMap, PayloadError> {
        let mut map = ResultMap::new();
        map.insert(self.identifier.to_string(), self.to_payload()?);
        Ok(map)
    }

    pub fn to_json(&self) -> Result<String, PayloadError> {
        encode("result", &self.to_result_map()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::{Attribute, Review};
    use serde_json::{json, Value};

    fn sample_record() -> ProductRecord {
        ProductRecord {
            link: "https://shop.example/p/1".into(),
            cover_image: "https://img.example/1.jpg".into(),
            description: "<p>Desc</p>".into(),
            attributes: vec![Attribute {
                name: "Color".into(),
                value: "Red".into(),
            }],
            images: vec!["https://img.example/2.jpg".into()],
            reviews: vec![Review {
                rating: "5".into(),
                author: "Ivan".into(),
                text: "Good".into(),
                date: "01.01.2023".into(),
                pros: "fast".into(),
                cons: "".into(),
            }],
        }
    }

    #[test]
    fn test_found_payload() {
        let outcome = ExtractionOutcome::found(
            Identifier::Int(12),
            Identifier::Int(1),
            sample_record(),
        );

        let map = outcome.to_result_map().unwrap();
        let row = &map["12"];
        assert!(row.status);
        assert!(row.has_content);
        assert_eq!(row.code, 200);
        assert_eq!(row.message, "200 - ok");

        let bind = row.bind_values.as_ref().unwrap();
        assert_eq!(bind.product_id, Identifier::Int(12));
        assert_eq!(bind.description, "<p>Desc</p>");
        assert_eq!(bind.images, r#"["https://img.example/2.jpg"]"#);
        assert_eq!(bind.attributes, r#"[{"name":"Color","value":"Red"}]"#);

        let reviews: Value = serde_json::from_str(&bind.reviews).unwrap();
        assert_eq!(
            reviews,
            json!([{
                "rating": "5",
                "author": "Ivan",
                "review": "Good",
                "date": "01.01.2023",
                "plus": "fast",
                "minus": ""
            }])
        );
    }

    #[test]
    fn test_not_found_payload() {
        let outcome = ExtractionOutcome::not_found(Identifier::from("abc"), Identifier::Int(3));

        let json: Value = serde_json::from_str(&outcome.to_json().unwrap()).unwrap();
        assert_eq!(
            json,
            json!({
                "abc": {
                    "status": false,
                    "has_content": false,
                    "code": 404,
                    "message": "404 - Product not found"
                }
            })
        );
    }

    #[test]
    fn test_payload_json_names() {
        let outcome = ExtractionOutcome::found(
            Identifier::Int(1),
            Identifier::Int(1),
            sample_record(),
        );

        let json: Value = serde_json::from_str(&outcome.to_json().unwrap()).unwrap();
        let row = &json["1"];
        assert_eq!(row["content"]["picture"], "https://img.example/1.jpg");
        assert_eq!(row["content"]["attrs"][0]["value"], "Red");
        assert_eq!(row["bind_values"][":description"], "<p>Desc</p>");
        assert!(row["bind_values"][":reviews"].is_string());
    }
}
