//! Decoder for the custom JSON product feed.
//!
//! The feed is a top-level array of objects:
//!
//! ```json
//! [{ "productId": "P1", "productName": "Widget", "listPrice": 10.5, "salesPrice": "$9.99" }]
//! ```
//!
//! Prices arrive as numbers or as formatted strings. Identity fields are
//! usually strings, but some exports emit numeric ids, so both are accepted.

use feedmap_core::{NormalizedRow, RawPrice};
use serde::Deserialize;

use crate::error::FeedError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonFeedRow {
    #[serde(default)]
    product_id: Option<JsonScalar>,
    #[serde(default)]
    product_name: Option<JsonScalar>,
    #[serde(default)]
    list_price: Option<RawPrice>,
    #[serde(default)]
    sales_price: Option<RawPrice>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonScalar {
    Text(String),
    Number(serde_json::Number),
}

impl JsonScalar {
    fn into_text(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

impl From<JsonFeedRow> for NormalizedRow {
    fn from(row: JsonFeedRow) -> Self {
        Self {
            product_id: row.product_id.map(JsonScalar::into_text),
            product_name: row.product_name.map(JsonScalar::into_text),
            list_price: row.list_price,
            sales_price: row.sales_price,
        }
    }
}

/// Decodes a JSON feed body into rows, one per array element, in order.
///
/// # Errors
///
/// Returns [`FeedError::Json`] if the body is not a JSON array of objects or
/// a field has an unsupported type (e.g. a nested object as a price).
pub fn parse_json_feed(body: &str) -> Result<Vec<NormalizedRow>, FeedError> {
    let rows = serde_json::from_str::<Vec<JsonFeedRow>>(body).map_err(|e| FeedError::Json {
        context: "product feed array".to_string(),
        source: e,
    })?;
    Ok(rows.into_iter().map(NormalizedRow::from).collect())
}
