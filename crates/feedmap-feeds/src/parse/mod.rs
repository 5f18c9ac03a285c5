//! Per-format feed decoders. Each turns an already-retrieved body into
//! [`NormalizedRow`]s in input order.

mod google_shopping;
mod json;
mod raw;

use feedmap_core::{FeedFormat, NormalizedRow};

use crate::error::FeedError;

pub use google_shopping::parse_google_shopping_feed;
pub use json::parse_json_feed;
pub use raw::parse_raw_feed;

/// Decodes `body` with the parser for `format`.
///
/// # Errors
///
/// Propagates [`FeedError::Json`], [`FeedError::Xml`],
/// [`FeedError::MissingElement`] or [`FeedError::UnclosedElement`] from the
/// JSON and XML parsers. The raw parser never fails.
pub fn parse_feed(format: FeedFormat, body: &str) -> Result<Vec<NormalizedRow>, FeedError> {
    match format {
        FeedFormat::Json => parse_json_feed(body),
        FeedFormat::GoogleShopping => parse_google_shopping_feed(body),
        FeedFormat::Raw => Ok(parse_raw_feed(body)),
    }
}
