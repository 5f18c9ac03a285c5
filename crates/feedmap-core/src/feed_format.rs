use std::fmt;

pub const DEFAULT_JSON_FEED_URL: &str =
    "https://cdn.relewise.com/academy/productdata/customjsonfeed";
pub const DEFAULT_XML_FEED_URL: &str =
    "https://cdn.relewise.com/academy/productdata/googleshoppingfeed";
pub const DEFAULT_RAW_FEED_URL: &str = "https://cdn.relewise.com/academy/productdata/raw";

/// Wire format of a product feed. Each variant selects one parser and one
/// default endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedFormat {
    /// JSON array of `{productId, productName, listPrice, salesPrice}` objects.
    Json,
    /// Google Shopping RSS with `g:`-prefixed item fields.
    GoogleShopping,
    /// Pipe-delimited text with two leading header lines.
    Raw,
}

impl FeedFormat {
    pub const ALL: [FeedFormat; 3] = [Self::Json, Self::GoogleShopping, Self::Raw];

    /// Short upper-case label used in run summaries.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::GoogleShopping => "XML",
            Self::Raw => "RAW",
        }
    }

    #[must_use]
    pub fn default_endpoint(self) -> &'static str {
        match self {
            Self::Json => DEFAULT_JSON_FEED_URL,
            Self::GoogleShopping => DEFAULT_XML_FEED_URL,
            Self::Raw => DEFAULT_RAW_FEED_URL,
        }
    }
}

impl fmt::Display for FeedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
