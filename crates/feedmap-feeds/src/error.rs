use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by {url} (retry after {retry_after_secs}s)")]
    RateLimited { url: String, retry_after_secs: u64 },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("feed document has no <{element}> element")]
    MissingElement { element: &'static str },

    #[error("feed document ends inside <{element}>")]
    UnclosedElement { element: String },
}

impl FeedError {
    /// `true` when the feed could not be retrieved at all.
    #[must_use]
    pub fn is_retrieval(&self) -> bool {
        matches!(
            self,
            Self::Http(_)
                | Self::RateLimited { .. }
                | Self::NotFound { .. }
                | Self::UnexpectedStatus { .. }
        )
    }

    /// `true` when the feed was retrieved but its body could not be decoded.
    #[must_use]
    pub fn is_parse(&self) -> bool {
        !self.is_retrieval()
    }
}
