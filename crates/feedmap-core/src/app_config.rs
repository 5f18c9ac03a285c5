use crate::feed_format::FeedFormat;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub json_feed_url: String,
    pub xml_feed_url: String,
    pub raw_feed_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
}

impl AppConfig {
    /// Endpoint configured for `format`.
    #[must_use]
    pub fn feed_url(&self, format: FeedFormat) -> &str {
        match format {
            FeedFormat::Json => &self.json_feed_url,
            FeedFormat::GoogleShopping => &self.xml_feed_url,
            FeedFormat::Raw => &self.raw_feed_url,
        }
    }
}
