pub mod app_config;
pub mod config;
pub mod feed_format;
pub mod products;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use feed_format::FeedFormat;
pub use products::{
    CanonicalProductUpdate, LocalizedText, Money, NormalizedRow, RawPrice, UpdateKind, UpdateMode,
    DEFAULT_CURRENCY, DEFAULT_LANGUAGE,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
