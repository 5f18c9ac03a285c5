use crate::app_config::AppConfig;
use crate::feed_format::FeedFormat;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields the
/// production feed endpoints with a single attempt per request.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let log_level = or_default("FEEDMAP_LOG_LEVEL", "info");

    let json_feed_url = or_default(
        "FEEDMAP_JSON_FEED_URL",
        FeedFormat::Json.default_endpoint(),
    );
    let xml_feed_url = or_default(
        "FEEDMAP_XML_FEED_URL",
        FeedFormat::GoogleShopping.default_endpoint(),
    );
    let raw_feed_url = or_default("FEEDMAP_RAW_FEED_URL", FeedFormat::Raw.default_endpoint());

    let request_timeout_secs = parse_u64("FEEDMAP_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "FEEDMAP_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let user_agent = or_default("FEEDMAP_USER_AGENT", "feedmap/0.1 (catalog-feed-mapper)");
    let max_retries = parse_u32("FEEDMAP_MAX_RETRIES", "0")?;
    let retry_backoff_base_ms = parse_u64("FEEDMAP_RETRY_BACKOFF_BASE_MS", "1000")?;

    Ok(AppConfig {
        log_level,
        json_feed_url,
        xml_feed_url,
        raw_feed_url,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
