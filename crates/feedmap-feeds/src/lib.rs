pub mod client;
pub mod error;
pub mod job;
pub mod mapper;
pub mod parse;
pub mod price;
mod retry;

pub use client::FeedClient;
pub use error::FeedError;
pub use job::{FeedJob, FeedSource, JobFailure, JobOutcome, SummaryReport, FAILURE_MESSAGE};
pub use mapper::{map_row, map_rows, MappedRows};
pub use parse::{parse_feed, parse_google_shopping_feed, parse_json_feed, parse_raw_feed};
pub use price::normalize_price;
