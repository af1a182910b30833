pub mod aggregate;
pub mod analytics;
pub mod client;
pub mod duration;
mod error;
mod http;
mod retry;
pub mod types;

pub use aggregate::{MonthlyAggregator, SHORTS_MAX_SECS};
pub use analytics::AnalyticsClient;
pub use client::{CatalogClient, IDS_PER_CALL};
pub use duration::{parse_duration_seconds, DurationError};
pub use error::YoutubeError;
