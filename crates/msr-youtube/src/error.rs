use thiserror::Error;

/// Errors returned by the YouTube Data and Analytics API clients.
#[derive(Debug, Error)]
pub enum YoutubeError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-2xx status with an error payload.
    #[error("YouTube API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// HTTP 429 from the API.
    #[error("rate limited by the YouTube API (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured base URL could not be parsed.
    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The search page loop exceeded its safety limit.
    #[error("pagination limit reached for channel {channel_id}: exceeded {max_pages} pages")]
    PaginationLimit {
        channel_id: String,
        max_pages: usize,
    },
}
