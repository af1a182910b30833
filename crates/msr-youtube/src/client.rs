//! HTTP client for the YouTube Data API v3 (catalog side).
//!
//! Covers the three Data API calls this job needs: `search.list` to enumerate
//! a channel's uploads inside a time window, `videos.list` for per-video
//! duration and title, and `channels.list` for the lifetime subscriber count.
//! All requests are bearer-authenticated and retried with back-off on
//! transient failures.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Client, Url};

use crate::error::YoutubeError;
use crate::http::get_json;
use crate::retry::retry_with_backoff;
use crate::types::{ChannelListResponse, SearchListResponse, Video, VideoListResponse};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

/// Maximum ids per `videos.list` call — the Data API's per-request limit.
pub const IDS_PER_CALL: usize = 50;

/// Results requested per `search.list` page (the API maximum).
const SEARCH_PAGE_SIZE: u32 = 50;

/// Maximum number of search pages to follow before returning an error.
/// Prevents infinite loops on a misbehaving token cycle.
const MAX_SEARCH_PAGES: usize = 20;

/// Client for the YouTube Data API v3.
///
/// Use [`CatalogClient::new`] for production or
/// [`CatalogClient::with_base_url`] to point at a mock server in tests.
pub struct CatalogClient {
    client: Client,
    token: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl CatalogClient {
    /// Creates a new client pointed at the production Data API.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        token: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, YoutubeError> {
        Self::with_base_url(token, timeout_secs, max_retries, backoff_base_ms, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`YoutubeError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        token: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
        base_url: &str,
    ) -> Result<Self, YoutubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("msr/0.1 (monthly-summary-report)")
            .build()?;

        let base_url = parse_base_url(base_url)?;

        Ok(Self {
            client,
            token: token.to_owned(),
            base_url,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Enumerates ids of videos the channel published inside the period,
    /// following `nextPageToken` until the API stops returning one.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::PaginationLimit`] if the loop exceeds
    ///   [`MAX_SEARCH_PAGES`] pages.
    /// - Any transport/API/deserialization error from the underlying calls,
    ///   after retries are exhausted.
    pub async fn list_video_ids(
        &self,
        channel_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<String>, YoutubeError> {
        let published_after = format!("{start}T00:00:00Z");
        let published_before = format!("{end}T23:59:59Z");
        let page_size = SEARCH_PAGE_SIZE.to_string();

        let mut ids: Vec<String> = Vec::new();
        let mut page_token: Option<String> = None;
        let mut page_count = 0usize;

        loop {
            page_count += 1;
            if page_count > MAX_SEARCH_PAGES {
                return Err(YoutubeError::PaginationLimit {
                    channel_id: channel_id.to_owned(),
                    max_pages: MAX_SEARCH_PAGES,
                });
            }

            let mut params = vec![
                ("part", "id"),
                ("channelId", channel_id),
                ("publishedAfter", &published_after),
                ("publishedBefore", &published_before),
                ("type", "video"),
                ("maxResults", page_size.as_str()),
            ];
            if let Some(token) = page_token.as_deref() {
                params.push(("pageToken", token));
            }

            let url = self.build_url("search", &params);
            let page: SearchListResponse = self.get_typed(url, "search.list").await?;

            tracing::debug!(
                channel_id,
                page = page_count,
                items = page.items.len(),
                "fetched search page"
            );

            ids.extend(page.items.into_iter().filter_map(|item| item.id.video_id));

            page_token = page.next_page_token;
            if page_token.is_none() {
                break;
            }
        }

        Ok(ids)
    }

    /// Fetches duration and title for each video id, batching ids into
    /// chunks of [`IDS_PER_CALL`] and concatenating the results.
    ///
    /// # Errors
    ///
    /// Propagates any transport/API/deserialization error after retries.
    pub async fn list_video_details(&self, ids: &[String]) -> Result<Vec<Video>, YoutubeError> {
        let mut videos: Vec<Video> = Vec::with_capacity(ids.len());

        for chunk in ids.chunks(IDS_PER_CALL) {
            let joined = chunk.join(",");
            let url = self.build_url(
                "videos",
                &[("part", "contentDetails,snippet"), ("id", &joined)],
            );
            let page: VideoListResponse = self.get_typed(url, "videos.list").await?;
            videos.extend(page.items);
        }

        Ok(videos)
    }

    /// Reads the channel's current lifetime subscriber count.
    ///
    /// Returns 0 (with a warning) if the API returns no channel entry for the
    /// id — a successfully-queried-but-absent result, not an error.
    ///
    /// # Errors
    ///
    /// Propagates any transport/API/deserialization error after retries.
    pub async fn subscriber_count(&self, channel_id: &str) -> Result<i64, YoutubeError> {
        let url = self.build_url("channels", &[("part", "statistics"), ("id", channel_id)]);
        let response: ChannelListResponse = self.get_typed(url, "channels.list").await?;

        let Some(channel) = response.items.first() else {
            tracing::warn!(channel_id, "channels.list returned no items");
            return Ok(0);
        };

        Ok(channel
            .statistics
            .subscriber_count
            .parse::<i64>()
            .unwrap_or(0))
    }

    /// Runs one GET under the retry policy and deserializes into `T`.
    async fn get_typed<T: serde::de::DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, YoutubeError> {
        let body = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            get_json(&self.client, &self.token, url.clone())
        })
        .await?;

        serde_json::from_value(body).map_err(|e| YoutubeError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    /// Builds the full request URL with properly percent-encoded query
    /// parameters.
    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Url {
        build_endpoint_url(&self.base_url, endpoint, params)
    }
}

/// Normalises and parses a base URL, ensuring it ends with exactly one slash
/// so endpoint segments append rather than replace the last path segment.
pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, YoutubeError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| YoutubeError::InvalidBaseUrl {
        url: base_url.to_owned(),
        reason: e.to_string(),
    })
}

/// Appends `endpoint` to the base path and attaches query parameters.
pub(crate) fn build_endpoint_url(base_url: &Url, endpoint: &str, params: &[(&str, &str)]) -> Url {
    let mut url = base_url.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(endpoint);
    }
    {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in params {
            pairs.append_pair(k, v);
        }
    }
    url
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
