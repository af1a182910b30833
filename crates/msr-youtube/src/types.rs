//! Serde types for the YouTube Data API v3 and Analytics API v2 responses.
//!
//! Only the fields this job consumes are modeled; everything else in the
//! payloads is ignored.

use serde::Deserialize;

/// `search.list` response page.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
    /// Absent on the final page — the "no more pages" terminal signal.
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchItem {
    pub id: SearchItemId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItemId {
    /// Present for `type=video` results; other result kinds carry no video id.
    pub video_id: Option<String>,
}

/// `videos.list` response.
#[derive(Debug, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<Video>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub snippet: VideoSnippet,
    pub content_details: VideoContentDetails,
}

#[derive(Debug, Deserialize)]
pub struct VideoSnippet {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct VideoContentDetails {
    /// ISO-8601 duration string, e.g. `"PT1M5S"`.
    pub duration: String,
}

/// `channels.list` response.
#[derive(Debug, Deserialize)]
pub struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<Channel>,
}

#[derive(Debug, Deserialize)]
pub struct Channel {
    pub statistics: ChannelStatistics,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStatistics {
    /// The Data API serializes large counters as JSON strings.
    pub subscriber_count: String,
}

/// Analytics `reports.query` response. Rows mix dimension strings and metric
/// numbers, so cells stay loosely typed until the caller extracts them.
#[derive(Debug, Deserialize)]
pub struct ReportResponse {
    #[serde(default)]
    pub rows: Vec<Vec<serde_json::Value>>,
}

/// Channel-level totals for one period, from a single analytics row.
/// All zeros when the report returned no rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelTotals {
    pub views: i64,
    pub subscribers_gained: i64,
    pub subscribers_lost: i64,
    pub likes: i64,
    pub comments: i64,
    pub shares: i64,
}

/// One `(ageGroup, gender, viewerPercentage)` breakdown row.
#[derive(Debug, Clone, PartialEq)]
pub struct AudienceRow {
    pub age_group: String,
    pub gender: String,
    pub percentage: f64,
}
