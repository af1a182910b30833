//! HTTP client for the YouTube Analytics API v2 (`reports.query`).
//!
//! Every report is a query over `channel=={id}` for one period's date range.
//! An empty `rows` array is a valid result and reduces to zero/default
//! values, never an error.

use std::collections::HashMap;
use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Client, Url};

use crate::client::{build_endpoint_url, parse_base_url, IDS_PER_CALL};
use crate::error::YoutubeError;
use crate::http::get_json;
use crate::retry::retry_with_backoff;
use crate::types::{AudienceRow, ChannelTotals, ReportResponse};

const DEFAULT_BASE_URL: &str = "https://youtubeanalytics.googleapis.com/v2/";

/// Client for the YouTube Analytics API v2.
pub struct AnalyticsClient {
    client: Client,
    token: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl AnalyticsClient {
    /// Creates a new client pointed at the production Analytics API.
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

    /// Channel-level engagement totals for the period.
    ///
    /// Queries `views,subscribersGained,subscribersLost,likes,comments,shares`
    /// and reads the single totals row. A report with no rows yields
    /// [`ChannelTotals::default`] (all zeros).
    ///
    /// # Errors
    ///
    /// Propagates any transport/API/deserialization error after retries.
    pub async fn channel_totals(
        &self,
        channel_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ChannelTotals, YoutubeError> {
        let rows = self
            .query(
                channel_id,
                start,
                end,
                "views,subscribersGained,subscribersLost,likes,comments,shares",
                None,
                None,
            )
            .await?;

        let Some(row) = rows.first() else {
            return Ok(ChannelTotals::default());
        };

        let cell = |idx: usize| row.get(idx).map_or(0, value_as_i64);
        Ok(ChannelTotals {
            views: cell(0),
            subscribers_gained: cell(1),
            subscribers_lost: cell(2),
            likes: cell(3),
            comments: cell(4),
            shares: cell(5),
        })
    }

    /// Viewer-percentage breakdown by `(ageGroup, gender)` for the period.
    ///
    /// Rows that do not match the expected `(string, string, number)` shape
    /// are skipped with a warning rather than failing the report.
    ///
    /// # Errors
    ///
    /// Propagates any transport/API/deserialization error after retries.
    pub async fn audience_breakdown(
        &self,
        channel_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AudienceRow>, YoutubeError> {
        let rows = self
            .query(
                channel_id,
                start,
                end,
                "viewerPercentage",
                Some("ageGroup,gender"),
                None,
            )
            .await?;

        let parsed = rows
            .iter()
            .filter_map(|row| {
                let age_group = row.first()?.as_str()?.to_owned();
                let gender = row.get(1)?.as_str()?.to_owned();
                let percentage = row.get(2).map(value_as_f64)?;
                Some(AudienceRow {
                    age_group,
                    gender,
                    percentage,
                })
            })
            .collect::<Vec<_>>();

        if parsed.len() != rows.len() {
            tracing::warn!(
                channel_id,
                total = rows.len(),
                parsed = parsed.len(),
                "skipped malformed audience breakdown rows"
            );
        }

        Ok(parsed)
    }

    /// Per-video view counts for the period, keyed by video id.
    ///
    /// The `video==id,...` filter is limited in length, so ids are batched
    /// into chunks of [`IDS_PER_CALL`] and the chunk results merged into one
    /// map before any reduction happens.
    ///
    /// # Errors
    ///
    /// Propagates any transport/API/deserialization error after retries.
    pub async fn video_views(
        &self,
        channel_id: &str,
        start: NaiveDate,
        end: NaiveDate,
        video_ids: &[String],
    ) -> Result<HashMap<String, i64>, YoutubeError> {
        let mut views: HashMap<String, i64> = HashMap::with_capacity(video_ids.len());

        for chunk in video_ids.chunks(IDS_PER_CALL) {
            let filter = format!("video=={}", chunk.join(","));
            let rows = self
                .query(channel_id, start, end, "views", Some("video"), Some(&filter))
                .await?;

            for row in &rows {
                let Some(id) = row.first().and_then(serde_json::Value::as_str) else {
                    continue;
                };
                let count = row.get(1).map_or(0, value_as_i64);
                views.insert(id.to_owned(), count);
            }
        }

        Ok(views)
    }

    /// Runs one `reports.query` call under the retry policy.
    async fn query(
        &self,
        channel_id: &str,
        start: NaiveDate,
        end: NaiveDate,
        metrics: &str,
        dimensions: Option<&str>,
        filters: Option<&str>,
    ) -> Result<Vec<Vec<serde_json::Value>>, YoutubeError> {
        let ids = format!("channel=={channel_id}");
        let start_date = start.to_string();
        let end_date = end.to_string();

        let mut params = vec![
            ("ids", ids.as_str()),
            ("startDate", start_date.as_str()),
            ("endDate", end_date.as_str()),
            ("metrics", metrics),
        ];
        if let Some(dims) = dimensions {
            params.push(("dimensions", dims));
        }
        if let Some(f) = filters {
            params.push(("filters", f));
        }

        let url = build_endpoint_url(&self.base_url, "reports", &params);
        let body = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            get_json(&self.client, &self.token, url.clone())
        })
        .await?;

        let report: ReportResponse =
            serde_json::from_value(body).map_err(|e| YoutubeError::Deserialize {
                context: format!("reports.query(metrics={metrics})"),
                source: e,
            })?;

        Ok(report.rows)
    }
}

/// Coerces a report cell to `i64`, accepting integers, floats, and numeric
/// strings. Anything else reads as 0.
fn value_as_i64(v: &serde_json::Value) -> i64 {
    #[allow(clippy::cast_possible_truncation)]
    v.as_i64()
        .or_else(|| v.as_f64().map(|f| f as i64))
        .or_else(|| v.as_str().and_then(|s| s.parse().ok()))
        .unwrap_or(0)
}

/// Coerces a report cell to `f64`. Non-numeric cells read as 0.0.
fn value_as_f64(v: &serde_json::Value) -> f64 {
    v.as_f64()
        .or_else(|| v.as_str().and_then(|s| s.parse().ok()))
        .unwrap_or(0.0)
}
