//! Reduction of one period's raw catalog and analytics data into a
//! [`MonthlySummary`].
//!
//! All reductions are order-independent (sums, maxima) except the two
//! arg-max selections, which scan once in API row order with a
//! strictly-greater comparison — first-seen wins ties. Fetches are
//! sequential, so the scan order is deterministic.

use std::collections::HashMap;

use msr_core::{MonthlySummary, Period};

use crate::analytics::AnalyticsClient;
use crate::client::CatalogClient;
use crate::duration::parse_duration_seconds;
use crate::error::YoutubeError;
use crate::types::AudienceRow;

/// Uploads at or below this duration count as shorts; the boundary value
/// itself is a short.
pub const SHORTS_MAX_SECS: u64 = 60;

/// Aggregates one calendar month of channel activity into a summary record.
///
/// Holds no state of its own; borrows the two API clients and produces a
/// fresh record per call. Hard failures from either client propagate — a
/// partially-populated summary is never returned. Absent data (no uploads,
/// no analytics rows) reduces to the record's zero/empty defaults.
pub struct MonthlyAggregator<'a> {
    catalog: &'a CatalogClient,
    analytics: &'a AnalyticsClient,
}

impl<'a> MonthlyAggregator<'a> {
    #[must_use]
    pub fn new(catalog: &'a CatalogClient, analytics: &'a AnalyticsClient) -> Self {
        Self { catalog, analytics }
    }

    /// Computes the full summary for `period`.
    ///
    /// # Errors
    ///
    /// Propagates the first [`YoutubeError`] from any underlying call; no
    /// local defaulting happens on hard failure.
    pub async fn aggregate(
        &self,
        channel_id: &str,
        period: &Period,
    ) -> Result<MonthlySummary, YoutubeError> {
        let mut summary = MonthlySummary::for_period(period);
        let (start, end) = (period.start(), period.end());

        let ids = self.catalog.list_video_ids(channel_id, start, end).await?;
        tracing::info!(channel_id, %period, uploads = ids.len(), "aggregating period");

        let videos = if ids.is_empty() {
            Vec::new()
        } else {
            self.catalog.list_video_details(&ids).await?
        };

        let mut titles: HashMap<String, String> = HashMap::with_capacity(videos.len());
        let mut longform_ids: Vec<String> = Vec::new();
        for video in videos {
            let secs = match parse_duration_seconds(&video.content_details.duration) {
                Ok(secs) => secs,
                Err(err) => {
                    tracing::warn!(
                        video_id = %video.id,
                        error = %err,
                        "unparseable video duration, treating as 0s"
                    );
                    0
                }
            };
            if secs <= SHORTS_MAX_SECS {
                summary.shorts_count += 1;
            } else {
                summary.longform_count += 1;
                longform_ids.push(video.id.clone());
            }
            titles.insert(video.id, video.snippet.title);
        }

        let totals = self.analytics.channel_totals(channel_id, start, end).await?;
        summary.total_views = totals.views;
        summary.subscribers_net = totals.subscribers_gained - totals.subscribers_lost;
        summary.likes = totals.likes;
        summary.comments = totals.comments;
        summary.shares = totals.shares;

        summary.subscribers_total = self.catalog.subscriber_count(channel_id).await?;

        let audience = self
            .analytics
            .audience_breakdown(channel_id, start, end)
            .await?;
        summary.top_audience = top_audience_label(&audience);

        if !ids.is_empty() {
            let views = self
                .analytics
                .video_views(channel_id, start, end, &ids)
                .await?;

            // Best upload: single scan in catalog order, strictly-greater
            // comparison, so the first of any tied maximum wins. An id the
            // analytics report did not mention counts as 0 views.
            for id in &ids {
                let count = views.get(id).copied().unwrap_or(0);
                if count > summary.best_video_views {
                    summary.best_video_views = count;
                    summary.best_video_title =
                        titles.get(id).cloned().unwrap_or_else(|| id.clone());
                }
            }

            if !longform_ids.is_empty() {
                let sum: i64 = longform_ids
                    .iter()
                    .map(|id| views.get(id).copied().unwrap_or(0))
                    .sum();
                let count = i64::try_from(longform_ids.len()).unwrap_or(i64::MAX);
                summary.longform_avg_views = sum / count;
            }
        }

        Ok(summary)
    }
}

/// Picks the dominant `(ageGroup, gender)` row by viewer percentage and
/// formats it for display. Empty string when there are no rows.
fn top_audience_label(rows: &[AudienceRow]) -> String {
    let mut best: Option<&AudienceRow> = None;
    for row in rows {
        if best.is_none_or(|b| row.percentage > b.percentage) {
            best = Some(row);
        }
    }
    best.map_or_else(String::new, format_audience_label)
}

/// Renders `("age25-34", "female")` as `"25–34세 여성"`, matching the labels
/// already present in the human-edited sheet.
fn format_audience_label(row: &AudienceRow) -> String {
    let age = row.age_group.trim_start_matches("age").replace('-', "–");
    let gender = if row.gender == "male" {
        "남성"
    } else {
        "여성"
    };
    format!("{age}세 {gender}")
}
