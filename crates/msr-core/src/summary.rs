//! The fixed-shape monthly summary record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::period::Period;

/// Aggregated metrics for one calendar-month period.
///
/// Every field has a defined default (zero or empty string), so the record is
/// always fully populated even when a period has no uploads or no analytics
/// rows. Constructed fresh per run and discarded once written to the grid;
/// the spreadsheet is the only durable state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub month: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Uploads with duration ≤ 60 s (the boundary value counts as a short).
    pub shorts_count: u32,
    /// Uploads with duration > 60 s.
    pub longform_count: u32,
    pub total_views: i64,
    /// Subscribers gained minus subscribers lost over the period.
    pub subscribers_net: i64,
    /// Channel-lifetime subscriber count at the time of the run.
    pub subscribers_total: i64,
    pub likes: i64,
    pub comments: i64,
    pub shares: i64,
    /// Dominant audience segment, e.g. `"25–34세 여성"`. Empty when the
    /// analytics breakdown returned no rows.
    pub top_audience: String,
    /// Title of the period's most-viewed upload. Empty when there were none.
    pub best_video_title: String,
    pub best_video_views: i64,
    /// Mean per-video views across long-form uploads, 0 when there are none.
    pub longform_avg_views: i64,
}

impl MonthlySummary {
    /// A summary seeded with the period's bounds and all metrics at their
    /// defaults.
    #[must_use]
    pub fn for_period(period: &Period) -> Self {
        Self {
            month: period.month(),
            start: period.start(),
            end: period.end(),
            ..Self::default()
        }
    }

    /// The anchor-cell string, `"YYYY-MM-DD ~ YYYY-MM-DD"`.
    #[must_use]
    pub fn range_label(&self) -> String {
        format!("{} ~ {}", self.start, self.end)
    }
}
