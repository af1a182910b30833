//! The grid's fixed schema: where headers live and how a summary maps onto a
//! column's row block.
//!
//! Rows 1–3 are the human-edited header region; row 3 carries the month
//! labels that key columns. Rows 4–16 hold one summary per column, in the
//! order below. Row 4 (the period range) doubles as the anchor cell that
//! tells the backfill check whether a column has ever been filled.

use msr_core::MonthlySummary;

/// 1-based row holding the month labels.
pub const LABEL_ROW: u32 = 3;

/// Row span read when scanning headers (`"1:3"` in A1 terms).
pub const HEADER_ROWS: &str = "1:3";

/// First data row of a column's block; also the anchor cell row.
pub const BLOCK_START_ROW: u32 = 4;

/// Number of rows in the summary block.
pub const BLOCK_LEN: u32 = 13;

/// Last data row of a column's block.
pub const BLOCK_END_ROW: u32 = BLOCK_START_ROW + BLOCK_LEN - 1;

/// Serializes a summary into the block's row order. The result always has
/// exactly [`BLOCK_LEN`] entries; label fields render as empty strings when
/// unset.
#[must_use]
pub fn summary_rows(summary: &MonthlySummary) -> Vec<String> {
    vec![
        summary.range_label(),
        summary.shorts_count.to_string(),
        summary.longform_count.to_string(),
        summary.total_views.to_string(),
        summary.subscribers_net.to_string(),
        summary.subscribers_total.to_string(),
        summary.top_audience.clone(),
        summary.likes.to_string(),
        summary.comments.to_string(),
        summary.shares.to_string(),
        summary.best_video_title.clone(),
        summary.best_video_views.to_string(),
        summary.longform_avg_views.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use msr_core::Period;

    #[test]
    fn block_length_matches_row_constants() {
        assert_eq!(BLOCK_END_ROW, 16);
        let summary = MonthlySummary::default();
        assert_eq!(summary_rows(&summary).len(), BLOCK_LEN as usize);
    }

    #[test]
    fn anchor_row_is_the_period_range() {
        let period = Period::for_month(2025, 8).expect("valid month");
        let summary = MonthlySummary::for_period(&period);
        let rows = summary_rows(&summary);
        assert_eq!(rows[0], "2025-08-01 ~ 2025-08-31");
    }

    #[test]
    fn default_summary_serializes_zeros_and_empties() {
        let rows = summary_rows(&MonthlySummary::default());
        assert_eq!(rows[1], "0", "shorts count");
        assert_eq!(rows[6], "", "top audience");
        assert_eq!(rows[10], "", "best video title");
    }

    #[test]
    fn populated_summary_keeps_schema_order() {
        let period = Period::for_month(2025, 8).expect("valid month");
        let mut summary = MonthlySummary::for_period(&period);
        summary.shorts_count = 2;
        summary.longform_count = 1;
        summary.total_views = 1000;
        summary.subscribers_net = 40;
        summary.subscribers_total = 1234;
        summary.top_audience = "25–34세 여성".to_owned();
        summary.likes = 200;
        summary.comments = 30;
        summary.shares = 5;
        summary.best_video_title = "Short B".to_owned();
        summary.best_video_views = 250;
        summary.longform_avg_views = 40;

        assert_eq!(
            summary_rows(&summary),
            vec![
                "2025-08-01 ~ 2025-08-31",
                "2",
                "1",
                "1000",
                "40",
                "1234",
                "25–34세 여성",
                "200",
                "30",
                "5",
                "Short B",
                "250",
                "40",
            ]
        );
    }
}
