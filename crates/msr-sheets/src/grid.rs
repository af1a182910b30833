//! Month-column resolution and summary writes against the grid.
//!
//! A column moves through three states over its life:
//! unlabeled → labeled/empty → labeled/filled. [`MonthGrid::create_column`]
//! performs the first transition, [`MonthGrid::write_summary`] the second
//! (and idempotently re-performs the third); nothing ever transitions a
//! column back.
//!
//! Column creation reads the header fresh and writes only on the not-found
//! path, so repeating a resolve within one run cannot produce a duplicate
//! column. The read-then-write step is NOT safe under concurrent invocations
//! against the same spreadsheet; the job assumes single-writer execution.

use msr_core::{MonthlySummary, Period};

use crate::a1::{cell_range, column_block_range, column_letter};
use crate::client::SheetsClient;
use crate::error::SheetsError;
use crate::layout::{summary_rows, BLOCK_END_ROW, BLOCK_START_ROW, HEADER_ROWS, LABEL_ROW};

/// One worksheet's monthly grid: label row plus per-column summary blocks.
pub struct MonthGrid {
    client: SheetsClient,
    sheet_name: String,
}

impl MonthGrid {
    #[must_use]
    pub fn new(client: SheetsClient, sheet_name: &str) -> Self {
        Self {
            client,
            sheet_name: sheet_name.to_owned(),
        }
    }

    /// Finds the 1-based column whose label-row cell matches `label`
    /// (whitespace-trimmed exact match), or `None` if no column carries it.
    ///
    /// # Errors
    ///
    /// Propagates any [`SheetsError`] from the header read.
    pub async fn locate_column(&self, label: &str) -> Result<Option<u32>, SheetsError> {
        let header = self.read_header().await?;
        let label_row = header.get((LABEL_ROW - 1) as usize);

        let found = label_row.and_then(|row| {
            row.iter()
                .position(|cell| cell.trim() == label.trim())
                .and_then(|idx| u32::try_from(idx + 1).ok())
        });
        Ok(found)
    }

    /// Assigns `label` the next unused column to the right of the widest
    /// header row and writes its label cell.
    ///
    /// Callers should [`Self::locate_column`] first; this method
    /// unconditionally appends.
    ///
    /// # Errors
    ///
    /// Propagates any [`SheetsError`] from the header read or label write.
    pub async fn create_column(&self, label: &str) -> Result<u32, SheetsError> {
        let header = self.read_header().await?;
        let width = header.iter().map(Vec::len).max().unwrap_or(1);
        let col = u32::try_from(width).unwrap_or(u32::MAX).saturating_add(1);

        let range = cell_range(&self.sheet_name, col, LABEL_ROW);
        self.client
            .update_values(&range, vec![vec![label.to_owned()]])
            .await?;

        tracing::info!(label, col = column_letter(col), "created month column");
        Ok(col)
    }

    /// Locates `label`'s column, creating it if absent.
    ///
    /// The write happens only on the not-found branch and the header is
    /// re-read fresh on every call, so repeating this for the same label
    /// returns the same index without a second header write.
    ///
    /// # Errors
    ///
    /// Propagates any [`SheetsError`] from the underlying read or write.
    pub async fn resolve_column(&self, label: &str) -> Result<u32, SheetsError> {
        if let Some(col) = self.locate_column(label).await? {
            return Ok(col);
        }
        self.create_column(label).await
    }

    /// Whether the column's anchor cell (the period-range row) has never been
    /// filled. An absent range, an empty row, or a blank/whitespace-only
    /// string all count as empty.
    ///
    /// # Errors
    ///
    /// Propagates any [`SheetsError`] from the cell read.
    pub async fn anchor_is_empty(&self, col: u32) -> Result<bool, SheetsError> {
        let range = cell_range(&self.sheet_name, col, BLOCK_START_ROW);
        let values = self.client.get_values(&range).await?;

        let filled = values
            .first()
            .and_then(|row| row.first())
            .is_some_and(|cell| !cell.trim().is_empty());
        Ok(!filled)
    }

    /// Writes the summary into the column keyed by `period`'s label, as one
    /// batched write over the fixed row block. Overwrites any previous block
    /// for that column; rows outside the block and other columns are never
    /// touched. Returns the column index written.
    ///
    /// # Errors
    ///
    /// Propagates any [`SheetsError`] from column resolution or the block
    /// write.
    pub async fn write_summary(
        &self,
        period: &Period,
        summary: &MonthlySummary,
    ) -> Result<u32, SheetsError> {
        let label = period.label();
        let col = self.resolve_column(&label).await?;

        let values: Vec<Vec<String>> = summary_rows(summary)
            .into_iter()
            .map(|cell| vec![cell])
            .collect();
        let range = column_block_range(&self.sheet_name, col, BLOCK_START_ROW, BLOCK_END_ROW);

        self.client.update_values(&range, values).await?;
        tracing::info!(label, col = column_letter(col), "wrote monthly summary block");
        Ok(col)
    }

    async fn read_header(&self) -> Result<Vec<Vec<String>>, SheetsError> {
        let range = format!("{}!{HEADER_ROWS}", self.sheet_name);
        self.client.get_values(&range).await
    }
}
