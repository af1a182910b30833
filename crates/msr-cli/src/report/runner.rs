use anyhow::Context;
use chrono::{NaiveDate, Utc};

use msr_core::{AppConfig, Period};
use msr_sheets::{MonthGrid, SheetsClient};
use msr_youtube::{AnalyticsClient, CatalogClient, MonthlyAggregator};

/// The three external collaborators a run needs, built once per invocation.
pub struct ReportDeps {
    pub catalog: CatalogClient,
    pub analytics: AnalyticsClient,
    pub grid: MonthGrid,
}

impl ReportDeps {
    /// Builds production clients from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any underlying HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let catalog = CatalogClient::new(
            &config.youtube_token,
            config.request_timeout_secs,
            config.max_retries,
            config.retry_backoff_base_ms,
        )
        .context("building YouTube Data API client")?;
        let analytics = AnalyticsClient::new(
            &config.youtube_token,
            config.request_timeout_secs,
            config.max_retries,
            config.retry_backoff_base_ms,
        )
        .context("building YouTube Analytics client")?;
        let sheets = SheetsClient::new(
            &config.sheets_token,
            &config.spreadsheet_id,
            config.request_timeout_secs,
        )
        .context("building Sheets client")?;

        Ok(Self {
            catalog,
            analytics,
            grid: MonthGrid::new(sheets, &config.sheet_name),
        })
    }
}

/// What happened to the optional second (backfill) cycle of a run.
#[derive(Debug)]
pub enum BackfillOutcome {
    /// The prior period's anchor cell already held a value; its column was
    /// left untouched.
    Skipped(Period),
    /// The prior period's anchor was empty and its summary was recomputed
    /// and written.
    Filled(Period),
    /// The backfill cycle failed after the primary cycle had already
    /// committed. The run as a whole still counts as (mostly) successful.
    Failed {
        period: Period,
        error: anyhow::Error,
    },
}

/// Two-phase result of [`run_once`]: the primary period always committed,
/// plus whatever the backfill check decided.
#[derive(Debug)]
pub struct RunReport {
    pub primary: Period,
    pub backfill: BackfillOutcome,
}

/// CLI entry point for the `run` subcommand.
///
/// With `forced = Some((year, month))` the job writes exactly that period and
/// skips the automatic target/backfill logic (operator re-runs of an
/// arbitrary month). Otherwise it performs the normal
/// last-completed-month-plus-backfill run against today's date.
///
/// # Errors
///
/// Propagates configuration, period, and primary-cycle errors. A failed
/// backfill is logged and reported but does not fail the run.
pub async fn run(config: &AppConfig, forced: Option<(i32, u32)>) -> anyhow::Result<()> {
    let deps = ReportDeps::from_config(config)?;

    if let Some((year, month)) = forced {
        let period = Period::for_month(year, month)?;
        write_cycle(&deps, &config.channel_id, &period).await?;
        tracing::info!(%period, "forced period written");
        return Ok(());
    }

    let report = run_once(&deps, &config.channel_id, Utc::now().date_naive()).await?;
    match &report.backfill {
        BackfillOutcome::Skipped(period) => {
            tracing::info!(%period, "prior period already filled, backfill skipped");
        }
        BackfillOutcome::Filled(period) => {
            tracing::info!(%period, "backfilled empty prior period");
        }
        BackfillOutcome::Failed { period, error } => {
            tracing::error!(
                %period,
                error = format!("{error:#}"),
                "backfill failed; the primary period was still written"
            );
        }
    }
    Ok(())
}

/// One full invocation: aggregate and write the last completed month, then
/// check the period before it and fill it only if its anchor cell is empty.
///
/// At most two aggregate-and-write cycles happen per call; the check never
/// looks further back than one period.
///
/// # Errors
///
/// A failure in the primary cycle aborts the run before the backfill check.
/// A failure in the backfill cycle is captured in
/// [`BackfillOutcome::Failed`] instead of propagating.
pub async fn run_once(
    deps: &ReportDeps,
    channel_id: &str,
    today: NaiveDate,
) -> anyhow::Result<RunReport> {
    let target = Period::last_completed(today)?;
    tracing::info!(%target, "starting monthly report run");
    write_cycle(deps, channel_id, &target)
        .await
        .context("primary period cycle failed")?;

    let prior = target.previous()?;
    let backfill = match backfill_if_empty(deps, channel_id, &prior).await {
        Ok(true) => BackfillOutcome::Filled(prior),
        Ok(false) => BackfillOutcome::Skipped(prior),
        Err(error) => BackfillOutcome::Failed {
            period: prior,
            error,
        },
    };

    Ok(RunReport {
        primary: target,
        backfill,
    })
}

/// Aggregate one period and write its summary block.
async fn write_cycle(
    deps: &ReportDeps,
    channel_id: &str,
    period: &Period,
) -> anyhow::Result<()> {
    let aggregator = MonthlyAggregator::new(&deps.catalog, &deps.analytics);
    let summary = aggregator.aggregate(channel_id, period).await?;
    deps.grid.write_summary(period, &summary).await?;
    Ok(())
}

/// Resolves the prior period's column and rewrites it only when its anchor
/// cell has never been filled. Returns whether a write happened.
async fn backfill_if_empty(
    deps: &ReportDeps,
    channel_id: &str,
    prior: &Period,
) -> anyhow::Result<bool> {
    let col = deps.grid.resolve_column(&prior.label()).await?;
    if !deps.grid.anchor_is_empty(col).await? {
        return Ok(false);
    }
    tracing::info!(%prior, "prior period anchor cell is empty, recomputing");
    write_cycle(deps, channel_id, prior).await?;
    Ok(true)
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
