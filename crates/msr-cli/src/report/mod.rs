//! Run orchestration: one primary aggregate-and-write cycle for the last
//! completed month, then a best-effort backfill of the period before it.

mod runner;

pub use runner::{run, run_once, BackfillOutcome, ReportDeps, RunReport};
