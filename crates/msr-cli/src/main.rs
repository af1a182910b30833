mod report;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "msr-cli")]
#[command(about = "Monthly channel summary reporting")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Aggregate the last completed month into the spreadsheet, then backfill
    /// the month before it if its column is still empty.
    Run {
        /// Force a specific year (requires --month); disables the automatic
        /// target/backfill logic and writes exactly one period.
        #[arg(long, requires = "month")]
        year: Option<i32>,
        /// Force a specific month, 1-12 (requires --year).
        #[arg(long, requires = "year")]
        month: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = msr_core::load_app_config()?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.log_level))
        .init();
    tracing::debug!(?config, "loaded configuration");

    let cli = Cli::parse();
    match cli.command {
        Commands::Run { year, month } => report::run(&config, year.zip(month)).await,
    }
}
