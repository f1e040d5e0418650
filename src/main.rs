mod cli;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use price_history::{Credentials, RunReport, Target};

/// Failures are logged, never turned into an exit status.
fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    match try_main(cli) {
        Ok(report) => log_report(&report),
        Err(e) => error!("{:#}", e),
    }
}

fn try_main(cli: Cli) -> anyhow::Result<RunReport> {
    let site = cli.site_config();
    let target = Target::resolve(
        &site,
        cli.url.as_deref(),
        &cli.collection,
        &cli.product_type,
        &cli.output,
    )
    .context("resolving target")?;

    if cli.url.is_none() {
        info!("Using built URL: {}", target.url);
    }
    info!("Data will be saved to: {}", target.output_dir.display());

    let credentials = Credentials::from_parts(cli.email, cli.password);
    price_history::run(&site, &target, credentials.as_ref())
        .with_context(|| format!("extracting price history from {}", target.url))
}

fn log_report(report: &RunReport) {
    for failure in &report.failed {
        let outcome = if failure.recovered { "recovered" } else { "left empty" };
        warn!(
            "{} {} after error: {}. Check debug files in {}",
            failure.literal.property(),
            outcome,
            failure.error,
            report.output_dir.display()
        );
    }
    if report.data_found {
        info!(
            "All data saved successfully! {} files in {}",
            report.written.len(),
            report.output_dir.display()
        );
    }
}
