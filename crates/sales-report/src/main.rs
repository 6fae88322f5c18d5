use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sales_core::{
    config::DEFAULT_INPUT_PATH,
    presentation::{print_summary, render_charts},
    run_pipeline, ReportConfig,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Yearly sales KPIs and charts from a sales workbook",
    long_about = None
)]
struct Cli {
    /// Spreadsheet with the Sales Orders, Customers, Regions and Products sheets
    #[arg(default_value = DEFAULT_INPUT_PATH)]
    input: PathBuf,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();
    let config = ReportConfig::new(cli.input);

    let output = run_pipeline(&config).with_context(|| {
        format!(
            "failed to build KPI report from {}",
            config.input_path.display()
        )
    })?;

    let report = render_charts(&output.orders, &output.kpis, &config.chart_dir);
    if report.is_complete() {
        info!(
            charts = report.rendered.len(),
            dir = %config.chart_dir.display(),
            "charts written"
        );
    } else {
        warn!(
            rendered = report.rendered.len(),
            failed = report.failures.len(),
            "some charts could not be rendered"
        );
    }

    print_summary(&output.kpis);
    Ok(())
}
