use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tax_cli::app::{Estimator, run_batch, run_interactive, run_single};
use tax_cli::config::Settings;
use tax_cli::logging::init_logging;
use tax_cli::report::{OutputFormat, RenderOptions};
use tax_data::{TAX_YEAR, TaxTables};
use tracing::info;

/// Estimate federal, state, medicare and social security tax on a gross
/// salary using the 2020 single-filer tables.
///
/// With no GROSS and no --input, salaries are read interactively from stdin.
#[derive(Parser, Debug)]
#[command(name = "paycheck")]
#[command(version, about, long_about = None)]
struct Args {
    /// Gross annual salary, e.g. 52000 or "$52,000.00"
    #[arg(allow_hyphen_values = true)]
    gross: Option<String>,

    /// File with one gross salary per line
    #[arg(short, long, conflicts_with = "gross")]
    input: Option<PathBuf>,

    /// Output format [default: table]
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Show per-bracket detail and marginal rates
    #[arg(short, long, default_value_t = false)]
    breakdown: bool,

    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level or filter directive (overrides RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,

    /// Append logs to this file as well as stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let log_level = args.log_level.as_deref().or(settings.log_level.as_deref());
    let log_file = args.log_file.as_deref().or(settings.log_file.as_deref());
    init_logging(log_level, log_file)?;

    let options = RenderOptions {
        format: args.format.or(settings.format).unwrap_or_default(),
        breakdown: args.breakdown || settings.breakdown,
    };

    let tables = TaxTables::load().context("Failed to load built-in tax tables")?;
    let estimator = Estimator::new(&tables).context("Invalid payroll levy parameters")?;
    info!(tax_year = TAX_YEAR, ?options, "tables loaded");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(gross) = &args.gross {
        return run_single(&estimator, gross, options, &mut out);
    }

    if let Some(path) = &args.input {
        let file =
            File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
        let summary = run_batch(
            &estimator,
            BufReader::new(file),
            options,
            &mut out,
            &mut io::stderr(),
        )?;
        info!(
            processed = summary.processed,
            rejected = summary.rejected,
            "processed {}",
            path.display()
        );
        return Ok(());
    }

    run_interactive(&estimator, io::stdin().lock(), &mut out, options)
}
