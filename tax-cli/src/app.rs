//! The three ways of running the estimator: one salary, a file of salaries,
//! or an interactive prompt.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use tax_core::TaxError;
use tax_core::calculations::{PaycheckBreakdown, PaycheckCalculator};
use tax_data::TaxTables;
use tracing::{debug, info};

use crate::report::{RenderOptions, render};
use crate::utils::parse_income;

const PROMPT: &str = "Gross salary: ";

/// Parses gross salaries and runs them through the built-in tables.
#[derive(Debug, Clone)]
pub struct Estimator<'a> {
    calculator: PaycheckCalculator<'a>,
}

impl<'a> Estimator<'a> {
    pub fn new(tables: &'a TaxTables) -> Result<Self, TaxError> {
        let calculator =
            PaycheckCalculator::new(&tables.federal, &tables.state, tables.levies.clone())?;
        Ok(Self { calculator })
    }

    pub fn estimate(
        &self,
        input: &str,
    ) -> Result<PaycheckBreakdown, TaxError> {
        let income = parse_income(input)?;
        Ok(self.calculator.breakdown(income))
    }
}

/// Counts from a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub rejected: usize,
}

/// Estimates a single salary given on the command line.
pub fn run_single<W: Write>(
    estimator: &Estimator<'_>,
    gross: &str,
    options: RenderOptions,
    out: &mut W,
) -> Result<()> {
    let estimate = match estimator.estimate(gross) {
        Ok(estimate) => estimate,
        Err(e) => bail!("invalid gross salary '{}': {e}", gross.trim()),
    };
    render(&[estimate], options, out)?;
    Ok(())
}

/// Estimates one salary per line of `input`.
///
/// Blank lines and lines starting with `#` are skipped. Invalid lines are
/// reported to `err` as `line N: <reason>` and do not stop the run.
pub fn run_batch<R: BufRead, W: Write, E: Write>(
    estimator: &Estimator<'_>,
    input: R,
    options: RenderOptions,
    out: &mut W,
    err: &mut E,
) -> Result<BatchSummary> {
    let mut estimates = Vec::new();
    let mut summary = BatchSummary::default();

    for (index, line) in input.lines().enumerate() {
        let line = line.context("failed to read input")?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match estimator.estimate(trimmed) {
            Ok(estimate) => {
                estimates.push(estimate);
                summary.processed += 1;
            }
            Err(e) => {
                writeln!(err, "line {}: {e}", index + 1)?;
                summary.rejected += 1;
            }
        }
    }

    render(&estimates, options, out)?;
    info!(
        processed = summary.processed,
        rejected = summary.rejected,
        "batch complete"
    );
    Ok(summary)
}

/// Prompts for salaries until end of input or `quit`/`exit`.
///
/// A bad entry prints its validation message and the prompt is shown again.
pub fn run_interactive<R: BufRead, W: Write>(
    estimator: &Estimator<'_>,
    mut input: R,
    out: &mut W,
    options: RenderOptions,
) -> Result<()> {
    let mut line = String::new();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line).context("failed to read input")? == 0 {
            writeln!(out)?;
            break;
        }

        let entry = line.trim();
        match entry {
            "" => continue,
            "quit" | "exit" => break,
            _ => {}
        }

        match estimator.estimate(entry) {
            Ok(estimate) => render(&[estimate], options, out)?,
            Err(e) => writeln!(out, "Rejected: {e}")?,
        }
    }
    debug!("interactive session ended");
    Ok(())
}
