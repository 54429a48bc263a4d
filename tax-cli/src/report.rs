//! Rendering paycheck estimates as a table, CSV or JSON.

use std::io::Write;

use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};
use tax_core::TaxResult;
use tax_core::calculations::{BracketPortion, PaycheckBreakdown};
use thiserror::Error;

use crate::utils::{format_currency, format_plain, format_rate};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV output failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// Include per-bracket detail and marginal rates.
    pub breakdown: bool,
}

/// One row per gross salary.
#[derive(Debug, Clone, PartialEq, Tabled, Serialize)]
pub struct SummaryRow {
    #[tabled(rename = "Gross")]
    pub gross: String,

    #[tabled(rename = "Federal")]
    pub federal: String,

    #[tabled(rename = "State")]
    pub state: String,

    #[tabled(rename = "Medicare")]
    pub medicare: String,

    #[tabled(rename = "Social Security")]
    pub social_security: String,

    #[tabled(rename = "Total Tax")]
    pub total: String,

    #[tabled(rename = "Net Pay")]
    pub net: String,

    #[tabled(rename = "Effective Rate")]
    pub effective_rate: String,
}

impl SummaryRow {
    fn new(
        result: &TaxResult,
        amount: fn(Decimal) -> String,
    ) -> Self {
        Self {
            gross: amount(result.gross()),
            federal: amount(result.federal()),
            state: amount(result.state()),
            medicare: amount(result.medicare()),
            social_security: amount(result.social_security()),
            total: amount(result.total()),
            net: amount(result.net()),
            effective_rate: format_rate(result.effective_rate()),
        }
    }

    /// Amounts as `$1,234.56` for people.
    pub fn display(result: &TaxResult) -> Self {
        Self::new(result, format_currency)
    }

    /// Amounts as `1234.56` for machines.
    pub fn plain(result: &TaxResult) -> Self {
        Self::new(result, format_plain)
    }
}

/// One bracket's share of a schedule's tax.
#[derive(Debug, Clone, PartialEq, Tabled)]
pub struct BracketRow {
    #[tabled(rename = "Schedule")]
    pub schedule: String,

    #[tabled(rename = "Bracket")]
    pub range: String,

    #[tabled(rename = "Rate")]
    pub rate: String,

    #[tabled(rename = "Taxed")]
    pub taxed: String,

    #[tabled(rename = "Tax")]
    pub tax: String,
}

impl BracketRow {
    pub fn new(
        schedule: &str,
        portion: &BracketPortion,
    ) -> Self {
        let bracket = &portion.bracket;
        let range = match bracket.max_income {
            Some(max) => format!(
                "{} - {}",
                format_currency(bracket.min_income),
                format_currency(max)
            ),
            None => format!("{} and above", format_currency(bracket.min_income)),
        };
        Self {
            schedule: schedule.to_string(),
            range,
            rate: format_rate(bracket.tax_rate),
            taxed: format_currency(portion.taxable_income),
            tax: format_currency(portion.tax),
        }
    }
}

/// Bracket rows for both schedules, lowest bracket first.
pub fn bracket_rows(estimate: &PaycheckBreakdown) -> Vec<BracketRow> {
    let federal = estimate
        .federal_brackets
        .iter()
        .rev()
        .map(|p| BracketRow::new("Federal", p));
    let state = estimate
        .state_brackets
        .iter()
        .rev()
        .map(|p| BracketRow::new("State", p));
    federal.chain(state).collect()
}

#[derive(Serialize)]
struct JsonEstimate<'a> {
    gross: Decimal,
    #[serde(flatten)]
    result: &'a TaxResult,
    effective_rate: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    breakdown: Option<JsonBreakdown<'a>>,
}

#[derive(Serialize)]
struct JsonBreakdown<'a> {
    federal_marginal_rate: Decimal,
    state_marginal_rate: Decimal,
    federal_brackets: &'a [BracketPortion],
    state_brackets: &'a [BracketPortion],
}

fn styled(mut table: Table) -> String {
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()));
    table.to_string()
}

/// Writes `estimates` to `out` in the requested format.
pub fn render<W: Write>(
    estimates: &[PaycheckBreakdown],
    options: RenderOptions,
    out: &mut W,
) -> Result<(), ReportError> {
    match options.format {
        OutputFormat::Table => render_table(estimates, options.breakdown, out),
        OutputFormat::Csv => render_csv(estimates, out),
        OutputFormat::Json => render_json(estimates, options.breakdown, out),
    }
}

fn render_table<W: Write>(
    estimates: &[PaycheckBreakdown],
    breakdown: bool,
    out: &mut W,
) -> Result<(), ReportError> {
    if estimates.is_empty() {
        writeln!(out, "No salaries to report")?;
        return Ok(());
    }

    let rows: Vec<SummaryRow> = estimates
        .iter()
        .map(|e| SummaryRow::display(&e.result))
        .collect();
    writeln!(out, "{}", styled(Table::new(rows)))?;

    if breakdown {
        for estimate in estimates {
            writeln!(
                out,
                "\nGross {}: federal marginal rate {}, state marginal rate {}",
                format_currency(estimate.result.gross()),
                format_rate(estimate.federal_marginal_rate),
                format_rate(estimate.state_marginal_rate),
            )?;
            let rows = bracket_rows(estimate);
            if !rows.is_empty() {
                writeln!(out, "{}", styled(Table::new(rows)))?;
            }
        }
    }
    Ok(())
}

fn render_csv<W: Write>(
    estimates: &[PaycheckBreakdown],
    out: &mut W,
) -> Result<(), ReportError> {
    let mut wtr = csv::Writer::from_writer(out);
    for estimate in estimates {
        wtr.serialize(SummaryRow::plain(&estimate.result))?;
    }
    wtr.flush()?;
    Ok(())
}

fn render_json<W: Write>(
    estimates: &[PaycheckBreakdown],
    breakdown: bool,
    out: &mut W,
) -> Result<(), ReportError> {
    let records: Vec<JsonEstimate<'_>> = estimates
        .iter()
        .map(|e| JsonEstimate {
            gross: e.result.gross(),
            result: &e.result,
            effective_rate: e.result.effective_rate().round_dp(4),
            breakdown: breakdown.then(|| JsonBreakdown {
                federal_marginal_rate: e.federal_marginal_rate,
                state_marginal_rate: e.state_marginal_rate,
                federal_brackets: &e.federal_brackets,
                state_brackets: &e.state_brackets,
            }),
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &records)?;
    writeln!(out)?;
    Ok(())
}
