use rust_decimal::Decimal;
use tax_core::calculations::common::round_half_up;
use tax_core::{Income, IncomeError};

/// Parses a gross salary typed by the user.
///
/// Accepts `$` and comma thousands separators (e.g. `"$52,000.00"`).
/// Logs and returns an error when the input is empty, not a number, or
/// negative.
pub fn parse_income(s: &str) -> Result<Income, IncomeError> {
    s.parse::<Income>().inspect_err(|e| {
        tracing::warn!(input = %s, "rejected income: {}", e);
    })
}

/// Groups the integer digits of an unsigned decimal string in threes.
fn group_thousands(digits: &str) -> String {
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if frac_part.is_empty() {
        grouped
    } else {
        format!("{grouped}.{frac_part}")
    }
}

/// Formats an amount as dollars with exactly two decimals, e.g. `$4,617.50`.
///
/// Negative amounts are written `-$12.00`.
pub fn format_currency(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = format!("{:.2}", rounded.abs());
    format!("{sign}${}", group_thousands(&digits))
}

/// Formats an amount with exactly two decimals and no symbol or grouping,
/// for machine-readable output.
pub fn format_plain(value: Decimal) -> String {
    format!("{:.2}", round_half_up(value))
}

/// Formats a fractional rate as a percentage, e.g. `0.0627` as `6.27%`.
pub fn format_rate(rate: Decimal) -> String {
    format!("{:.2}%", round_half_up(rate * Decimal::ONE_HUNDRED))
}
