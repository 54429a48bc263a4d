use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a gross income value is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IncomeError {
    /// Income below zero.
    #[error("income must be non-negative, got {0}")]
    Negative(Decimal),

    /// NaN or an infinity.
    #[error("income must be a finite number")]
    NonFinite,

    /// A finite value too large to represent as a decimal amount.
    #[error("income {0} is out of range")]
    OutOfRange(String),

    /// Text that does not parse as a number.
    #[error("'{0}' is not a valid amount")]
    NotANumber(String),
}

/// A validated gross income: finite and non-negative.
///
/// Every calculator takes an `Income` rather than a raw [`Decimal`], so
/// invalid input is rejected once, at the edge, and the engine itself never
/// fails on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Income(Decimal);

impl Income {
    pub const ZERO: Income = Income(Decimal::ZERO);

    /// Wraps `value`, rejecting negative amounts.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tax_core::{Income, IncomeError};
    ///
    /// assert_eq!(Income::new(dec!(52000)).unwrap().value(), dec!(52000));
    /// assert_eq!(Income::new(dec!(-1)), Err(IncomeError::Negative(dec!(-1))));
    /// ```
    pub fn new(value: Decimal) -> Result<Self, IncomeError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(IncomeError::Negative(value));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Income {
    type Error = IncomeError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Income::new(value)
    }
}

impl From<Income> for Decimal {
    fn from(income: Income) -> Self {
        income.0
    }
}

impl TryFrom<f64> for Income {
    type Error = IncomeError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(IncomeError::NonFinite);
        }
        let decimal =
            Decimal::try_from(value).map_err(|_| IncomeError::OutOfRange(value.to_string()))?;
        Income::new(decimal)
    }
}

/// Parses text as typed into an amount field.
///
/// Surrounding whitespace, a leading `$` and comma thousands separators are
/// accepted (`" $52,000.00 "`). Anything else that is not a plain decimal
/// number is [`IncomeError::NotANumber`].
impl FromStr for Income {
    type Err = IncomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let normalized = trimmed
            .strip_prefix('$')
            .unwrap_or(trimmed)
            .trim_start()
            .replace(',', "");
        if normalized.is_empty() {
            return Err(IncomeError::NotANumber(s.to_string()));
        }
        let value = normalized
            .parse::<Decimal>()
            .map_err(|_| IncomeError::NotANumber(s.to_string()))?;
        Income::new(value)
    }
}

impl fmt::Display for Income {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        self.0.fmt(f)
    }
}
