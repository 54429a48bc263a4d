use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::{Income, TaxBracket};

/// Structural problems found while building a [`Schedule`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("schedule '{0}' has no brackets")]
    Empty(String),

    /// The lowest bracket must start at zero so every income is covered.
    #[error("lowest bracket must start at 0, got {0}")]
    NonZeroFloor(Decimal),

    /// A bounded bracket whose ceiling is not above its floor.
    #[error("bracket starting at {min} has ceiling {max} which is not above its floor")]
    InvertedBounds { min: Decimal, max: Decimal },

    #[error("bracket starting at {min} has rate {rate} outside [0, 1]")]
    InvalidRate { min: Decimal, rate: Decimal },

    /// Only the top bracket may be open-ended.
    #[error("bracket starting at {0} is unbounded but is not the top bracket")]
    UnboundedInterior(Decimal),

    #[error("top bracket must be unbounded, but ends at {0}")]
    BoundedTop(Decimal),

    /// Incomes in `[from, to)` are not covered by any bracket.
    #[error("gap between brackets: no bracket covers [{from}, {to})")]
    Gap { from: Decimal, to: Decimal },

    /// Incomes in `[from, to)` are covered by two brackets.
    #[error("brackets overlap on [{from}, {to})")]
    Overlap { from: Decimal, to: Decimal },
}

/// An ordered, gap-free set of marginal brackets covering every
/// non-negative income.
///
/// Brackets are held from the highest floor to the lowest; the last one
/// starts at zero and the first one is open-ended. All invariants are
/// checked by [`Schedule::new`], so a `Schedule` value is always well formed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    name: String,
    brackets: Vec<TaxBracket>,
}

impl Schedule {
    /// Builds a schedule from brackets given in any order.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError`] if the brackets are empty, contain a rate
    /// outside `[0, 1]` or inverted bounds, leave a gap or overlap between
    /// neighbours, do not start at zero, or are not open-ended at the top.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tax_core::{Schedule, ScheduleError, TaxBracket};
    ///
    /// let schedule = Schedule::new(
    ///     "example",
    ///     vec![
    ///         TaxBracket::new(dec!(0), Some(dec!(10000)), dec!(0.10)),
    ///         TaxBracket::new(dec!(10000), None, dec!(0.20)),
    ///     ],
    /// )
    /// .unwrap();
    /// assert_eq!(schedule.brackets()[0].min_income, dec!(10000));
    ///
    /// let gap = Schedule::new(
    ///     "broken",
    ///     vec![
    ///         TaxBracket::new(dec!(0), Some(dec!(9999)), dec!(0.10)),
    ///         TaxBracket::new(dec!(10000), None, dec!(0.20)),
    ///     ],
    /// );
    /// assert_eq!(
    ///     gap,
    ///     Err(ScheduleError::Gap { from: dec!(9999), to: dec!(10000) })
    /// );
    /// ```
    pub fn new(
        name: impl Into<String>,
        mut brackets: Vec<TaxBracket>,
    ) -> Result<Self, ScheduleError> {
        let name = name.into();
        if brackets.is_empty() {
            return Err(ScheduleError::Empty(name));
        }

        brackets.sort_by(|a, b| b.min_income.cmp(&a.min_income));

        for bracket in &brackets {
            if bracket.tax_rate < Decimal::ZERO || bracket.tax_rate > Decimal::ONE {
                return Err(ScheduleError::InvalidRate {
                    min: bracket.min_income,
                    rate: bracket.tax_rate,
                });
            }
            if let Some(max) = bracket.max_income {
                if max <= bracket.min_income {
                    return Err(ScheduleError::InvertedBounds {
                        min: bracket.min_income,
                        max,
                    });
                }
            }
        }

        if let Some(max) = brackets[0].max_income {
            return Err(ScheduleError::BoundedTop(max));
        }

        for pair in brackets.windows(2) {
            let (upper, lower) = (&pair[0], &pair[1]);
            let Some(lower_max) = lower.max_income else {
                return Err(ScheduleError::UnboundedInterior(lower.min_income));
            };
            if lower_max < upper.min_income {
                return Err(ScheduleError::Gap {
                    from: lower_max,
                    to: upper.min_income,
                });
            }
            if lower_max > upper.min_income {
                return Err(ScheduleError::Overlap {
                    from: upper.min_income,
                    to: lower_max,
                });
            }
        }

        let floor = brackets[brackets.len() - 1].min_income;
        if !floor.is_zero() {
            return Err(ScheduleError::NonZeroFloor(floor));
        }

        Ok(Self { name, brackets })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Brackets from the highest floor to the lowest.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// The bracket containing `income`, whose rate is the marginal rate.
    pub fn bracket_for(
        &self,
        income: Income,
    ) -> &TaxBracket {
        let value = income.value();
        // The lowest bracket starts at zero, so a match always exists.
        let index = self
            .brackets
            .iter()
            .position(|b| value >= b.min_income)
            .unwrap_or(self.brackets.len() - 1);
        &self.brackets[index]
    }

    pub fn marginal_rate(
        &self,
        income: Income,
    ) -> Decimal {
        self.bracket_for(income).tax_rate
    }
}
