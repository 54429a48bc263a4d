//! Progressive marginal-bracket tax.
//!
//! Each slice of income is taxed at the rate of the bracket it occupies.
//! The engine walks a [`Schedule`] from its top bracket down, peeling off the
//! part of the remaining income that sits above each bracket's floor:
//!
//! | Bracket          | Rate | Income 50,000 | Tax      |
//! |------------------|------|---------------|----------|
//! | 40,125 and above | 22%  | 9,875         | 2,172.50 |
//! | 9,875 - 40,125   | 12%  | 30,250        | 3,630.00 |
//! | 0 - 9,875        | 10%  | 9,875         | 987.50   |
//!
//! The results here are exact; rounding to cents happens when components
//! are aggregated.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::trace;

use crate::{Income, Schedule, TaxBracket};

/// The share of an income that fell inside one bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketPortion {
    pub bracket: TaxBracket,
    /// Income taxed at this bracket's rate.
    pub taxable_income: Decimal,
    /// `taxable_income * bracket.tax_rate`, unrounded.
    pub tax: Decimal,
}

/// Computes the tax owed on `income` under `schedule`.
///
/// Never negative; zero for zero income.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::compute_bracket_tax;
/// use tax_core::{Income, Schedule, TaxBracket};
///
/// let schedule = Schedule::new(
///     "federal",
///     vec![
///         TaxBracket::new(dec!(0), Some(dec!(9875)), dec!(0.10)),
///         TaxBracket::new(dec!(9875), Some(dec!(40125)), dec!(0.12)),
///         TaxBracket::new(dec!(40125), None, dec!(0.22)),
///     ],
/// )
/// .unwrap();
///
/// let tax = compute_bracket_tax(&schedule, Income::new(dec!(40125)).unwrap());
/// assert_eq!(tax, dec!(4617.50));
/// ```
pub fn compute_bracket_tax(
    schedule: &Schedule,
    income: Income,
) -> Decimal {
    let mut remaining = income.value();
    let mut total = Decimal::ZERO;

    for bracket in schedule.brackets() {
        if remaining <= bracket.min_income {
            continue;
        }
        // The lowest bracket has a floor of zero, so it takes all that is left.
        let taxable = remaining - bracket.min_income;
        total += taxable * bracket.tax_rate;
        remaining = bracket.min_income;
    }

    trace!(schedule = schedule.name(), %income, %total, "bracket tax");
    total
}

/// Splits `income` across the brackets of `schedule`.
///
/// Portions are listed from the highest bracket down and only brackets that
/// received income appear. The taxes sum to [`compute_bracket_tax`].
pub fn bracket_breakdown(
    schedule: &Schedule,
    income: Income,
) -> Vec<BracketPortion> {
    let mut remaining = income.value();
    let mut portions = Vec::new();

    for bracket in schedule.brackets() {
        if remaining <= bracket.min_income {
            continue;
        }
        let taxable_income = remaining - bracket.min_income;
        portions.push(BracketPortion {
            bracket: bracket.clone(),
            taxable_income,
            tax: taxable_income * bracket.tax_rate,
        });
        remaining = bracket.min_income;
    }

    portions
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn federal_2020() -> Schedule {
        Schedule::new(
            "federal",
            vec![
                TaxBracket::new(dec!(518400), None, dec!(0.37)),
                TaxBracket::new(dec!(207350), Some(dec!(518400)), dec!(0.35)),
                TaxBracket::new(dec!(163300), Some(dec!(207350)), dec!(0.32)),
                TaxBracket::new(dec!(85525), Some(dec!(163300)), dec!(0.24)),
                TaxBracket::new(dec!(40125), Some(dec!(85525)), dec!(0.22)),
                TaxBracket::new(dec!(9875), Some(dec!(40125)), dec!(0.12)),
                TaxBracket::new(dec!(0), Some(dec!(9875)), dec!(0.10)),
            ],
        )
        .unwrap()
    }

    fn income(value: Decimal) -> Income {
        Income::new(value).unwrap()
    }

    // =========================================================================
    // compute_bracket_tax tests
    // =========================================================================

    #[test]
    fn zero_income_owes_nothing() {
        assert_eq!(compute_bracket_tax(&federal_2020(), Income::ZERO), dec!(0));
    }

    #[test]
    fn top_of_lowest_bracket() {
        let tax = compute_bracket_tax(&federal_2020(), income(dec!(9875)));

        assert_eq!(tax, dec!(987.50));
    }

    #[test]
    fn top_of_second_bracket() {
        let tax = compute_bracket_tax(&federal_2020(), income(dec!(40125)));

        // 987.50 + (40125 - 9875) * 0.12
        assert_eq!(tax, dec!(4617.50));
    }

    #[test]
    fn one_cent_past_boundary_taxes_the_cent_at_next_rate() {
        let schedule = federal_2020();

        let at = compute_bracket_tax(&schedule, income(dec!(9875)));
        let past = compute_bracket_tax(&schedule, income(dec!(9875.01)));

        assert_eq!(past - at, dec!(0.0012));
    }

    #[test]
    fn every_bracket_below_income_contributes() {
        let tax = compute_bracket_tax(&federal_2020(), income(dec!(100000)));

        // 987.50 + 3630 + 9988 + (100000 - 85525) * 0.24
        assert_eq!(tax, dec!(18079.50));
    }

    #[test]
    fn income_in_unbounded_top_bracket() {
        let tax = compute_bracket_tax(&federal_2020(), income(dec!(600000)));

        // 156235 below 518400, then (600000 - 518400) * 0.37
        assert_eq!(tax, dec!(186427.00));
    }

    #[test]
    fn tax_is_monotonic_in_income() {
        let schedule = federal_2020();
        let mut previous = Decimal::ZERO;

        for step in 0..=700 {
            let value = Decimal::from(step) * dec!(1000) + dec!(0.37);
            let tax = compute_bracket_tax(&schedule, income(value));
            assert!(
                tax >= previous,
                "tax decreased at {value}: {tax} < {previous}"
            );
            previous = tax;
        }
    }

    #[test]
    fn no_double_counting_at_any_boundary() {
        let schedule = federal_2020();

        for bracket in schedule.brackets() {
            let Some(edge) = bracket.max_income else {
                continue;
            };
            let below = compute_bracket_tax(&schedule, income(edge - dec!(0.01)));
            let at = compute_bracket_tax(&schedule, income(edge));

            // The last cent below the edge is taxed at this bracket's rate.
            assert_eq!(at - below, dec!(0.01) * bracket.tax_rate);
        }
    }

    // =========================================================================
    // bracket_breakdown tests
    // =========================================================================

    #[test]
    fn breakdown_is_empty_for_zero_income() {
        assert!(bracket_breakdown(&federal_2020(), Income::ZERO).is_empty());
    }

    #[test]
    fn breakdown_lists_portions_from_top() {
        let portions = bracket_breakdown(&federal_2020(), income(dec!(50000)));

        let taxable: Vec<Decimal> = portions.iter().map(|p| p.taxable_income).collect();
        assert_eq!(taxable, vec![dec!(9875), dec!(30250), dec!(9875)]);
        assert_eq!(portions[0].bracket.tax_rate, dec!(0.22));
        assert_eq!(portions[0].tax, dec!(2172.50));
    }

    #[test]
    fn breakdown_at_boundary_skips_empty_bracket() {
        let portions = bracket_breakdown(&federal_2020(), income(dec!(9875)));

        assert_eq!(portions.len(), 1);
        assert_eq!(portions[0].bracket.min_income, dec!(0));
    }

    #[test]
    fn breakdown_sums_to_bracket_tax() {
        let schedule = federal_2020();

        for value in [dec!(1), dec!(9875), dec!(123456.78), dec!(999999.99)] {
            let portions = bracket_breakdown(&schedule, income(value));
            let sum: Decimal = portions.iter().map(|p| p.tax).sum();
            let taxed: Decimal = portions.iter().map(|p| p.taxable_income).sum();

            assert_eq!(sum, compute_bracket_tax(&schedule, income(value)));
            assert_eq!(taxed, value);
        }
    }
}
