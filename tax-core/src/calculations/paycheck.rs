//! Full paycheck estimate: federal and state brackets plus payroll levies.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::PaycheckCalculator;
//! use tax_core::{Income, PayrollLevyConfig, Schedule, TaxBracket};
//!
//! let federal = Schedule::new(
//!     "federal",
//!     vec![
//!         TaxBracket::new(dec!(0), Some(dec!(9875)), dec!(0.10)),
//!         TaxBracket::new(dec!(9875), None, dec!(0.12)),
//!     ],
//! )
//! .unwrap();
//! let state = Schedule::new("state", vec![TaxBracket::new(dec!(0), None, dec!(0.05))]).unwrap();
//! let levies = PayrollLevyConfig {
//!     tax_year: 2020,
//!     ss_wage_max: dec!(137000),
//!     ss_tax_rate: dec!(0.062),
//!     medicare_tax_rate: dec!(0.0145),
//!     medicare_surcharge_rate: dec!(0.009),
//!     medicare_surcharge_threshold: dec!(200000),
//! };
//!
//! let calculator = PaycheckCalculator::new(&federal, &state, levies).unwrap();
//! let result = calculator.calculate(Income::new(dec!(20000)).unwrap());
//!
//! // 987.50 + 1215 federal, 1000 state, 290 medicare, 1240 social security
//! assert_eq!(result.total(), dec!(4732.50));
//! assert_eq!(result.net(), dec!(15267.50));
//! ```

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::calculations::aggregate::aggregate;
use crate::calculations::bracket::{BracketPortion, bracket_breakdown, compute_bracket_tax};
use crate::calculations::levy::{compute_capped_levy, compute_surcharge_levy};
use crate::{
    ComponentKind, Income, LevyConfigError, PayrollLevyConfig, Schedule, TaxComponent,
    TaxResult,
};

/// A [`TaxResult`] together with how the bracket taxes were reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaycheckBreakdown {
    pub result: TaxResult,
    pub federal_brackets: Vec<BracketPortion>,
    pub state_brackets: Vec<BracketPortion>,
    pub federal_marginal_rate: Decimal,
    pub state_marginal_rate: Decimal,
}

/// Computes every levy on a gross salary and aggregates them.
#[derive(Debug, Clone)]
pub struct PaycheckCalculator<'a> {
    federal: &'a Schedule,
    state: &'a Schedule,
    levies: PayrollLevyConfig,
}

impl<'a> PaycheckCalculator<'a> {
    /// # Errors
    ///
    /// Returns [`LevyConfigError`] if `levies` fails validation.
    pub fn new(
        federal: &'a Schedule,
        state: &'a Schedule,
        levies: PayrollLevyConfig,
    ) -> Result<Self, LevyConfigError> {
        levies.validate()?;
        Ok(Self {
            federal,
            state,
            levies,
        })
    }

    /// Unrounded amount of each levy on `income`.
    pub fn components(
        &self,
        income: Income,
    ) -> Vec<TaxComponent> {
        let levies = &self.levies;
        vec![
            TaxComponent::new(
                ComponentKind::Federal,
                compute_bracket_tax(self.federal, income),
            ),
            TaxComponent::new(ComponentKind::State, compute_bracket_tax(self.state, income)),
            TaxComponent::new(
                ComponentKind::Medicare,
                compute_surcharge_levy(
                    income,
                    levies.medicare_tax_rate,
                    levies.medicare_surcharge_rate,
                    levies.medicare_surcharge_threshold,
                ),
            ),
            TaxComponent::new(
                ComponentKind::SocialSecurity,
                compute_capped_levy(income, levies.ss_tax_rate, levies.ss_wage_max),
            ),
        ]
    }

    pub fn calculate(
        &self,
        income: Income,
    ) -> TaxResult {
        debug!(
            %income,
            federal = self.federal.name(),
            state = self.state.name(),
            tax_year = self.levies.tax_year,
            "calculating paycheck"
        );
        aggregate(income, &self.components(income))
    }

    pub fn breakdown(
        &self,
        income: Income,
    ) -> PaycheckBreakdown {
        PaycheckBreakdown {
            result: self.calculate(income),
            federal_brackets: bracket_breakdown(self.federal, income),
            state_brackets: bracket_breakdown(self.state, income),
            federal_marginal_rate: self.federal.marginal_rate(income),
            state_marginal_rate: self.state.marginal_rate(income),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::TaxBracket;

    fn federal() -> Schedule {
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

    fn state() -> Schedule {
        Schedule::new(
            "wisconsin",
            vec![
                TaxBracket::new(dec!(0), Some(dec!(11970)), dec!(0.0354)),
                TaxBracket::new(dec!(11970), Some(dec!(23930)), dec!(0.0465)),
                TaxBracket::new(dec!(23930), Some(dec!(263480)), dec!(0.0627)),
                TaxBracket::new(dec!(263480), None, dec!(0.0765)),
            ],
        )
        .unwrap()
    }

    fn levies() -> PayrollLevyConfig {
        PayrollLevyConfig {
            tax_year: 2020,
            ss_wage_max: dec!(137000),
            ss_tax_rate: dec!(0.062),
            medicare_tax_rate: dec!(0.0145),
            medicare_surcharge_rate: dec!(0.009),
            medicare_surcharge_threshold: dec!(200000),
        }
    }

    fn income(value: Decimal) -> Income {
        Income::new(value).unwrap()
    }

    #[test]
    fn new_rejects_invalid_levies() {
        let (federal, state) = (federal(), state());
        let mut bad = levies();
        bad.ss_tax_rate = dec!(2);

        let result = PaycheckCalculator::new(&federal, &state, bad);

        assert!(matches!(
            result,
            Err(LevyConfigError::InvalidSocialSecurityRate(_))
        ));
    }

    #[test]
    fn calculate_zero_income() {
        let (federal, state) = (federal(), state());
        let calculator = PaycheckCalculator::new(&federal, &state, levies()).unwrap();

        let result = calculator.calculate(Income::ZERO);

        for kind in ComponentKind::all() {
            assert_eq!(result.amount(*kind), dec!(0));
        }
        assert_eq!(result.total(), dec!(0));
        assert_eq!(result.net(), dec!(0));
    }

    #[test]
    fn calculate_mid_income() {
        let (federal, state) = (federal(), state());
        let calculator = PaycheckCalculator::new(&federal, &state, levies()).unwrap();

        let result = calculator.calculate(income(dec!(50000)));

        // 987.50 + 3630 + 2172.50
        assert_eq!(result.federal(), dec!(6790.00));
        // 423.738 + 556.14 + 1634.589 = 2614.467
        assert_eq!(result.state(), dec!(2614.47));
        assert_eq!(result.medicare(), dec!(725.00));
        assert_eq!(result.social_security(), dec!(3100.00));
        assert_eq!(result.total(), dec!(13229.47));
        assert_eq!(result.net(), dec!(36770.53));
    }

    #[test]
    fn calculate_high_income_hits_cap_and_surcharge() {
        let (federal, state) = (federal(), state());
        let calculator = PaycheckCalculator::new(&federal, &state, levies()).unwrap();

        let result = calculator.calculate(income(dec!(250000)));

        assert_eq!(result.medicare(), dec!(4075.00));
        assert_eq!(result.social_security(), dec!(8494.00));
    }

    #[test]
    fn calculate_total_within_a_cent_of_unrounded_components() {
        let (federal, state) = (federal(), state());
        let calculator = PaycheckCalculator::new(&federal, &state, levies()).unwrap();
        let value = income(dec!(87654.32));

        let raw: Decimal = calculator.components(value).iter().map(|c| c.amount).sum();
        let result = calculator.calculate(value);

        assert!((result.total() - raw).abs() <= dec!(0.01));
        assert_eq!(result.total() + result.net(), dec!(87654.32));
    }

    #[test]
    fn calculate_total_within_a_cent_across_cent_steps() {
        let (federal, state) = (federal(), state());
        let calculator = PaycheckCalculator::new(&federal, &state, levies()).unwrap();

        for cents in 5_000_000..5_020_000 {
            let value = income(Decimal::new(cents, 2));

            let raw: Decimal = calculator.components(value).iter().map(|c| c.amount).sum();
            let total = calculator.calculate(value).total();

            assert!(
                (total - raw).abs() <= dec!(0.01),
                "total {total} vs exact {raw} at {value}"
            );
        }
    }

    #[test]
    fn breakdown_reports_marginal_rates() {
        let (federal, state) = (federal(), state());
        let calculator = PaycheckCalculator::new(&federal, &state, levies()).unwrap();

        let breakdown = calculator.breakdown(income(dec!(50000)));

        assert_eq!(breakdown.federal_marginal_rate, dec!(0.22));
        assert_eq!(breakdown.state_marginal_rate, dec!(0.0627));
        assert_eq!(breakdown.federal_brackets.len(), 3);
        assert_eq!(breakdown.state_brackets.len(), 3);
        assert_eq!(breakdown.result, calculator.calculate(income(dec!(50000))));
    }
}
