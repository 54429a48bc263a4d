use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by [`PayrollLevyConfig::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevyConfigError {
    #[error("social security tax rate must be between 0 and 1, got {0}")]
    InvalidSocialSecurityRate(Decimal),

    #[error("medicare tax rate must be between 0 and 1, got {0}")]
    InvalidMedicareRate(Decimal),

    #[error("medicare surcharge rate must be between 0 and 1, got {0}")]
    InvalidSurchargeRate(Decimal),

    #[error("social security wage maximum must be non-negative, got {0}")]
    InvalidSsWageMax(Decimal),

    #[error("medicare surcharge threshold must be non-negative, got {0}")]
    InvalidSurchargeThreshold(Decimal),
}

/// Parameters of the two flat payroll levies for one tax year.
///
/// Social security is a flat rate on wages up to `ss_wage_max`; medicare is a
/// flat rate on all wages plus a surcharge on the part above
/// `medicare_surcharge_threshold`. Rates are employee-side shares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollLevyConfig {
    pub tax_year: i32,
    pub ss_wage_max: Decimal,
    pub ss_tax_rate: Decimal,
    pub medicare_tax_rate: Decimal,
    pub medicare_surcharge_rate: Decimal,
    pub medicare_surcharge_threshold: Decimal,
}

impl PayrollLevyConfig {
    /// Checks every rate is in `[0, 1]` and the cap and threshold are not
    /// negative.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tax_core::{LevyConfigError, PayrollLevyConfig};
    ///
    /// let config = PayrollLevyConfig {
    ///     tax_year: 2020,
    ///     ss_wage_max: dec!(137000),
    ///     ss_tax_rate: dec!(6.2),
    ///     medicare_tax_rate: dec!(0.0145),
    ///     medicare_surcharge_rate: dec!(0.009),
    ///     medicare_surcharge_threshold: dec!(200000),
    /// };
    ///
    /// assert_eq!(
    ///     config.validate(),
    ///     Err(LevyConfigError::InvalidSocialSecurityRate(dec!(6.2)))
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), LevyConfigError> {
        if !is_rate(self.ss_tax_rate) {
            return Err(LevyConfigError::InvalidSocialSecurityRate(self.ss_tax_rate));
        }
        if !is_rate(self.medicare_tax_rate) {
            return Err(LevyConfigError::InvalidMedicareRate(
                self.medicare_tax_rate,
            ));
        }
        if !is_rate(self.medicare_surcharge_rate) {
            return Err(LevyConfigError::InvalidSurchargeRate(
                self.medicare_surcharge_rate,
            ));
        }
        if self.ss_wage_max < Decimal::ZERO {
            return Err(LevyConfigError::InvalidSsWageMax(self.ss_wage_max));
        }
        if self.medicare_surcharge_threshold < Decimal::ZERO {
            return Err(LevyConfigError::InvalidSurchargeThreshold(
                self.medicare_surcharge_threshold,
            ));
        }
        Ok(())
    }
}

fn is_rate(rate: Decimal) -> bool {
    rate >= Decimal::ZERO && rate <= Decimal::ONE
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn config_2020() -> PayrollLevyConfig {
        PayrollLevyConfig {
            tax_year: 2020,
            ss_wage_max: dec!(137000),
            ss_tax_rate: dec!(0.062),
            medicare_tax_rate: dec!(0.0145),
            medicare_surcharge_rate: dec!(0.009),
            medicare_surcharge_threshold: dec!(200000),
        }
    }

    #[test]
    fn validate_accepts_2020_values() {
        assert_eq!(config_2020().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_negative_medicare_rate() {
        let mut config = config_2020();
        config.medicare_tax_rate = dec!(-0.0145);

        assert_eq!(
            config.validate(),
            Err(LevyConfigError::InvalidMedicareRate(dec!(-0.0145)))
        );
    }

    #[test]
    fn validate_rejects_surcharge_rate_above_one() {
        let mut config = config_2020();
        config.medicare_surcharge_rate = dec!(1.01);

        assert_eq!(
            config.validate(),
            Err(LevyConfigError::InvalidSurchargeRate(dec!(1.01)))
        );
    }

    #[test]
    fn validate_rejects_negative_wage_max() {
        let mut config = config_2020();
        config.ss_wage_max = dec!(-1);

        assert_eq!(
            config.validate(),
            Err(LevyConfigError::InvalidSsWageMax(dec!(-1)))
        );
    }

    #[test]
    fn validate_rejects_negative_threshold() {
        let mut config = config_2020();
        config.medicare_surcharge_threshold = dec!(-200000);

        assert_eq!(
            config.validate(),
            Err(LevyConfigError::InvalidSurchargeThreshold(dec!(-200000)))
        );
    }
}
