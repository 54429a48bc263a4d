use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A contiguous income range taxed at a single marginal rate.
///
/// Membership is half-open: an income belongs to the bracket when
/// `min_income <= income < max_income`. A `max_income` of `None` marks the
/// open-ended top bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
}

impl TaxBracket {
    pub fn new(
        min_income: Decimal,
        max_income: Option<Decimal>,
        tax_rate: Decimal,
    ) -> Self {
        Self {
            min_income,
            max_income,
            tax_rate,
        }
    }

    /// Returns `true` if `income` falls inside `[min_income, max_income)`.
    pub fn contains(
        &self,
        income: Decimal,
    ) -> bool {
        income >= self.min_income && self.max_income.is_none_or(|max| income < max)
    }

    pub fn is_unbounded(&self) -> bool {
        self.max_income.is_none()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn contains_includes_lower_bound() {
        let bracket = TaxBracket::new(dec!(9875), Some(dec!(40125)), dec!(0.12));

        assert!(bracket.contains(dec!(9875)));
    }

    #[test]
    fn contains_excludes_upper_bound() {
        let bracket = TaxBracket::new(dec!(9875), Some(dec!(40125)), dec!(0.12));

        assert!(!bracket.contains(dec!(40125)));
        assert!(bracket.contains(dec!(40124.99)));
    }

    #[test]
    fn contains_unbounded_top() {
        let bracket = TaxBracket::new(dec!(518400), None, dec!(0.37));

        assert!(bracket.contains(dec!(10000000000)));
        assert!(!bracket.contains(dec!(518399.99)));
        assert!(bracket.is_unbounded());
    }
}
