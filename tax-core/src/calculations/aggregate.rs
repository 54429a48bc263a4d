//! Sums tax components into a [`TaxResult`].

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::round_half_up;
use crate::{ComponentKind, Income, TaxComponent, TaxResult};

/// Totals the components and derives net pay, rounding every reported
/// amount to cents.
///
/// Components of the same kind accumulate; kinds that are missing report
/// zero. `total` is the rounded sum of the unrounded amounts, so it stays
/// within half a cent of the exact liability. The rounded per-kind fields
/// may therefore add up to a cent or two more or less than `total`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::aggregate;
/// use tax_core::{ComponentKind, Income, TaxComponent};
///
/// let income = Income::new(dec!(50000)).unwrap();
/// let result = aggregate(
///     income,
///     &[
///         TaxComponent::new(ComponentKind::Federal, dec!(6790.00)),
///         TaxComponent::new(ComponentKind::Medicare, dec!(725.00)),
///     ],
/// );
///
/// assert_eq!(result.total(), dec!(7515.00));
/// assert_eq!(result.net(), dec!(42485.00));
/// assert_eq!(result.state(), dec!(0));
/// ```
pub fn aggregate(
    income: Income,
    components: &[TaxComponent],
) -> TaxResult {
    let mut result = TaxResult {
        federal: Decimal::ZERO,
        state: Decimal::ZERO,
        medicare: Decimal::ZERO,
        social_security: Decimal::ZERO,
        total: Decimal::ZERO,
        net: Decimal::ZERO,
    };

    for component in components {
        let slot = match component.kind {
            ComponentKind::Federal => &mut result.federal,
            ComponentKind::State => &mut result.state,
            ComponentKind::Medicare => &mut result.medicare,
            ComponentKind::SocialSecurity => &mut result.social_security,
        };
        *slot += component.amount;
        result.total += component.amount;
    }

    for slot in [
        &mut result.federal,
        &mut result.state,
        &mut result.medicare,
        &mut result.social_security,
        &mut result.total,
    ] {
        *slot = round_half_up(*slot);
    }
    result.net = round_half_up(income.value()) - result.total;

    debug!(
        gross = %income,
        total = %result.total,
        net = %result.net,
        "aggregated tax components"
    );
    result
}
