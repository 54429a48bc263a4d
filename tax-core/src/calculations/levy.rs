//! Flat-rate payroll levies that do not use brackets.

use rust_decimal::Decimal;
use tracing::trace;

use crate::Income;
use crate::calculations::common::non_negative;

/// Flat rate on all income plus a surcharge on the part above `threshold`.
///
/// The base rate applies to the whole income whether or not the surcharge
/// kicks in (medicare-style).
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::Income;
/// use tax_core::calculations::compute_surcharge_levy;
///
/// let income = Income::new(dec!(250000)).unwrap();
/// let tax = compute_surcharge_levy(income, dec!(0.0145), dec!(0.009), dec!(200000));
///
/// assert_eq!(tax, dec!(4075.00));
/// ```
pub fn compute_surcharge_levy(
    income: Income,
    base_rate: Decimal,
    surcharge_rate: Decimal,
    threshold: Decimal,
) -> Decimal {
    let income = income.value();
    let excess = non_negative(income - threshold);
    let tax = income * base_rate + excess * surcharge_rate;

    trace!(%income, %excess, %tax, "surcharge levy");
    tax
}

/// Flat rate on income up to `cap`; anything above the cap is untaxed
/// (social-security-style).
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::Income;
/// use tax_core::calculations::compute_capped_levy;
///
/// let income = Income::new(dec!(200000)).unwrap();
///
/// assert_eq!(compute_capped_levy(income, dec!(0.062), dec!(137000)), dec!(8494.00));
/// ```
pub fn compute_capped_levy(
    income: Income,
    rate: Decimal,
    cap: Decimal,
) -> Decimal {
    let taxable = income.value().min(cap);
    let tax = taxable * rate;

    trace!(%taxable, %tax, "capped levy");
    tax
}
