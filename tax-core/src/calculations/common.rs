//! Rounding and clamping helpers shared by the calculators.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to cents, taking exact midpoints away from zero.
///
/// This is the single rounding policy for every reported amount.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(3624.995)), dec!(3625.00));
/// assert_eq!(round_half_up(dec!(3624.994)), dec!(3624.99));
/// assert_eq!(round_half_up(dec!(-0.005)), dec!(-0.01));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps negative values to zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::non_negative;
///
/// assert_eq!(non_negative(dec!(-50000)), dec!(0));
/// assert_eq!(non_negative(dec!(50000)), dec!(50000));
/// ```
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}
