//! Common utility functions for tax calculations.
//!
//! The engine computes with exact decimals; the helpers here are for
//! flooring intermediate values and for presenting amounts and rates.

use rust_decimal::Decimal;

/// Rounds a decimal value to two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use regime_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to two places and pads the scale so the value always prints with
/// exactly two decimals.
///
/// ```
/// use rust_decimal_macros::dec;
/// use regime_core::calculations::common::to_money;
///
/// assert_eq!(to_money(dec!(480000)).to_string(), "480000.00");
/// assert_eq!(to_money(dec!(0.125)).to_string(), "0.13");
/// ```
pub fn to_money(value: Decimal) -> Decimal {
    let mut rounded = round_half_up(value);
    rounded.rescale(2);
    rounded
}

/// Returns the maximum of two decimal values.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Formats a fractional rate as a percentage without trailing zeros.
///
/// ```
/// use rust_decimal_macros::dec;
/// use regime_core::calculations::common::format_percent;
///
/// assert_eq!(format_percent(dec!(0.095)), "9.5%");
/// assert_eq!(format_percent(dec!(0.20)), "20%");
/// ```
pub fn format_percent(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}
