//! Rounding and clamping helpers shared by the regime calculations.
//!
//! Amounts are whole rupees. Ties round away from zero, which for the
//! non-negative amounts the engine handles is plain half-up rounding.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use tracing::warn;

/// Largest amount the engine accepts for a single input (10^15 rupees).
///
/// Sums and products of inputs held under this ceiling stay far inside
/// [`Decimal::MAX`], so the calculations never overflow.
pub const AMOUNT_CEILING: Decimal = dec!(1_000_000_000_000_000);

/// Rounds to the nearest whole rupee, half away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use regime_core::calculations::common::round_to_whole;
///
/// assert_eq!(round_to_whole(dec!(4100.4)), dec!(4100));
/// assert_eq!(round_to_whole(dec!(4100.5)), dec!(4101));
/// assert_eq!(round_to_whole(dec!(-2.5)), dec!(-3)); // Away from zero
/// ```
pub fn round_to_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to the nearest multiple of `step`, half away from zero.
///
/// Used with a step of 10 for taxable income (Section 288A).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use regime_core::calculations::common::round_to_step;
///
/// assert_eq!(round_to_step(dec!(950004), dec!(10)), dec!(950000));
/// assert_eq!(round_to_step(dec!(950005), dec!(10)), dec!(950010));
/// ```
pub fn round_to_step(
    value: Decimal,
    step: Decimal,
) -> Decimal {
    round_to_whole(value / step) * step
}

/// Returns `value` limited to `0..=AMOUNT_CEILING`.
///
/// Logs a warning naming `field` when a substitution happens.
pub fn bounded_amount(
    field: &'static str,
    value: Decimal,
) -> Decimal {
    if value < Decimal::ZERO {
        warn!(field, value = %value, "negative amount treated as zero");
        return Decimal::ZERO;
    }
    if value > AMOUNT_CEILING {
        warn!(field, value = %value, ceiling = %AMOUNT_CEILING, "amount limited to ceiling");
        return AMOUNT_CEILING;
    }
    value
}
