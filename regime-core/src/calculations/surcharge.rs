//! Surcharge on base tax for high incomes.
//!
//! The tier rate applies to the *whole* base tax once income crosses a tier
//! threshold. Marginal relief at the thresholds is not applied, so total tax
//! can jump by more than the income above the threshold.

use rust_decimal::Decimal;

use crate::SurchargeTier;

/// Rate of the highest tier whose threshold `taxable_income` exceeds, or
/// zero below the first tier. A threshold belongs to the tier beneath it.
pub fn surcharge_rate(
    taxable_income: Decimal,
    tiers: &[SurchargeTier],
) -> Decimal {
    tiers
        .iter()
        .rev()
        .find(|tier| taxable_income > tier.above)
        .map_or(Decimal::ZERO, |tier| tier.rate)
}

/// Surcharge due on `base_tax`. Zero whenever the base tax is zero.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use regime_core::TaxRules;
/// use regime_core::calculations::surcharge;
///
/// let rules = TaxRules::builtin();
///
/// assert_eq!(surcharge(dec!(5000000), dec!(1312500), &rules.old.surcharge_tiers), dec!(0));
/// assert_eq!(surcharge(dec!(6000000), dec!(1612500), &rules.old.surcharge_tiers), dec!(161250));
/// ```
pub fn surcharge(
    taxable_income: Decimal,
    base_tax: Decimal,
    tiers: &[SurchargeTier],
) -> Decimal {
    if base_tax.is_zero() {
        return Decimal::ZERO;
    }
    base_tax * surcharge_rate(taxable_income, tiers)
}
