//! Rebate, surcharge and cess applied to a taxable income.
//!
//! Two income figures travel through this stage. The unrounded figure
//! decides rebate eligibility; the figure rounded to the nearest ten feeds
//! the slabs and the surcharge tiers. Base tax and surcharge are rounded
//! separately, cess is rounded on their sum, and the total is the sum of
//! the rounded parts.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{round_to_step, round_to_whole};
use crate::calculations::{slab_tax, surcharge};
use crate::{RegimeResult, RegimeRules, SlabTable};

/// Taxable income before and after rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxableIncome {
    /// Decides the rebate.
    pub unrounded: Decimal,
    /// Drives the slab and surcharge computations.
    pub rounded: Decimal,
}

impl TaxableIncome {
    /// Floors `unrounded` at zero and rounds it to a multiple of `step`.
    pub fn new(
        unrounded: Decimal,
        step: Decimal,
    ) -> Self {
        let unrounded = unrounded.max(Decimal::ZERO);
        Self {
            unrounded,
            rounded: round_to_step(unrounded, step),
        }
    }
}

/// Computes the liability for `taxable` under one regime.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use regime_core::{AgeBracket, TaxRules};
/// use regime_core::calculations::{TaxableIncome, assess_liability};
///
/// let rules = TaxRules::builtin();
/// let table = rules.old.slabs.table_for(AgeBracket::BelowSixty);
/// let taxable = TaxableIncome::new(dec!(950000), rules.rounding_step);
///
/// let result = assess_liability(&taxable, &rules.old, table, rules.cess_rate);
///
/// assert_eq!(result.base_tax, dec!(102500));
/// assert_eq!(result.cess, dec!(4100));
/// assert_eq!(result.total_tax, dec!(106600));
/// ```
pub fn assess_liability(
    taxable: &TaxableIncome,
    regime: &RegimeRules,
    slabs: &SlabTable,
    cess_rate: Decimal,
) -> RegimeResult {
    let rebate_applied = taxable.unrounded <= regime.rebate_threshold;
    let base_tax = if rebate_applied {
        debug!(
            taxable_income = %taxable.unrounded,
            threshold = %regime.rebate_threshold,
            "rebate applies; base tax is zero"
        );
        Decimal::ZERO
    } else {
        slab_tax(taxable.rounded, slabs)
    };

    let surcharge = surcharge(taxable.rounded, base_tax, &regime.surcharge_tiers);

    let base_tax = round_to_whole(base_tax);
    let surcharge = round_to_whole(surcharge);
    let tax_with_surcharge = base_tax + surcharge;
    let cess = round_to_whole(tax_with_surcharge * cess_rate);

    RegimeResult {
        taxable_income: taxable.rounded,
        base_tax,
        surcharge,
        cess,
        total_tax: tax_with_surcharge + cess,
        rebate_applied,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{AgeBracket, Regime, Slab, TaxRules};

    fn assess(
        regime: Regime,
        unrounded: Decimal,
    ) -> RegimeResult {
        let rules = TaxRules::builtin();
        let regime_rules = rules.regime(regime);
        let taxable = TaxableIncome::new(unrounded, rules.rounding_step);
        assess_liability(
            &taxable,
            regime_rules,
            regime_rules.slabs.table_for(AgeBracket::BelowSixty),
            rules.cess_rate,
        )
    }

    // =========================================================================
    // TaxableIncome tests
    // =========================================================================

    #[test]
    fn taxable_income_keeps_both_figures() {
        let taxable = TaxableIncome::new(dec!(500004), dec!(10));

        assert_eq!(taxable.unrounded, dec!(500004));
        assert_eq!(taxable.rounded, dec!(500000));
    }

    #[test]
    fn taxable_income_floors_negative_at_zero() {
        let taxable = TaxableIncome::new(dec!(-25000), dec!(10));

        assert_eq!(taxable.unrounded, Decimal::ZERO);
        assert_eq!(taxable.rounded, Decimal::ZERO);
    }

    // =========================================================================
    // Rebate tests
    // =========================================================================

    #[test]
    fn old_rebate_at_threshold() {
        let result = assess(Regime::Old, dec!(500000));

        assert!(result.rebate_applied);
        assert_eq!(result.base_tax, Decimal::ZERO);
        assert_eq!(result.total_tax, Decimal::ZERO);
    }

    #[test]
    fn old_rebate_lost_just_above_threshold() {
        let result = assess(Regime::Old, dec!(500010));

        assert!(!result.rebate_applied);
        // 12,500 + 20% of 10 = 12,502
        assert_eq!(result.base_tax, dec!(12502));
        assert_eq!(result.cess, dec!(500));
        assert_eq!(result.total_tax, dec!(13002));
    }

    #[test]
    fn rebate_uses_unrounded_income() {
        // 5,00,004 rounds down to 5,00,000 but is still above the threshold.
        let result = assess(Regime::Old, dec!(500004));

        assert!(!result.rebate_applied);
        assert_eq!(result.taxable_income, dec!(500000));
        assert_eq!(result.base_tax, dec!(12500));
    }

    #[test]
    fn new_rebate_at_threshold() {
        let result = assess(Regime::New, dec!(700000));

        assert!(result.rebate_applied);
        assert_eq!(result.total_tax, Decimal::ZERO);
    }

    #[test]
    fn new_rebate_lost_just_above_threshold() {
        let result = assess(Regime::New, dec!(700001));

        assert!(!result.rebate_applied);
        assert_eq!(result.taxable_income, dec!(700000));
        // 5% of 3,00,000
        assert_eq!(result.base_tax, dec!(15000));
        assert_eq!(result.total_tax, dec!(15600));
    }

    #[test]
    fn zero_income_counts_as_rebated() {
        let result = assess(Regime::New, Decimal::ZERO);

        assert!(result.rebate_applied);
        assert_eq!(result.taxable_income, Decimal::ZERO);
    }

    // =========================================================================
    // Surcharge and cess tests
    // =========================================================================

    #[test]
    fn no_surcharge_at_fifty_lakh() {
        let result = assess(Regime::Old, dec!(5000000));

        assert_eq!(result.base_tax, dec!(1312500));
        assert_eq!(result.surcharge, Decimal::ZERO);
        assert_eq!(result.cess, dec!(52500));
        assert_eq!(result.total_tax, dec!(1365000));
    }

    #[test]
    fn surcharge_just_above_fifty_lakh() {
        let result = assess(Regime::Old, dec!(5000010));

        // 13,12,503 base, 10% surcharge 1,31,250.3
        assert_eq!(result.base_tax, dec!(1312503));
        assert_eq!(result.surcharge, dec!(131250));
        assert_eq!(result.cess, dec!(57750));
        assert_eq!(result.total_tax, dec!(1501503));
    }

    #[test]
    fn top_surcharge_capped_under_new_regime() {
        let old = assess(Regime::Old, dec!(60000000));
        let new = assess(Regime::New, dec!(60000000));

        assert_eq!(old.surcharge, old.base_tax * dec!(0.37));
        assert_eq!(new.surcharge, new.base_tax * dec!(0.25));
    }

    #[test]
    fn each_stage_is_rounded_separately() {
        let rules = TaxRules::builtin();
        let table = SlabTable::new(vec![Slab::unbounded(dec!(0.05))]).unwrap();
        let regime = crate::RegimeRules {
            rebate_threshold: Decimal::ZERO,
            ..rules.old.clone()
        };
        // Rounded income 10 → base 0.5 → rounds to 1; cess 0.04 → 0.
        let taxable = TaxableIncome::new(dec!(9), rules.rounding_step);

        let result = assess_liability(&taxable, &regime, &table, rules.cess_rate);

        assert_eq!(result.taxable_income, dec!(10));
        assert_eq!(result.base_tax, dec!(1));
        assert_eq!(result.cess, Decimal::ZERO);
        assert_eq!(result.total_tax, dec!(1));
    }
}
