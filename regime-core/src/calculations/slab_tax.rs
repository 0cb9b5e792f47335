use rust_decimal::Decimal;

use crate::SlabTable;

/// Progressive tax on `taxable_income` under `table`.
///
/// Each slab's rate applies only to the part of the income inside that band.
/// The loop stops as soon as the income is used up. The result is not
/// rounded.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use regime_core::{AgeBracket, Regime, TaxRules};
/// use regime_core::calculations::slab_tax;
///
/// let rules = TaxRules::builtin();
/// let table = rules.regime(Regime::Old).slabs.table_for(AgeBracket::BelowSixty);
///
/// // 0% on 2.5L, 5% on the next 2.5L, 20% on 4.5L
/// assert_eq!(slab_tax(dec!(950000), table), dec!(102500));
/// ```
pub fn slab_tax(
    taxable_income: Decimal,
    table: &SlabTable,
) -> Decimal {
    let mut tax = Decimal::ZERO;
    let mut remaining = taxable_income;
    let mut lower = Decimal::ZERO;

    for slab in table.slabs() {
        if remaining <= Decimal::ZERO {
            break;
        }

        let portion = match slab.upper_bound {
            Some(upper) => remaining.min(upper - lower),
            None => remaining,
        };
        tax += portion * slab.rate;
        remaining -= portion;

        if let Some(upper) = slab.upper_bound {
            lower = upper;
        }
    }

    tax
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{AgeBracket, Regime, TaxRules};

    fn old_table(age: AgeBracket) -> SlabTable {
        TaxRules::builtin()
            .regime(Regime::Old)
            .slabs
            .table_for(age)
            .clone()
    }

    fn new_table() -> SlabTable {
        TaxRules::builtin()
            .regime(Regime::New)
            .slabs
            .table_for(AgeBracket::BelowSixty)
            .clone()
    }

    #[test]
    fn zero_income_pays_nothing() {
        assert_eq!(slab_tax(Decimal::ZERO, &new_table()), Decimal::ZERO);
    }

    #[test]
    fn income_inside_nil_band_pays_nothing() {
        let table = old_table(AgeBracket::BelowSixty);

        assert_eq!(slab_tax(dec!(250000), &table), Decimal::ZERO);
    }

    #[test]
    fn first_taxable_band() {
        let table = old_table(AgeBracket::BelowSixty);

        // 5% of 1,00,000
        assert_eq!(slab_tax(dec!(350000), &table), dec!(5000));
    }

    #[test]
    fn old_regime_below_sixty_top_band() {
        let table = old_table(AgeBracket::BelowSixty);

        // 12,500 + 1,00,000 + 30% of 5,00,000
        assert_eq!(slab_tax(dec!(1500000), &table), dec!(262500));
    }

    #[test]
    fn senior_nil_band_is_wider() {
        let table = old_table(AgeBracket::Senior);

        // 5% of 2,00,000 + 20% of 4,50,000
        assert_eq!(slab_tax(dec!(950000), &table), dec!(100000));
    }

    #[test]
    fn super_senior_skips_five_percent_band() {
        let table = old_table(AgeBracket::SuperSenior);

        // 20% of 4,50,000
        assert_eq!(slab_tax(dec!(950000), &table), dec!(90000));
    }

    #[test]
    fn new_regime_middle_band() {
        // 20,000 + 10% of 1,25,000
        assert_eq!(slab_tax(dec!(925000), &new_table()), dec!(32500));
    }

    #[test]
    fn new_regime_top_band() {
        // 20,000 + 40,000 + 60,000 + 80,000 + 1,00,000 + 30% of 6,00,000
        assert_eq!(slab_tax(dec!(3000000), &new_table()), dec!(480000));
    }

    #[test]
    fn exact_band_boundary_uses_lower_rate() {
        // 20,000 + 40,000 with nothing in the 15% band
        assert_eq!(slab_tax(dec!(1200000), &new_table()), dec!(60000));
    }

    #[test]
    fn result_is_not_rounded() {
        // 5% of 10.5
        let table = SlabTable::new(vec![crate::Slab::unbounded(dec!(0.05))]).unwrap();

        assert_eq!(slab_tax(dec!(10.5), &table), dec!(0.525));
    }
}
