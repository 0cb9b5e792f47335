//! Old-versus-new regime comparison.
//!
//! # Computation
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Exemptions: exempt allowances + HRA exemption |
//! | 2    | Self-occupied home-loan interest, capped at 2,00,000 |
//! | 3    | Gross total income: receipts − step 1 − step 2 − let-out interest (floored at 0) |
//! | 4    | Less the regime's standard deduction |
//! | 5    | Less the deductions the regime recognises (floored at 0) |
//! | 6    | Rebate check on the unrounded figure; slabs on the figure rounded to 10 |
//! | 7    | Surcharge on base tax, each rounded; cess on their sum |
//!
//! Steps 1 to 3 are common to both regimes. Steps 4 to 7 use the regime's
//! own [`RegimeRules`].
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use regime_core::{AgeBracket, DeductionSelection, IncomeBreakdown, Regime, compare_regimes};
//!
//! let income = IncomeBreakdown::salaried(dec!(1000000));
//! let result = compare_regimes(&income, AgeBracket::BelowSixty, &DeductionSelection::new());
//!
//! assert_eq!(result.old_regime.total_tax, dec!(106600));
//! assert_eq!(result.new_regime.total_tax, dec!(33800));
//! assert_eq!(result.recommended(), Regime::New);
//! ```

use std::sync::LazyLock;

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::{TaxableIncome, assess_liability};
use crate::{
    AgeBracket, ComparisonResult, DeductionKind, DeductionSelection, IncomeBreakdown, Regime,
    RegimeResult, RegimeRules, TaxRules,
};

static BUILTIN_RULES: LazyLock<TaxRules> = LazyLock::new(TaxRules::builtin);

/// Compares both regimes under the built-in statutory rules.
pub fn compare_regimes(
    income: &IncomeBreakdown,
    age_bracket: AgeBracket,
    deductions: &DeductionSelection,
) -> ComparisonResult {
    TaxEngine::builtin().compare(income, age_bracket, deductions)
}

/// Regime calculator over a borrowed rule set.
///
/// Holds no state besides the rules, so one engine can serve any number of
/// callers and threads.
#[derive(Debug, Clone, Copy)]
pub struct TaxEngine<'a> {
    rules: &'a TaxRules,
}

impl<'a> TaxEngine<'a> {
    /// The rules are expected to have passed [`TaxRules::validate`].
    pub fn new(rules: &'a TaxRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'a TaxRules {
        self.rules
    }

    /// Runs both regimes independently and returns them side by side.
    pub fn compare(
        &self,
        income: &IncomeBreakdown,
        age_bracket: AgeBracket,
        deductions: &DeductionSelection,
    ) -> ComparisonResult {
        let comparison = ComparisonResult {
            old_regime: self.assess(Regime::Old, income, age_bracket, deductions),
            new_regime: self.assess(Regime::New, income, age_bracket, deductions),
        };

        debug!(
            age_bracket = %age_bracket,
            old_total = %comparison.old_regime.total_tax,
            new_total = %comparison.new_regime.total_tax,
            recommended = %comparison.recommended(),
            "regime comparison complete"
        );
        comparison
    }

    /// Liability under a single regime.
    pub fn assess(
        &self,
        regime: Regime,
        income: &IncomeBreakdown,
        age_bracket: AgeBracket,
        deductions: &DeductionSelection,
    ) -> RegimeResult {
        let regime_rules = self.rules.regime(regime);
        let income = income.sanitized();

        let gross_total_income = self.gross_total_income(&income, deductions);
        let taxable = self.taxable_income(gross_total_income, regime_rules, deductions);
        let slabs = regime_rules.slabs.table_for(age_bracket);

        let result = assess_liability(&taxable, regime_rules, slabs, self.rules.cess_rate);

        debug!(
            regime = regime.as_str(),
            gross_total_income = %gross_total_income,
            taxable_income = %taxable.unrounded,
            base_tax = %result.base_tax,
            surcharge = %result.surcharge,
            cess = %result.cess,
            total_tax = %result.total_tax,
            rebate_applied = result.rebate_applied,
            "regime assessed"
        );
        result
    }

    /// Exempt allowances plus any exemption-kind deduction (HRA).
    fn total_exemptions(
        &self,
        income: &IncomeBreakdown,
        deductions: &DeductionSelection,
    ) -> Decimal {
        income.exempt_allowances + deductions.total_for(&[DeductionKind::Exemption])
    }

    /// Self-occupied home-loan interest, limited to the statutory cap.
    fn self_occupied_loss(
        &self,
        income: &IncomeBreakdown,
    ) -> Decimal {
        income
            .self_occupied_interest
            .min(self.rules.self_occupied_interest_cap)
    }

    /// Income common to both regimes, floored at zero. Let-out interest is
    /// set off in full.
    fn gross_total_income(
        &self,
        income: &IncomeBreakdown,
        deductions: &DeductionSelection,
    ) -> Decimal {
        let gross = income.total_receipts()
            - self.total_exemptions(income, deductions)
            - self.self_occupied_loss(income)
            - income.let_out_interest;
        gross.max(Decimal::ZERO)
    }

    /// Sum of the selected deductions this regime recognises.
    fn regime_deductions(
        &self,
        regime_rules: &RegimeRules,
        deductions: &DeductionSelection,
    ) -> Decimal {
        deductions.total_for(&regime_rules.deduction_kinds)
    }

    fn taxable_income(
        &self,
        gross_total_income: Decimal,
        regime_rules: &RegimeRules,
        deductions: &DeductionSelection,
    ) -> TaxableIncome {
        let unrounded = gross_total_income
            - regime_rules.standard_deduction
            - self.regime_deductions(regime_rules, deductions);
        TaxableIncome::new(unrounded, self.rules.rounding_step)
    }
}

impl TaxEngine<'static> {
    /// Engine over the built-in statutory rules.
    pub fn builtin() -> Self {
        Self::new(&BUILTIN_RULES)
    }
}
