use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Regime;

/// Tax payable under one regime. All amounts are whole rupees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeResult {
    /// Taxable income after rounding to the nearest ten.
    pub taxable_income: Decimal,

    /// Tax from the slabs, before surcharge and cess. Zero under rebate.
    pub base_tax: Decimal,

    pub surcharge: Decimal,

    /// Health and education cess on base tax plus surcharge.
    pub cess: Decimal,

    pub total_tax: Decimal,

    /// Section 87A rebate wiped out the base tax.
    pub rebate_applied: bool,
}

/// Side-by-side outcome of both regimes for one taxpayer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub old_regime: RegimeResult,
    pub new_regime: RegimeResult,
}

impl ComparisonResult {
    pub fn result(
        &self,
        regime: Regime,
    ) -> &RegimeResult {
        match regime {
            Regime::Old => &self.old_regime,
            Regime::New => &self.new_regime,
        }
    }

    /// The regime with the lower total; the new regime wins a tie.
    pub fn recommended(&self) -> Regime {
        if self.old_regime.total_tax < self.new_regime.total_tax {
            Regime::Old
        } else {
            Regime::New
        }
    }

    /// How much the recommended regime saves over the other one.
    pub fn savings(&self) -> Decimal {
        (self.old_regime.total_tax - self.new_regime.total_tax).abs()
    }
}
