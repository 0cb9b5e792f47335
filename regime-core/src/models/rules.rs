//! Statutory constants for both regimes.
//!
//! Everything the engine needs to know about the law lives in a [`TaxRules`]
//! value, so a new slab table or threshold is a data change. The built-in
//! rules are:
//!
//! | Constant                   | Old regime | New regime |
//! |----------------------------|------------|------------|
//! | Standard deduction         | 50,000     | 75,000     |
//! | Rebate threshold (87A)     | 5,00,000   | 7,00,000   |
//! | Top surcharge (above 5 Cr) | 37%        | 25%        |
//! | Deductions recognised      | Chapter VI-A except 80CCD(2) | 80CCD(2) only |
//!
//! Shared by both: cess 4%, self-occupied home-loan interest capped at
//! 2,00,000, taxable income rounded to the nearest 10.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{AgeSlabTables, DeductionKind, Regime, Slab, SlabSchedule, SlabTable};

/// Reasons a rule set is unusable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RulesError {
    #[error("slab table has no slabs")]
    EmptySlabTable,

    #[error("slab {0} has no upper bound but is not the last slab")]
    UnboundedSlabNotLast(usize),

    #[error("last slab must have no upper bound")]
    MissingUnboundedSlab,

    #[error("slab bounds must strictly increase: {next} follows {previous}")]
    NonIncreasingBounds { previous: Decimal, next: Decimal },

    #[error("rate must be between 0 and 1, got {0}")]
    InvalidRate(Decimal),

    #[error("amount must be non-negative, got {0}")]
    NegativeAmount(Decimal),

    #[error("surcharge tier thresholds must strictly increase: {next} follows {previous}")]
    InvalidSurchargeTiers { previous: Decimal, next: Decimal },

    #[error("rounding step must be positive, got {0}")]
    InvalidRoundingStep(Decimal),
}

/// Surcharge rate applied to the whole base tax once taxable income
/// exceeds `above`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurchargeTier {
    pub above: Decimal,
    pub rate: Decimal,
}

impl SurchargeTier {
    pub fn new(
        above: Decimal,
        rate: Decimal,
    ) -> Self {
        Self { above, rate }
    }
}

/// Constants that differ between the regimes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeRules {
    pub standard_deduction: Decimal,

    /// Taxable income at or below this (before rounding) pays no base tax.
    pub rebate_threshold: Decimal,

    /// Which selected deductions reduce taxable income under this regime.
    pub deduction_kinds: Vec<DeductionKind>,

    /// Ascending by `above`.
    pub surcharge_tiers: Vec<SurchargeTier>,

    pub slabs: SlabSchedule,
}

impl RegimeRules {
    pub fn validate(&self) -> Result<(), RulesError> {
        for amount in [self.standard_deduction, self.rebate_threshold] {
            if amount < Decimal::ZERO {
                return Err(RulesError::NegativeAmount(amount));
            }
        }

        let mut previous: Option<Decimal> = None;
        for tier in &self.surcharge_tiers {
            if tier.rate < Decimal::ZERO || tier.rate > Decimal::ONE {
                return Err(RulesError::InvalidRate(tier.rate));
            }
            if tier.above < Decimal::ZERO {
                return Err(RulesError::NegativeAmount(tier.above));
            }
            if let Some(previous) = previous.filter(|p| tier.above <= *p) {
                return Err(RulesError::InvalidSurchargeTiers {
                    previous,
                    next: tier.above,
                });
            }
            previous = Some(tier.above);
        }

        self.slabs.validate()
    }
}

/// The complete rule set consumed by [`crate::TaxEngine`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRules {
    /// Health and education cess on base tax plus surcharge.
    pub cess_rate: Decimal,

    /// Taxable income is rounded to a multiple of this before the slabs apply.
    pub rounding_step: Decimal,

    /// Most self-occupied home-loan interest that may be set off.
    pub self_occupied_interest_cap: Decimal,

    pub old: RegimeRules,
    pub new: RegimeRules,
}

impl TaxRules {
    /// The statutory rules as currently enacted.
    pub fn builtin() -> Self {
        Self {
            cess_rate: dec!(0.04),
            rounding_step: dec!(10),
            self_occupied_interest_cap: dec!(200000),
            old: RegimeRules {
                standard_deduction: dec!(50000),
                rebate_threshold: dec!(500000),
                deduction_kinds: vec![DeductionKind::ChapterVia],
                surcharge_tiers: surcharge_tiers(dec!(0.37)),
                slabs: SlabSchedule::ByAge(AgeSlabTables {
                    below_sixty: builtin_table(vec![
                        Slab::bounded(dec!(250000), dec!(0)),
                        Slab::bounded(dec!(500000), dec!(0.05)),
                        Slab::bounded(dec!(1000000), dec!(0.20)),
                        Slab::unbounded(dec!(0.30)),
                    ]),
                    senior: builtin_table(vec![
                        Slab::bounded(dec!(300000), dec!(0)),
                        Slab::bounded(dec!(500000), dec!(0.05)),
                        Slab::bounded(dec!(1000000), dec!(0.20)),
                        Slab::unbounded(dec!(0.30)),
                    ]),
                    super_senior: builtin_table(vec![
                        Slab::bounded(dec!(500000), dec!(0)),
                        Slab::bounded(dec!(1000000), dec!(0.20)),
                        Slab::unbounded(dec!(0.30)),
                    ]),
                }),
            },
            new: RegimeRules {
                standard_deduction: dec!(75000),
                rebate_threshold: dec!(700000),
                deduction_kinds: vec![DeductionKind::EmployerPension],
                surcharge_tiers: surcharge_tiers(dec!(0.25)),
                slabs: SlabSchedule::Shared(builtin_table(vec![
                    Slab::bounded(dec!(400000), dec!(0)),
                    Slab::bounded(dec!(800000), dec!(0.05)),
                    Slab::bounded(dec!(1200000), dec!(0.10)),
                    Slab::bounded(dec!(1600000), dec!(0.15)),
                    Slab::bounded(dec!(2000000), dec!(0.20)),
                    Slab::bounded(dec!(2400000), dec!(0.25)),
                    Slab::unbounded(dec!(0.30)),
                ])),
            },
        }
    }

    pub fn regime(
        &self,
        regime: Regime,
    ) -> &RegimeRules {
        match regime {
            Regime::Old => &self.old,
            Regime::New => &self.new,
        }
    }

    /// Checks every table and constant.
    ///
    /// # Errors
    ///
    /// The first [`RulesError`] found.
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.cess_rate < Decimal::ZERO || self.cess_rate > Decimal::ONE {
            return Err(RulesError::InvalidRate(self.cess_rate));
        }
        if self.rounding_step <= Decimal::ZERO {
            return Err(RulesError::InvalidRoundingStep(self.rounding_step));
        }
        if self.self_occupied_interest_cap < Decimal::ZERO {
            return Err(RulesError::NegativeAmount(self.self_occupied_interest_cap));
        }
        self.old.validate()?;
        self.new.validate()
    }
}

impl Default for TaxRules {
    fn default() -> Self {
        Self::builtin()
    }
}

fn surcharge_tiers(top_rate: Decimal) -> Vec<SurchargeTier> {
    vec![
        SurchargeTier::new(dec!(5000000), dec!(0.10)),
        SurchargeTier::new(dec!(10000000), dec!(0.15)),
        SurchargeTier::new(dec!(20000000), dec!(0.25)),
        SurchargeTier::new(dec!(50000000), top_rate),
    ]
}

// Unvalidated; `builtin_rules_are_valid` covers these tables.
fn builtin_table(slabs: Vec<Slab>) -> SlabTable {
    SlabTable::from_slabs_unchecked(slabs)
}
