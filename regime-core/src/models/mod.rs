mod age_bracket;
mod deduction;
mod income;
mod regime;
mod result;
mod rules;
mod slab;

pub use age_bracket::AgeBracket;
pub use deduction::{DeductionCode, DeductionError, DeductionKind, DeductionSelection};
pub use income::IncomeBreakdown;
pub use regime::Regime;
pub use result::{ComparisonResult, RegimeResult};
pub use rules::{RegimeRules, RulesError, SurchargeTier, TaxRules};
pub use slab::{AgeSlabTables, Slab, SlabSchedule, SlabTable};
