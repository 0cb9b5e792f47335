use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AgeBracket, RulesError};

/// One income band taxed at a single marginal rate.
///
/// The band runs from the previous slab's `upper_bound` (or zero) up to and
/// including `upper_bound`. `None` marks the open-ended top band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slab {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

impl Slab {
    pub fn bounded(
        upper_bound: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            rate,
        }
    }

    pub fn unbounded(rate: Decimal) -> Self {
        Self {
            upper_bound: None,
            rate,
        }
    }
}

/// Ordered progressive schedule: strictly increasing bounds, last one open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlabTable {
    slabs: Vec<Slab>,
}

impl SlabTable {
    /// # Errors
    ///
    /// Any [`RulesError`] reported by [`SlabTable::validate`].
    pub fn new(slabs: Vec<Slab>) -> Result<Self, RulesError> {
        let table = Self { slabs };
        table.validate()?;
        Ok(table)
    }

    pub(crate) fn from_slabs_unchecked(slabs: Vec<Slab>) -> Self {
        Self { slabs }
    }

    pub fn slabs(&self) -> &[Slab] {
        &self.slabs
    }

    /// Checks the table invariants.
    ///
    /// # Errors
    ///
    /// - [`RulesError::EmptySlabTable`] if there are no slabs
    /// - [`RulesError::InvalidRate`] if a rate is outside `[0, 1]`
    /// - [`RulesError::NegativeAmount`] if a bound is negative
    /// - [`RulesError::NonIncreasingBounds`] if bounds do not strictly increase
    /// - [`RulesError::UnboundedSlabNotLast`] if an open slab is followed by another
    /// - [`RulesError::MissingUnboundedSlab`] if the last slab has a bound
    pub fn validate(&self) -> Result<(), RulesError> {
        let Some(last) = self.slabs.last() else {
            return Err(RulesError::EmptySlabTable);
        };

        let mut previous = Decimal::ZERO;
        for (index, slab) in self.slabs.iter().enumerate() {
            if slab.rate < Decimal::ZERO || slab.rate > Decimal::ONE {
                return Err(RulesError::InvalidRate(slab.rate));
            }
            match slab.upper_bound {
                Some(bound) if bound < Decimal::ZERO => {
                    return Err(RulesError::NegativeAmount(bound));
                }
                Some(bound) if index > 0 && bound <= previous => {
                    return Err(RulesError::NonIncreasingBounds {
                        previous,
                        next: bound,
                    });
                }
                Some(bound) => previous = bound,
                None if index + 1 < self.slabs.len() => {
                    return Err(RulesError::UnboundedSlabNotLast(index));
                }
                None => {}
            }
        }

        if last.upper_bound.is_some() {
            return Err(RulesError::MissingUnboundedSlab);
        }
        Ok(())
    }
}

/// Old-regime tables, one per age bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeSlabTables {
    #[serde(rename = "below-60")]
    pub below_sixty: SlabTable,
    pub senior: SlabTable,
    #[serde(rename = "super-senior")]
    pub super_senior: SlabTable,
}

/// The slab schedule of a regime: either shared by every age bracket or
/// keyed by bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlabSchedule {
    Shared(SlabTable),
    ByAge(AgeSlabTables),
}

impl SlabSchedule {
    pub fn table_for(
        &self,
        age_bracket: AgeBracket,
    ) -> &SlabTable {
        match self {
            Self::Shared(table) => table,
            Self::ByAge(tables) => match age_bracket {
                AgeBracket::BelowSixty => &tables.below_sixty,
                AgeBracket::Senior => &tables.senior,
                AgeBracket::SuperSenior => &tables.super_senior,
            },
        }
    }

    pub fn validate(&self) -> Result<(), RulesError> {
        AgeBracket::ALL
            .into_iter()
            .try_for_each(|age| self.table_for(age).validate())
    }
}
