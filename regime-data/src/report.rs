//! Plain-text comparison reports.

use std::fmt;

use regime_core::calculations::common::round_to_whole;
use regime_core::{ComparisonResult, Regime, RegimeResult};
use rust_decimal::Decimal;

use crate::Scenario;

/// Formats a rupee amount with Indian digit grouping (`₹12,34,567`),
/// rounded to whole rupees.
pub fn format_inr(amount: Decimal) -> String {
    let whole = round_to_whole(amount);
    let digits = whole.abs().to_string();
    let sign = if whole < Decimal::ZERO { "-" } else { "" };

    let (head, last_three) = digits.split_at(digits.len().saturating_sub(3));
    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = front;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups.reverse();
    groups.push(last_three);

    format!("{sign}₹{}", groups.join(","))
}

/// Side-by-side breakdown of one scenario's comparison.
pub struct ComparisonReport<'a> {
    scenario: &'a Scenario,
    result: &'a ComparisonResult,
}

impl<'a> ComparisonReport<'a> {
    pub fn new(
        scenario: &'a Scenario,
        result: &'a ComparisonResult,
    ) -> Self {
        Self { scenario, result }
    }

    fn row(
        f: &mut fmt::Formatter<'_>,
        label: &str,
        old: String,
        new: String,
    ) -> fmt::Result {
        writeln!(f, "{label:<26}{old:>16}{new:>16}")
    }

    fn amounts(
        f: &mut fmt::Formatter<'_>,
        label: &str,
        result: &ComparisonResult,
        field: fn(&RegimeResult) -> Decimal,
    ) -> fmt::Result {
        Self::row(
            f,
            label,
            format_inr(field(&result.old_regime)),
            format_inr(field(&result.new_regime)),
        )
    }
}

impl fmt::Display for ComparisonReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let result = self.result;

        writeln!(
            f,
            "{} ({}, {})",
            self.scenario.name, self.scenario.financial_year, self.scenario.age_bracket
        )?;
        Self::row(
            f,
            "",
            Regime::Old.label().to_string(),
            Regime::New.label().to_string(),
        )?;
        Self::amounts(f, "Taxable income", result, |r| r.taxable_income)?;
        Self::amounts(f, "Base tax", result, |r| r.base_tax)?;
        Self::amounts(f, "Surcharge", result, |r| r.surcharge)?;
        Self::amounts(f, "Health & education cess", result, |r| r.cess)?;
        Self::amounts(f, "Total tax", result, |r| r.total_tax)?;

        let rebate = |r: &RegimeResult| if r.rebate_applied { "yes" } else { "no" };
        Self::row(
            f,
            "Rebate u/s 87A",
            rebate(&result.old_regime).to_string(),
            rebate(&result.new_regime).to_string(),
        )?;

        let recommended = result.recommended();
        if result.savings().is_zero() {
            writeln!(
                f,
                "Both regimes cost the same; recommended: {}",
                recommended.label()
            )
        } else {
            writeln!(
                f,
                "Recommended: {}, saving {}",
                recommended.label(),
                format_inr(result.savings())
            )
        }
    }
}
