use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::bounded_amount;

/// Annual income and house-property figures, in whole rupees.
///
/// Every field defaults to zero so callers only fill what they have.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeBreakdown {
    /// Gross salary.
    pub salary: Decimal,

    /// Allowances exempt from tax (LTA and similar).
    pub exempt_allowances: Decimal,

    /// Interest from savings, deposits and bonds.
    pub interest: Decimal,

    /// Home-loan interest on a self-occupied property (Section 24(b)).
    pub self_occupied_interest: Decimal,

    /// Rent received.
    pub rental: Decimal,

    /// Home-loan interest on a let-out property.
    pub let_out_interest: Decimal,

    /// Income from virtual digital assets.
    pub digital_assets: Decimal,

    pub other: Decimal,
}

impl IncomeBreakdown {
    /// Salary-only income, the common case.
    pub fn salaried(salary: Decimal) -> Self {
        Self {
            salary,
            ..Default::default()
        }
    }

    /// Returns a copy with every negative field replaced by zero and every
    /// field limited to [`AMOUNT_CEILING`](crate::calculations::common::AMOUNT_CEILING).
    pub fn sanitized(&self) -> Self {
        Self {
            salary: bounded_amount("salary", self.salary),
            exempt_allowances: bounded_amount("exempt_allowances", self.exempt_allowances),
            interest: bounded_amount("interest", self.interest),
            self_occupied_interest: bounded_amount(
                "self_occupied_interest",
                self.self_occupied_interest,
            ),
            rental: bounded_amount("rental", self.rental),
            let_out_interest: bounded_amount("let_out_interest", self.let_out_interest),
            digital_assets: bounded_amount("digital_assets", self.digital_assets),
            other: bounded_amount("other", self.other),
        }
    }

    /// Sum of every income head before any exemption or loss is set off.
    pub fn total_receipts(&self) -> Decimal {
        self.salary + self.interest + self.rental + self.digital_assets + self.other
    }
}
