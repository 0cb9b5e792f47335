//! Deduction codes, their statutory caps, and the per-taxpayer selection.
//!
//! | Code        | Cap        | Treatment                           |
//! |-------------|------------|-------------------------------------|
//! | `80C`       | 1,50,000   | Chapter VI-A                        |
//! | `80CCD(1B)` | 50,000     | Chapter VI-A                        |
//! | `80CCD(2)`  | none       | Employer pension (both regimes)     |
//! | `80D`       | 1,00,000   | Chapter VI-A                        |
//! | `80DD`      | 1,25,000   | Chapter VI-A                        |
//! | `80DDB`     | 1,00,000   | Chapter VI-A                        |
//! | `80E`       | none       | Chapter VI-A                        |
//! | `80EEA`     | 1,50,000   | Chapter VI-A                        |
//! | `80G`       | none       | Chapter VI-A                        |
//! | `80GG`      | 60,000     | Chapter VI-A                        |
//! | `80TTA`     | 10,000     | Chapter VI-A, below 60 only         |
//! | `80TTB`     | 50,000     | Chapter VI-A, 60 and above only     |
//! | `80U`       | 1,25,000   | Chapter VI-A                        |
//! | `HRA`       | none       | Income exemption, Section 10(13A)   |

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::AgeBracket;
use crate::calculations::common::AMOUNT_CEILING;

/// How a deduction code reduces income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeductionKind {
    /// Subtracted from gross income alongside exempt allowances.
    Exemption,
    /// Itemized Chapter VI-A deduction.
    ChapterVia,
    /// Employer's contribution to the pension scheme.
    EmployerPension,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeductionCode {
    #[serde(rename = "80C")]
    Sec80C,
    #[serde(rename = "80CCD(1B)")]
    Sec80Ccd1B,
    #[serde(rename = "80CCD(2)")]
    Sec80Ccd2,
    #[serde(rename = "80D")]
    Sec80D,
    #[serde(rename = "80DD")]
    Sec80Dd,
    #[serde(rename = "80DDB")]
    Sec80Ddb,
    #[serde(rename = "80E")]
    Sec80E,
    #[serde(rename = "80EEA")]
    Sec80Eea,
    #[serde(rename = "80G")]
    Sec80G,
    #[serde(rename = "80GG")]
    Sec80Gg,
    #[serde(rename = "80TTA")]
    Sec80Tta,
    #[serde(rename = "80TTB")]
    Sec80Ttb,
    #[serde(rename = "80U")]
    Sec80U,
    #[serde(rename = "HRA")]
    Hra,
}

impl DeductionCode {
    pub const ALL: [DeductionCode; 14] = [
        Self::Sec80C,
        Self::Sec80Ccd1B,
        Self::Sec80Ccd2,
        Self::Sec80D,
        Self::Sec80Dd,
        Self::Sec80Ddb,
        Self::Sec80E,
        Self::Sec80Eea,
        Self::Sec80G,
        Self::Sec80Gg,
        Self::Sec80Tta,
        Self::Sec80Ttb,
        Self::Sec80U,
        Self::Hra,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sec80C => "80C",
            Self::Sec80Ccd1B => "80CCD(1B)",
            Self::Sec80Ccd2 => "80CCD(2)",
            Self::Sec80D => "80D",
            Self::Sec80Dd => "80DD",
            Self::Sec80Ddb => "80DDB",
            Self::Sec80E => "80E",
            Self::Sec80Eea => "80EEA",
            Self::Sec80G => "80G",
            Self::Sec80Gg => "80GG",
            Self::Sec80Tta => "80TTA",
            Self::Sec80Ttb => "80TTB",
            Self::Sec80U => "80U",
            Self::Hra => "HRA",
        }
    }

    /// Case-insensitive; tolerates a leading `SEC`/`SECTION` and the
    /// `HRA_10_13A` spelling.
    pub fn parse(s: &str) -> Option<Self> {
        let upper = s.trim().to_ascii_uppercase();
        let code = upper
            .strip_prefix("SECTION")
            .or_else(|| upper.strip_prefix("SEC"))
            .unwrap_or(upper.as_str())
            .trim_start_matches([' ', '_', '-', '.']);

        match code {
            "HRA" | "HRA_10_13A" | "10(13A)" => Some(Self::Hra),
            other => Self::ALL.into_iter().find(|c| c.as_str() == other),
        }
    }

    /// Statutory ceiling; `None` when the whole amount is deductible.
    pub fn cap(&self) -> Option<Decimal> {
        match self {
            Self::Sec80C => Some(dec!(150000)),
            Self::Sec80Ccd1B => Some(dec!(50000)),
            Self::Sec80D => Some(dec!(100000)),
            Self::Sec80Dd => Some(dec!(125000)),
            Self::Sec80Ddb => Some(dec!(100000)),
            Self::Sec80Eea => Some(dec!(150000)),
            Self::Sec80Gg => Some(dec!(60000)),
            Self::Sec80Tta => Some(dec!(10000)),
            Self::Sec80Ttb => Some(dec!(50000)),
            Self::Sec80U => Some(dec!(125000)),
            Self::Sec80Ccd2 | Self::Sec80E | Self::Sec80G | Self::Hra => None,
        }
    }

    pub fn kind(&self) -> DeductionKind {
        match self {
            Self::Hra => DeductionKind::Exemption,
            Self::Sec80Ccd2 => DeductionKind::EmployerPension,
            _ => DeductionKind::ChapterVia,
        }
    }

    /// 80TTA is for taxpayers below sixty, 80TTB for sixty and above.
    pub fn is_eligible_for(
        &self,
        age_bracket: AgeBracket,
    ) -> bool {
        match self {
            Self::Sec80Tta => !age_bracket.is_senior(),
            Self::Sec80Ttb => age_bracket.is_senior(),
            _ => true,
        }
    }

    /// Codes a form should offer to a taxpayer in `age_bracket`.
    pub fn available_for(age_bracket: AgeBracket) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|code| code.is_eligible_for(age_bracket))
            .collect()
    }

    /// Limits `amount` to the cap and floors it at zero. Uncapped codes are
    /// still held under [`AMOUNT_CEILING`].
    pub fn cap_amount(
        &self,
        amount: Decimal,
    ) -> Decimal {
        amount
            .max(Decimal::ZERO)
            .min(self.cap().unwrap_or(AMOUNT_CEILING))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Sec80C => "Section 80C (Investments/Expenses)",
            Self::Sec80Ccd1B => "Section 80CCD(1B) (Additional NPS deduction)",
            Self::Sec80Ccd2 => "Section 80CCD(2) (Employer NPS contribution)",
            Self::Sec80D => "Section 80D (Health insurance premiums)",
            Self::Sec80Dd => "Section 80DD (Dependent with disability)",
            Self::Sec80Ddb => "Section 80DDB (Medical for specified diseases)",
            Self::Sec80E => "Section 80E (Education loan interest)",
            Self::Sec80Eea => "Section 80EEA (Affordable housing loan interest)",
            Self::Sec80G => "Section 80G (Donations)",
            Self::Sec80Gg => "Section 80GG (Rent (no HRA))",
            Self::Sec80Tta => "Section 80TTA (Savings interest (non-senior))",
            Self::Sec80Ttb => "Section 80TTB (Interest (senior citizens))",
            Self::Sec80U => "Section 80U (Self-disability)",
            Self::Hra => "HRA Exemption (House Rent Allowance)",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Sec80C => "Investments like LIC, PPF, ELSS, etc.",
            Self::Sec80Ccd1B => "Additional employee's contribution to NPS.",
            Self::Sec80Ccd2 => "Employer's contribution to NPS.",
            Self::Sec80D => "Medical insurance premium paid.",
            Self::Sec80Dd => "Maintenance of a disabled dependent.",
            Self::Sec80Ddb => "Medical treatment for specified diseases.",
            Self::Sec80E => "Interest paid on higher education loan.",
            Self::Sec80Eea => "Interest on housing loan for affordable housing.",
            Self::Sec80G => "Donations to specified funds.",
            Self::Sec80Gg => "Rent paid when HRA is not received.",
            Self::Sec80Tta => "Interest from savings account.",
            Self::Sec80Ttb => "Interest income from deposits.",
            Self::Sec80U => "Deduction for taxpayer with a disability.",
            Self::Hra => "Calculated HRA exemption amount.",
        }
    }
}

impl fmt::Display for DeductionCode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while building a [`DeductionSelection`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeductionError {
    /// The code is age-gated and the taxpayer's bracket does not qualify.
    #[error("deduction {code} is not available for age bracket {age_bracket}")]
    Ineligible {
        code: DeductionCode,
        age_bracket: AgeBracket,
    },
}

/// Claimed amount per deduction code.
///
/// Amounts are clamped to the code's cap when selected. A selection that
/// arrives through deserialization is not clamped here, so the engine clamps
/// again when it sums the selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeductionSelection {
    amounts: BTreeMap<DeductionCode, Decimal>,
}

impl DeductionSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `amount` under `code` for a taxpayer in `age_bracket`,
    /// replacing any earlier claim. Returns the amount actually recorded.
    ///
    /// # Errors
    ///
    /// [`DeductionError::Ineligible`] when `code` is age-gated away from
    /// `age_bracket`.
    pub fn select(
        &mut self,
        code: DeductionCode,
        amount: Decimal,
        age_bracket: AgeBracket,
    ) -> Result<Decimal, DeductionError> {
        if !code.is_eligible_for(age_bracket) {
            return Err(DeductionError::Ineligible { code, age_bracket });
        }

        let clamped = code.cap_amount(amount);
        if clamped != amount {
            warn!(
                code = %code,
                claimed = %amount,
                recorded = %clamped,
                "deduction claim clamped to statutory limit"
            );
        }
        self.amounts.insert(code, clamped);
        Ok(clamped)
    }

    /// Builds a selection from raw `(code, amount)` pairs as a form submits
    /// them. Unknown and age-ineligible codes are skipped with a warning.
    pub fn from_codes<'a, I>(
        pairs: I,
        age_bracket: AgeBracket,
    ) -> Self
    where
        I: IntoIterator<Item = (&'a str, Decimal)>,
    {
        let mut selection = Self::new();
        for (raw, amount) in pairs {
            let Some(code) = DeductionCode::parse(raw) else {
                warn!(code = raw, "ignoring unknown deduction code");
                continue;
            };
            if let Err(e) = selection.select(code, amount, age_bracket) {
                warn!(error = %e, "ignoring deduction");
            }
        }
        selection
    }

    /// Recorded amount for `code`, zero when not selected.
    pub fn amount(
        &self,
        code: DeductionCode,
    ) -> Decimal {
        self.amounts.get(&code).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn is_selected(
        &self,
        code: DeductionCode,
    ) -> bool {
        self.amounts.contains_key(&code)
    }

    pub fn remove(
        &mut self,
        code: DeductionCode,
    ) -> Option<Decimal> {
        self.amounts.remove(&code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (DeductionCode, Decimal)> + '_ {
        self.amounts.iter().map(|(code, amount)| (*code, *amount))
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// Sum of the selected amounts whose kind is in `kinds`, each clamped
    /// to its cap.
    pub fn total_for(
        &self,
        kinds: &[DeductionKind],
    ) -> Decimal {
        self.iter()
            .filter(|(code, _)| kinds.contains(&code.kind()))
            .map(|(code, amount)| code.cap_amount(amount))
            .sum()
    }
}
