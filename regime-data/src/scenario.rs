//! CSV loader for batch comparison scenarios.
//!
//! ## CSV Format
//!
//! One row per taxpayer. Headers are matched by name, so column order does
//! not matter. Amount columns may be left empty (treated as 0), may use
//! either digit grouping (`12,34,567` or `1,234,567`, quoted), and fall back
//! to 0 with a warning when they are not numbers.
//!
//! | Column                   | Required | Notes                                        |
//! |--------------------------|----------|----------------------------------------------|
//! | `name`                   | no       | Defaults to `row N`                          |
//! | `financial_year`         | no       | `2024-25` (default) or `2025-26`             |
//! | `age_bracket`            | yes      | `below-60`, `senior` or `super-senior`       |
//! | `salary`                 | no       | Gross salary                                 |
//! | `exempt_allowances`      | no       | Allowances exempt under section 10           |
//! | `interest`               | no       | Savings and deposit interest                 |
//! | `self_occupied_interest` | no       | Home-loan interest, self-occupied property   |
//! | `rental`                 | no       | Rent received                                |
//! | `let_out_interest`       | no       | Home-loan interest, let-out property         |
//! | `digital_assets`         | no       | Income from virtual digital assets           |
//! | `other`                  | no       | Any other income                             |
//! | `deductions`             | no       | `CODE=AMOUNT` pairs separated by `;`         |
//!
//! Unknown or age-ineligible deduction codes are skipped with a warning.
//!
//! ### Example
//!
//! ```csv
//! name,financial_year,age_bracket,salary,deductions
//! Asha,2024-25,below-60,1200000,80C=150000;80D=25000
//! Ravi,2025-26,senior,"9,50,000",80TTB=40000
//! ```

use std::fmt;
use std::io::Read;
use std::path::Path;

use regime_core::{AgeBracket, ComparisonResult, DeductionSelection, IncomeBreakdown, TaxEngine};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;

use crate::parse::parse_amount;

/// Financial year a scenario is filed for. Reported alongside results; the
/// computation does not depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FinancialYear {
    #[default]
    Fy2024_25,
    Fy2025_26,
}

impl FinancialYear {
    pub const ALL: [FinancialYear; 2] = [Self::Fy2024_25, Self::Fy2025_26];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fy2024_25 => "2024-25",
            Self::Fy2025_26 => "2025-26",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Fy2024_25 => "FY 2024-2025",
            Self::Fy2025_26 => "FY 2025-2026",
        }
    }

    /// Accepts `2024-25`, `2024-2025` and an optional `FY` prefix.
    pub fn parse(s: &str) -> Option<Self> {
        let upper = s.trim().to_ascii_uppercase();
        let year = upper
            .strip_prefix("FY")
            .unwrap_or(upper.as_str())
            .trim();

        match year {
            "2024-25" | "2024-2025" => Some(Self::Fy2024_25),
            "2025-26" | "2025-2026" => Some(Self::Fy2025_26),
            _ => None,
        }
    }
}

impl fmt::Display for FinancialYear {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One taxpayer's inputs, ready for comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    pub financial_year: FinancialYear,
    pub age_bracket: AgeBracket,
    pub income: IncomeBreakdown,
    pub deductions: DeductionSelection,
}

impl Scenario {
    pub fn compare(
        &self,
        engine: &TaxEngine<'_>,
    ) -> ComparisonResult {
        engine.compare(&self.income, self.age_bracket, &self.deductions)
    }
}

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    name: Option<String>,
    financial_year: Option<String>,
    age_bracket: String,
    salary: Option<String>,
    exempt_allowances: Option<String>,
    interest: Option<String>,
    self_occupied_interest: Option<String>,
    rental: Option<String>,
    let_out_interest: Option<String>,
    digital_assets: Option<String>,
    other: Option<String>,
    deductions: Option<String>,
}

/// Errors that can occur while loading scenario CSV data.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioLoadError {
    /// Bad structure, a missing required column, or a wrong column count.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("failed to read scenarios: {0}")]
    Io(#[from] std::io::Error),

    /// `row` is 1-based (header = row 0).
    #[error("unrecognised age bracket '{value}' on row {row}")]
    InvalidAgeBracket { value: String, row: usize },

    #[error("unrecognised financial year '{value}' on row {row}")]
    InvalidFinancialYear { value: String, row: usize },
}

fn amount(cell: Option<&str>) -> Decimal {
    cell.map_or(Decimal::ZERO, parse_amount)
}

/// Splits a `80C=150000;80D=25000` cell into raw pairs. Entries without an
/// `=` are skipped with a warning.
fn deduction_pairs(
    cell: &str,
    row_number: usize,
) -> Vec<(&str, Decimal)> {
    cell.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| match entry.split_once('=') {
            Some((code, value)) => Some((code.trim(), parse_amount(value))),
            None => {
                warn!(entry, row = row_number, "ignoring deduction entry without an amount");
                None
            }
        })
        .collect()
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<Scenario, ScenarioLoadError> {
    let age_bracket = AgeBracket::parse(&row.age_bracket).ok_or_else(|| {
        ScenarioLoadError::InvalidAgeBracket {
            value: row.age_bracket.clone(),
            row: row_number,
        }
    })?;

    let financial_year = match row.financial_year.as_deref() {
        None => FinancialYear::default(),
        Some(value) => FinancialYear::parse(value).ok_or_else(|| {
            ScenarioLoadError::InvalidFinancialYear {
                value: value.to_string(),
                row: row_number,
            }
        })?,
    };

    let income = IncomeBreakdown {
        salary: amount(row.salary.as_deref()),
        exempt_allowances: amount(row.exempt_allowances.as_deref()),
        interest: amount(row.interest.as_deref()),
        self_occupied_interest: amount(row.self_occupied_interest.as_deref()),
        rental: amount(row.rental.as_deref()),
        let_out_interest: amount(row.let_out_interest.as_deref()),
        digital_assets: amount(row.digital_assets.as_deref()),
        other: amount(row.other.as_deref()),
    };

    let deductions = match row.deductions.as_deref() {
        Some(cell) => DeductionSelection::from_codes(deduction_pairs(cell, row_number), age_bracket),
        None => DeductionSelection::new(),
    };

    Ok(Scenario {
        name: row.name.unwrap_or_else(|| format!("row {row_number}")),
        financial_year,
        age_bracket,
        income,
        deductions,
    })
}

/// Parses scenario CSV from any reader. Rows are returned in file order.
///
/// # Errors
///
/// * [`ScenarioLoadError::Parse`] if the CSV is structurally invalid or the
///   `age_bracket` column is missing.
/// * [`ScenarioLoadError::InvalidAgeBracket`] or
///   [`ScenarioLoadError::InvalidFinancialYear`] for unrecognised values.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<Scenario>, ScenarioLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(reader);

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

pub fn load_from_str(input: &str) -> Result<Vec<Scenario>, ScenarioLoadError> {
    load_from_reader(input.as_bytes())
}

pub fn load_from_file(path: &Path) -> Result<Vec<Scenario>, ScenarioLoadError> {
    let file = std::fs::File::open(path)?;
    load_from_reader(file)
}
