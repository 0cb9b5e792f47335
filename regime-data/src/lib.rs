//! Input and output around the regime comparison engine: amount parsing,
//! scenario CSV files, rule overrides in TOML, and text reports.

pub mod parse;
pub mod report;
pub mod rules_file;
pub mod scenario;

pub use parse::{ParseDecimalError, parse_amount, parse_decimal};
pub use report::{ComparisonReport, format_inr};
pub use rules_file::{RulesFileError, load_rules, parse_rules, render_rules};
pub use scenario::{FinancialYear, Scenario, ScenarioLoadError};
