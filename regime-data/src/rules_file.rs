//! Rule-set overrides stored as TOML.
//!
//! The file mirrors [`TaxRules`] field for field. Rates should be quoted
//! (`rate = "0.05"`) so they reach [`rust_decimal::Decimal`] without passing
//! through a float; whole-rupee amounts can stay bare integers. A slab
//! schedule is either one array shared by every age bracket or a table keyed
//! by `below-60`, `senior` and `super-senior`.
//!
//! ```toml
//! cess_rate = "0.04"
//! rounding_step = 10
//! self_occupied_interest_cap = 200000
//!
//! [new]
//! standard_deduction = 75000
//! rebate_threshold = 700000
//! deduction_kinds = ["employer-pension"]
//! surcharge_tiers = [{ above = 5000000, rate = "0.10" }]
//! slabs = [
//!     { upper_bound = 400000, rate = "0" },
//!     { rate = "0.30" },
//! ]
//! ```

use std::path::{Path, PathBuf};

use regime_core::{RulesError, TaxRules};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum RulesFileError {
    #[error("failed to read rules file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid rules TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("rules failed validation: {0}")]
    Invalid(#[from] RulesError),
}

/// Parses and validates a rule set.
///
/// # Errors
///
/// [`RulesFileError::Toml`] for syntax or shape errors,
/// [`RulesFileError::Invalid`] when the tables break a rule invariant.
pub fn parse_rules(input: &str) -> Result<TaxRules, RulesFileError> {
    let rules: TaxRules = toml::from_str(input)?;
    rules.validate()?;
    Ok(rules)
}

pub fn load_rules(path: &Path) -> Result<TaxRules, RulesFileError> {
    let content = std::fs::read_to_string(path).map_err(|source| RulesFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rules = parse_rules(&content)?;
    info!(path = %path.display(), "loaded rules override");
    Ok(rules)
}

/// Renders `rules` as TOML, suitable as a starting point for an override.
pub fn render_rules(rules: &TaxRules) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(rules)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use regime_core::{AgeBracket, Slab};
    use rust_decimal_macros::dec;

    use super::*;

    const SHARED_SLABS: &str = r#"
cess_rate = "0.04"
rounding_step = 10
self_occupied_interest_cap = 200000

[old]
standard_deduction = 50000
rebate_threshold = 500000
deduction_kinds = ["chapter-via"]
surcharge_tiers = []
slabs = [
    { upper_bound = 250000, rate = "0" },
    { upper_bound = 500000, rate = "0.05" },
    { rate = "0.30" },
]

[new]
standard_deduction = 75000
rebate_threshold = 700000
deduction_kinds = ["employer-pension"]
surcharge_tiers = [{ above = 5000000, rate = "0.10" }]
slabs = [
    { upper_bound = 400000, rate = "0" },
    { rate = "0.10" },
]
"#;

    #[test]
    fn shared_slab_array_applies_to_every_age() {
        let rules = parse_rules(SHARED_SLABS).expect("valid rules");

        for age in AgeBracket::ALL {
            assert_eq!(
                rules.old.slabs.table_for(age).slabs(),
                &[
                    Slab::bounded(dec!(250000), dec!(0)),
                    Slab::bounded(dec!(500000), dec!(0.05)),
                    Slab::unbounded(dec!(0.30)),
                ]
            );
        }
        assert_eq!(rules.new.surcharge_tiers.len(), 1);
        assert_eq!(rules.cess_rate, dec!(0.04));
    }

    #[test]
    fn rendered_builtin_rules_parse_back() {
        let builtin = TaxRules::builtin();
        let rendered = render_rules(&builtin).expect("builtin rules serialize");

        let parsed = parse_rules(&rendered).expect("rendered rules parse");

        assert_eq!(parsed, builtin);
    }

    #[test]
    fn syntax_error_is_toml_error() {
        let result = parse_rules("cess_rate = ");

        assert!(matches!(result, Err(RulesFileError::Toml(_))));
    }

    #[test]
    fn missing_field_is_toml_error() {
        let result = parse_rules("cess_rate = \"0.04\"\n");

        assert!(matches!(result, Err(RulesFileError::Toml(_))));
    }

    #[test]
    fn invalid_table_is_rejected() {
        let input = SHARED_SLABS.replace("{ rate = \"0.10\" }", "{ upper_bound = 900000, rate = \"0.10\" }");

        let result = parse_rules(&input);

        assert!(matches!(
            result,
            Err(RulesFileError::Invalid(RulesError::MissingUnboundedSlab))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let path = Path::new("does/not/exist.toml");

        match load_rules(path).unwrap_err() {
            RulesFileError::Io { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
