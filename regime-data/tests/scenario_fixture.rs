//! Loads the on-disk scenario fixture and compares every row end to end.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use regime_core::{AgeBracket, DeductionCode, Regime, TaxEngine};
use regime_data::{ComparisonReport, FinancialYear, load_rules, scenario};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn fixture_file_loads_every_row() {
    let scenarios = scenario::load_from_file(&fixture_path("sample_scenarios.csv"))
        .expect("fixture file should load without error");

    let names: Vec<&str> = scenarios.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Salaried ten lakh", "Investor", "Retired", "Landlord"]);
    assert_eq!(scenarios[1].financial_year, FinancialYear::Fy2025_26);
    assert_eq!(scenarios[3].age_bracket, AgeBracket::SuperSenior);
}

#[test]
fn salaried_row_matches_worked_example() {
    let scenarios = scenario::load_from_file(&fixture_path("sample_scenarios.csv")).unwrap();

    let result = scenarios[0].compare(&TaxEngine::builtin());

    assert_eq!(result.old_regime.total_tax, dec!(106600));
    assert_eq!(result.new_regime.total_tax, dec!(33800));
    assert_eq!(result.recommended(), Regime::New);
}

#[test]
fn investor_row_splits_deductions_by_regime() {
    let scenarios = scenario::load_from_file(&fixture_path("sample_scenarios.csv")).unwrap();
    let investor = &scenarios[1];

    let result = investor.compare(&TaxEngine::builtin());

    // Receipts 15,08,000. Old: less 50,000 standard and 1,83,000 of
    // 80C/80D/80TTA. New: less 75,000 standard and 1,00,000 of 80CCD(2).
    assert_eq!(investor.deductions.amount(DeductionCode::Sec80Tta), dec!(8000));
    assert_eq!(result.old_regime.taxable_income, dec!(1275000));
    assert_eq!(result.new_regime.taxable_income, dec!(1333000));
    // 1,12,500 + 30% of 2,75,000
    assert_eq!(result.old_regime.base_tax, dec!(195000));
    assert_eq!(result.old_regime.total_tax, dec!(202800));
    // 60,000 + 15% of 1,33,000
    assert_eq!(result.new_regime.base_tax, dec!(79950));
    assert_eq!(result.new_regime.total_tax, dec!(83148));
}

#[test]
fn landlord_row_sets_off_house_property_loss() {
    let scenarios = scenario::load_from_file(&fixture_path("sample_scenarios.csv")).unwrap();

    let result = scenarios[3].compare(&TaxEngine::builtin());

    assert_eq!(result.old_regime.taxable_income, Decimal::ZERO);
    assert_eq!(result.new_regime.taxable_income, Decimal::ZERO);
    assert_eq!(result.savings(), Decimal::ZERO);
}

#[test]
fn every_fixture_row_renders_a_report() {
    let scenarios = scenario::load_from_file(&fixture_path("sample_scenarios.csv")).unwrap();
    let engine = TaxEngine::builtin();

    for scenario in &scenarios {
        let result = scenario.compare(&engine);
        let report = ComparisonReport::new(scenario, &result).to_string();

        assert!(report.starts_with(&scenario.name));
        assert!(report.contains("Total tax"));
    }
}

#[test]
fn rules_fixture_matches_builtin_rules() {
    let rules = load_rules(&fixture_path("rules.toml")).expect("rules fixture should load");

    assert_eq!(rules, regime_core::TaxRules::builtin());
}

#[test]
fn missing_fixture_is_io_error() {
    let result = scenario::load_from_file(&fixture_path("no_such_file.csv"));

    assert!(matches!(result, Err(scenario::ScenarioLoadError::Io(_))));
}
