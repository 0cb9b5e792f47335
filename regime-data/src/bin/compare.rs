use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use regime_core::{AgeBracket, DeductionSelection, IncomeBreakdown, TaxEngine, TaxRules};
use regime_data::{
    ComparisonReport, FinancialYear, Scenario, load_rules, parse_decimal, render_rules, scenario,
};
use rust_decimal::Decimal;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Compare income tax under the old and new regimes.
///
/// Either pass one taxpayer's figures as flags, or a CSV of scenarios with
/// `--scenarios`. Amounts accept digit grouping (`12,00,000`).
#[derive(Debug, Parser)]
#[command(name = "regime-compare")]
#[command(version, about, long_about = None)]
struct Cli {
    /// CSV file of scenarios, one taxpayer per row
    #[arg(short, long, conflicts_with_all = ["salary", "deductions"])]
    scenarios: Option<PathBuf>,

    /// TOML file replacing the built-in rules
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// Print the active rules as TOML and exit
    #[arg(long, default_value_t = false)]
    print_rules: bool,

    /// Age bracket: below-60, senior or super-senior
    #[arg(long, default_value = "below-60", value_parser = parse_age_bracket)]
    age: AgeBracket,

    /// Financial year shown in the report: 2024-25 or 2025-26
    #[arg(long, default_value = "2024-25", value_parser = parse_financial_year)]
    financial_year: FinancialYear,

    /// Gross salary
    #[arg(long, default_value = "0", value_parser = parse_money)]
    salary: Decimal,

    /// Allowances exempt under section 10
    #[arg(long, default_value = "0", value_parser = parse_money)]
    exempt_allowances: Decimal,

    /// Savings and deposit interest
    #[arg(long, default_value = "0", value_parser = parse_money)]
    interest: Decimal,

    /// Home-loan interest on a self-occupied property
    #[arg(long, default_value = "0", value_parser = parse_money)]
    self_occupied_interest: Decimal,

    /// Rent received
    #[arg(long, default_value = "0", value_parser = parse_money)]
    rental: Decimal,

    /// Home-loan interest on a let-out property
    #[arg(long, default_value = "0", value_parser = parse_money)]
    let_out_interest: Decimal,

    /// Income from virtual digital assets
    #[arg(long, default_value = "0", value_parser = parse_money)]
    digital_assets: Decimal,

    /// Any other income
    #[arg(long, default_value = "0", value_parser = parse_money)]
    other: Decimal,

    /// Deduction claim as CODE=AMOUNT (e.g. 80C=150000); repeatable
    #[arg(short, long = "deduction", value_name = "CODE=AMOUNT")]
    deductions: Vec<String>,
}

fn parse_age_bracket(s: &str) -> Result<AgeBracket, String> {
    AgeBracket::parse(s).ok_or_else(|| format!("unknown age bracket '{s}'"))
}

fn parse_financial_year(s: &str) -> Result<FinancialYear, String> {
    FinancialYear::parse(s).ok_or_else(|| format!("unknown financial year '{s}'"))
}

fn parse_money(s: &str) -> Result<Decimal, String> {
    parse_decimal(s).map_err(|e| e.to_string())
}

impl Cli {
    /// Unknown and age-ineligible codes are skipped with a warning; a
    /// malformed pair or amount is an error.
    fn deduction_selection(&self) -> Result<DeductionSelection> {
        let mut pairs = Vec::with_capacity(self.deductions.len());
        for raw in &self.deductions {
            let Some((code, amount)) = raw.split_once('=') else {
                bail!("invalid --deduction '{raw}', expected CODE=AMOUNT");
            };
            let amount = parse_decimal(amount)
                .with_context(|| format!("Invalid amount in --deduction '{raw}'"))?;
            pairs.push((code, amount));
        }
        Ok(DeductionSelection::from_codes(pairs, self.age))
    }

    fn single_scenario(&self) -> Result<Scenario> {
        Ok(Scenario {
            name: "Command line".to_string(),
            financial_year: self.financial_year,
            age_bracket: self.age,
            income: IncomeBreakdown {
                salary: self.salary,
                exempt_allowances: self.exempt_allowances,
                interest: self.interest,
                self_occupied_interest: self.self_occupied_interest,
                rental: self.rental,
                let_out_interest: self.let_out_interest,
                digital_assets: self.digital_assets,
                other: self.other,
            },
            deductions: self.deduction_selection()?,
        })
    }
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    debug!(?cli, "parsed arguments");

    let rules = match &cli.rules {
        Some(path) => load_rules(path)
            .with_context(|| format!("Failed to load rules: {}", path.display()))?,
        None => TaxRules::builtin(),
    };

    if cli.print_rules {
        print!("{}", render_rules(&rules).context("Failed to render rules")?);
        return Ok(());
    }

    let scenarios = match &cli.scenarios {
        Some(path) => scenario::load_from_file(path)
            .with_context(|| format!("Failed to load scenarios: {}", path.display()))?,
        None => vec![cli.single_scenario()?],
    };
    info!(count = scenarios.len(), "comparing scenarios");

    let engine = TaxEngine::new(&rules);
    for (index, scenario) in scenarios.iter().enumerate() {
        if index > 0 {
            println!();
        }
        let result = scenario.compare(&engine);
        print!("{}", ComparisonReport::new(scenario, &result));
    }

    Ok(())
}
