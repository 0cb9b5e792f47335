use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

impl ParseDecimalError {
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Trims whitespace and drops the rupee sign and digit-group commas, so both
/// `12,34,567` and `1,234,567` are accepted.
fn normalize_amount_input(s: &str) -> String {
    s.trim()
        .trim_start_matches('₹')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect()
}

/// Parses a rupee amount.
///
/// Empty or whitespace-only input is treated as 0. Negative amounts are kept;
/// the engine clamps them.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid amount: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Like [`parse_decimal`], but unparseable input becomes 0 with a warning.
pub fn parse_amount(s: &str) -> Decimal {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Decimal::ZERO;
    }
    normalized.parse().unwrap_or_else(|e| {
        tracing::warn!(input = %s, "treating invalid amount as zero: {}", e);
        Decimal::ZERO
    })
}
