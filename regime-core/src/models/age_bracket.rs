use std::fmt;

use serde::{Deserialize, Serialize};

/// Age band of the taxpayer at the end of the financial year.
///
/// Selects the old-regime slab table and decides which of the age-gated
/// interest deductions may be claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgeBracket {
    #[serde(rename = "below-60")]
    BelowSixty,
    #[serde(rename = "senior")]
    Senior,
    #[serde(rename = "super-senior")]
    SuperSenior,
}

impl AgeBracket {
    pub const ALL: [AgeBracket; 3] = [Self::BelowSixty, Self::Senior, Self::SuperSenior];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BelowSixty => "below-60",
            Self::Senior => "senior",
            Self::SuperSenior => "super-senior",
        }
    }

    /// Accepts the canonical codes plus the camel-case spellings a web form
    /// tends to submit (`below60`, `superSenior`). Case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "below-60" | "below60" | "below_60" => Some(Self::BelowSixty),
            "senior" => Some(Self::Senior),
            "super-senior" | "supersenior" | "super_senior" => Some(Self::SuperSenior),
            _ => None,
        }
    }

    /// Sixty or older.
    pub fn is_senior(&self) -> bool {
        !matches!(self, Self::BelowSixty)
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_accepts_canonical_codes() {
        for bracket in AgeBracket::ALL {
            assert_eq!(AgeBracket::parse(bracket.as_str()), Some(bracket));
        }
    }

    #[test]
    fn parse_accepts_form_spellings() {
        assert_eq!(AgeBracket::parse("below60"), Some(AgeBracket::BelowSixty));
        assert_eq!(AgeBracket::parse(" superSenior "), Some(AgeBracket::SuperSenior));
        assert_eq!(AgeBracket::parse("SENIOR"), Some(AgeBracket::Senior));
    }

    #[test]
    fn parse_rejects_unknown() {
        assert_eq!(AgeBracket::parse("toddler"), None);
        assert_eq!(AgeBracket::parse(""), None);
    }

    #[test]
    fn only_below_sixty_is_not_senior() {
        assert!(!AgeBracket::BelowSixty.is_senior());
        assert!(AgeBracket::Senior.is_senior());
        assert!(AgeBracket::SuperSenior.is_senior());
    }
}
