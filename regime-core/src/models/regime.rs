use std::fmt;

use serde::{Deserialize, Serialize};

/// The two statutory regimes a taxpayer can choose between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    Old,
    New,
}

impl Regime {
    pub const ALL: [Regime; 2] = [Self::Old, Self::New];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Old => "old",
            Self::New => "new",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Old => "Old Regime",
            Self::New => "New Regime",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}
