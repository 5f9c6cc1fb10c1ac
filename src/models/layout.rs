//! Entry layout variants
//!
//! Layouts differ in how many categorical dimensions an entry tracks and,
//! consequently, in the columns of the CSV projection. `flat` and `single`
//! both track one uncategorized tally and project identically.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the amount step records spend for an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// One tally per amount bucket
    #[default]
    Flat,
    /// One amount field per entry, tallied like `Flat`
    Single,
    /// Tallies per category, each with one count per amount bucket
    Breakdown,
}

impl Layout {
    /// Whether the amount step exposes a category selector
    pub fn has_categories(&self) -> bool {
        matches!(self, Self::Breakdown)
    }

    /// Storage identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Single => "single",
            Self::Breakdown => "breakdown",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flat" => Ok(Self::Flat),
            "single" => Ok(Self::Single),
            "breakdown" => Ok(Self::Breakdown),
            other => Err(format!("unknown layout '{}'", other)),
        }
    }
}
