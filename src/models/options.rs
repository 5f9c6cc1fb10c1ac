//! Fixed option vocabulary
//!
//! Every selectable value in the wizard (age bracket, visitor type, category,
//! amount bucket) comes from a `Vocabulary` loaded once at startup. Labels are
//! controlled vocabulary: the CSV projection writes them without escaping, so
//! validation rejects anything containing the field delimiter.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::{TallyError, TallyResult};

/// Which list of options a label belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Age,
    Type,
    Category,
    Amount,
}

impl OptionKind {
    /// Human-readable name of the option list
    pub fn name(&self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::Type => "Type",
            Self::Category => "Category",
            Self::Amount => "Amount",
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The enumerated options offered by each wizard step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Visitor age brackets
    #[serde(default = "default_ages")]
    pub ages: Vec<String>,

    /// Visitor types
    #[serde(default = "default_types")]
    pub types: Vec<String>,

    /// Spend categories (used by the breakdown layout)
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    /// Spend amount buckets
    #[serde(default = "default_amounts")]
    pub amounts: Vec<String>,
}

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_ages() -> Vec<String> {
    labels(&["0-10", "10-20", "20-30", "30-40", "40-50", "50-60", "60+"])
}

fn default_types() -> Vec<String> {
    labels(&["Asian", "Western", "Local", "Other"])
}

fn default_categories() -> Vec<String> {
    labels(&["Clothes", "Food", "Souvenirs", "Other"])
}

fn default_amounts() -> Vec<String> {
    labels(&["$0 - 5", "$5 - 10", "$10 - 20", "$20+"])
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            ages: default_ages(),
            types: default_types(),
            categories: default_categories(),
            amounts: default_amounts(),
        }
    }
}

impl Vocabulary {
    /// Options of the given kind, in display order
    pub fn options(&self, kind: OptionKind) -> &[String] {
        match kind {
            OptionKind::Age => &self.ages,
            OptionKind::Type => &self.types,
            OptionKind::Category => &self.categories,
            OptionKind::Amount => &self.amounts,
        }
    }

    /// Check whether `label` is one of the options of `kind`
    pub fn contains(&self, kind: OptionKind, label: &str) -> bool {
        self.options(kind).iter().any(|option| option == label)
    }

    /// Resolve user input to a canonical label
    ///
    /// Accepts an exact label, a case-insensitive label, or a 1-based
    /// position in the option list.
    pub fn resolve(&self, kind: OptionKind, input: &str) -> TallyResult<String> {
        let options = self.options(kind);
        let input = input.trim();

        if let Some(exact) = options.iter().find(|o| o.as_str() == input) {
            return Ok(exact.clone());
        }
        if let Some(loose) = options.iter().find(|o| o.eq_ignore_ascii_case(input)) {
            return Ok(loose.clone());
        }
        if let Ok(position) = input.parse::<usize>() {
            if position >= 1 && position <= options.len() {
                return Ok(options[position - 1].clone());
            }
        }

        Err(TallyError::option_not_found(kind.name(), input))
    }

    /// First category option, the default tally scope of the breakdown layout
    pub fn first_category(&self) -> Option<&String> {
        self.categories.first()
    }

    /// Validate the vocabulary
    ///
    /// Every list must be non-empty, free of duplicates, and contain no label
    /// with a comma or line break.
    pub fn validate(&self) -> TallyResult<()> {
        for kind in [
            OptionKind::Age,
            OptionKind::Type,
            OptionKind::Category,
            OptionKind::Amount,
        ] {
            let options = self.options(kind);
            if options.is_empty() {
                return Err(TallyError::Validation(format!(
                    "{} options cannot be empty",
                    kind
                )));
            }

            let mut seen = HashSet::new();
            for label in options {
                if label.trim().is_empty() {
                    return Err(TallyError::Validation(format!(
                        "{} options cannot contain a blank label",
                        kind
                    )));
                }
                if label.contains(',') || label.contains('\n') || label.contains('\r') {
                    return Err(TallyError::Validation(format!(
                        "{} option '{}' contains a delimiter character",
                        kind, label
                    )));
                }
                if !seen.insert(label.as_str()) {
                    return Err(TallyError::Validation(format!(
                        "{} option '{}' is listed twice",
                        kind, label
                    )));
                }
            }
        }

        Ok(())
    }
}
