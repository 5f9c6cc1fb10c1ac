//! Wizard step model
//!
//! The wizard is a linear sequence of steps. Forward edges are guarded by the
//! controller; backward edges are destructive.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A step of the observation wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    /// Idle screen, both initial and re-entrant
    #[default]
    Start,
    /// Choosing the visitor age bracket
    Age,
    /// Choosing the visitor type
    Type,
    /// Tallying amount buckets
    Amount,
    /// Reviewing the draft before committing it
    Confirm,
}

impl Step {
    /// All steps in wizard order
    pub const ALL: [Step; 5] = [
        Step::Start,
        Step::Age,
        Step::Type,
        Step::Amount,
        Step::Confirm,
    ];

    /// The step a `back` intent leads to, if any
    pub fn previous(&self) -> Option<Step> {
        match self {
            Self::Start => None,
            Self::Age => Some(Self::Start),
            Self::Type => Some(Self::Age),
            Self::Amount => Some(Self::Type),
            Self::Confirm => Some(Self::Amount),
        }
    }

    /// Position of the step in the sequence (start = 0)
    pub fn index(&self) -> usize {
        match self {
            Self::Start => 0,
            Self::Age => 1,
            Self::Type => 2,
            Self::Amount => 3,
            Self::Confirm => 4,
        }
    }

    /// Storage identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Age => "age",
            Self::Type => "type",
            Self::Amount => "amount",
            Self::Confirm => "confirm",
        }
    }

    /// Screen title
    pub fn title(&self) -> &'static str {
        match self {
            Self::Start => "Ready",
            Self::Age => "Visitor Age",
            Self::Type => "Visitor Type",
            Self::Amount => "Spend Amount",
            Self::Confirm => "Confirm Entry",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|step| step.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown step '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_previous_walks_back_to_start() {
        let mut step = Step::Confirm;
        let mut visited = vec![step];
        while let Some(prev) = step.previous() {
            visited.push(prev);
            step = prev;
        }
        assert_eq!(
            visited,
            vec![Step::Confirm, Step::Amount, Step::Type, Step::Age, Step::Start]
        );
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Amount".parse::<Step>().unwrap(), Step::Amount);
        assert_eq!(" confirm ".parse::<Step>().unwrap(), Step::Confirm);
        assert!("review".parse::<Step>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Step::Type).unwrap(), "\"type\"");
        let step: Step = serde_json::from_str("\"age\"").unwrap();
        assert_eq!(step, Step::Age);
    }
}
