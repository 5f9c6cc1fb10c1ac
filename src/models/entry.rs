//! Committed observation entries
//!
//! An entry is an immutable record of one completed wizard pass. Entries are
//! kept in insertion order, which is also the display and CSV row order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::draft::UNCATEGORIZED;
use super::tally::{grand_total, CategoryTallies, Tally};

/// A committed observation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Visitor age bracket
    pub age: String,

    /// Visitor type
    #[serde(rename = "type")]
    pub kind: String,

    /// Amount tallies keyed by category
    pub tallies: CategoryTallies,

    /// When the entry was committed
    pub created_at: DateTime<Utc>,
}

impl Entry {
    /// Create a new entry stamped with the current time
    pub fn new(age: impl Into<String>, kind: impl Into<String>, tallies: CategoryTallies) -> Self {
        Self {
            age: age.into(),
            kind: kind.into(),
            tallies,
            created_at: Utc::now(),
        }
    }

    /// Tally recorded for a category
    pub fn tally(&self, category: &str) -> Option<&Tally> {
        self.tallies.get(category)
    }

    /// Tally of a layout without categories
    pub fn uncategorized(&self) -> Option<&Tally> {
        self.tally(UNCATEGORIZED)
    }

    /// Count for a category and bucket, 0 when absent
    pub fn count(&self, category: &str, bucket: &str) -> u32 {
        self.tally(category).map(|t| t.get(bucket)).unwrap_or(0)
    }

    /// Total taps across all categories
    pub fn total(&self) -> u32 {
        grand_total(&self.tallies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_counts() {
        let mut tallies = CategoryTallies::new();
        tallies.entry(UNCATEGORIZED.into()).or_default().set("$5 - 10", 2);
        let entry = Entry::new("20-30", "Asian", tallies);

        assert_eq!(entry.count(UNCATEGORIZED, "$5 - 10"), 2);
        assert_eq!(entry.count(UNCATEGORIZED, "$20+"), 0);
        assert_eq!(entry.count("Food", "$5 - 10"), 0);
        assert_eq!(entry.total(), 2);
    }

    #[test]
    fn test_serializes_kind_as_type() {
        let entry = Entry::new("20-30", "Asian", CategoryTallies::new());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "Asian");
        assert!(json.get("kind").is_none());
    }
}
