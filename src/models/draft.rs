//! In-progress entry
//!
//! The draft accumulates the selections of one wizard pass until it is either
//! committed as an `Entry` or discarded by going back or resetting.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::tally::{any_positive, grand_total, CategoryTallies, Tally};

/// Tally scope used by layouts without categories
pub const UNCATEGORIZED: &str = "all";

/// The not-yet-committed entry under construction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    /// Selected age bracket
    pub age: Option<String>,

    /// Selected visitor type
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// Category that amount taps currently affect (breakdown layout only)
    pub category: Option<String>,

    /// Tallies keyed by category
    pub tallies: CategoryTallies,

    /// Most recently tapped amount per category, for highlighting
    pub last_selected: BTreeMap<String, String>,
}

impl Draft {
    /// Create an empty draft
    pub fn new() -> Self {
        Self::default()
    }

    /// Key of the tally that amount taps currently affect
    pub fn active_key(&self) -> &str {
        self.category.as_deref().unwrap_or(UNCATEGORIZED)
    }

    /// Tally of the active scope
    pub fn active_tally(&self) -> Option<&Tally> {
        self.tallies.get(self.active_key())
    }

    /// Mutable tally of the active scope, created on demand
    pub fn active_tally_mut(&mut self) -> &mut Tally {
        let key = self.active_key().to_string();
        self.tallies.entry(key).or_default()
    }

    /// Count recorded for a bucket in the active scope
    pub fn active_count(&self, bucket: &str) -> u32 {
        self.active_tally().map(|t| t.get(bucket)).unwrap_or(0)
    }

    /// Last tapped amount in the active scope
    pub fn active_last_selected(&self) -> Option<&String> {
        self.last_selected.get(self.active_key())
    }

    /// Whether at least one bucket in any category is positive
    pub fn has_positive_tally(&self) -> bool {
        any_positive(&self.tallies)
    }

    /// Total taps across all categories
    pub fn total(&self) -> u32 {
        grand_total(&self.tallies)
    }

    /// Whether the draft can be committed
    pub fn is_complete(&self) -> bool {
        self.age.is_some() && self.kind.is_some() && self.has_positive_tally()
    }

    /// Clear tallies and highlight state, leaving the form fields alone
    pub fn clear_tallies(&mut self) {
        self.tallies.clear();
        self.last_selected.clear();
    }

    /// Tallies with empty scopes removed
    pub fn committed_tallies(&self) -> CategoryTallies {
        self.tallies
            .iter()
            .filter(|(_, tally)| tally.is_positive())
            .map(|(key, tally)| (key.clone(), tally.clone()))
            .collect()
    }
}
