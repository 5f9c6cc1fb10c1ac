//! Amount tallies
//!
//! A tally counts how many times each amount bucket was tapped. Counts never
//! go below zero, and zero counts are not stored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tallies keyed by category label
pub type CategoryTallies = BTreeMap<String, Tally>;

/// Count per amount-bucket label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tally(BTreeMap<String, u32>);

impl Tally {
    /// Create an empty tally
    pub fn new() -> Self {
        Self::default()
    }

    /// Count recorded for a bucket (0 when absent)
    pub fn get(&self, bucket: &str) -> u32 {
        self.0.get(bucket).copied().unwrap_or(0)
    }

    /// Set a bucket count, dropping the key when it reaches zero
    pub fn set(&mut self, bucket: &str, count: u32) {
        if count == 0 {
            self.0.remove(bucket);
        } else {
            self.0.insert(bucket.to_string(), count);
        }
    }

    /// Add one to a bucket
    pub fn increment(&mut self, bucket: &str) -> u32 {
        let count = self.get(bucket).saturating_add(1);
        self.set(bucket, count);
        count
    }

    /// Remove one from a bucket, floored at zero
    pub fn decrement(&mut self, bucket: &str) -> u32 {
        let count = self.get(bucket).saturating_sub(1);
        self.set(bucket, count);
        count
    }

    /// Sum of all counts
    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    /// Whether any bucket has a positive count
    pub fn is_positive(&self) -> bool {
        self.0.values().any(|&count| count > 0)
    }

    /// Counts in the given bucket order, 0 for absent buckets
    pub fn counts_in(&self, buckets: &[String]) -> Vec<u32> {
        buckets.iter().map(|b| self.get(b)).collect()
    }

    /// Drop every bucket that is not in `buckets`
    pub fn retain_known(&mut self, buckets: &[String]) {
        self.0.retain(|label, count| *count > 0 && buckets.contains(label));
    }

    /// Iterate over non-zero buckets
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u32)> {
        self.0.iter()
    }

    /// Whether the tally has no counts at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Sum of counts across all categories
pub fn grand_total(tallies: &CategoryTallies) -> u32 {
    tallies.values().map(Tally::total).sum()
}

/// Whether any category holds a positive count
pub fn any_positive(tallies: &CategoryTallies) -> bool {
    tallies.values().any(Tally::is_positive)
}
