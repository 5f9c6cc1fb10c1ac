//! Core data models for fieldtally
//!
//! This module contains the data structures the observation wizard works
//! with: the step sequence, the fixed option vocabulary, amount tallies, the
//! in-progress draft, and committed entries.

pub mod draft;
pub mod entry;
pub mod layout;
pub mod options;
pub mod step;
pub mod tally;

pub use draft::{Draft, UNCATEGORIZED};
pub use entry::Entry;
pub use layout::Layout;
pub use options::{OptionKind, Vocabulary};
pub use step::Step;
pub use tally::{CategoryTallies, Tally};
