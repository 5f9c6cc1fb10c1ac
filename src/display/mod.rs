//! Display formatting for terminal output
//!
//! Provides utilities for formatting wizard state and committed entries,
//! including tables and option lists.

pub mod entries;
pub mod status;

pub use entries::{format_entry_table, format_tally_summary};
pub use status::{format_options, format_status};
