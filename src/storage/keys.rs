//! Keys under which wizard state is persisted

/// Committed entries, as a JSON array
pub const ENTRIES: &str = "entries";

/// Draft tallies, keyed by category then amount bucket
pub const TALLIES: &str = "tallies";

/// Draft form fields (age, type, selected category)
pub const FORM: &str = "form";

/// Current wizard step
pub const STEP: &str = "step";

/// Last tapped amount per category
pub const LAST_SELECTED: &str = "last_selected";
