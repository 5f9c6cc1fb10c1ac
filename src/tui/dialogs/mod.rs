//! Dialog modules for the TUI

pub mod alert;
