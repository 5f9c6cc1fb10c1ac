//! Terminal User Interface module
//!
//! Drives the entry wizard with the keyboard using ratatui: a step header,
//! one screen per wizard step, an entries table and a blocking alert for
//! failed exports.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::run_tui;
