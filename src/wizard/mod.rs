//! Observation wizard
//!
//! The controller owns the step sequence, the in-progress draft, and the
//! committed entries, and keeps the store in sync with every change.

pub mod controller;

pub use controller::WizardController;
