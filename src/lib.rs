//! fieldtally - step-by-step tally wizard for market-research observations
//!
//! A field researcher records one visitor at a time: an age bracket, a
//! visitor type, and taps on the spend-amount buckets they observed
//! (optionally per product category). Confirmed entries accumulate in a
//! list that survives restarts and can be exported as CSV.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration, option vocabulary and path management
//! - `error`: Custom error types
//! - `models`: Steps, layouts, tallies, drafts and committed entries
//! - `storage`: Key-value persistence of the wizard state
//! - `wizard`: The step controller that owns all state transitions
//! - `export`: CSV projection and platform-specific delivery
//! - `display`: Plain-text formatting for CLI output
//! - `cli`: Command handlers
//! - `tui`: Interactive terminal interface
//!
//! # Example
//!
//! ```rust,ignore
//! use fieldtally::config::{paths::TallyPaths, settings::Settings};
//! use fieldtally::wizard::WizardController;
//!
//! let paths = TallyPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut wizard = WizardController::from_settings(&settings, None);
//! wizard.select_age("20-30");
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod storage;
pub mod tui;
pub mod wizard;

pub use error::TallyError;
