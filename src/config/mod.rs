//! Configuration module for fieldtally
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - Settings persistence (layout, option vocabulary, export preferences)

pub mod paths;
pub mod settings;

pub use paths::TallyPaths;
pub use settings::{ExportSettings, ExportTarget, Settings};
