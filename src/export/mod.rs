//! Export module for fieldtally
//!
//! - `csv`: projection of committed entries to CSV text
//! - `target`: delivery of that text as a download or a native file

pub mod csv;
pub mod target;

pub use self::csv::project;
pub use target::{exporter_for, DownloadExporter, ExportOutcome, Exporter, NativeFileExporter, Platform};
