//! CSV delivery
//!
//! Two ways to hand the projection to the user, chosen once by a platform
//! probe:
//! - Download: a base64 `data:` URI plus a copy in the downloads folder
//! - Native: a file in the documents folder, exposed as a `file://` URI

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine};
use directories::UserDirs;
use log::{debug, info};

use crate::config::paths::TallyPaths;
use crate::config::settings::{ExportTarget, Settings};
use crate::error::{TallyError, TallyResult};
use crate::storage::file_io::write_atomic;

/// Environment variable forcing the detected platform
pub const PLATFORM_ENV: &str = "FIELDTALLY_PLATFORM";

/// Delivery platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Download-style delivery
    Browser,
    /// Native filesystem write
    Native,
}

impl Platform {
    /// Decide the platform from settings, environment, and available folders
    pub fn detect(target: ExportTarget) -> Self {
        match target {
            ExportTarget::Download => return Self::Browser,
            ExportTarget::Native => return Self::Native,
            ExportTarget::Auto => {}
        }

        if let Ok(forced) = std::env::var(PLATFORM_ENV) {
            match forced.trim().to_lowercase().as_str() {
                "native" => return Self::Native,
                "browser" | "download" => return Self::Browser,
                other => debug!("Ignoring unknown {} value '{}'", PLATFORM_ENV, other),
            }
        }

        if documents_dir().is_some() {
            Self::Native
        } else {
            Self::Browser
        }
    }
}

/// Where an export ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    /// File written on disk
    pub path: PathBuf,
    /// URI the user can open
    pub uri: String,
}

/// A way of delivering CSV text to the user
pub trait Exporter {
    /// Platform this exporter serves
    fn platform(&self) -> Platform;

    /// Deliver the CSV text
    fn export(&self, csv: &str) -> TallyResult<ExportOutcome>;

    /// Whether a failure must be shown as a blocking alert
    fn alerts_on_failure(&self) -> bool;
}

/// Build a downloadable in-memory file URI
pub fn data_uri(csv: &str) -> String {
    format!("data:text/csv;base64,{}", STANDARD.encode(csv.as_bytes()))
}

fn file_uri(path: &Path) -> String {
    let absolute = path
        .canonicalize()
        .unwrap_or_else(|_| path.to_path_buf());
    format!("file://{}", absolute.display())
}

fn documents_dir() -> Option<PathBuf> {
    UserDirs::new().and_then(|dirs| dirs.document_dir().map(Path::to_path_buf))
}

fn downloads_dir() -> Option<PathBuf> {
    UserDirs::new().and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
}

/// Download-style exporter
#[derive(Debug, Clone)]
pub struct DownloadExporter {
    dir: PathBuf,
    filename: String,
}

impl DownloadExporter {
    pub fn new(dir: PathBuf, filename: impl Into<String>) -> Self {
        Self {
            dir,
            filename: filename.into(),
        }
    }
}

impl Exporter for DownloadExporter {
    fn platform(&self) -> Platform {
        Platform::Browser
    }

    fn export(&self, csv: &str) -> TallyResult<ExportOutcome> {
        let uri = data_uri(csv);
        let path = self.dir.join(&self.filename);
        write_atomic(&path, csv.as_bytes())
            .map_err(|e| TallyError::Export(format!("Download failed: {}", e)))?;

        info!("Downloaded CSV to {}", path.display());
        Ok(ExportOutcome { path, uri })
    }

    fn alerts_on_failure(&self) -> bool {
        false
    }
}

/// Native filesystem exporter
#[derive(Debug, Clone)]
pub struct NativeFileExporter {
    dir: Option<PathBuf>,
    filename: String,
}

impl NativeFileExporter {
    /// `dir` is `None` when the platform has no documents folder
    pub fn new(dir: Option<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            dir,
            filename: filename.into(),
        }
    }
}

impl Exporter for NativeFileExporter {
    fn platform(&self) -> Platform {
        Platform::Native
    }

    fn export(&self, csv: &str) -> TallyResult<ExportOutcome> {
        let dir = self
            .dir
            .as_ref()
            .ok_or_else(|| TallyError::Export("No documents directory is available".into()))?;

        let path = dir.join(&self.filename);
        write_atomic(&path, csv.as_bytes()).map_err(|e| {
            TallyError::Export(format!("Could not save {}: {}", path.display(), e))
        })?;

        let uri = file_uri(&path);
        info!("Saved CSV to {}", uri);
        Ok(ExportOutcome { path, uri })
    }

    fn alerts_on_failure(&self) -> bool {
        true
    }
}

/// Pick the exporter for this environment
///
/// `dir_override` replaces the folder either exporter writes into.
pub fn exporter_for(
    settings: &Settings,
    paths: &TallyPaths,
    dir_override: Option<PathBuf>,
) -> Box<dyn Exporter> {
    let filename = settings.export.filename.clone();

    match Platform::detect(settings.export.target) {
        Platform::Native => {
            let dir = dir_override.or_else(documents_dir);
            Box::new(NativeFileExporter::new(dir, filename))
        }
        Platform::Browser => {
            let dir = dir_override
                .or_else(downloads_dir)
                .unwrap_or_else(|| paths.exports_dir());
            Box::new(DownloadExporter::new(dir, filename))
        }
    }
}
