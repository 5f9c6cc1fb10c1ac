//! User settings for fieldtally
//!
//! Holds the entry layout, the option vocabulary, and export preferences.

use serde::{Deserialize, Serialize};

use super::paths::TallyPaths;
use crate::error::TallyError;
use crate::models::{Layout, Vocabulary};
use crate::storage::file_io::write_json_atomic;

/// Where exported CSV files are delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportTarget {
    /// Decide at runtime from the environment
    #[default]
    Auto,
    /// Download-style delivery (data URI + downloads folder)
    Download,
    /// Native file written into the documents folder
    Native,
}

/// Export preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Fixed filename of the exported CSV
    #[serde(default = "default_filename")]
    pub filename: String,

    /// Delivery target
    #[serde(default)]
    pub target: ExportTarget,
}

fn default_filename() -> String {
    "market_research.csv".to_string()
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            filename: default_filename(),
            target: ExportTarget::default(),
        }
    }
}

/// User settings for fieldtally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// How entries record spend
    #[serde(default)]
    pub layout: Layout,

    /// Selectable options
    #[serde(default)]
    pub vocabulary: Vocabulary,

    /// Export preferences
    #[serde(default)]
    pub export: ExportSettings,
}

fn default_schema_version() -> u32 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            layout: Layout::default(),
            vocabulary: Vocabulary::default(),
            export: ExportSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    ///
    /// The vocabulary is validated either way.
    pub fn load_or_create(paths: &TallyPaths) -> Result<Self, TallyError> {
        let settings_path = paths.settings_file();

        let settings = if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| TallyError::Io(format!("Failed to read settings file: {}", e)))?;

            serde_json::from_str::<Settings>(&contents)
                .map_err(|e| TallyError::Config(format!("Failed to parse settings file: {}", e)))?
        } else {
            // Don't save yet - let caller decide when to persist
            Settings::default()
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Check that the settings describe a usable wizard
    pub fn validate(&self) -> Result<(), TallyError> {
        self.vocabulary
            .validate()
            .map_err(|e| TallyError::Config(e.to_string()))?;

        if self.export.filename.trim().is_empty() {
            return Err(TallyError::Config("Export filename cannot be empty".into()));
        }
        if self.export.filename.contains('/') || self.export.filename.contains('\\') {
            return Err(TallyError::Config(format!(
                "Export filename '{}' must not contain a path separator",
                self.export.filename
            )));
        }

        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TallyPaths) -> Result<(), TallyError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.layout, Layout::Flat);
        assert_eq!(settings.export.filename, "market_research.csv");
        assert_eq!(settings.export.target, ExportTarget::Auto);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.layout = Layout::Breakdown;
        settings.export.target = ExportTarget::Native;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.layout, Layout::Breakdown);
        assert_eq!(loaded.export.target, ExportTarget::Native);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"layout": "single"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.layout, Layout::Single);
        assert_eq!(loaded.vocabulary, Vocabulary::default());
    }

    #[test]
    fn test_invalid_vocabulary_is_a_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(
            paths.settings_file(),
            r#"{"vocabulary": {"amounts": ["$1,000"]}}"#,
        )
        .unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, TallyError::Config(_)));
    }

    #[test]
    fn test_malformed_file_is_a_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "not json").unwrap();

        assert!(matches!(
            Settings::load_or_create(&paths),
            Err(TallyError::Config(_))
        ));
    }
}
