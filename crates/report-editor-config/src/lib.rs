use report_editor_engine::import::{DEFAULT_SUMMARY_HEADING, DEFAULT_TITLE};
use report_editor_engine::{ImportOptions, SerializeOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_DOCUMENTS_PATH: &str = "~/.local/share/report-editor/documents";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory saved documents are written to.
    pub documents_path: PathBuf,
    pub import: ImportSettings,
    pub export: ExportSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            documents_path: PathBuf::from(DEFAULT_DOCUMENTS_PATH),
            import: ImportSettings::default(),
            export: ExportSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    pub title: String,
    pub summary_heading: String,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            summary_heading: DEFAULT_SUMMARY_HEADING.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Keep block types in saved sections instead of writing every block as
    /// a paragraph.
    pub preserve_block_types: bool,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded documents path
        config.documents_path =
            Self::expand_path(&config.documents_path).unwrap_or(config.documents_path);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Like [`Config::load`], falling back to defaults when no file exists.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Ok(Self::load()?.unwrap_or_else(Self::with_expanded_defaults))
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/report-editor");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn import_options(&self) -> ImportOptions {
        ImportOptions {
            title: self.import.title.clone(),
            summary_heading: self.import.summary_heading.clone(),
        }
    }

    pub fn serialize_options(&self) -> SerializeOptions {
        SerializeOptions {
            preserve_block_types: self.export.preserve_block_types,
        }
    }

    fn with_expanded_defaults() -> Self {
        let mut config = Self::default();
        config.documents_path =
            Self::expand_path(&config.documents_path).unwrap_or(config.documents_path);
        config
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
