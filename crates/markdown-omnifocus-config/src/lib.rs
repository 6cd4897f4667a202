use markdown_omnifocus_engine::{ExtractionMode, NotePlacement, PipelineOptions, RunOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the notes vault; its directory name is the vault name
    pub vault_path: Option<PathBuf>,
    /// Tick items off in the source document once sent
    pub mark_complete: bool,
    pub extraction_mode: ExtractionMode,
    pub note_placement: NotePlacement,
    /// URL scheme of the task app
    pub scheme: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vault_path: None,
            mark_complete: false,
            extraction_mode: ExtractionMode::default(),
            note_placement: NotePlacement::default(),
            scheme: PipelineOptions::default().scheme,
        }
    }
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

        // Expand shell variables and tilde in the loaded vault path
        config.vault_path = config
            .vault_path
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
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

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markdown-omnifocus");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Options for one run of an extraction command
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            mode: self.extraction_mode,
            mark_complete: self.mark_complete,
            pipeline: PipelineOptions {
                scheme: self.scheme.clone(),
                note_placement: self.note_placement,
                ..PipelineOptions::default()
            },
        }
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
