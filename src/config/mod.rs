//! Configuration management for Nyaya
//!
//! Everything has a default, so a missing file or a partial file is fine.
//! Values can be overridden from the environment with `NYAYA_SECTION__KEY`.

use crate::error::{NyayaError, Result};
use crate::query::PatternsConfig;
use crate::retrieval::{RankingConfig, ScoringWeights};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod validator;

pub use validator::ConfigValidator;

pub const SCHEMA_VERSION: &str = "1.0.0";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "_meta", default)]
    pub meta: MetaConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub scoring: ScoringWeights,
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub patterns: PatternsConfig,
}

/// Metadata about the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaConfig {
    pub schema_version: String,
    #[serde(default = "current_timestamp")]
    pub created_at: String,
    #[serde(default = "current_timestamp")]
    pub last_modified: String,
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            created_at: current_timestamp(),
            last_modified: current_timestamp(),
        }
    }
}

fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Where the law datasets live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Directory holding `bns.json`, `ipc.json`, ...
    pub data_dir: PathBuf,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("~/.nyaya/corpus"),
        }
    }
}

/// Remote analysis and generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub enabled: bool,
    /// Model name passed to the text generator
    pub model: String,
    pub temperature: f32,
    /// Turns sent to the remote analyzer
    pub history_window: usize,
    /// Turns included in a generation prompt
    pub prompt_history_turns: usize,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            model: "llama-3.3-70b-versatile".to_string(),
            temperature: 0.7,
            history_window: 6,
            prompt_history_turns: 2,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(NyayaError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| NyayaError::Io {
            source: e,
            context: format!("Failed to read config file: {:?}", path),
        })?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides();

        ConfigValidator::validate(&config)?;

        Ok(config)
    }

    /// Load from `path` if it exists, otherwise start from defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load(path);
        }

        tracing::warn!(
            "Config file not found at {}, using defaults. Run 'nyaya config init' to create one.",
            path.display()
        );
        let mut config = Config::default();
        config.apply_env_overrides();
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| NyayaError::Io {
            source: e,
            context: format!("Failed to write config file: {:?}", path),
        })?;
        Ok(())
    }

    /// Apply environment variable overrides
    /// Environment variables in format: NYAYA_SECTION__KEY=value
    pub fn apply_env_overrides(&mut self) {
        for (key, value) in std::env::vars() {
            if let Some(config_key) = key.strip_prefix("NYAYA_") {
                if let Err(e) = self.set_value_from_env(config_key, &value) {
                    tracing::warn!("Failed to apply env override {}: {}", key, e);
                }
            }
        }
    }

    fn set_value_from_env(&mut self, path: &str, value: &str) -> Result<()> {
        match path {
            "CORPUS__DATA_DIR" => {
                self.corpus.data_dir = PathBuf::from(value);
            }
            "ASSISTANT__ENABLED" => {
                self.assistant.enabled = parse_value(path, value)?;
            }
            "ASSISTANT__MODEL" => {
                self.assistant.model = value.to_string();
            }
            "RANKING__STANDARD_LIMIT" => {
                self.ranking.standard_limit = parse_value(path, value)?;
            }
            "RANKING__COMPARISON_LIMIT" => {
                self.ranking.comparison_limit = parse_value(path, value)?;
            }
            _ => {
                tracing::debug!("Unknown env config key: {}", path);
            }
        }
        Ok(())
    }

    /// Corpus directory with a leading `~/` expanded
    pub fn corpus_dir(&self) -> Result<PathBuf> {
        expand_path(&self.corpus.data_dir)
    }

    /// Get the default configuration file path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| NyayaError::Config("Cannot determine config directory".to_string()))?;

        Ok(config_dir.join("nyaya").join("config.toml"))
    }
}

fn parse_value<T: std::str::FromStr>(path: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| NyayaError::InvalidConfigValue {
            path: path.to_string(),
            message: format!(
                "Cannot parse '{}' as {}",
                value,
                std::any::type_name::<T>()
            ),
        })
}

/// Expand a leading `~/` to the home directory
pub fn expand_path(path: &Path) -> Result<PathBuf> {
    let path_str = path
        .to_str()
        .ok_or_else(|| NyayaError::Config("Invalid path encoding".to_string()))?;

    if let Some(stripped) = path_str.strip_prefix("~/") {
        let home = dirs::home_dir()
            .ok_or_else(|| NyayaError::Config("Cannot determine home directory".to_string()))?;
        Ok(home.join(stripped))
    } else {
        Ok(path.to_path_buf())
    }
}
