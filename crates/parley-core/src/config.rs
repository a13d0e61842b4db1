use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ParleyError, Result};

/// Top-level configuration for the Parley application.
///
/// Loaded from `~/.parley/config.toml` by default. Every section and field
/// is optional in the file; missing values fall back to defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParleyConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
}

impl ParleyConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ParleyConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ParleyError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    /// Optional path of a JSON context snapshot kept between runs.
    pub context_file: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            context_file: None,
        }
    }
}

/// Conversation engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Language code handed to the classifier.
    pub language: String,
    /// Fixed RNG seed for reply selection. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            seed: None,
        }
    }
}

/// Intent classifier settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Path of a JSON intent corpus. `None` uses the built-in corpus.
    pub corpus_path: Option<String>,
    /// Minimum top score for the primary intent; below it the primary intent
    /// is reported as `"None"`.
    pub none_threshold: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            corpus_path: None,
            none_threshold: 0.5,
        }
    }
}

/// Knowledge lookup settings used by the `ask.whatis` reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeConfig {
    /// Directory of `<topic>.txt` documents. `None` disables lookups.
    pub directory: Option<String>,
    /// Shortest sentence considered as an answer.
    pub min_sentence_chars: usize,
    /// Longest sentence considered as an answer.
    pub max_sentence_chars: usize,
    /// Minimum `answer` score for a sentence to count.
    pub answer_threshold: f64,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            directory: None,
            min_sentence_chars: 40,
            max_sentence_chars: 500,
            answer_threshold: 0.6,
        }
    }
}
