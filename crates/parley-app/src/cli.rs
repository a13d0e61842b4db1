//! CLI argument definitions for the Parley application.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use parley_core::ParleyConfig;
use std::path::PathBuf;

/// Parley: a rule-and-corpus chat bot for the terminal.
#[derive(Parser, Debug)]
#[command(name = "parley", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Intent corpus (node-nlp JSON format). Defaults to the built-in corpus.
    #[arg(long = "corpus")]
    pub corpus: Option<PathBuf>,

    /// Directory of `<topic>.txt` documents used for "what is" questions.
    #[arg(long = "knowledge-dir")]
    pub knowledge_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// JSON file the conversation context is restored from and saved to.
    #[arg(long = "context-file")]
    pub context_file: Option<PathBuf>,

    /// Run the messages of a JSON-lines file instead of reading stdin.
    #[arg(long = "script")]
    pub script: Option<PathBuf>,

    /// Seed for reproducible reply selection.
    #[arg(long = "seed")]
    pub seed: Option<u64>,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > PARLEY_CONFIG env var > ~/.parley/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("PARLEY_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config: &ParleyConfig) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config.general.log_level.clone())
    }

    /// Priority: --corpus flag > config file value. `None` means built-in.
    pub fn resolve_corpus_path(&self, config: &ParleyConfig) -> Option<PathBuf> {
        self.corpus
            .clone()
            .or_else(|| config.classifier.corpus_path.as_ref().map(PathBuf::from))
    }

    /// Priority: --knowledge-dir flag > config file value.
    pub fn resolve_knowledge_dir(&self, config: &ParleyConfig) -> Option<PathBuf> {
        self.knowledge_dir
            .clone()
            .or_else(|| config.knowledge.directory.as_ref().map(PathBuf::from))
    }

    /// Priority: --context-file flag > config file value.
    pub fn resolve_context_file(&self, config: &ParleyConfig) -> Option<PathBuf> {
        self.context_file
            .clone()
            .or_else(|| config.general.context_file.as_ref().map(PathBuf::from))
    }

    /// Priority: --seed flag > config file value.
    pub fn resolve_seed(&self, config: &ParleyConfig) -> Option<u64> {
        self.seed.or(config.engine.seed)
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".parley").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".parley").join("config.toml");
    }
    PathBuf::from("config.toml")
}
