//! Intent training corpus.
//!
//! The on-disk shape follows the node-nlp corpus format:
//!
//! ```json
//! { "name": "...", "locale": "en-US",
//!   "data": [ { "intent": "greeting", "utterances": ["hello", "hi"] } ] }
//! ```

use std::path::Path;

use parley_core::{ParleyError, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

const BUILTIN_EN: &str = include_str!("../corpus/en.json");

/// One intent with its training utterances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusIntent {
    pub intent: String,
    #[serde(default)]
    pub utterances: Vec<String>,
    /// Canned answers. Carried for format compatibility; reply logic lives in
    /// handlers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default)]
    pub data: Vec<CorpusIntent>,
}

fn default_locale() -> String {
    "en-US".to_string()
}

impl Corpus {
    /// Parse a corpus from JSON text and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let corpus: Corpus = serde_json::from_str(json)?;
        corpus.validate()?;
        Ok(corpus)
    }

    /// Load and validate a corpus file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let corpus = Self::from_json(&content)?;
        info!(
            path = %path.display(),
            intents = corpus.data.len(),
            "Corpus loaded"
        );
        Ok(corpus)
    }

    /// The English corpus compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_EN)
    }

    /// Intent names in corpus order.
    pub fn intents(&self) -> impl Iterator<Item = &str> {
        self.data.iter().map(|d| d.intent.as_str())
    }

    /// Reject corpora that cannot train anything.
    pub fn validate(&self) -> Result<()> {
        if self.data.is_empty() {
            return Err(ParleyError::Corpus("corpus has no intents".to_string()));
        }
        if let Some(blank) = self.data.iter().find(|d| d.intent.trim().is_empty()) {
            return Err(ParleyError::Corpus(format!(
                "intent with empty name ({} utterances)",
                blank.utterances.len()
            )));
        }
        if self
            .data
            .iter()
            .all(|d| d.utterances.iter().all(|u| u.trim().is_empty()))
        {
            return Err(ParleyError::Corpus(
                "corpus has no training utterances".to_string(),
            ));
        }
        Ok(())
    }
}
