//! Document lookup for "what is" questions.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parley_nlp::{lexicon, TextAnalyzer};
use tracing::{debug, info};

use crate::error::ChatError;

/// Source of reference documents.
#[async_trait]
pub trait KnowledgeSource: Send + Sync {
    /// Raw text of a document about `query`, if one is known.
    async fn lookup(&self, query: &str) -> Result<Option<String>, ChatError>;
}

/// Source that knows nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoKnowledge;

#[async_trait]
impl KnowledgeSource for NoKnowledge {
    async fn lookup(&self, _query: &str) -> Result<Option<String>, ChatError> {
        Ok(None)
    }
}

/// Source backed by a directory of `<topic>.txt` files.
///
/// The topic of a query is its proper nouns, or failing that its noun
/// roots, lowercased and joined with `_`: "What is Rust?" reads `rust.txt`,
/// "What are black holes?" reads `hole.txt` when "black" is an adjective.
pub struct DirectoryKnowledge<A> {
    root: PathBuf,
    analyzer: A,
}

impl<A: TextAnalyzer> DirectoryKnowledge<A> {
    pub fn new(root: impl Into<PathBuf>, analyzer: A) -> Self {
        let root = root.into();
        info!(root = %root.display(), "Knowledge directory configured");
        Self { root, analyzer }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File stem looked up for `query`; `None` when the query names nothing.
    pub fn topic(&self, query: &str) -> Option<String> {
        let proper = self.analyzer.proper_nouns(query);
        let words: Vec<String> = if proper.is_empty() {
            self.analyzer
                .lexical_roots(query)
                .nouns
                .into_iter()
                .filter(|noun| !lexicon::is_personal_pronoun(noun))
                .collect()
        } else {
            proper.split_whitespace().map(str::to_lowercase).collect()
        };

        let slug = words
            .iter()
            .map(|w| {
                w.chars()
                    .filter(|c| c.is_alphanumeric())
                    .flat_map(char::to_lowercase)
                    .collect::<String>()
            })
            .filter(|w| !w.is_empty())
            .collect::<Vec<_>>()
            .join("_");

        (!slug.is_empty()).then_some(slug)
    }
}

#[async_trait]
impl<A: TextAnalyzer> KnowledgeSource for DirectoryKnowledge<A> {
    async fn lookup(&self, query: &str) -> Result<Option<String>, ChatError> {
        let Some(topic) = self.topic(query) else {
            return Ok(None);
        };
        let path = self.root.join(format!("{}.txt", topic));

        match tokio::fs::read_to_string(&path).await {
            Ok(text) => {
                debug!(path = %path.display(), bytes = text.len(), "Knowledge document found");
                Ok(Some(text))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No knowledge document");
                Ok(None)
            }
            Err(e) => Err(ChatError::Knowledge(format!("{}: {}", path.display(), e))),
        }
    }
}
