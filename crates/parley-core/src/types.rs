use serde::{Deserialize, Serialize};

// =============================================================================
// Classification
// =============================================================================

/// Name of the intent reported when nothing in the corpus matches well enough.
pub const NONE_INTENT: &str = "None";

/// One intent score produced by a classifier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Intent name, e.g. `"ask.preference"`.
    pub intent: String,
    /// Confidence in `[0, 1]`.
    pub score: f64,
}

impl Classification {
    pub fn new(intent: impl Into<String>, score: f64) -> Self {
        Self {
            intent: intent.into(),
            score,
        }
    }
}

/// A named entity extracted from an utterance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity kind, e.g. `"person"` or `"number"`.
    pub entity: String,
    /// The text span the entity was read from.
    pub source_text: String,
    /// Extraction confidence in `[0, 1]`.
    pub accuracy: f64,
}

// =============================================================================
// Utterance
// =============================================================================

/// A classified sentence. Produced by an intent classifier and treated as
/// read-only by everything downstream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    /// The sentence as it was classified.
    pub text: String,
    /// Every intent score, highest first.
    pub classifications: Vec<Classification>,
    /// Primary intent (`"None"` when nothing matched).
    pub intent: String,
    /// Score of the primary intent.
    pub score: f64,
    /// Sentiment in `[-1, 1]`.
    pub sentiment: f64,
    pub entities: Vec<Entity>,
}

impl Utterance {
    /// Build an utterance from raw classifications, deriving the primary
    /// intent from the highest score.
    pub fn from_classifications(text: impl Into<String>, classifications: Vec<Classification>) -> Self {
        let (intent, score) = classifications
            .iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .map(|c| (c.intent.clone(), c.score))
            .unwrap_or_else(|| (NONE_INTENT.to_string(), 0.0));

        Self {
            text: text.into(),
            classifications,
            intent,
            score,
            sentiment: 0.0,
            entities: Vec::new(),
        }
    }

    /// Best score recorded for `intent`, if the classifier reported it at all.
    pub fn score_for(&self, intent: &str) -> Option<f64> {
        self.classifications
            .iter()
            .filter(|c| c.intent == intent)
            .map(|c| c.score)
            .max_by(f64::total_cmp)
    }
}

// =============================================================================
// Lexical roots
// =============================================================================

/// Open-class word roots of a sentence, in order of appearance.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexicalRoots {
    pub nouns: Vec<String>,
    pub verbs: Vec<String>,
    pub adjectives: Vec<String>,
}

impl LexicalRoots {
    pub fn is_empty(&self) -> bool {
        self.nouns.is_empty() && self.verbs.is_empty() && self.adjectives.is_empty()
    }
}
