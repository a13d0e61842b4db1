//! Picking the sentence of a document that best matches a set of intents.

use parley_core::Result;
use tracing::debug;

use crate::analyzer::TextAnalyzer;
use crate::classifier::IntentClassifier;
use crate::scoring::intent_score;

/// An intent a candidate sentence should express, with its minimum score.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentTarget {
    pub intent: String,
    pub min_score: f64,
}

impl IntentTarget {
    pub fn new(intent: impl Into<String>, min_score: f64) -> Self {
        Self {
            intent: intent.into(),
            min_score,
        }
    }
}

/// Inclusive bounds, in characters, on candidate sentence length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    pub min_chars: usize,
    pub max_chars: usize,
}

impl Default for LengthBounds {
    fn default() -> Self {
        Self {
            min_chars: 40,
            max_chars: 500,
        }
    }
}

impl LengthBounds {
    pub fn contains(&self, sentence: &str) -> bool {
        let len = sentence.chars().count();
        len > 0 && len >= self.min_chars && len <= self.max_chars
    }
}

/// The sentence whose summed [`intent_score`] over `targets` is highest.
///
/// Sentences outside `bounds` are skipped. Only a strictly higher sum
/// replaces the current best, so the first sentence wins ties. Returns
/// `None` when no sentence scores above zero.
pub async fn best_sentence_for_intents(
    sentences: &[String],
    targets: &[IntentTarget],
    classifier: &dyn IntentClassifier,
    bounds: LengthBounds,
) -> Result<Option<String>> {
    let mut best: Option<&String> = None;
    let mut best_score = 0.0;

    for sentence in sentences.iter().filter(|s| bounds.contains(s)) {
        let classifications = classifier.classify(sentence).await?;
        let total: f64 = targets
            .iter()
            .map(|t| intent_score(&classifications, &t.intent, t.min_score))
            .sum();
        debug!(sentence = %sentence, score = total, "Ranked sentence");

        if total > best_score {
            best = Some(sentence);
            best_score = total;
        }
    }

    debug!(score = best_score, found = best.is_some(), "Best sentence selected");
    Ok(best.cloned())
}

/// Segment `text` and rank its sentences with [`best_sentence_for_intents`].
pub async fn best_sentence_in_text(
    analyzer: &dyn TextAnalyzer,
    text: &str,
    targets: &[IntentTarget],
    classifier: &dyn IntentClassifier,
    bounds: LengthBounds,
) -> Result<Option<String>> {
    let sentences = analyzer.sentences(text);
    best_sentence_for_intents(&sentences, targets, classifier, bounds).await
}
