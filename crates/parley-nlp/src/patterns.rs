//! Regex-based sentence classification.
//!
//! A [`PatternClassifier`] maps compiled patterns to intents with a base
//! confidence. It needs no training and backs the `answer` detection used
//! when ranking knowledge sentences.

use std::sync::LazyLock;

use async_trait::async_trait;
use parley_core::{Classification, ConversationContext, Result, Utterance};
use regex::Regex;

use crate::classifier::IntentClassifier;
use crate::sentiment::sentiment;

/// Intent reported for explanatory or definitional sentences.
pub const ANSWER_INTENT: &str = "answer";

/// A single compiled regex pattern linked to an intent.
pub struct IntentPattern {
    pub regex: Regex,
    pub intent: String,
    pub base_confidence: f64,
}

/// Collection of intent patterns, compiled once and reused.
pub struct PatternClassifier {
    patterns: Vec<IntentPattern>,
}

static ANSWER_PATTERNS: &[(&str, f64)] = &[
    (r"(?i)\bthe\s+answer\s+is\b", 0.95),
    // Definitions: "Rust is a language", "Cats are the ..."
    (r"(?i)^\s*[\w\s,'()-]{1,80}?\s+(?:is|are|was|were)\s+(?:a|an|the)\b", 0.9),
    (r"(?i)\bis\s+defined\s+as\b", 0.9),
    (r"(?i)\brefers?\s+to\b", 0.85),
    (r"(?i)\bthis\s+(?:happens|is)\s+because\b", 0.85),
    (r"(?i)\bbecause(?:\s+of)?\b", 0.8),
    (r"(?i)\b(?:also\s+)?known\s+as\b", 0.7),
    (r"(?i)^\s*(?:yes|no)\s*,?\s+because\b", 0.75),
];

static ANSWER_SET: LazyLock<Vec<(Regex, f64)>> = LazyLock::new(|| {
    ANSWER_PATTERNS
        .iter()
        .map(|(pat, conf)| (Regex::new(pat).expect("Invalid answer regex"), *conf))
        .collect()
});

impl PatternClassifier {
    pub fn new(patterns: Vec<IntentPattern>) -> Self {
        Self { patterns }
    }

    /// Classifier recognising sentences that answer or explain something.
    pub fn answers() -> Self {
        let patterns = ANSWER_SET
            .iter()
            .map(|(regex, conf)| IntentPattern {
                regex: regex.clone(),
                intent: ANSWER_INTENT.to_string(),
                base_confidence: *conf,
            })
            .collect();
        Self { patterns }
    }

    /// Add a pattern. Fails on an invalid regex.
    pub fn push(&mut self, pattern: &str, intent: &str, confidence: f64) -> Result<()> {
        let regex = Regex::new(pattern)
            .map_err(|e| parley_core::ParleyError::Classifier(e.to_string()))?;
        self.patterns.push(IntentPattern {
            regex,
            intent: intent.to_string(),
            base_confidence: confidence.clamp(0.0, 1.0),
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Best confidence per matched intent, sorted by confidence descending.
    pub fn detect(&self, text: &str) -> Vec<Classification> {
        let mut out: Vec<Classification> = Vec::new();

        for pattern in &self.patterns {
            if !pattern.regex.is_match(text) {
                continue;
            }
            match out.iter_mut().find(|c| c.intent == pattern.intent) {
                Some(existing) => existing.score = existing.score.max(pattern.base_confidence),
                None => out.push(Classification::new(
                    pattern.intent.clone(),
                    pattern.base_confidence,
                )),
            }
        }

        out.sort_by(|a, b| b.score.total_cmp(&a.score));
        out
    }
}

#[async_trait]
impl IntentClassifier for PatternClassifier {
    async fn process(
        &self,
        _language: &str,
        text: &str,
        _context: &mut ConversationContext,
    ) -> Result<Utterance> {
        let mut utterance = Utterance::from_classifications(text, self.detect(text));
        utterance.sentiment = sentiment(text);
        Ok(utterance)
    }

    async fn classify(&self, text: &str) -> Result<Vec<Classification>> {
        Ok(self.detect(text))
    }
}
