//! Intent classification.
//!
//! [`IntentClassifier`] is the boundary the chat engine consumes.
//! [`CorpusClassifier`] is a lexical-overlap implementation trained from a
//! [`Corpus`].

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use parley_core::{
    Classification, ConversationContext, Entity, ParleyError, Result, Utterance, NONE_INTENT,
};
use tracing::{debug, info};

use crate::analyzer::{tokenize, RuleAnalyzer, TextAnalyzer};
use crate::corpus::Corpus;
use crate::sentiment::sentiment;

/// Scratch field updated with the primary intent on every `process` call.
pub const LAST_INTENT_KEY: &str = "last_intent";

/// Intent classification service.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    /// Classify one sentence in the context of a conversation. May read and
    /// write the context.
    async fn process(
        &self,
        language: &str,
        text: &str,
        context: &mut ConversationContext,
    ) -> Result<Utterance>;

    /// Stateless classification, highest score first.
    async fn classify(&self, text: &str) -> Result<Vec<Classification>>;
}

/// Softmax temperature applied to raw similarity scores. A gap of 0.1
/// between two intents shrinks the weaker one's share by a factor of e^2.
pub const SOFTMAX_TEMPERATURE: f64 = 0.05;

type TokenSet = HashSet<String>;

struct TrainedIntent {
    intent: String,
    samples: Vec<TokenSet>,
}

/// Classifier that scores a sentence by its word overlap with each intent's
/// training utterances.
///
/// The similarity of two utterances is the Dice coefficient of their
/// lowercase token sets, and an intent's raw score is its best sample. Raw
/// scores are turned into a softmax distribution (temperature
/// [`SOFTMAX_TEMPERATURE`]) and each intent reports its raw score weighted by
/// its share. A clear leader keeps nearly all of its raw score while
/// runners-up fall far below any reply threshold.
pub struct CorpusClassifier {
    intents: Vec<TrainedIntent>,
    locale: String,
    none_threshold: f64,
    analyzer: Arc<dyn TextAnalyzer>,
}

impl CorpusClassifier {
    /// Train from a corpus. Fails on a corpus without usable utterances.
    pub fn train(corpus: &Corpus) -> Result<Self> {
        corpus.validate()?;

        let intents: Vec<TrainedIntent> = corpus
            .data
            .iter()
            .map(|entry| TrainedIntent {
                intent: entry.intent.clone(),
                samples: entry
                    .utterances
                    .iter()
                    .map(|u| token_set(u))
                    .filter(|set| !set.is_empty())
                    .collect(),
            })
            .filter(|t| !t.samples.is_empty())
            .collect();

        if intents.is_empty() {
            return Err(ParleyError::Corpus(
                "no intent has a tokenizable utterance".to_string(),
            ));
        }

        info!(
            corpus = %corpus.name,
            intents = intents.len(),
            samples = intents.iter().map(|t| t.samples.len()).sum::<usize>(),
            "Classifier trained"
        );

        Ok(Self {
            intents,
            locale: corpus.locale.clone(),
            none_threshold: 0.5,
            analyzer: Arc::new(RuleAnalyzer::new()),
        })
    }

    /// Minimum top score for the primary intent to be reported.
    pub fn with_none_threshold(mut self, threshold: f64) -> Self {
        self.none_threshold = threshold;
        self
    }

    /// Analyzer used for person entities.
    pub fn with_analyzer(mut self, analyzer: Arc<dyn TextAnalyzer>) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn none_threshold(&self) -> f64 {
        self.none_threshold
    }

    fn scores(&self, text: &str) -> Vec<Classification> {
        let input = token_set(text);
        if input.is_empty() {
            return Vec::new();
        }

        let raw: Vec<(&str, f64)> = self
            .intents
            .iter()
            .map(|t| {
                let best = t
                    .samples
                    .iter()
                    .map(|s| dice(&input, s))
                    .fold(0.0, f64::max);
                (t.intent.as_str(), best)
            })
            .collect();

        let top = raw.iter().map(|(_, s)| *s).fold(0.0, f64::max);
        if top <= 0.0 {
            return Vec::new();
        }

        let weights: Vec<f64> = raw
            .iter()
            .map(|(_, s)| ((s - top) / SOFTMAX_TEMPERATURE).exp())
            .collect();
        let total: f64 = weights.iter().sum();

        let mut out: Vec<Classification> = raw
            .into_iter()
            .zip(weights)
            .filter(|((_, s), _)| *s > 0.0)
            .map(|((intent, s), w)| Classification::new(intent, s * w / total))
            .collect();
        out.sort_by(|a, b| b.score.total_cmp(&a.score));
        out
    }

    fn entities(&self, text: &str) -> Vec<Entity> {
        let mut entities = Vec::new();

        let names = self.analyzer.proper_nouns(text);
        if !names.is_empty() {
            entities.push(Entity {
                entity: "person".to_string(),
                source_text: names,
                accuracy: 0.8,
            });
        }

        entities.extend(tokenize(text).into_iter().filter(|t| t.is_numeric()).map(|t| Entity {
            entity: "number".to_string(),
            source_text: t.text,
            accuracy: 1.0,
        }));

        entities
    }
}

#[async_trait]
impl IntentClassifier for CorpusClassifier {
    async fn process(
        &self,
        language: &str,
        text: &str,
        context: &mut ConversationContext,
    ) -> Result<Utterance> {
        if !self.locale.starts_with(language) {
            debug!(language, locale = %self.locale, "Language differs from corpus locale");
        }

        let classifications = self.scores(text);
        let mut utterance = Utterance::from_classifications(text, classifications);
        if utterance.score < self.none_threshold {
            utterance.intent = NONE_INTENT.to_string();
            utterance.score = 0.0;
        }
        utterance.sentiment = sentiment(text);
        utterance.entities = self.entities(text);

        context.set(LAST_INTENT_KEY, utterance.intent.clone());
        Ok(utterance)
    }

    async fn classify(&self, text: &str) -> Result<Vec<Classification>> {
        Ok(self.scores(text))
    }
}

fn token_set(text: &str) -> TokenSet {
    tokenize(text).into_iter().map(|t| t.lower).collect()
}

fn dice(a: &TokenSet, b: &TokenSet) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let shared = a.intersection(b).count();
    2.0 * shared as f64 / (a.len() + b.len()) as f64
}
