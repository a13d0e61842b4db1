//! Text analysis and intent classification for Parley.
//!
//! The chat engine only depends on the [`TextAnalyzer`] and
//! [`IntentClassifier`] traits. [`RuleAnalyzer`], [`CorpusClassifier`] and
//! [`PatternClassifier`] are self-contained implementations of them.

pub mod analyzer;
pub mod classifier;
pub mod corpus;
pub mod lexicon;
pub mod patterns;
pub mod ranking;
pub mod scoring;
pub mod sentiment;

pub use analyzer::{RuleAnalyzer, TextAnalyzer};
pub use classifier::{CorpusClassifier, IntentClassifier, LAST_INTENT_KEY};
pub use corpus::{Corpus, CorpusIntent};
pub use patterns::{PatternClassifier, ANSWER_INTENT};
pub use ranking::{best_sentence_for_intents, best_sentence_in_text, IntentTarget, LengthBounds};
pub use scoring::{intent_score, matches};
