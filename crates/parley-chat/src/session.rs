//! Per-conversation state handed to reply handlers.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parley_core::ConversationContext;
use parley_nlp::TextAnalyzer;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use tracing::debug;
use uuid::Uuid;

use crate::memory::signature;

/// One conversation: its context, the analyzer used for memory signatures,
/// and the random source for reply selection.
///
/// A session is owned by exactly one engine and is never shared between
/// conversations.
pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    context: ConversationContext,
    analyzer: Arc<dyn TextAnalyzer>,
    rng: StdRng,
}

impl Session {
    /// Create a session seeded from the OS.
    pub fn new(analyzer: Arc<dyn TextAnalyzer>) -> Self {
        Self::with_rng(analyzer, StdRng::from_os_rng())
    }

    /// Create a session with a deterministic reply sequence.
    pub fn with_seed(analyzer: Arc<dyn TextAnalyzer>, seed: u64) -> Self {
        Self::with_rng(analyzer, StdRng::seed_from_u64(seed))
    }

    fn with_rng(analyzer: Arc<dyn TextAnalyzer>, rng: StdRng) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            context: ConversationContext::new(),
            analyzer,
            rng,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut ConversationContext {
        &mut self.context
    }

    /// Replace the context, e.g. with a restored snapshot.
    pub fn set_context(&mut self, context: ConversationContext) {
        self.context = context;
    }

    pub fn analyzer(&self) -> &dyn TextAnalyzer {
        self.analyzer.as_ref()
    }

    /// Shared handle to the analyzer.
    pub fn analyzer_handle(&self) -> Arc<dyn TextAnalyzer> {
        Arc::clone(&self.analyzer)
    }

    /// Uniformly random element of `items`, `None` when empty.
    pub fn random_choice<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    /// Remember `reply` as the answer to `sentence` and to every sentence
    /// with the same signature. Sentences without roots are not remembered.
    pub fn record_memory(&mut self, sentence: &str, reply: impl Into<String>) {
        let key = signature(self.analyzer.as_ref(), sentence);
        if key.is_empty() {
            debug!(sentence, "No signature, memory not recorded");
            return;
        }
        debug!(signature = %key, "Recording memory");
        self.context.remember(key, reply, sentence);
    }

    /// Reply previously recorded for a sentence with the same signature.
    pub fn recall_memory(&self, sentence: &str) -> Option<String> {
        if self.context.memory.is_empty() {
            return None;
        }
        let key = signature(self.analyzer.as_ref(), sentence);
        if key.is_empty() {
            return None;
        }
        self.context.recall(&key).map(str::to_string)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("started_at", &self.started_at)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}
