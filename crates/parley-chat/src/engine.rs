//! Conversation engine: segment, classify, dispatch, substitute.

use std::sync::Arc;

use parley_core::ConversationContext;
use parley_nlp::{IntentClassifier, TextAnalyzer};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::ChatError;
use crate::registry::HandlerRegistry;
use crate::session::Session;
use crate::substitution::substitute_all;

/// Input to one turn: raw text to be segmented, or sentences as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Text(String),
    Sentences(Vec<String>),
}

impl From<&str> for Input {
    fn from(s: &str) -> Self {
        Input::Text(s.to_string())
    }
}

impl From<String> for Input {
    fn from(s: String) -> Self {
        Input::Text(s)
    }
}

impl From<Vec<String>> for Input {
    fn from(v: Vec<String>) -> Self {
        Input::Sentences(v)
    }
}

impl TryFrom<Value> for Input {
    type Error = ChatError;

    /// Accepts a JSON string or an array of strings.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(Input::Text(s)),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    other => Err(ChatError::InvalidInput(format!(
                        "expected a string in the sentence list, got {}",
                        other
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Input::Sentences),
            other => Err(ChatError::InvalidInput(format!(
                "expected a string or a list of strings, got {}",
                other
            ))),
        }
    }
}

/// Drives one conversation.
///
/// Each engine owns its session; build one engine per conversation. The
/// classifier and analyzer can be shared between engines.
pub struct ChatEngine {
    classifier: Arc<dyn IntentClassifier>,
    registry: HandlerRegistry,
    session: Session,
    language: String,
}

impl ChatEngine {
    pub fn new(
        classifier: Arc<dyn IntentClassifier>,
        analyzer: Arc<dyn TextAnalyzer>,
        registry: HandlerRegistry,
    ) -> Self {
        Self::from_session(classifier, registry, Session::new(analyzer))
    }

    /// Engine whose random reply choices are reproducible.
    pub fn with_seed(
        classifier: Arc<dyn IntentClassifier>,
        analyzer: Arc<dyn TextAnalyzer>,
        registry: HandlerRegistry,
        seed: u64,
    ) -> Self {
        Self::from_session(classifier, registry, Session::with_seed(analyzer, seed))
    }

    fn from_session(
        classifier: Arc<dyn IntentClassifier>,
        registry: HandlerRegistry,
        session: Session,
    ) -> Self {
        info!(session = %session.id(), handlers = registry.len(), "Chat engine created");
        Self {
            classifier,
            registry,
            session,
            language: "en".to_string(),
        }
    }

    /// Language passed to the classifier.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Start from a restored context.
    pub fn with_context(mut self, context: ConversationContext) -> Self {
        self.session.set_context(context);
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn context(&self) -> &ConversationContext {
        self.session.context()
    }

    pub fn context_mut(&mut self) -> &mut ConversationContext {
        self.session.context_mut()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Run one turn and return the replies to send, in order.
    ///
    /// An empty result means "no reply". A classifier or handler failure
    /// aborts the turn; context changes made before it are kept.
    pub async fn respond(&mut self, input: impl Into<Input>) -> Result<Vec<String>, ChatError> {
        let sentences = match input.into() {
            Input::Text(text) => self.session.analyzer().sentences(&text),
            Input::Sentences(sentences) => sentences,
        };

        let mut replies = Vec::new();
        for sentence in &sentences {
            let utterance = self
                .classifier
                .process(&self.language, sentence, self.session.context_mut())
                .await
                .map_err(|e| ChatError::Classification(e.to_string()))?;

            debug!(
                utterance = %utterance.text,
                intent = %utterance.intent,
                score = utterance.score,
                sentiment = utterance.sentiment,
                entities = utterance.entities.len(),
                "Sentence classified"
            );

            replies.extend(self.registry.execute(&utterance, &mut self.session).await?);
        }

        let replies = substitute_all(replies, self.session.context());
        debug!(sentences = sentences.len(), replies = replies.len(), "Turn complete");
        Ok(replies)
    }

    /// [`respond`](Self::respond) for untyped input such as a decoded JSON
    /// message.
    pub async fn respond_value(&mut self, value: Value) -> Result<Vec<String>, ChatError> {
        let input = Input::try_from(value)?;
        self.respond(input).await
    }
}

impl std::fmt::Debug for ChatEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatEngine")
            .field("language", &self.language)
            .field("registry", &self.registry)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
