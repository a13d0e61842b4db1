//! Ordered handler collection and fan-out dispatch.

use std::sync::Arc;

use parley_core::Utterance;
use parley_nlp::matches;
use tracing::debug;

use crate::error::ChatError;
use crate::handler::ReplyHandler;
use crate::session::Session;

/// Handlers in registration order.
///
/// Dispatch runs every handler whose intent the utterance carries with at
/// least the handler's minimum score, one after another, so later handlers
/// see the context changes of earlier ones.
#[derive(Default, Clone)]
pub struct HandlerRegistry {
    handlers: Vec<Arc<dyn ReplyHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler: impl ReplyHandler + 'static) {
        self.handlers.push(Arc::new(handler));
    }

    /// Register an already shared handler.
    pub fn register_shared(&mut self, handler: Arc<dyn ReplyHandler>) {
        self.handlers.push(handler);
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, handler: impl ReplyHandler + 'static) -> Self {
        self.register(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered intents, in order. Repeats when several handlers share one.
    pub fn intents(&self) -> Vec<&str> {
        self.handlers.iter().map(|h| h.intent()).collect()
    }

    /// Run every matching handler against `utterance` and collect replies.
    ///
    /// The first handler error aborts dispatch; handlers after it do not run.
    pub async fn execute(
        &self,
        utterance: &Utterance,
        session: &mut Session,
    ) -> Result<Vec<String>, ChatError> {
        let mut replies = Vec::new();

        for handler in &self.handlers {
            if !matches(&utterance.classifications, handler.intent(), handler.min_score()) {
                continue;
            }
            debug!(intent = handler.intent(), "Dispatching handler");
            let reply = handler.execute(&utterance.text, session).await?;
            replies.extend(reply.into_vec());
        }

        Ok(replies)
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("intents", &self.intents())
            .finish()
    }
}
