//! Stock reply logic.
//!
//! [`default_registry`] wires one handler per conversational intent of the
//! built-in corpus: greetings, names, small talk, yes/no and preference
//! questions with consistent answers, and "what is" lookups.

use std::sync::Arc;

use async_trait::async_trait;
use parley_core::config::KnowledgeConfig;
use parley_nlp::{
    best_sentence_in_text, IntentClassifier, IntentTarget, LengthBounds, PatternClassifier,
    ANSWER_INTENT,
};
use tracing::{debug, warn};

use crate::error::ChatError;
use crate::handler::{FnHandler, Reply, ReplyHandler};
use crate::knowledge::KnowledgeSource;
use crate::registry::HandlerRegistry;
use crate::session::Session;

/// Scratch field holding the user's name.
pub const USER_NAME_KEY: &str = "user_name";
/// Scratch field holding the last looked-up document.
pub const LAST_RESULT_KEY: &str = "last_result";

pub const UNKNOWN_ANSWER: &str = "I don't Know :(";
pub const ABOUT_WHAT: &str = "About What?";

const GREETINGS: &[&str] = &["Good day!", "Greetings!", "Hi!"];
const NAMED_GREETINGS: &[&str] = &["Good day {{user_name}}", "Greetings {{user_name}}"];
const SELF_INTRODUCTIONS: &[&str] = &[
    "My name is ExMachine2120",
    "I am ExMachine2120 The greatest Robot Ever!",
];
const STATES: &[&str] = &["I am fine.", "I am feeling fine.", "I'm good, thanks."];
const YES_OR_NO: &[&str] = &["No", "Yes", "Not.", "Offcourse!"];
pub const PREFERENCES: &[&str] = &[
    "Yes i like it!",
    "I dont like it.",
    "it is a mess",
    "it is Aweasome!",
    "It is the best thing i ever seen",
    "It is the worst thing i ever seen",
];
const FAREWELLS: &[&str] = &["Good bye!", "See you soon.", "Until next time."];
const NAMED_FAREWELLS: &[&str] = &[
    "Good Bye {{user_name}}",
    "Until Next time {{user_name}}",
    "See you soon. {{user_name}}",
];

/// Handlers for every built-in intent, backed by `knowledge` for "what is"
/// questions.
pub fn default_registry(knowledge: Arc<dyn KnowledgeSource>) -> HandlerRegistry {
    default_registry_with(WhatIsHandler::new(knowledge))
}

/// [`default_registry`] with a preconfigured "what is" handler.
pub fn default_registry_with(what_is: WhatIsHandler) -> HandlerRegistry {
    HandlerRegistry::new()
        .with(FnHandler::new("greeting", 0.2, greeting))
        .with(FnHandler::new("declare.name", 0.2, declare_name))
        .with(FnHandler::new("ask.name", 0.4, |_, s| Ok(pick(s, SELF_INTRODUCTIONS))))
        .with(FnHandler::new("ask.state", 0.4, |_, s| Ok(pick(s, STATES))))
        .with(what_is)
        .with(FnHandler::new("ask.tellmore", 0.2, tell_more))
        .with(FnHandler::new("ask.yes_or_no", 0.2, |text, s| {
            Ok(consistent_reply(text, s, YES_OR_NO))
        }))
        .with(FnHandler::new("ask.preference", 0.2, |text, s| {
            Ok(consistent_reply(text, s, PREFERENCES))
        }))
        .with(FnHandler::new("goodbye", 0.4, goodbye))
}

fn pick(session: &mut Session, pool: &[&str]) -> Reply {
    Reply::from(session.random_choice(pool).map(|s| s.to_string()))
}

/// Pool extended with the personalised variants once the user is known.
fn personalised<'a>(session: &Session, base: &[&'a str], named: &[&'a str]) -> Vec<&'a str> {
    let mut pool = base.to_vec();
    if session.context().get_str(USER_NAME_KEY).is_some() {
        pool.extend_from_slice(named);
    }
    pool
}

fn remember_name(text: &str, session: &mut Session) {
    let name = session.analyzer().proper_nouns(text);
    if !name.is_empty() {
        debug!(name = %name, "User name set");
        session.context_mut().set(USER_NAME_KEY, name);
    }
}

fn greeting(text: &str, session: &mut Session) -> Result<Reply, ChatError> {
    remember_name(text, session);
    let pool = personalised(session, GREETINGS, NAMED_GREETINGS);
    Ok(pick(session, &pool))
}

fn declare_name(text: &str, session: &mut Session) -> Result<Reply, ChatError> {
    remember_name(text, session);
    Ok(Reply::Silent)
}

fn goodbye(_text: &str, session: &mut Session) -> Result<Reply, ChatError> {
    let pool = personalised(session, FAREWELLS, NAMED_FAREWELLS);
    Ok(pick(session, &pool))
}

fn tell_more(_text: &str, session: &mut Session) -> Result<Reply, ChatError> {
    let Some(document) = session.context().get_str(LAST_RESULT_KEY).map(str::to_string) else {
        return Ok(Reply::from(ABOUT_WHAT));
    };
    let sentences = session.analyzer().sentences(&document);
    let rest = sentences.get(1..).unwrap_or_default();
    Ok(Reply::from(session.random_choice(rest).cloned()))
}

/// Reuse the reply given to an equivalent sentence, or pick and remember one.
fn consistent_reply(text: &str, session: &mut Session, pool: &[&str]) -> Reply {
    if let Some(remembered) = session.recall_memory(text) {
        return Reply::One(remembered);
    }
    match session.random_choice(pool) {
        Some(reply) => {
            let reply = reply.to_string();
            session.record_memory(text, reply.clone());
            Reply::One(reply)
        }
        None => Reply::Silent,
    }
}

/// Answers "what is" questions from a [`KnowledgeSource`].
///
/// The document found for the sentence is stored in `last_result` and the
/// sentence of it that reads most like an answer is returned.
pub struct WhatIsHandler {
    knowledge: Arc<dyn KnowledgeSource>,
    classifier: Arc<dyn IntentClassifier>,
    targets: Vec<IntentTarget>,
    bounds: LengthBounds,
}

impl WhatIsHandler {
    pub const INTENT: &'static str = "ask.whatis";

    pub fn new(knowledge: Arc<dyn KnowledgeSource>) -> Self {
        Self {
            knowledge,
            classifier: Arc::new(PatternClassifier::answers()),
            targets: vec![IntentTarget::new(ANSWER_INTENT, 0.6)],
            bounds: LengthBounds::default(),
        }
    }

    /// Apply sentence length bounds and the answer threshold from config.
    pub fn with_settings(mut self, settings: &KnowledgeConfig) -> Self {
        self.bounds = LengthBounds {
            min_chars: settings.min_sentence_chars,
            max_chars: settings.max_sentence_chars,
        };
        self.targets = vec![IntentTarget::new(ANSWER_INTENT, settings.answer_threshold)];
        self
    }

    /// Rank document sentences with another classifier and targets.
    pub fn with_classifier(
        mut self,
        classifier: Arc<dyn IntentClassifier>,
        targets: Vec<IntentTarget>,
    ) -> Self {
        self.classifier = classifier;
        self.targets = targets;
        self
    }
}

#[async_trait]
impl ReplyHandler for WhatIsHandler {
    fn intent(&self) -> &str {
        Self::INTENT
    }

    fn min_score(&self) -> f64 {
        0.2
    }

    async fn execute(&self, text: &str, session: &mut Session) -> Result<Reply, ChatError> {
        let document = match self.knowledge.lookup(text).await {
            Ok(Some(document)) => document,
            Ok(None) => return Ok(Reply::from(UNKNOWN_ANSWER)),
            Err(e) => {
                warn!(error = %e, "Knowledge lookup failed");
                return Ok(Reply::from(UNKNOWN_ANSWER));
            }
        };

        let analyzer = session.analyzer_handle();
        let best = best_sentence_in_text(
            analyzer.as_ref(),
            &document,
            &self.targets,
            self.classifier.as_ref(),
            self.bounds,
        )
        .await
        .map_err(|e| ChatError::handler(Self::INTENT, e.to_string()))?;

        session.context_mut().set(LAST_RESULT_KEY, document);
        Ok(Reply::from(best))
    }
}
